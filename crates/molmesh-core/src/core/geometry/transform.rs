use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Unit, Vector3};
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("Cannot orient a primitive along degenerate direction {direction:?}")]
pub struct DegenerateDirectionError {
    pub direction: Vector3<f64>,
}

/// An affine transform together with its precomputed normal matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
    normal_matrix: Matrix3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_matrix(Matrix4::identity())
    }

    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear);
        Self {
            matrix,
            normal_matrix,
        }
    }

    pub fn translation(offset: &Vector3<f64>) -> Self {
        Self::from_matrix(Matrix4::new_translation(offset))
    }

    pub fn scaling(factors: &Vector3<f64>) -> Self {
        Self::from_matrix(Matrix4::new_nonuniform_scaling(factors))
    }

    pub fn uniform_scaling(factor: f64) -> Self {
        Self::from_matrix(Matrix4::new_scaling(factor))
    }

    pub fn rotation(rotation: &Rotation3<f64>) -> Self {
        Self::from_matrix(rotation.to_homogeneous())
    }

    /// Returns the transform that applies `self` first and `next` afterwards.
    pub fn then(&self, next: &Transform) -> Transform {
        Self::from_matrix(next.matrix * self.matrix)
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    /// Zero normals stay zero; anything else comes back unit length.
    pub fn transform_normal(&self, normal: &Vector3<f64>) -> Vector3<f64> {
        (self.normal_matrix * normal)
            .try_normalize(0.0)
            .unwrap_or(*normal)
    }
}

/// Normalizes `v`, rejecting zero-length and non-finite input.
pub fn direction(v: &Vector3<f64>) -> Result<Unit<Vector3<f64>>, DegenerateDirectionError> {
    if !v.iter().all(|c| c.is_finite()) {
        return Err(DegenerateDirectionError { direction: *v });
    }
    Unit::try_new(*v, f64::EPSILON).ok_or(DegenerateDirectionError { direction: *v })
}

/// Rotation taking `from` onto `to`, including the anti-parallel case which
/// `Rotation3::rotation_between` leaves undefined.
pub fn rotation_to_align(
    from: &Unit<Vector3<f64>>,
    to: &Unit<Vector3<f64>>,
) -> Rotation3<f64> {
    Rotation3::rotation_between(from, to)
        .unwrap_or_else(|| Rotation3::from_axis_angle(&perpendicular(from), PI))
}

fn perpendicular(v: &Unit<Vector3<f64>>) -> Unit<Vector3<f64>> {
    let helper = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    Unit::new_normalize(v.cross(&helper))
}

/// Places a canonical +Z-aligned primitive.
///
/// The primitive is scaled per axis by `scale`, rotated so its +Z axis points along
/// `forward`, rolled by `roll` radians about `forward`, and finally translated to `center`.
pub fn orient(
    center: &Point3<f64>,
    scale: &Vector3<f64>,
    forward: &Vector3<f64>,
    roll: f64,
) -> Result<Transform, DegenerateDirectionError> {
    let axis = direction(forward)?;
    let align = rotation_to_align(&Vector3::z_axis(), &axis);
    let roll_rotation = Rotation3::from_axis_angle(&axis, roll);

    Ok(Transform::scaling(scale)
        .then(&Transform::rotation(&(roll_rotation * align)))
        .then(&Transform::translation(&center.coords)))
}
