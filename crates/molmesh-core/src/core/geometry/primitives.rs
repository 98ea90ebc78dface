use super::mesh::{Mesh, Triangle};
use super::transform::{DegenerateDirectionError, Transform, orient};
use nalgebra::{Point3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::LazyLock;

pub const DEFAULT_SPHERE_LAT_BANDS: u32 = 12;
pub const DEFAULT_SPHERE_LON_BANDS: u32 = 24;
pub const DEFAULT_CYLINDER_SIDES: u32 = 24;

const MIN_LAT_BANDS: u32 = 2;
const MIN_LON_BANDS: u32 = 3;
const MIN_CYLINDER_SIDES: u32 = 3;

static DEFAULT_PRIMITIVES: LazyLock<Primitives> = LazyLock::new(|| {
    Primitives::new(
        DEFAULT_SPHERE_LAT_BANDS,
        DEFAULT_SPHERE_LON_BANDS,
        DEFAULT_CYLINDER_SIDES,
    )
});

/// Generates a UV sphere of radius 1 centered at the origin with smoothed normals.
///
/// Pole rows are emitted as single triangles so no zero-area faces appear, and seam
/// vertices are computed from the same band index so they weld exactly.
pub fn unit_sphere(lat_bands: u32, lon_bands: u32) -> Mesh {
    let lat_bands = lat_bands.max(MIN_LAT_BANDS);
    let lon_bands = lon_bands.max(MIN_LON_BANDS);

    let point = |lat: u32, lon: u32| -> Point3<f64> {
        if lat == 0 {
            return Point3::new(0.0, 0.0, -1.0);
        }
        if lat == lat_bands {
            return Point3::new(0.0, 0.0, 1.0);
        }
        let theta = -FRAC_PI_2 + PI * lat as f64 / lat_bands as f64;
        let phi = TAU * (lon % lon_bands) as f64 / lon_bands as f64;
        Point3::new(theta.cos() * phi.cos(), theta.cos() * phi.sin(), theta.sin())
    };

    let mut mesh = Mesh::new();
    for i in 0..lat_bands {
        for j in 0..lon_bands {
            let p00 = point(i, j);
            let p01 = point(i, j + 1);
            let p10 = point(i + 1, j);
            let p11 = point(i + 1, j + 1);
            if i != lat_bands - 1 {
                mesh.push(Triangle::new(p00, p11, p10));
            }
            if i != 0 {
                mesh.push(Triangle::new(p00, p01, p11));
            }
        }
    }
    mesh.smooth_normals();
    mesh
}

/// Generates a cylinder of radius 1 around the +Z axis spanning `z` in `[-0.5, 0.5]`.
pub fn unit_cylinder(sides: u32, capped: bool) -> Mesh {
    let sides = sides.max(MIN_CYLINDER_SIDES);
    let ring: Vec<(f64, f64)> = (0..sides)
        .map(|j| {
            let a = TAU * j as f64 / sides as f64;
            (a.cos(), a.sin())
        })
        .collect();

    let bottom_center = Point3::new(0.0, 0.0, -0.5);
    let top_center = Point3::new(0.0, 0.0, 0.5);

    let mut mesh = Mesh::new();
    for j in 0..ring.len() {
        let (x0, y0) = ring[j];
        let (x1, y1) = ring[(j + 1) % ring.len()];
        let p00 = Point3::new(x0, y0, -0.5);
        let p01 = Point3::new(x1, y1, -0.5);
        let p10 = Point3::new(x0, y0, 0.5);
        let p11 = Point3::new(x1, y1, 0.5);
        mesh.push(Triangle::new(p00, p01, p11));
        mesh.push(Triangle::new(p00, p11, p10));
        if capped {
            mesh.push(Triangle::new(top_center, p10, p11));
            mesh.push(Triangle::new(bottom_center, p01, p00));
        }
    }
    mesh
}

/// Immutable sphere and cylinder templates that are copied for every instance.
#[derive(Debug, Clone)]
pub struct Primitives {
    sphere: Mesh,
    cylinder: Mesh,
}

impl Primitives {
    pub fn new(lat_bands: u32, lon_bands: u32, cylinder_sides: u32) -> Self {
        Self {
            sphere: unit_sphere(lat_bands, lon_bands),
            cylinder: unit_cylinder(cylinder_sides, false),
        }
    }

    /// Process-wide templates at the default resolutions, built on first use.
    pub fn shared() -> &'static Primitives {
        &DEFAULT_PRIMITIVES
    }

    pub fn sphere_template(&self) -> &Mesh {
        &self.sphere
    }

    pub fn cylinder_template(&self) -> &Mesh {
        &self.cylinder
    }

    pub fn sphere(&self, center: &Point3<f64>, radius: f64) -> Mesh {
        let mut mesh = self.sphere.clone();
        mesh.transform(
            &Transform::uniform_scaling(radius).then(&Transform::translation(&center.coords)),
        );
        mesh
    }

    /// A cylinder centered at `center` whose axis follows `forward`.
    pub fn cylinder(
        &self,
        center: &Point3<f64>,
        forward: &Vector3<f64>,
        height: f64,
        radius: f64,
    ) -> Result<Mesh, DegenerateDirectionError> {
        let transform = orient(center, &Vector3::new(radius, radius, height), forward, 0.0)?;
        let mut mesh = self.cylinder.clone();
        mesh.transform(&transform);
        Ok(mesh)
    }

    /// A cylinder spanning exactly from `p0` to `p1`.
    pub fn cylinder_between(
        &self,
        p0: &Point3<f64>,
        p1: &Point3<f64>,
        radius: f64,
    ) -> Result<Mesh, DegenerateDirectionError> {
        let axis = p1 - p0;
        self.cylinder(&nalgebra::center(p0, p1), &axis, axis.norm(), radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn unit_sphere_has_expected_triangle_count() {
        let lat = 6;
        let lon = 8;
        let mesh = unit_sphere(lat, lon);
        // Two cap rows of single triangles plus quads elsewhere.
        assert_eq!(mesh.len() as u32, 2 * lon + 2 * lon * (lat - 2));
    }

    #[test]
    fn unit_sphere_vertices_lie_on_unit_radius() {
        let mesh = unit_sphere(DEFAULT_SPHERE_LAT_BANDS, DEFAULT_SPHERE_LON_BANDS);
        for t in mesh.triangles() {
            for v in t.vertices() {
                assert!((v.position.coords.norm() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn unit_sphere_normals_are_smoothed_outward() {
        let mesh = unit_sphere(10, 16);
        for t in mesh.triangles() {
            for v in t.vertices() {
                assert!(v.normal.dot(&v.position.coords) > 0.9);
            }
        }
    }

    #[test]
    fn unit_sphere_has_no_degenerate_faces() {
        let mesh = unit_sphere(4, 6);
        assert!(mesh.triangles().iter().all(|t| t.normal().norm() > 0.5));
    }

    #[test]
    fn unit_sphere_clamps_resolution() {
        assert_eq!(unit_sphere(0, 0), unit_sphere(MIN_LAT_BANDS, MIN_LON_BANDS));
    }

    #[test]
    fn unit_cylinder_spans_unit_height_along_z() {
        let mesh = unit_cylinder(12, false);
        assert_eq!(mesh.len(), 24);
        let bb = mesh.bounding_box().unwrap();
        assert!((bb.min.z + 0.5).abs() < EPS && (bb.max.z - 0.5).abs() < EPS);
        assert!((bb.max.x - 1.0).abs() < EPS);
    }

    #[test]
    fn capped_cylinder_adds_cap_triangles_facing_outward() {
        let mesh = unit_cylinder(8, true);
        assert_eq!(mesh.len(), 32);
        let caps: Vec<_> = mesh
            .triangles()
            .iter()
            .filter(|t| t.normal().z.abs() > 0.99)
            .collect();
        assert_eq!(caps.len(), 16);
        for t in caps {
            assert_eq!(t.normal().z.signum(), t.v1.position.z.signum());
        }
    }

    #[test]
    fn cylinder_sides_face_outward() {
        let mesh = unit_cylinder(16, false);
        for t in mesh.triangles() {
            let centroid = (t.v1.position.coords + t.v2.position.coords + t.v3.position.coords) / 3.0;
            let radial = Vector3::new(centroid.x, centroid.y, 0.0);
            assert!(t.normal().dot(&radial) > 0.0);
        }
    }

    #[test]
    fn instancing_copies_the_template() {
        let primitives = Primitives::new(4, 6, 6);
        let before = primitives.sphere_template().clone();
        let instance = primitives.sphere(&Point3::new(5.0, 0.0, 0.0), 2.0);

        assert_eq!(primitives.sphere_template(), &before);
        let bb = instance.bounding_box().unwrap();
        assert!((bb.center() - Point3::new(5.0, 0.0, 0.0)).norm() < EPS);
        assert!((bb.max_extent() - 4.0).abs() < EPS);
    }

    #[test]
    fn cylinder_between_spans_the_segment() {
        let primitives = Primitives::new(4, 6, 12);
        let p0 = Point3::new(1.0, 1.0, 1.0);
        let p1 = Point3::new(1.0, 4.0, 1.0);
        let mesh = primitives.cylinder_between(&p0, &p1, 0.25).unwrap();
        let bb = mesh.bounding_box().unwrap();
        assert!((bb.min.y - 1.0).abs() < EPS && (bb.max.y - 4.0).abs() < EPS);
        assert!((bb.max.x - 1.25).abs() < EPS);
    }

    #[test]
    fn cylinder_between_identical_points_is_degenerate() {
        let p = Point3::new(0.0, 0.0, 0.0);
        assert!(Primitives::shared().cylinder_between(&p, &p, 0.25).is_err());
    }
}
