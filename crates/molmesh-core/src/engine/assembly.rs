use crate::core::geometry::mesh::{EmptyMeshError, Mesh};
use crate::core::geometry::transform::Transform;
use nalgebra::{Matrix4, Vector3};

const NORMALIZED_EXTENT: f64 = 2.0;
const NORMALIZED_TOLERANCE: f64 = 1e-12;

/// Joins submeshes into one mesh, preserving their order. Sources are left untouched.
pub fn concatenate(meshes: &[Mesh]) -> Mesh {
    let mut mesh = Mesh::from_triangles(Vec::with_capacity(meshes.iter().map(Mesh::len).sum()));
    for part in meshes {
        mesh.add(part);
    }
    mesh
}

/// The transform fitting `mesh` into the bi-unit cube `[-1, 1]^3`.
///
/// A mesh already centered at the origin with a largest extent of 2 yields the identity. A
/// mesh of zero extent is only translated to the origin.
pub fn fit_inside_bi_unit_cube(mesh: &Mesh) -> Result<Transform, EmptyMeshError> {
    let bounds = mesh.bounding_box()?;
    let center = bounds.center();
    let extent = bounds.max_extent();

    let centered = center.coords.iter().all(|c| c.abs() <= NORMALIZED_TOLERANCE);
    if centered && (extent - NORMALIZED_EXTENT).abs() <= NORMALIZED_TOLERANCE {
        return Ok(Transform::identity());
    }

    let translate = Transform::translation(&-center.coords);
    if extent == 0.0 {
        return Ok(translate);
    }
    Ok(translate.then(&Transform::uniform_scaling(NORMALIZED_EXTENT / extent)))
}

/// Fits the mesh into the bi-unit cube in place and returns the applied transform.
pub fn normalize(mesh: &mut Mesh) -> Result<Transform, EmptyMeshError> {
    let transform = fit_inside_bi_unit_cube(mesh)?;
    if !transform.is_identity() {
        mesh.transform(&transform);
    }
    Ok(transform)
}

/// The base mesh followed by one transformed copy per non-identity operator.
pub fn expand_symmetry(base: &Mesh, operators: &[Matrix4<f64>]) -> Mesh {
    let mut mesh = base.clone();
    for operator in operators {
        let transform = Transform::from_matrix(*operator);
        if transform.is_identity() {
            continue;
        }
        let mut copy = base.clone();
        copy.transform(&transform);
        mesh.add(&copy);
    }
    mesh
}

/// Offset of the bounding box center from the origin, for diagnostics.
pub fn center_offset(mesh: &Mesh) -> Result<Vector3<f64>, EmptyMeshError> {
    Ok(mesh.bounding_box()?.center().coords)
}
