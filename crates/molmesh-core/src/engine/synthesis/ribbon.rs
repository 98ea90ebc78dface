use crate::core::colormap::{Colormap, fraction};
use crate::core::geometry::mesh::Mesh;
use crate::core::models::model::Model;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Returns a copy of `ribbon` where triangle `i` of `n` is colored `sample(i / (n - 1))`.
pub fn colorize(ribbon: &Mesh, colormap: &Colormap) -> Mesh {
    let mut mesh = ribbon.clone();
    let count = mesh.len();
    for (i, triangle) in mesh.triangles_mut().iter_mut().enumerate() {
        triangle.set_color(colormap.sample(fraction(i, count)));
    }
    mesh
}

/// Colored ribbons of every chain, concatenated in chain order.
pub fn ribbon_mesh(model: &Model, colormap: &Colormap) -> Mesh {
    #[cfg(not(feature = "parallel"))]
    let iterator = model.chains().iter();

    #[cfg(feature = "parallel")]
    let iterator = model.chains().par_iter();

    let ribbons: Vec<Mesh> = iterator
        .filter(|chain| !chain.ribbon().is_empty())
        .map(|chain| colorize(chain.ribbon(), colormap))
        .collect();

    let mut mesh = Mesh::new();
    for ribbon in &ribbons {
        mesh.add(ribbon);
    }
    mesh
}
