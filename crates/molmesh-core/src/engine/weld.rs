use crate::core::geometry::indexed::{Face, WeldedMesh};
use crate::core::geometry::mesh::{Color, Mesh, point_key};
use nalgebra::Point3;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// First-seen-wins index table over exact-equality keys.
struct Interner<K, V> {
    index: HashMap<K, usize>,
    values: Vec<V>,
}

impl<K: std::hash::Hash + Eq, V: Copy> Interner<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    fn intern(&mut self, key: K, value: V) -> usize {
        match self.index.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let i = self.values.len();
                self.values.push(value);
                *entry.insert(i)
            }
        }
    }
}

/// Deduplicates positions and colors into shared tables and indexes every triangle.
///
/// Values are matched exactly, with `-0.0` equal to `0.0`. Table entries appear in the
/// order they are first seen, walking triangles in order and vertices `v1, v2, v3`, so the
/// result depends only on the input mesh.
pub fn weld(mesh: &Mesh) -> WeldedMesh {
    let mut positions: Interner<[u64; 3], Point3<f64>> = Interner::with_capacity(mesh.len());
    let mut colors: Interner<[u64; 3], Color> = Interner::with_capacity(16);

    let faces = mesh
        .triangles()
        .iter()
        .map(|t| {
            let [v1, v2, v3] = t.vertices();
            Face {
                vertices: [v1, v2, v3].map(|v| positions.intern(point_key(&v.position), v.position)),
                colors: [v1, v2, v3].map(|v| colors.intern(v.color.key(), v.color)),
            }
        })
        .collect();

    WeldedMesh {
        vertices: positions.values,
        colors: colors.values,
        faces,
    }
}
