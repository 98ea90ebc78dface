use super::mesh::{Color, Mesh, Triangle, Vertex};
use nalgebra::Point3;

/// Indices of one triangle into the position table and the color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub vertices: [usize; 3],
    pub colors: [usize; 3],
}

impl Face {
    /// The `[v1, v2, v3, c1, c2, c3]` sextuple used by the listing format.
    pub fn sextuple(&self) -> [usize; 6] {
        let [v1, v2, v3] = self.vertices;
        let [c1, c2, c3] = self.colors;
        [v1, v2, v3, c1, c2, c3]
    }
}

/// A deduplicated triangle mesh with independent position and color tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeldedMesh {
    pub vertices: Vec<Point3<f64>>,
    pub colors: Vec<Color>,
    pub faces: Vec<Face>,
}

impl WeldedMesh {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face_positions(&self, face: &Face) -> [Point3<f64>; 3] {
        face.vertices.map(|i| self.vertices[i])
    }

    /// Rebuilds the flat triangle list, one triangle per face in face order.
    ///
    /// Normals are recomputed per face since the welded form does not carry them.
    pub fn to_mesh(&self) -> Mesh {
        let triangles = self
            .faces
            .iter()
            .map(|face| {
                let [p1, p2, p3] = self.face_positions(face);
                let [c1, c2, c3] = face.colors.map(|i| self.colors[i]);
                let mut triangle = Triangle::new(p1, p2, p3);
                triangle.v1 = Vertex { color: c1, ..triangle.v1 };
                triangle.v2 = Vertex { color: c2, ..triangle.v2 };
                triangle.v3 = Vertex { color: c3, ..triangle.v3 };
                triangle
            })
            .collect();
        Mesh::from_triangles(triangles)
    }
}
