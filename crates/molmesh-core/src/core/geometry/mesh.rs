use super::transform::Transform;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use thiserror::Error;

/// Bit pattern used when a float takes part in an exact-equality key.
///
/// `-0.0` and `0.0` map to the same key so that keys follow value equality.
#[inline]
pub(crate) fn value_bits(x: f64) -> u64 {
    if x == 0.0 { 0 } else { x.to_bits() }
}

#[inline]
pub(crate) fn point_key(p: &Point3<f64>) -> [u64; 3] {
    [value_bits(p.x), value_bits(p.y), value_bits(p.z)]
}

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parses a six digit `RRGGBB` string, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    #[inline]
    pub(crate) fn key(&self) -> [u64; 3] {
        [value_bits(self.r), value_bits(self.g), value_bits(self.b)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            color: Color::default(),
        }
    }
}

/// A triangle whose vertices carry independent positions, normals and colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vertex,
    pub v2: Vertex,
    pub v3: Vertex,
}

impl Triangle {
    /// Builds a triangle with flat (face) normals and default color.
    pub fn new(p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        let mut triangle = Self {
            v1: Vertex::new(p1),
            v2: Vertex::new(p2),
            v3: Vertex::new(p3),
        };
        triangle.fix_normals();
        triangle
    }

    /// Unit face normal following the counter-clockwise winding; zero for degenerate faces.
    pub fn normal(&self) -> Vector3<f64> {
        let e1 = self.v2.position - self.v1.position;
        let e2 = self.v3.position - self.v1.position;
        e1.cross(&e2).try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    pub fn fix_normals(&mut self) {
        let n = self.normal();
        self.v1.normal = n;
        self.v2.normal = n;
        self.v3.normal = n;
    }

    pub fn set_color(&mut self, color: Color) {
        self.v1.color = color;
        self.v2.color = color;
        self.v3.color = color;
    }

    pub fn vertices(&self) -> [&Vertex; 3] {
        [&self.v1, &self.v2, &self.v3]
    }

    fn vertices_mut(&mut self) -> [&mut Vertex; 3] {
        [&mut self.v1, &mut self.v2, &mut self.v3]
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Cannot compute the bounding box of an empty mesh")]
pub struct EmptyMeshError;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn max_extent(&self) -> f64 {
        self.size().max()
    }
}

/// An ordered list of triangles. Cloning a mesh is a deep copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Appends copies of all triangles of `other`, leaving `other` untouched.
    pub fn add(&mut self, other: &Mesh) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    pub fn set_color(&mut self, color: Color) {
        for t in &mut self.triangles {
            t.set_color(color);
        }
    }

    /// Applies an affine transform to positions and, via the normal matrix, to normals.
    pub fn transform(&mut self, transform: &Transform) {
        for t in &mut self.triangles {
            for v in t.vertices_mut() {
                v.position = transform.transform_point(&v.position);
                v.normal = transform.transform_normal(&v.normal);
            }
        }
    }

    pub fn bounding_box(&self) -> Result<BoundingBox, EmptyMeshError> {
        let first = self.triangles.first().ok_or(EmptyMeshError)?;
        let mut min = first.v1.position;
        let mut max = first.v1.position;
        for t in &self.triangles {
            for v in t.vertices() {
                min = min.inf(&v.position);
                max = max.sup(&v.position);
            }
        }
        Ok(BoundingBox { min, max })
    }

    /// Replaces every vertex normal with the average of the face normals of all triangles
    /// sharing that exact position.
    pub fn smooth_normals(&mut self) {
        let mut accumulated: HashMap<[u64; 3], Vector3<f64>> = HashMap::new();
        for t in &self.triangles {
            let n = t.normal();
            for v in t.vertices() {
                *accumulated
                    .entry(point_key(&v.position))
                    .or_insert_with(Vector3::zeros) += n;
            }
        }
        for t in &mut self.triangles {
            for v in t.vertices_mut() {
                if let Some(sum) = accumulated.get(&point_key(&v.position)) {
                    v.normal = sum.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
                }
            }
        }
    }
}
