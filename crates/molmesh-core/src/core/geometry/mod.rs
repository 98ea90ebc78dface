pub mod indexed;
pub mod mesh;
pub mod primitives;
pub mod transform;
