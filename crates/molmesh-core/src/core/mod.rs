//! # Core Module
//!
//! Fundamental building blocks of the mesh pipeline: molecular data models, the element
//! table, colormaps, triangle meshes and their transforms, and file I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains, connections and the model aggregate
//! - **Element Data** ([`elements`]) - Static symbol lookup for display colors and radii
//! - **Color Palettes** ([`colormap`]) - Quantized palettes sampled by a normalized scalar
//! - **Geometry** ([`geometry`]) - Meshes, oriented transforms and unit primitives
//! - **File I/O** ([`io`]) - Model documents and mesh writers
//!
//! Everything in this module is free of pipeline state; the [`crate::engine`] layer composes
//! these pieces into scene synthesis.

pub mod colormap;
pub mod elements;
pub mod geometry;
pub mod io;
pub mod models;
