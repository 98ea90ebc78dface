//! # MolMesh Core Library
//!
//! Turns a molecular model (atoms, elements, bonds and precomputed per-chain ribbon
//! surfaces) into a single colored triangle mesh, and welds that mesh into a compact
//! indexed form for renderers and exporters.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that each concern can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Model`, `Mesh`), the static
//!   element table, colormaps, primitive generation, oriented transforms and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Submesh synthesis (ball-and-stick, space-filling,
//!   backbone, ribbon coloring), scene assembly, normalization and welding, together with
//!   configuration, error types and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into the complete
//!   model-to-mesh pipeline.

pub mod core;
pub mod engine;
pub mod workflows;
