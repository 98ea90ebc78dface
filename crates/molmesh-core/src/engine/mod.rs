//! # Engine Module
//!
//! This module implements the scene synthesis engine of molmesh: the stages that turn a
//! molecular [`Model`](crate::core::models::model::Model) into one deduplicated, colored
//! triangle mesh.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Representations, synthesis constants, resolution and palette
//! - **Synthesis** ([`synthesis`]) - Per-representation generation of atom, bond, backbone and ribbon triangles
//! - **Assembly** ([`assembly`]) - Concatenation, symmetry expansion and bi-unit cube normalization
//! - **Welding** ([`weld`]) - Exact-match deduplication into shared position and color tables
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Pipeline error aggregation
//!
//! ## Determinism
//!
//! Parallel synthesis (the `parallel` feature) collects results in input order, and welding
//! is sequential, so identical inputs always produce identical output tables.

pub mod assembly;
pub mod config;
pub mod error;
pub mod progress;
pub mod synthesis;
pub mod weld;
