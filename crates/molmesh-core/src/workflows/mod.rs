//! # Workflows Module
//!
//! High-level entry points that run the complete pipeline.
//!
//! ## Architecture
//!
//! - **Scene Building** ([`build`]) - Synthesis, assembly, normalization and welding of a model

pub mod build;
