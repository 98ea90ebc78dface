//! Per-representation mesh synthesis.
//!
//! Each submodule turns part of a [`Model`](crate::core::models::model::Model) into
//! independently colored triangles built from shared primitive templates:
//!
//! - [`atoms`] resolves drawable atoms and places element-colored spheres
//! - [`bonds`] turns connections into split-colored bond cylinders
//! - [`backbone`] traces carbonyl groups along each chain
//! - [`ribbon`] colors precomputed chain ribbons along a palette

pub mod atoms;
pub mod backbone;
pub mod bonds;
pub mod ribbon;
