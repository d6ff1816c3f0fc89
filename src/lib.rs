//! Oddgrid - synthetic odd-one-out grid images
//!
//! Generates grids of identical shapes in which a few cells differ along
//! one or more visual attributes, together with JSON ground truth.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
