#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! block-fx: color math and pixel operators for odd-one-out grid cells
//!
//! This crate holds everything that happens to a single grid cell between
//! "render a shape" and "paste it onto the canvas". It does no I/O and no
//! logging; randomized operators take an explicit `&mut impl Rng` so callers
//! can seed and replay them.
//!
//! # Quick Start
//!
//! ```
//! use block_fx::{ops, Block, Srgb};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let bg = Srgb::WHITE;
//! let mut block = Block::square(64, bg);
//! block.fill_rect(16, 16, 32, 32, Srgb::BLACK);
//!
//! let blurred = ops::gaussian_blur(&block, 1.0);
//! let broken = ops::fracture(&blurred, 0.2, bg, &mut rng);
//! let turned = ops::rotate(&broken, 30.0, bg);
//!
//! assert_eq!(turned.dims(), (64, 64));
//! ```
//!
//! # Color
//!
//! Base colors are sampled in CIELAB ([`Lab`]) and displayed as [`Srgb`].
//! The distance between a base and a perturbed color is CIEDE2000
//! ([`ciede2000`]). Two ways of producing a perturbed color exist:
//!
//! - [`jitter_lab`]: uniform noise per component, scaled by the requested
//!   ΔE. Fast, loosely calibrated.
//! - [`ColorSearch`]: bounded randomized search for a color at the requested
//!   CIEDE2000 distance. Best effort: the returned [`ColorMatch`] reports the
//!   distance actually achieved.
//!
//! # Operators
//!
//! See [`ops`]. Each operator returns a block with the input's dimensions,
//! and degenerate strengths are a no-op. Size changes happen upstream (a
//! shape rendered at a different side length) and are undone by
//! [`ops::normalize`] before any other operator runs.

pub mod color;
pub mod error;
pub mod image;
pub mod ops;

mod domain_tests;

pub use color::{
    ciede2000, deep_lab, jitter_lab, ColorMatch, ColorSearch, Lab, LinearRgb, Srgb,
};
pub use error::BlockError;
pub use image::Block;
