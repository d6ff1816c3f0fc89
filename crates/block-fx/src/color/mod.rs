//! Color types and conversion utilities
//!
//! # Color Spaces
//!
//! - **Srgb**: display color space; block buffers and PNG output use it.
//! - **LinearRgb**: linear light intensity, the hub for CIE conversions.
//! - **Lab**: CIELAB (D65), where base colors are sampled and ΔE is measured.
//!
//! # Example
//!
//! ```
//! use block_fx::{Lab, Srgb};
//!
//! let base = Lab::new(45.0, 20.0, -10.0);
//! let display: Srgb = base.to_srgb();
//! let back = Lab::from(display);
//! assert!(base.delta_e(back) < 1.0);
//! ```

mod delta_e;
mod lab;
mod linear_rgb;
mod lut;
mod random;
mod srgb;

pub use delta_e::{ciede2000, ColorMatch, ColorSearch};
pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use random::{deep_lab, jitter_lab, DEEP_AB_RANGE, DEEP_L_RANGE};
pub use srgb::Srgb;
