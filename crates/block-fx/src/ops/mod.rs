//! Block transform operators.
//!
//! Every operator takes a block and returns a new block of the same
//! dimensions (except [`normalize`]/[`fit`], whose job is to restore them).
//! Degenerate strengths (zero, negative, NaN) and blocks too small for an
//! effect produce an unchanged copy rather than an error.

mod blur;
mod fracture;
mod noise;
mod normalize;
mod occlusion;
mod overlap;
mod rotate;
mod shift;

pub use blur::{gaussian_blur, kernel_radius};
pub use fracture::{fracture, fracture_at, fracture_shift, FractureAxis, MAX_FRACTURE_RATIO};
pub use noise::{add_gaussian_noise, standard_normal};
pub use normalize::{fit, normalize, scaled_side};
pub use occlusion::{drop_count, occlude, OCCLUSION_CELL};
pub use overlap::{ghost, ghost_shift, ghost_with, GhostDirection, GHOST_ALPHA_RANGE, MAX_GHOST_RATIO};
pub use rotate::{padded_side, rotate, rotate_about_center};
pub use shift::shift;
