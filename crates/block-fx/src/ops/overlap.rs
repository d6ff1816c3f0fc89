//! Double-exposure ghosting.

use rand::Rng;

use crate::color::Srgb;
use crate::error::BlockError;
use crate::image::Block;

use super::shift::shift;

/// Largest ghost offset, as a fraction of the shorter side.
pub const MAX_GHOST_RATIO: f32 = 0.1;
/// Range the ghost's blend weight is drawn from.
pub const GHOST_ALPHA_RANGE: (f32, f32) = (0.6, 0.8);

/// Axis (or axes) the ghost copy is displaced along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostDirection {
    X,
    Y,
    Both,
}

/// Pixel offset magnitude for a ghost of `strength`.
pub fn ghost_shift(min_side: usize, strength: f32) -> usize {
    let max_shift = (min_side as f32 * MAX_GHOST_RATIO) as usize;
    ((strength * max_shift as f32) as usize).max(1)
}

/// Blend a displaced copy of the block over itself.
///
/// Direction, sign and blend weight are random; the offset magnitude
/// scales with `strength`. `strength <= 0` returns the block unchanged.
pub fn ghost<R: Rng + ?Sized>(block: &Block, strength: f32, bg: Srgb, rng: &mut R) -> Block {
    if strength.is_nan() || strength <= 0.0 {
        return block.clone();
    }
    let alpha = rng.gen_range(GHOST_ALPHA_RANGE.0..=GHOST_ALPHA_RANGE.1);
    let direction = match rng.gen_range(0..3) {
        0 => GhostDirection::X,
        1 => GhostDirection::Y,
        _ => GhostDirection::Both,
    };
    let magnitude = ghost_shift(block.width().min(block.height()), strength) as isize;
    let mut signed = || if rng.gen_bool(0.5) { magnitude } else { -magnitude };
    let (dx, dy) = match direction {
        GhostDirection::X => (signed(), 0),
        GhostDirection::Y => (0, signed()),
        GhostDirection::Both => (signed(), signed()),
    };
    // Same-shape blend cannot fail.
    ghost_with(block, dx, dy, alpha, bg).unwrap_or_else(|_| block.clone())
}

/// `block * (1 - alpha) + shift(block, dx, dy) * alpha`.
pub fn ghost_with(
    block: &Block,
    dx: isize,
    dy: isize,
    alpha: f32,
    bg: Srgb,
) -> Result<Block, BlockError> {
    let shifted = shift(block, dx, dy, bg);
    block.blend(&shifted, alpha)
}
