//! Split a block along one axis and push the halves apart.

use rand::Rng;

use crate::color::Srgb;
use crate::image::Block;

/// Largest fracture displacement, as a fraction of the shorter side.
pub const MAX_FRACTURE_RATIO: f32 = 0.25;

/// Direction of the cut line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractureAxis {
    /// Vertical cut; the halves move left and right.
    Vertical,
    /// Horizontal cut; the halves move up and down.
    Horizontal,
}

/// Pixel displacement for a fracture of `strength` on a block with
/// shorter side `min_side`.
pub fn fracture_shift(min_side: usize, strength: f32) -> usize {
    let max_shift = (min_side as f32 * MAX_FRACTURE_RATIO) as usize;
    ((strength * max_shift as f32) as usize).max(1)
}

/// Fracture at a random axis and a random cut inside the middle third.
///
/// `strength <= 0` returns the block unchanged, as does a block too small
/// to have a middle third.
pub fn fracture<R: Rng + ?Sized>(block: &Block, strength: f32, bg: Srgb, rng: &mut R) -> Block {
    if strength.is_nan() || strength <= 0.0 {
        return block.clone();
    }
    let axis = if rng.gen_bool(0.5) {
        FractureAxis::Vertical
    } else {
        FractureAxis::Horizontal
    };
    let len = match axis {
        FractureAxis::Vertical => block.width(),
        FractureAxis::Horizontal => block.height(),
    };
    let (lo, hi) = (len / 3, 2 * len / 3);
    if hi <= lo {
        return block.clone();
    }
    let cut = rng.gen_range(lo..hi);
    let shift = fracture_shift(block.width().min(block.height()), strength);
    fracture_at(block, axis, cut, shift, bg)
}

/// Split at `cut` and move the two parts `shift` pixels apart.
///
/// The left/top part moves `ceil(shift / 2)` and the right/bottom part
/// `floor(shift / 2)`. The opened gap and the vacated edges take `bg`.
pub fn fracture_at(block: &Block, axis: FractureAxis, cut: usize, shift: usize, bg: Srgb) -> Block {
    let (w, h) = block.dims();
    let lead = shift.div_ceil(2) as isize;
    let trail = (shift / 2) as isize;
    let mut out = Block::filled(w, h, bg);
    match axis {
        FractureAxis::Vertical => {
            let cut = cut.min(w);
            let left = block.crop(0, 0, cut, h, bg);
            let right = block.crop(cut as isize, 0, w - cut, h, bg);
            out.paste(&left, -lead, 0);
            out.paste(&right, cut as isize + trail, 0);
        }
        FractureAxis::Horizontal => {
            let cut = cut.min(h);
            let top = block.crop(0, 0, w, cut, bg);
            let bottom = block.crop(0, cut as isize, w, h - cut, bg);
            out.paste(&top, 0, -lead);
            out.paste(&bottom, 0, cut as isize + trail);
        }
    }
    out
}
