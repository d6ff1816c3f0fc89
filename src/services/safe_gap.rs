//! Minimum inter-cell gap that keeps perturbed cells off their neighbors.
//!
//! Advisory by default; the generator only applies it when
//! `layout.enforce_safe_gap` is set.

use crate::models::{Attribute, BlockSpec, OddSpec};

/// Extra pixels added to every rotation contribution.
pub const ROTATION_MARGIN: usize = 2;

/// Bounding-box growth factor of a square rotated by `angle` degrees.
///
/// Symmetric under 180°, so the angle is taken mod 180.
pub fn rotation_scale(angle: f32) -> f32 {
    let theta = angle.rem_euclid(180.0).to_radians();
    theta.cos().abs() + theta.sin().abs()
}

/// Gap needed for a block rotated to either of two angles.
pub fn rotation_gap(block_size: usize, base_angle: f32, odd_angle: f32) -> usize {
    let scale = rotation_scale(base_angle).max(rotation_scale(odd_angle));
    (block_size as f32 * (scale - 1.0)).max(0.0).ceil() as usize + ROTATION_MARGIN
}

/// Excess growth of a block scaled by `ratio`; shrinking needs nothing.
pub fn size_gap(block_size: usize, ratio: f32) -> usize {
    (block_size as f32 * ratio - block_size as f32).max(0.0).ceil() as usize
}

/// Largest absolute offset of a shifted block.
pub fn position_gap(dx: isize, dy: isize) -> usize {
    dx.unsigned_abs().max(dy.unsigned_abs())
}

/// Gap required by one odd cell: the sum of its attribute contributions.
///
/// Rotation is measured on the grown side when the cell is also enlarged.
pub fn odd_gap(spec: &BlockSpec, odd: &OddSpec) -> usize {
    let bs = spec.block_size;
    let mut gap = 0;
    let mut effective = bs;

    if let Some(ratio) = odd.size_ratio() {
        gap += size_gap(bs, ratio);
        effective = (bs as f32 * ratio.max(1.0)).ceil() as usize;
    }
    if odd.has(Attribute::Rotation) {
        gap += rotation_gap(effective, spec.base_angle, odd.angle);
    }
    if let Some((dx, dy)) = odd.position_offset() {
        gap += position_gap(dx, dy);
    }
    gap
}

/// Gap required by the whole image: the worst odd cell.
pub fn safe_gap(spec: &BlockSpec, odds: &[OddSpec]) -> usize {
    odds.iter().map(|odd| odd_gap(spec, odd)).max().unwrap_or(0)
}
