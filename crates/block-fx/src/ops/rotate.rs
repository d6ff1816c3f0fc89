//! Geometry-preserving rotation.
//!
//! A square block is padded to its diagonal, rotated about the padded
//! center with bilinear sampling, then center-cropped back. The corners of
//! the original content can never be clipped, and the output always has the
//! input's dimensions.

use std::f32::consts::SQRT_2;

use crate::color::Srgb;
use crate::image::Block;

use super::normalize::fit;

/// Side of the padded working canvas: `ceil(side * √2)`.
pub fn padded_side(side: usize) -> usize {
    (side as f32 * SQRT_2).ceil() as usize
}

/// Rotate `block` by `angle` degrees counter-clockwise, keeping its size.
///
/// Uncovered regions take `bg`. Multiples of 360° return the block
/// unchanged.
pub fn rotate(block: &Block, angle: f32, bg: Srgb) -> Block {
    let turn = angle.rem_euclid(360.0);
    if turn == 0.0 || block.width() == 0 || block.height() == 0 {
        return block.clone();
    }
    let side = padded_side(block.width().max(block.height()));
    let padded = fit(block, side, side, bg);
    let rotated = rotate_about_center(&padded, turn, bg);
    fit(&rotated, block.width(), block.height(), bg)
}

/// Rotate in place about `(width / 2, height / 2)` without resizing.
///
/// Each destination pixel is mapped back into the source by the inverse
/// rotation and sampled bilinearly; samples outside the source read `bg`.
pub fn rotate_about_center(block: &Block, angle: f32, bg: Srgb) -> Block {
    let (w, h) = block.dims();
    let (sin, cos) = angle.to_radians().sin_cos();
    let cx = (w / 2) as f32;
    let cy = (h / 2) as f32;

    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        let dy = y as f32 - cy;
        for x in 0..w {
            let dx = x as f32 - cx;
            let sx = cos * dx - sin * dy + cx;
            let sy = sin * dx + cos * dy + cy;
            pixels.push(bilinear(block, sx, sy, bg));
        }
    }
    let mut out = Block::filled(w, h, bg);
    out.pixels_mut().copy_from_slice(&pixels);
    out
}

fn bilinear(block: &Block, x: f32, y: f32, bg: Srgb) -> Srgb {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as isize, y0 as isize);

    let sample = |xx: isize, yy: isize| block.try_get(xx, yy).unwrap_or(bg);
    let top = sample(x0, y0).mix(sample(x0 + 1, y0), fx);
    let bottom = sample(x0, y0 + 1).mix(sample(x0 + 1, y0 + 1), fx);
    top.mix(bottom, fy)
}
