//! Crop/pad normalization back to the nominal block size.

use crate::color::Srgb;
use crate::image::Block;

/// Side length of a shape rendered at `ratio` times the nominal block size.
///
/// Never returns zero.
pub fn scaled_side(side: usize, ratio: f32) -> usize {
    ((side as f32 * ratio).round() as usize).max(1)
}

/// Center-crop or center-pad `block` to `width × height`.
///
/// Each axis is handled independently. Padding uses `bg`; when the surplus
/// or deficit is odd, the extra pixel goes to the bottom/right.
pub fn fit(block: &Block, width: usize, height: usize, bg: Srgb) -> Block {
    if block.dims() == (width, height) {
        return block.clone();
    }
    let offset = |have: usize, want: usize| -> isize {
        if have >= want {
            -(((have - want) / 2) as isize)
        } else {
            ((want - have) / 2) as isize
        }
    };
    let mut out = Block::filled(width, height, bg);
    out.paste(
        block,
        offset(block.width(), width),
        offset(block.height(), height),
    );
    out
}

/// Center-crop or center-pad `block` to a `side × side` square.
pub fn normalize(block: &Block, side: usize, bg: Srgb) -> Block {
    fit(block, side, side, bg)
}
