//! Integer pixel translation.

use crate::color::Srgb;
use crate::image::Block;

/// Translate `block` by `(dx, dy)` pixels (positive is right/down).
///
/// Content pushed outside is discarded and the vacated region takes `bg`.
pub fn shift(block: &Block, dx: isize, dy: isize, bg: Srgb) -> Block {
    if dx == 0 && dy == 0 {
        return block.clone();
    }
    let mut out = Block::filled(block.width(), block.height(), bg);
    out.paste(block, dx, dy);
    out
}
