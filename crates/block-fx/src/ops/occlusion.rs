//! Random square dropouts filled with the block's mean color.

use rand::Rng;

use crate::image::Block;

/// Side of one dropped square, in pixels.
pub const OCCLUSION_CELL: usize = 3;

/// Number of squares dropped for `density` on a `width × height` block.
pub fn drop_count(width: usize, height: usize, density: f32) -> usize {
    let cell_area = OCCLUSION_CELL * OCCLUSION_CELL;
    let max_cells = (width * height / cell_area).max(1);
    (((density * max_cells as f32).round() as usize) / 4).max(1)
}

/// Drop `OCCLUSION_CELL`-sized squares across the block.
///
/// Half of the drops land inside a centered region of half the block's
/// side, the rest anywhere. Draws are independent and may overlap. When
/// the center region is smaller than one cell its share is drawn
/// globally instead. A non-positive density, or a block smaller than one
/// cell, returns the block unchanged.
pub fn occlude<R: Rng + ?Sized>(block: &Block, density: f32, rng: &mut R) -> Block {
    let (w, h) = block.dims();
    if density.is_nan() || density <= 0.0 || OCCLUSION_CELL > w.min(h) {
        return block.clone();
    }

    let fill = block.mean_color();
    let total = drop_count(w, h, density);
    let mut center = total / 2;
    let mut global = total - center;

    let (cw, ch) = (w / 2, h / 2);
    if cw < OCCLUSION_CELL || ch < OCCLUSION_CELL {
        global += center;
        center = 0;
    }

    let mut out = block.clone();
    let (cx0, cy0) = ((w - cw) / 2, (h - ch) / 2);
    for _ in 0..center {
        let x = cx0 + rng.gen_range(0..=cw - OCCLUSION_CELL);
        let y = cy0 + rng.gen_range(0..=ch - OCCLUSION_CELL);
        out.fill_rect(x as isize, y as isize, OCCLUSION_CELL, OCCLUSION_CELL, fill);
    }
    for _ in 0..global {
        let x = rng.gen_range(0..=w - OCCLUSION_CELL);
        let y = rng.gen_range(0..=h - OCCLUSION_CELL);
        out.fill_rect(x as isize, y as isize, OCCLUSION_CELL, OCCLUSION_CELL, fill);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn checker(side: usize) -> Block {
        let mut block = Block::square(side, Srgb::WHITE);
        for y in 0..side {
            for x in 0..side {
                if (x + y) % 2 == 0 {
                    block.set(x, y, Srgb::BLACK);
                }
            }
        }
        block
    }

    #[test]
    fn test_drop_count() {
        // 100x100 -> 1111 cells; 0.1 * 1111 = 111 -> 27
        assert_eq!(drop_count(100, 100, 0.1), 27);
        assert_eq!(drop_count(3, 3, 0.01), 1);
    }

    #[test]
    fn test_zero_density_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let block = checker(12);
        assert_eq!(occlude(&block, 0.0, &mut rng), block);
    }

    #[test]
    fn test_tiny_block_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let block = checker(2);
        assert_eq!(occlude(&block, 0.5, &mut rng), block);
    }

    #[test]
    fn test_drops_use_mean_color() {
        let mut rng = StdRng::seed_from_u64(9);
        let block = checker(30);
        let mean = block.mean_color();
        let out = occlude(&block, 0.15, &mut rng);
        assert_eq!(out.dims(), (30, 30));
        let changed: Vec<_> = out
            .pixels()
            .iter()
            .zip(block.pixels())
            .filter(|(a, b)| a != b)
            .collect();
        assert!(!changed.is_empty());
        for (after, _) in changed {
            assert_eq!(*after, mean);
        }
    }
}
