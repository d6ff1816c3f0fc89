//! Domain-critical regression tests for block-fx.
//!
//! Each test documents the class of bug it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::color::{ciede2000, ColorSearch, Lab, Srgb};
    use crate::image::Block;
    use crate::ops;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shape_block(side: usize) -> Block {
        let mut block = Block::square(side, Srgb::WHITE);
        let inset = side as isize / 4;
        block.fill_rect(inset, inset, side / 2, side / 2, Srgb::new(0.2, 0.3, 0.6));
        block
    }

    // ========================================================================
    // Size invariance: every operator hands back a nominal-size block
    // ========================================================================

    /// If this breaks, it means: some operator changed the block's
    /// dimensions, and the compositor will paste a mis-sized cell that
    /// overlaps its neighbors or leaves a hole. Checked at the boundary
    /// strengths 0 and the largest configured value.
    #[test]
    fn test_every_operator_preserves_block_size() {
        let mut rng = StdRng::seed_from_u64(2024);
        let bg = Srgb::WHITE;
        for side in [7usize, 64, 101] {
            let block = shape_block(side);
            for strength in [0.0f32, 0.15, 1.0] {
                let outputs = [
                    ops::gaussian_blur(&block, strength * 1.1),
                    ops::occlude(&block, strength, &mut rng),
                    ops::fracture(&block, strength, bg, &mut rng),
                    ops::ghost(&block, strength, bg, &mut rng),
                    ops::shift(&block, (strength * side as f32) as isize, -2, bg),
                    ops::rotate(&block, strength * 360.0 + 13.0, bg),
                ];
                for out in outputs {
                    assert_eq!(out.dims(), (side, side), "side {side}, strength {strength}");
                }
            }
        }
    }

    /// If this breaks, it means: the size attribute leaks past normalization
    /// and downstream operators see a block bigger or smaller than nominal.
    #[test]
    fn test_size_then_normalize_restores_side() {
        for ratio in [0.85f32, 0.95, 1.0, 1.05, 1.15] {
            let side = 120;
            let scaled = Block::square(ops::scaled_side(side, ratio), Srgb::BLACK);
            let normalized = ops::normalize(&scaled, side, Srgb::WHITE);
            assert!(normalized.is_square_of(side), "ratio {ratio}");
        }
    }

    // ========================================================================
    // Rotation geometry
    // ========================================================================

    /// If this breaks, it means: the rotation canvas is no longer padded to
    /// the diagonal, and the corners of rotated shapes get clipped.
    #[test]
    fn test_padding_covers_diagonal() {
        for side in 1..300usize {
            let padded = ops::padded_side(side);
            assert!(
                padded as f32 >= side as f32 * std::f32::consts::SQRT_2,
                "side {side} padded only to {padded}"
            );
        }
    }

    /// If this breaks, it means: rotating forward and back no longer
    /// returns to the original frame, either in size or in placement.
    #[test]
    fn test_rotation_round_trip_restores_frame() {
        let block = shape_block(60);
        for angle in [10.0f32, 33.0, 90.0, 180.0] {
            let back = ops::rotate(&ops::rotate(&block, angle, Srgb::WHITE), -angle, Srgb::WHITE);
            assert_eq!(back.dims(), block.dims());
            // Interior of the square survives two bilinear passes.
            let center = back.get(30, 30);
            assert!(
                center.max_channel_diff(block.get(30, 30)) < 0.05,
                "angle {angle}: center drifted to {center:?}"
            );
        }
    }

    // ========================================================================
    // Color calibration
    // ========================================================================

    /// If this breaks, it means: the ΔE search result no longer tells the
    /// caller how far it actually got, so tests and metadata would assume
    /// exact calibration.
    #[test]
    fn test_color_search_reports_measured_distance() {
        let mut rng = StdRng::seed_from_u64(77);
        let base = Lab::new(35.0, -12.0, 20.0);
        let found = ColorSearch::default().perturb(base, 12.0, &mut rng);
        let measured = ciede2000(base, found.lab);
        assert!((found.achieved - measured).abs() < 1e-5);
        assert!(found.error() < 1.0, "error band exceeded: {}", found.error());
    }
}
