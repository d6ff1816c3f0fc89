//! Per-image scene sampling: background, grid geometry and the shared
//! normal-cell appearance.

use crate::error::RenderError;
use crate::models::{BackgroundConfig, BlockSpec, GridLayout, LayoutConfig};
use block_fx::{deep_lab, Srgb};
use rand::seq::SliceRandom;
use rand::Rng;

/// Per-channel spread around the base value of a smooth background.
pub const SMOOTH_JITTER: f32 = 0.05;

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Pure white, or a light tint rounded to two decimals.
pub fn random_background<R: Rng + ?Sized>(cfg: &BackgroundConfig, rng: &mut R) -> Srgb {
    if rng.gen_bool(cfg.white_probability.clamp(0.0, 1.0)) {
        return Srgb::WHITE;
    }

    let (lo, hi) = (cfg.light_range.min(), cfg.light_range.max());
    let base = cfg.smooth.then(|| rng.gen_range(lo..=hi));
    let mut channel = || {
        let v = match base {
            Some(base) => base + rng.gen_range(-SMOOTH_JITTER..=SMOOTH_JITTER),
            None => rng.gen_range(lo..=hi),
        };
        round2(v.clamp(0.0, 1.0))
    };
    Srgb::new(channel(), channel(), channel())
}

/// Draw grid shape, cell side, gap and margin.
pub fn sample_layout<R: Rng + ?Sized>(
    cfg: &LayoutConfig,
    background: Srgb,
    rng: &mut R,
) -> GridLayout {
    GridLayout {
        rows: cfg.grid_rows.sample(rng).max(1),
        cols: cfg.grid_cols.sample(rng).max(1),
        block_size: cfg.block_size.sample(rng).max(1),
        gap: cfg.gap.sample(rng),
        margin: cfg.margin.sample(rng),
        background,
    }
}

/// Pick the base shape, a deep base color and the shared base angle.
pub fn sample_block_spec<R: Rng + ?Sized>(
    shape_ids: &[String],
    cfg: &LayoutConfig,
    block_size: usize,
    rng: &mut R,
) -> Result<BlockSpec, RenderError> {
    let shape_id = shape_ids.choose(rng).ok_or(RenderError::NoShapes)?.clone();
    let base_lab = deep_lab(rng);
    let base_angle = cfg.base_angle.sample(rng).rem_euclid(360) as f32;

    Ok(BlockSpec {
        shape_id,
        base_color: base_lab.to_srgb(),
        base_lab,
        block_size,
        base_angle,
    })
}
