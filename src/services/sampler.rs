//! Odd-cell selection, attribute sets and quantized strengths.

use crate::error::ConfigError;
use crate::models::{
    Attribute, AttributeSet, BlockSpec, ColorStrategy, GridLayout, OddConfig, OddSpec,
    Perturbation, Strengths,
};
use block_fx::{jitter_lab, ops, ColorSearch, Lab};
use rand::seq::{index, SliceRandom};
use rand::Rng;

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Distinct row-major cell indices, ascending.
///
/// Draws `k` uniformly from `1..=min(max_odds, total_cells)`; `max_odds` is
/// clamped to at least 1.
pub fn select_odd_cells<R: Rng + ?Sized>(
    total_cells: usize,
    max_odds: usize,
    rng: &mut R,
) -> Vec<usize> {
    if total_cells == 0 {
        return Vec::new();
    }
    let k = rng.gen_range(1..=max_odds.clamp(1, total_cells));
    let mut cells = index::sample(rng, total_cells, k).into_vec();
    cells.sort_unstable();
    cells
}

/// Remove rotation from the universe for rotationally symmetric shapes,
/// unless it is the only attribute left.
pub fn effective_universe(
    universe: AttributeSet,
    shape_id: &str,
    rotation_banned: &[String],
) -> AttributeSet {
    let mut out = universe;
    if universe.contains(Attribute::Rotation)
        && universe.len() > 1
        && rotation_banned.iter().any(|s| s == shape_id)
    {
        out.remove(Attribute::Rotation);
    }
    out
}

/// A non-empty attribute subset of `universe` with `1..=min(max, |universe|)`
/// members.
pub fn select_attributes<R: Rng + ?Sized>(
    universe: AttributeSet,
    max_attributes: usize,
    rng: &mut R,
) -> Result<AttributeSet, ConfigError> {
    if universe.is_empty() {
        return Err(ConfigError::EmptyAttributes);
    }
    let m = rng.gen_range(1..=max_attributes.clamp(1, universe.len()));
    Ok(universe
        .to_vec()
        .choose_multiple(rng, m)
        .copied()
        .collect())
}

/// One quantized strength per attribute kind.
pub fn sample_strengths<R: Rng + ?Sized>(cfg: &OddConfig, rng: &mut R) -> Strengths {
    Strengths {
        delta_e: cfg.delta_e.sample(rng).trunc(),
        size_ratio: round2(cfg.size_ratio.sample(rng)),
        angle_delta: cfg.angle.sample(rng).trunc(),
        position: [
            round2(cfg.position.sample(rng)) - 1.0,
            round2(cfg.position.sample(rng)) - 1.0,
        ],
        blur: round2(cfg.blur.sample(rng)),
        occlusion: round2(cfg.occlusion.sample(rng)),
        fracture: round2(cfg.fracture.sample(rng)),
        overlap: round2(cfg.overlap.sample(rng)),
    }
}

/// Odd-cell color for a requested ΔE and the CIEDE2000 distance it landed at.
pub fn perturb_color<R: Rng + ?Sized>(
    base: Lab,
    delta_e: f32,
    strategy: ColorStrategy,
    rng: &mut R,
) -> (Lab, f32) {
    match strategy {
        ColorStrategy::Noise => {
            let lab = jitter_lab(base, delta_e, rng);
            // Measure against what will actually be displayed.
            let shown = Lab::from(lab.to_srgb());
            (lab, Lab::from(base.to_srgb()).delta_e(shown))
        }
        ColorStrategy::Calibrated => {
            let found = ColorSearch::default().perturb(base, delta_e, rng);
            (found.lab, found.achieved)
        }
    }
}

/// Resolve one odd cell from its attribute set and strengths.
pub fn resolve_odd<R: Rng + ?Sized>(
    index: usize,
    layout: &GridLayout,
    spec: &BlockSpec,
    attributes: AttributeSet,
    strengths: &Strengths,
    strategy: ColorStrategy,
    rng: &mut R,
) -> OddSpec {
    let perturbations: Vec<Perturbation> = attributes
        .iter()
        .map(|attr| Perturbation::from_strengths(attr, strengths, spec.block_size))
        .collect();

    let (lab, achieved_delta_e) = if attributes.contains(Attribute::Color) {
        let (lab, achieved) = perturb_color(spec.base_lab, strengths.delta_e, strategy, rng);
        (lab, Some(achieved))
    } else {
        (spec.base_lab, None)
    };

    let render_size = if attributes.contains(Attribute::Size) {
        ops::scaled_side(spec.block_size, strengths.size_ratio)
    } else {
        spec.block_size
    };

    let angle = if attributes.contains(Attribute::Rotation) {
        (spec.base_angle + strengths.angle_delta).rem_euclid(360.0)
    } else {
        spec.base_angle
    };

    let (row, col) = layout.cell_position(index);
    OddSpec {
        index,
        row: row + 1,
        col: col + 1,
        attributes,
        perturbations,
        lab,
        color: lab.to_srgb(),
        achieved_delta_e,
        render_size,
        angle,
        bbox: layout.cell_bbox(index),
    }
}

/// Select odd cells and resolve each of them.
pub fn plan_odds<R: Rng + ?Sized>(
    cfg: &OddConfig,
    universe: AttributeSet,
    layout: &GridLayout,
    spec: &BlockSpec,
    rng: &mut R,
) -> Result<Vec<OddSpec>, ConfigError> {
    let max_odds = cfg.effective_max_odds(layout.total_cells());
    select_odd_cells(layout.total_cells(), max_odds, rng)
        .into_iter()
        .map(|index| {
            let attributes = select_attributes(universe, cfg.max_attributes, rng)?;
            let strengths = sample_strengths(cfg, rng);
            Ok(resolve_odd(
                index,
                layout,
                spec,
                attributes,
                &strengths,
                cfg.color_strategy,
                rng,
            ))
        })
        .collect()
}
