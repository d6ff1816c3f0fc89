//! Random color generation in CIELAB.

use rand::Rng;

use super::lab::Lab;

/// Lightness band for base colors; keeps shapes clearly darker than a
/// white or light background.
pub const DEEP_L_RANGE: (f32, f32) = (20.0, 70.0);
/// Chroma bound for base colors on both the a and b axis.
pub const DEEP_AB_RANGE: f32 = 40.0;

/// Sample a mid-to-low lightness base color, rounded to two decimals.
pub fn deep_lab<R: Rng + ?Sized>(rng: &mut R) -> Lab {
    Lab::new(
        rng.gen_range(DEEP_L_RANGE.0..=DEEP_L_RANGE.1),
        rng.gen_range(-DEEP_AB_RANGE..=DEEP_AB_RANGE),
        rng.gen_range(-DEEP_AB_RANGE..=DEEP_AB_RANGE),
    )
    .round2()
}

/// Add independent uniform noise in `[-delta_e, delta_e]` to every component.
///
/// This is the fast color strategy. The CIEDE2000 distance of the result is
/// only loosely related to `delta_e`; use
/// [`ColorSearch`](super::ColorSearch) when calibration matters.
/// A non-positive `delta_e` returns `base` unchanged.
pub fn jitter_lab<R: Rng + ?Sized>(base: Lab, delta_e: f32, rng: &mut R) -> Lab {
    if delta_e.is_nan() || delta_e <= 0.0 {
        return base;
    }
    Lab::new(
        base.l + rng.gen_range(-delta_e..=delta_e),
        base.a + rng.gen_range(-delta_e..=delta_e),
        base.b + rng.gen_range(-delta_e..=delta_e),
    )
}
