//! CIELAB perceptual color space (D65 reference white)
//!
//! Base and odd colors are sampled in CIELAB because perturbation strength
//! is expressed as a CIEDE2000 distance. Conversion goes through linear RGB
//! and CIE XYZ with the standard sRGB primaries.

use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;

/// D65 reference white (2° observer).
const XN: f32 = 0.95047;
const YN: f32 = 1.00000;
const ZN: f32 = 1.08883;

const EPSILON: f32 = 0.008856;
const KAPPA_SLOPE: f32 = 7.787;

/// A color in CIELAB space.
///
/// - `l`: lightness, 0.0 (black) to 100.0 (white)
/// - `a`: green (-) to red (+), roughly -128..=127 for displayable colors
/// - `b`: blue (-) to yellow (+), roughly -128..=127 for displayable colors
///
/// Values are not clamped; a perturbed color may be outside the sRGB gamut
/// until it is converted with [`Lab::to_srgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.l, self.a, self.b]
    }

    /// Round every component to two decimals.
    pub fn round2(self) -> Self {
        let r = |v: f32| (v * 100.0).round() / 100.0;
        Self::new(r(self.l), r(self.a), r(self.b))
    }

    /// Convert to display sRGB, clamping to the display gamut.
    ///
    /// ```
    /// use block_fx::Lab;
    /// let white = Lab::new(100.0, 0.0, 0.0).to_srgb();
    /// assert!(white.r > 0.99 && white.g > 0.99 && white.b > 0.99);
    /// ```
    pub fn to_srgb(self) -> Srgb {
        Srgb::from(LinearRgb::from(self))
    }

    /// CIEDE2000 distance to `other`.
    #[inline]
    pub fn delta_e(self, other: Lab) -> f32 {
        super::delta_e::ciede2000(self, other)
    }
}

impl From<[f32; 3]> for Lab {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

fn f_forward(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

fn f_inverse(t: f32) -> f32 {
    let t3 = t * t * t;
    if t3 > EPSILON {
        t3
    } else {
        (t - 16.0 / 116.0) / KAPPA_SLOPE
    }
}

impl From<LinearRgb> for Lab {
    fn from(rgb: LinearRgb) -> Self {
        let x = rgb.r * 0.4124564 + rgb.g * 0.3575761 + rgb.b * 0.1804375;
        let y = rgb.r * 0.2126729 + rgb.g * 0.7151522 + rgb.b * 0.0721750;
        let z = rgb.r * 0.0193339 + rgb.g * 0.1191920 + rgb.b * 0.9503041;

        let fx = f_forward(x / XN);
        let fy = f_forward(y / YN);
        let fz = f_forward(z / ZN);

        Lab {
            l: (116.0 * fy - 16.0).max(0.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for LinearRgb {
    /// The result is not clamped; out-of-gamut colors produce channels
    /// outside 0.0..=1.0.
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = lab.a / 500.0 + fy;
        let fz = fy - lab.b / 200.0;

        let x = f_inverse(fx) * XN;
        let y = f_inverse(fy) * YN;
        let z = f_inverse(fz) * ZN;

        LinearRgb {
            r: x * 3.2404542 + y * -1.5371385 + z * -0.4985314,
            g: x * -0.9692660 + y * 1.8760108 + z * 0.0415560,
            b: x * 0.0556434 + y * -0.2040259 + z * 1.0572252,
        }
    }
}

impl From<Srgb> for Lab {
    fn from(srgb: Srgb) -> Self {
        Lab::from(LinearRgb::from(srgb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_lab_matches_palette_crate() {
        use palette::{IntoColor, Lab as PaletteLab, LinSrgb};

        let test_colors = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.5, 0.5, 0.5),
            (0.2, 0.6, 0.3),
            (1.0, 1.0, 1.0),
        ];

        for (r, g, b) in test_colors {
            let ours = Lab::from(LinearRgb::new(r, g, b));
            let theirs: PaletteLab = LinSrgb::new(r, g, b).into_color();

            assert!(
                approx_eq(ours.l, theirs.l, 0.05),
                "L mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.l,
                theirs.l
            );
            assert!(
                approx_eq(ours.a, theirs.a, 0.1),
                "a mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.a,
                theirs.a
            );
            assert!(
                approx_eq(ours.b, theirs.b, 0.1),
                "b mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.b,
                theirs.b
            );
        }
    }

    #[test]
    fn test_round_trip_through_linear() {
        let samples = [
            Lab::new(50.0, 10.0, -20.0),
            Lab::new(25.0, -30.0, 15.0),
            Lab::new(70.0, 0.0, 0.0),
        ];
        for lab in samples {
            let back = Lab::from(LinearRgb::from(lab));
            assert!(approx_eq(lab.l, back.l, 1e-3), "{lab:?} -> {back:?}");
            assert!(approx_eq(lab.a, back.a, 1e-2), "{lab:?} -> {back:?}");
            assert!(approx_eq(lab.b, back.b, 1e-2), "{lab:?} -> {back:?}");
        }
    }

    #[test]
    fn test_neutral_grey_has_no_chroma() {
        let lab = Lab::from(Srgb::new(0.5, 0.5, 0.5));
        assert!(lab.a.abs() < 0.05);
        assert!(lab.b.abs() < 0.05);
    }

    #[test]
    fn test_out_of_gamut_converts_to_valid_srgb() {
        let srgb = Lab::new(60.0, 120.0, -120.0).to_srgb();
        for c in srgb.to_array() {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn test_round2() {
        let lab = Lab::new(12.345, -6.789, 0.004).round2();
        assert!(approx_eq(lab.l, 12.35, 1e-4) || approx_eq(lab.l, 12.34, 1e-4));
        assert!(approx_eq(lab.a, -6.79, 1e-4));
        assert!(approx_eq(lab.b, 0.0, 1e-4));
    }
}
