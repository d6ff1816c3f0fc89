//! CIEDE2000 color difference and best-effort ΔE color search.

use rand::Rng;

use super::lab::Lab;

const POW25_7: f64 = 6_103_515_625.0; // 25^7

fn hue_degrees(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a_prime).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// CIEDE2000 color difference (Sharma, Wu & Dalal 2005), with kL = kC = kH = 1.
///
/// Computed in f64 internally; the result is returned as f32.
///
/// ```
/// use block_fx::{ciede2000, Lab};
/// let a = Lab::new(50.0, 2.6772, -79.7751);
/// let b = Lab::new(50.0, 0.0, -82.7485);
/// assert!((ciede2000(a, b) - 2.0425).abs() < 1e-3);
/// ```
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f32 {
    let (l1, a1, b1) = (lab1.l as f64, lab1.a as f64, lab1.b as f64);
    let (l2, a2, b2) = (lab2.l as f64, lab2.a as f64, lab2.b as f64);

    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let c_bar7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let h1p = hue_degrees(b1, a1p);
    let h2p = hue_degrees(b2, a2p);

    let delta_lp = l2 - l1;
    let delta_cp = c2p - c1p;
    let chroma_product = c1p * c2p;

    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp / 2.0).to_radians().sin();

    let l_bar_p = (l1 + l2) / 2.0;
    let c_bar_p = (c1p + c2p) / 2.0;
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_p - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_p).to_radians().cos()
        + 0.32 * (3.0 * h_bar_p + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_p - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let c_bar_p7 = c_bar_p.powi(7);
    let r_c = 2.0 * (c_bar_p7 / (c_bar_p7 + POW25_7)).sqrt();
    let l_offset = (l_bar_p - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_p;
    let s_h = 1.0 + 0.015 * c_bar_p * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let dl = delta_lp / s_l;
    let dc = delta_cp / s_c;
    let dh = delta_big_hp / s_h;

    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).sqrt() as f32
}

/// Outcome of a [`ColorSearch`].
///
/// The search is best-effort: `achieved` is the CIEDE2000 distance of the
/// returned color, which may differ from `requested` when the tolerance was
/// not met inside the iteration budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch {
    pub lab: Lab,
    pub requested: f32,
    pub achieved: f32,
    pub iterations: usize,
}

impl ColorMatch {
    /// Absolute gap between the requested and achieved distance.
    pub fn error(&self) -> f32 {
        (self.achieved - self.requested).abs()
    }
}

/// Randomized local search for a color at a target CIEDE2000 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSearch {
    /// Per-component jitter, as a multiple of the target distance
    pub step: f32,
    /// Iteration budget
    pub max_iter: usize,
    /// Early exit once |ΔE - target| drops below this
    pub tolerance: f32,
}

impl Default for ColorSearch {
    fn default() -> Self {
        Self {
            step: 1.0,
            max_iter: 5000,
            tolerance: 0.5,
        }
    }
}

impl ColorSearch {
    /// Find a color roughly `target` ΔE away from `base`.
    ///
    /// Never fails: if the tolerance is not met, the best candidate seen is
    /// returned. The returned color is rounded to two decimals and `achieved`
    /// is measured on the rounded value.
    pub fn perturb<R: Rng + ?Sized>(&self, base: Lab, target: f32, rng: &mut R) -> ColorMatch {
        let spread = (self.step * target).abs();
        let mut best = base;
        let mut best_diff = f32::INFINITY;
        let mut iterations = 0;

        for _ in 0..self.max_iter {
            iterations += 1;
            let candidate = if spread > 0.0 {
                Lab::new(
                    base.l + rng.gen_range(-spread..=spread),
                    base.a + rng.gen_range(-spread..=spread),
                    base.b + rng.gen_range(-spread..=spread),
                )
            } else {
                base
            };
            let diff = (ciede2000(base, candidate) - target).abs();
            if diff < best_diff {
                best_diff = diff;
                best = candidate;
            }
            if diff < self.tolerance {
                break;
            }
        }

        let lab = best.round2();
        ColorMatch {
            lab,
            requested: target,
            achieved: ciede2000(base, lab),
            iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Reference pairs from Sharma, Wu & Dalal's CIEDE2000 test data.
    #[test]
    fn test_ciede2000_reference_pairs() {
        let pairs = [
            ((50.0, 2.6772, -79.7751), (50.0, 0.0, -82.7485), 2.0425),
            ((50.0, 3.1571, -77.2803), (50.0, 0.0, -82.7485), 2.8615),
            ((50.0, 2.8361, -74.0200), (50.0, 0.0, -82.7485), 3.4412),
            ((50.0, 0.0, 0.0), (50.0, -1.0, 2.0), 2.3669),
            ((60.2574, -34.0099, 36.2677), (60.4626, -34.1751, 39.4387), 1.2644),
        ];
        for ((l1, a1, b1), (l2, a2, b2), expected) in pairs {
            let d = ciede2000(Lab::new(l1, a1, b1), Lab::new(l2, a2, b2));
            assert!(
                (d - expected).abs() < 1e-3,
                "ΔE00 mismatch: got {d}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_ciede2000_identity_and_symmetry() {
        let a = Lab::new(42.0, 12.0, -30.0);
        let b = Lab::new(45.0, 8.0, -25.0);
        assert_eq!(ciede2000(a, a), 0.0);
        assert!((ciede2000(a, b) - ciede2000(b, a)).abs() < 1e-4);
    }

    #[test]
    fn test_search_reaches_target_within_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let search = ColorSearch::default();
        for target in [5.0, 10.0, 15.0] {
            let result = search.perturb(Lab::new(45.0, 10.0, -10.0), target, &mut rng);
            assert!(
                result.error() < 1.0,
                "target {target} achieved {} (error {})",
                result.achieved,
                result.error()
            );
        }
    }

    #[test]
    fn test_search_reports_best_effort_when_budget_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        let search = ColorSearch {
            step: 1.0,
            max_iter: 1,
            tolerance: 0.0,
        };
        let result = search.perturb(Lab::new(50.0, 0.0, 0.0), 10.0, &mut rng);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.requested, 10.0);
        assert!((result.achieved - ciede2000(Lab::new(50.0, 0.0, 0.0), result.lab)).abs() < 1e-6);
    }

    #[test]
    fn test_search_zero_target_returns_base() {
        let mut rng = StdRng::seed_from_u64(1);
        let base = Lab::new(30.0, 5.0, 5.0);
        let result = ColorSearch::default().perturb(base, 0.0, &mut rng);
        assert_eq!(result.lab, base.round2());
        assert_eq!(result.achieved, 0.0);
    }
}
