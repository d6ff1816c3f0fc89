//! Additive Gaussian sensor noise.

use rand::Rng;

use crate::image::Block;

/// One standard normal sample (Box-Muller).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // 1 - U keeps the logarithm's argument in (0, 1].
    let u1: f32 = 1.0 - rng.gen::<f32>();
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

/// Add N(0, sigma²) noise to every channel and clamp to 0.0..=1.0.
///
/// With `sigma <= 0` the block is only clamped.
pub fn add_gaussian_noise<R: Rng + ?Sized>(block: &mut Block, sigma: f32, rng: &mut R) {
    if sigma > 0.0 {
        for p in block.pixels_mut() {
            p.r += standard_normal(rng) * sigma;
            p.g += standard_normal(rng) * sigma;
            p.b += standard_normal(rng) * sigma;
        }
    }
    block.clamp();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let samples: Vec<f32> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f32>() / n as f32;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn test_noise_is_clipped() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut block = Block::square(16, Srgb::WHITE);
        add_gaussian_noise(&mut block, 0.2, &mut rng);
        assert!(block
            .pixels()
            .iter()
            .all(|p| p.to_array().iter().all(|c| (0.0..=1.0).contains(c))));
        assert!(block.pixels().iter().any(|p| *p != Srgb::WHITE));
    }

    #[test]
    fn test_zero_sigma_only_clamps() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut block = Block::square(2, Srgb::new(1.5, 0.5, -0.1));
        add_gaussian_noise(&mut block, 0.0, &mut rng);
        assert_eq!(block.get(0, 0), Srgb::new(1.0, 0.5, 0.0));
    }
}
