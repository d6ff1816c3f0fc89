//! Separable isotropic Gaussian blur.

use crate::color::Srgb;
use crate::image::Block;

/// Kernel radius for `sigma`: four standard deviations, at least one pixel.
pub fn kernel_radius(sigma: f32) -> usize {
    ((sigma * 4.0).round() as usize).max(1)
}

fn kernel(sigma: f32) -> Vec<f32> {
    let radius = kernel_radius(sigma) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Mirror an out-of-range index without repeating the edge pixel
/// (`dcb|abcd|cba`).
fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - m }) as usize
}

/// Gaussian blur with standard deviation `sigma` pixels.
///
/// `sigma <= 0` returns the block unchanged.
pub fn gaussian_blur(block: &Block, sigma: f32) -> Block {
    if sigma.is_nan() || sigma <= 0.0 {
        return block.clone();
    }
    let weights = kernel(sigma);
    let radius = (weights.len() / 2) as isize;
    let (w, h) = block.dims();

    let convolve = |get: &dyn Fn(usize) -> Srgb, center: usize, len: usize| -> Srgb {
        let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
        for (k, weight) in weights.iter().enumerate() {
            let p = get(reflect101(center as isize + k as isize - radius, len));
            r += p.r * weight;
            g += p.g * weight;
            b += p.b * weight;
        }
        Srgb::new(r, g, b)
    };

    let mut horizontal = Block::filled(w, h, Srgb::default());
    for y in 0..h {
        for x in 0..w {
            let px = convolve(&|i| block.get(i, y), x, w);
            horizontal.set(x, y, px);
        }
    }

    let mut out = Block::filled(w, h, Srgb::default());
    for y in 0..h {
        for x in 0..w {
            let px = convolve(&|i| horizontal.get(x, i), y, h);
            out.set(x, y, px);
        }
    }
    out
}
