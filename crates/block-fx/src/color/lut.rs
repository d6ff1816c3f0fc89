//! Gamma lookup table access functions
//!
//! Fast gamma conversion using pre-computed lookup tables generated at
//! compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

#[inline]
fn lookup(table: &[f32; 4096], value: f32) -> f32 {
    let value = value.clamp(0.0, 1.0);
    let scaled = value * 4095.0;
    let index = scaled as usize;

    if index >= 4095 {
        return table[4095];
    }

    let frac = scaled - index as f32;
    let a = table[index];
    let b = table[index + 1];
    a + (b - a) * frac
}

/// Convert an sRGB value (0.0..=1.0) to linear RGB using LUT with linear interpolation.
///
/// Out-of-range input is clamped.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    lookup(&SRGB_TO_LINEAR, srgb)
}

/// Convert a linear RGB value (0.0..=1.0) to sRGB using LUT with linear interpolation.
///
/// Out-of-range input is clamped, which is how out-of-gamut colors are
/// brought back into the display gamut.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    lookup(&LINEAR_TO_SRGB, linear)
}
