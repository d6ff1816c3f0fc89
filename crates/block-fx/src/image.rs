//! Float RGB pixel buffer shared by every operator.

use crate::color::Srgb;
use crate::error::BlockError;

/// A row-major buffer of sRGB pixels.
///
/// Blocks are the unit every operator consumes and produces: a single grid
/// cell while a shape is being perturbed, and the whole canvas during
/// compositing. Channels are nominally in 0.0..=1.0; noise and blending may
/// leave that range until [`Block::clamp`] or [`Block::to_rgb8`].
///
/// # Example
///
/// ```
/// use block_fx::{Block, Srgb};
///
/// let mut canvas = Block::filled(4, 3, Srgb::WHITE);
/// let stamp = Block::square(2, Srgb::BLACK);
/// canvas.paste(&stamp, 1, 1);
///
/// assert_eq!(canvas.get(1, 1), Srgb::BLACK);
/// assert_eq!(canvas.get(0, 0), Srgb::WHITE);
/// assert_eq!(canvas.to_rgb8().len(), 4 * 3 * 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl Block {
    /// A `width × height` block of a single color.
    pub fn filled(width: usize, height: usize, color: Srgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// A `side × side` block of a single color.
    pub fn square(side: usize, color: Srgb) -> Self {
        Self::filled(side, side, color)
    }

    /// Wrap an existing pixel vector.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Srgb>) -> Result<Self, BlockError> {
        if width == 0 || height == 0 {
            return Err(BlockError::EmptyBlock);
        }
        if pixels.len() != width * height {
            return Err(BlockError::BufferLength {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_square_of(&self, side: usize) -> bool {
        self.width == side && self.height == side
    }

    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Srgb] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Srgb> {
        self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the block.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Srgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Pixel at a signed coordinate, or `None` outside the block.
    #[inline]
    pub fn try_get(&self, x: isize, y: isize) -> Option<Srgb> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Srgb) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    /// Per-channel mean over every pixel.
    pub fn mean_color(&self) -> Srgb {
        if self.pixels.is_empty() {
            return Srgb::default();
        }
        let (mut r, mut g, mut b) = (0.0f64, 0.0f64, 0.0f64);
        for p in &self.pixels {
            r += p.r as f64;
            g += p.g as f64;
            b += p.b as f64;
        }
        let n = self.pixels.len() as f64;
        Srgb::new((r / n) as f32, (g / n) as f32, (b / n) as f32)
    }

    /// Fill a rectangle, clipped to the block.
    pub fn fill_rect(&mut self, x: isize, y: isize, w: usize, h: usize, color: Srgb) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x + w as isize).clamp(0, self.width as isize) as usize;
        let y1 = (y + h as isize).clamp(0, self.height as isize) as usize;
        for row in y0..y1 {
            let start = row * self.width;
            for px in &mut self.pixels[start + x0..start + x1] {
                *px = color;
            }
        }
    }

    /// Draw a rectangle outline of the given thickness, growing inwards.
    pub fn stroke_rect(
        &mut self,
        x: isize,
        y: isize,
        w: usize,
        h: usize,
        thickness: usize,
        color: Srgb,
    ) {
        let t = thickness.min(w).min(h);
        if t == 0 {
            return;
        }
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + (h - t) as isize, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + (w - t) as isize, y, t, h, color);
    }

    /// Copy `src` with its top-left corner at `(x, y)`.
    ///
    /// Parts of `src` that fall outside this block are discarded.
    pub fn paste(&mut self, src: &Block, x: isize, y: isize) {
        let sx0 = (-x).max(0) as usize;
        let sy0 = (-y).max(0) as usize;
        let sx1 = ((self.width as isize - x).min(src.width as isize)).max(0) as usize;
        let sy1 = ((self.height as isize - y).min(src.height as isize)).max(0) as usize;
        if sx0 >= sx1 || sy0 >= sy1 {
            return;
        }
        let span = sx1 - sx0;
        for sy in sy0..sy1 {
            let dy = (sy as isize + y) as usize;
            let dx = (sx0 as isize + x) as usize;
            let dst_start = dy * self.width + dx;
            let src_start = sy * src.width + sx0;
            self.pixels[dst_start..dst_start + span]
                .copy_from_slice(&src.pixels[src_start..src_start + span]);
        }
    }

    /// Copy out a sub-rectangle. Regions outside the block take `fill`.
    pub fn crop(&self, x: isize, y: isize, w: usize, h: usize, fill: Srgb) -> Block {
        let mut out = Block::filled(w, h, fill);
        out.paste(self, -x, -y);
        out
    }

    /// Check that `other` has the same dimensions.
    pub fn ensure_same_shape(&self, other: &Block) -> Result<(), BlockError> {
        if self.dims() != other.dims() {
            return Err(BlockError::ShapeMismatch {
                expected: self.dims(),
                actual: other.dims(),
            });
        }
        Ok(())
    }

    /// Pixel-wise `self * (1 - alpha) + other * alpha`.
    pub fn blend(&self, other: &Block, alpha: f32) -> Result<Block, BlockError> {
        self.ensure_same_shape(other)?;
        let pixels = self
            .pixels
            .iter()
            .zip(&other.pixels)
            .map(|(a, b)| a.mix(*b, alpha))
            .collect();
        Ok(Block {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Clamp every channel to 0.0..=1.0 in place.
    pub fn clamp(&mut self) {
        for p in &mut self.pixels {
            *p = p.clamped();
        }
    }

    /// Interleaved 8-bit RGB, row-major, suitable for PNG encoding.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_validates_length() {
        let err = Block::from_pixels(2, 2, vec![Srgb::WHITE; 3]).unwrap_err();
        assert_eq!(
            err,
            BlockError::BufferLength {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(
            Block::from_pixels(0, 2, vec![]).unwrap_err(),
            BlockError::EmptyBlock
        );
        assert!(Block::from_pixels(2, 1, vec![Srgb::BLACK; 2]).is_ok());
    }

    #[test]
    fn test_paste_clips_negative_and_overflowing_offsets() {
        let mut canvas = Block::square(4, Srgb::WHITE);
        let stamp = Block::square(3, Srgb::BLACK);

        canvas.paste(&stamp, -2, 2);
        // Only column 0 of rows 2..4 is covered.
        assert_eq!(canvas.get(0, 2), Srgb::BLACK);
        assert_eq!(canvas.get(0, 3), Srgb::BLACK);
        assert_eq!(canvas.get(1, 2), Srgb::WHITE);
        assert_eq!(canvas.get(0, 1), Srgb::WHITE);

        // Entirely outside: no-op.
        let before = canvas.clone();
        canvas.paste(&stamp, 10, 10);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_crop_pads_outside_region() {
        let block = Block::square(2, Srgb::BLACK);
        let cropped = block.crop(-1, -1, 4, 4, Srgb::WHITE);
        assert_eq!(cropped.dims(), (4, 4));
        assert_eq!(cropped.get(0, 0), Srgb::WHITE);
        assert_eq!(cropped.get(1, 1), Srgb::BLACK);
        assert_eq!(cropped.get(2, 2), Srgb::BLACK);
        assert_eq!(cropped.get(3, 3), Srgb::WHITE);
    }

    #[test]
    fn test_stroke_rect_draws_outline_only() {
        let mut block = Block::square(6, Srgb::WHITE);
        block.stroke_rect(0, 0, 6, 6, 1, Srgb::RED);
        assert_eq!(block.get(0, 3), Srgb::RED);
        assert_eq!(block.get(5, 3), Srgb::RED);
        assert_eq!(block.get(3, 0), Srgb::RED);
        assert_eq!(block.get(3, 5), Srgb::RED);
        assert_eq!(block.get(3, 3), Srgb::WHITE);
    }

    #[test]
    fn test_mean_color() {
        let mut block = Block::filled(2, 1, Srgb::BLACK);
        block.set(1, 0, Srgb::WHITE);
        let mean = block.mean_color();
        assert!((mean.r - 0.5).abs() < 1e-6);
        assert!((mean.g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_blend_rejects_shape_mismatch() {
        let a = Block::square(3, Srgb::BLACK);
        let b = Block::square(4, Srgb::BLACK);
        assert!(matches!(
            a.blend(&b, 0.5),
            Err(BlockError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_try_get_bounds() {
        let block = Block::filled(3, 2, Srgb::WHITE);
        assert!(block.try_get(-1, 0).is_none());
        assert!(block.try_get(3, 0).is_none());
        assert!(block.try_get(0, 2).is_none());
        assert_eq!(block.try_get(2, 1), Some(Srgb::WHITE));
    }
}
