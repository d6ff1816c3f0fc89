use crate::assets::AssetLoader;
use crate::error::RenderError;
use block_fx::{ops, Block, Srgb};
use rand::RngCore;
use resvg::usvg::{self, Transform};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tiny_skia::Pixmap;

/// Produces a `size × size` block showing one shape in one color.
///
/// Implementations may add their own light noise; `rng` is the sample's
/// generator so that seeded runs replay exactly.
pub trait ShapeRenderer: Send + Sync {
    fn render(
        &self,
        shape_id: &str,
        size: usize,
        foreground: Srgb,
        background: Srgb,
        rng: &mut dyn RngCore,
    ) -> Result<Block, RenderError>;

    /// Registered shape ids, sorted.
    fn shape_ids(&self) -> Vec<String>;
}

/// Rasterizes registered SVG shapes with resvg.
///
/// Only the SVG's coverage is used: the shape is painted in the requested
/// foreground color over the background, whatever fill the file declares.
pub struct SvgShapeRenderer {
    shapes: BTreeMap<String, Cow<'static, [u8]>>,
    shrink_ratio: f32,
    noise_sigma: f32,
}

impl SvgShapeRenderer {
    pub fn new(
        shapes: BTreeMap<String, Cow<'static, [u8]>>,
        shrink_ratio: f32,
        noise_sigma: f32,
    ) -> Self {
        Self {
            shapes,
            shrink_ratio,
            noise_sigma,
        }
    }

    /// Register every shape the loader can see (embedded plus external).
    pub fn from_assets(
        loader: &AssetLoader,
        shrink_ratio: f32,
        noise_sigma: f32,
    ) -> Result<Self, RenderError> {
        let shapes = loader.load_shapes()?;
        if shapes.is_empty() {
            return Err(RenderError::NoShapes);
        }
        tracing::info!(count = shapes.len(), "Registered SVG shapes");
        Ok(Self::new(shapes, shrink_ratio, noise_sigma))
    }

    /// Parse and rasterize an SVG into a `side × side` coverage map.
    fn coverage(&self, svg_data: &[u8], side: u32) -> Result<Pixmap, RenderError> {
        let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let scale = (side as f32 / svg_size.width()).min(side as f32 / svg_size.height());
        let offset_x = (side as f32 - svg_size.width() * scale) / 2.0;
        let offset_y = (side as f32 - svg_size.height() * scale) / 2.0;

        let mut pixmap = Pixmap::new(side, side).ok_or(RenderError::PixmapAllocation)?;
        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

impl ShapeRenderer for SvgShapeRenderer {
    fn render(
        &self,
        shape_id: &str,
        size: usize,
        foreground: Srgb,
        background: Srgb,
        rng: &mut dyn RngCore,
    ) -> Result<Block, RenderError> {
        let svg = self
            .shapes
            .get(shape_id)
            .ok_or_else(|| RenderError::ShapeNotFound(shape_id.to_string()))?;

        let size = size.max(1);
        let target = ((size as f32 * self.shrink_ratio).round() as usize).clamp(1, size);
        let pixmap = self.coverage(svg, target as u32)?;

        let pixels = pixmap
            .data()
            .chunks_exact(4)
            .map(|px| background.mix(foreground, px[3] as f32 / 255.0))
            .collect();
        let shape = Block::from_pixels(target, target, pixels)?;

        let mut block = Block::square(size, background);
        let offset = ((size - target) / 2) as isize;
        block.paste(&shape, offset, offset);
        ops::add_gaussian_noise(&mut block, self.noise_sigma, rng);
        Ok(block)
    }

    fn shape_ids(&self) -> Vec<String> {
        self.shapes.keys().cloned().collect()
    }
}
