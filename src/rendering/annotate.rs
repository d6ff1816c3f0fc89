//! Side outputs drawn on top of a finished canvas.
//!
//! - numbered variant: 1-based row and column indices in the margins
//! - bbox variant: a red frame around every odd cell

use crate::error::RenderError;
use crate::models::{BBox, GridLayout};
use block_fx::{Block, Srgb};
use resvg::usvg::{self, Transform};
use std::fmt::Write;
use std::sync::Arc;
use tiny_skia::Pixmap;

pub const BBOX_THICKNESS: usize = 3;
pub const BBOX_COLOR: Srgb = Srgb::RED;

/// Copy of `canvas` with every box outlined.
pub fn draw_bboxes(canvas: &Block, boxes: &[BBox]) -> Block {
    let mut out = canvas.clone();
    for bbox in boxes {
        out.stroke_rect(
            bbox.x as isize,
            bbox.y as isize,
            bbox.w,
            bbox.h,
            BBOX_THICKNESS,
            BBOX_COLOR,
        );
    }
    out
}

/// Draws grid indices as SVG text, rasterized with the system fonts.
pub struct NumberLabeler {
    fontdb: Arc<fontdb::Database>,
}

impl NumberLabeler {
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();

        if fontdb.is_empty() {
            tracing::warn!("No system fonts found, numbered images will have no labels");
        } else {
            tracing::debug!(font_count = fontdb.len(), "Loaded fonts for grid labels");
        }

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Label color chosen for contrast with the background.
    pub fn label_color(background: Srgb) -> Srgb {
        if background.mean() > 0.5 {
            Srgb::BLACK
        } else {
            Srgb::WHITE
        }
    }

    /// Copy of `canvas` with column numbers above the grid and row numbers
    /// to its left.
    pub fn label(&self, canvas: &Block, layout: &GridLayout) -> Result<Block, RenderError> {
        let (width, height) = canvas.dims();
        let svg = label_svg(layout, width, height);

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let mut pixmap =
            Pixmap::new(width as u32, height as u32).ok_or(RenderError::PixmapAllocation)?;
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        let color = Self::label_color(layout.background);
        let mut out = canvas.clone();
        for (pixel, rgba) in out.pixels_mut().iter_mut().zip(pixmap.data().chunks_exact(4)) {
            if rgba[3] > 0 {
                *pixel = pixel.mix(color, rgba[3] as f32 / 255.0);
            }
        }
        Ok(out)
    }
}

impl Default for NumberLabeler {
    fn default() -> Self {
        Self::new()
    }
}

fn label_svg(layout: &GridLayout, width: usize, height: usize) -> String {
    let bs = layout.block_size as f32;
    let pitch = (layout.block_size + layout.gap) as f32;
    let margin = layout.margin as f32;
    let font_size = (bs * 0.22).max(11.0);
    let [r, g, b] = NumberLabeler::label_color(layout.background).to_bytes();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><g font-family="sans-serif" font-weight="bold" font-size="{font_size:.1}" fill="rgb({r},{g},{b})">"#
    );

    for col in 0..layout.cols {
        let x = margin + col as f32 * pitch + bs / 2.0;
        let y = margin * 0.6;
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{}</text>"#,
            col + 1
        );
    }
    for row in 0..layout.rows {
        let x = margin * 0.3;
        let y = margin + row as f32 * pitch + bs / 2.0 + font_size * 0.35;
        let _ = write!(svg, r#"<text x="{x:.1}" y="{y:.1}">{}</text>"#, row + 1);
    }

    svg.push_str("</g></svg>");
    svg
}
