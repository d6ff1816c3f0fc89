use block_fx::Srgb;
use serde::{Deserialize, Serialize};

/// Pixel rectangle on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// Geometry of one image: grid shape, cell side, spacing and background.
///
/// Created once per sample and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub block_size: usize,
    pub gap: usize,
    pub margin: usize,
    pub background: Srgb,
}

impl GridLayout {
    pub fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    fn extent(&self, cells: usize) -> usize {
        cells * self.block_size + cells.saturating_sub(1) * self.gap + 2 * self.margin
    }

    /// Canvas `(width, height)` in pixels.
    ///
    /// Per axis: `cells * block_size + (cells - 1) * gap + 2 * margin`.
    pub fn canvas_size(&self) -> (usize, usize) {
        (self.extent(self.cols), self.extent(self.rows))
    }

    /// Zero-based `(row, col)` of a row-major cell index.
    pub fn cell_position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Top-left pixel `(x, y)` of a cell.
    pub fn cell_origin(&self, index: usize) -> (usize, usize) {
        let (row, col) = self.cell_position(index);
        let pitch = self.block_size + self.gap;
        (self.margin + col * pitch, self.margin + row * pitch)
    }

    pub fn cell_bbox(&self, index: usize) -> BBox {
        let (x, y) = self.cell_origin(index);
        BBox {
            x,
            y,
            w: self.block_size,
            h: self.block_size,
        }
    }
}
