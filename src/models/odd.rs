use crate::models::{Attribute, AttributeSet, BBox, GridLayout};
use block_fx::{Lab, Srgb};

/// The appearance shared by every normal cell of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub shape_id: String,
    pub base_lab: Lab,
    pub base_color: Srgb,
    pub block_size: usize,
    /// Applied to every normal cell when any odd cell rotates
    pub base_angle: f32,
}

/// One strength value per attribute kind, quantized.
///
/// Drawn for every odd cell regardless of its attribute set; only the
/// entries for present attributes become [`Perturbation`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strengths {
    /// Whole ΔE units
    pub delta_e: f32,
    pub size_ratio: f32,
    /// Whole degrees
    pub angle_delta: f32,
    /// Offset per axis as a fraction of the block size
    pub position: [f32; 2],
    pub blur: f32,
    pub occlusion: f32,
    pub fracture: f32,
    pub overlap: f32,
}

/// A single applied effect with its typed payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation {
    Color { delta_e: f32 },
    Size { ratio: f32 },
    Rotation { delta: f32 },
    /// Pixel offset; positive is right/down
    Position { dx: isize, dy: isize },
    Blur { sigma: f32 },
    Occlusion { density: f32 },
    Fracture { strength: f32 },
    Overlap { strength: f32 },
}

impl Perturbation {
    pub fn attribute(&self) -> Attribute {
        match self {
            Perturbation::Color { .. } => Attribute::Color,
            Perturbation::Size { .. } => Attribute::Size,
            Perturbation::Rotation { .. } => Attribute::Rotation,
            Perturbation::Position { .. } => Attribute::Position,
            Perturbation::Blur { .. } => Attribute::Blur,
            Perturbation::Occlusion { .. } => Attribute::Occlusion,
            Perturbation::Fracture { .. } => Attribute::Fracture,
            Perturbation::Overlap { .. } => Attribute::Overlap,
        }
    }

    /// Build the perturbation for `attr` from the cell's strengths.
    pub fn from_strengths(attr: Attribute, s: &Strengths, block_size: usize) -> Self {
        match attr {
            Attribute::Color => Perturbation::Color { delta_e: s.delta_e },
            Attribute::Size => Perturbation::Size {
                ratio: s.size_ratio,
            },
            Attribute::Rotation => Perturbation::Rotation {
                delta: s.angle_delta,
            },
            Attribute::Position => Perturbation::Position {
                dx: offset_pixels(s.position[0], block_size),
                dy: offset_pixels(s.position[1], block_size),
            },
            Attribute::Blur => Perturbation::Blur { sigma: s.blur },
            Attribute::Occlusion => Perturbation::Occlusion {
                density: s.occlusion,
            },
            Attribute::Fracture => Perturbation::Fracture {
                strength: s.fracture,
            },
            Attribute::Overlap => Perturbation::Overlap {
                strength: s.overlap,
            },
        }
    }
}

/// Pixel offset for a two-decimal offset ratio, truncated toward zero.
///
/// Goes through whole hundredths so `0.05 * 100` is exactly 5 pixels.
fn offset_pixels(ratio: f32, block_size: usize) -> isize {
    let hundredths = (ratio * 100.0).round() as isize;
    hundredths * block_size as isize / 100
}

/// One selected odd cell, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OddSpec {
    /// Row-major cell index
    pub index: usize,
    /// 1-based row
    pub row: usize,
    /// 1-based column
    pub col: usize,
    pub attributes: AttributeSet,
    /// One entry per attribute in `attributes`, canonical order
    pub perturbations: Vec<Perturbation>,
    pub lab: Lab,
    pub color: Srgb,
    /// CIEDE2000 distance from the base color, when color is perturbed
    pub achieved_delta_e: Option<f32>,
    /// Side length the shape is rendered at before normalization
    pub render_size: usize,
    /// Rotation applied to this cell when the grid rotates
    pub angle: f32,
    pub bbox: BBox,
}

impl OddSpec {
    pub fn has(&self, attr: Attribute) -> bool {
        self.attributes.contains(attr)
    }

    pub fn perturbation(&self, attr: Attribute) -> Option<Perturbation> {
        self.perturbations
            .iter()
            .copied()
            .find(|p| p.attribute() == attr)
    }

    pub fn delta_e(&self) -> Option<f32> {
        match self.perturbation(Attribute::Color)? {
            Perturbation::Color { delta_e } => Some(delta_e),
            _ => None,
        }
    }

    pub fn size_ratio(&self) -> Option<f32> {
        match self.perturbation(Attribute::Size)? {
            Perturbation::Size { ratio } => Some(ratio),
            _ => None,
        }
    }

    pub fn angle_delta(&self) -> Option<f32> {
        match self.perturbation(Attribute::Rotation)? {
            Perturbation::Rotation { delta } => Some(delta),
            _ => None,
        }
    }

    pub fn position_offset(&self) -> Option<(isize, isize)> {
        match self.perturbation(Attribute::Position)? {
            Perturbation::Position { dx, dy } => Some((dx, dy)),
            _ => None,
        }
    }

    pub fn blur_sigma(&self) -> Option<f32> {
        match self.perturbation(Attribute::Blur)? {
            Perturbation::Blur { sigma } => Some(sigma),
            _ => None,
        }
    }

    pub fn occlusion_density(&self) -> Option<f32> {
        match self.perturbation(Attribute::Occlusion)? {
            Perturbation::Occlusion { density } => Some(density),
            _ => None,
        }
    }

    pub fn fracture_strength(&self) -> Option<f32> {
        match self.perturbation(Attribute::Fracture)? {
            Perturbation::Fracture { strength } => Some(strength),
            _ => None,
        }
    }

    pub fn overlap_strength(&self) -> Option<f32> {
        match self.perturbation(Attribute::Overlap)? {
            Perturbation::Overlap { strength } => Some(strength),
            _ => None,
        }
    }

    /// The same cell with its bbox recomputed for another layout.
    pub fn placed_in(self, layout: &GridLayout) -> Self {
        Self {
            bbox: layout.cell_bbox(self.index),
            ..self
        }
    }
}
