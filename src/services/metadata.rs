use crate::models::{Attribute, BBox, BlockSpec, GridLayout, OddSpec};
use serde::{Deserialize, Serialize};

/// Ground-truth record for one odd cell.
///
/// Strength fields are `null` when the attribute is absent, which keeps
/// "not perturbed" apart from "perturbed with a small strength".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddRecord {
    pub types: Vec<Attribute>,
    pub row: usize,
    pub col: usize,
    pub bbox: BBox,
    pub delta_e: Option<f32>,
    /// Measured CIEDE2000 distance of the rendered color
    pub achieved_delta_e: Option<f32>,
    pub size_ratio: Option<f32>,
    pub angle_strength: Option<f32>,
    /// Pixel offset `[dx, dy]`
    pub position_scale: Option<[isize; 2]>,
    pub blur_scale: Option<f32>,
    pub occlusion_scale: Option<f32>,
    pub fracture_scale: Option<f32>,
    pub overlap_scale: Option<f32>,
}

impl From<&OddSpec> for OddRecord {
    fn from(odd: &OddSpec) -> Self {
        Self {
            types: odd.attributes.to_vec(),
            row: odd.row,
            col: odd.col,
            bbox: odd.bbox,
            delta_e: odd.delta_e(),
            achieved_delta_e: odd.achieved_delta_e,
            size_ratio: odd.size_ratio(),
            angle_strength: odd.angle_delta(),
            position_scale: odd.position_offset().map(|(dx, dy)| [dx, dy]),
            blur_scale: odd.blur_sigma(),
            occlusion_scale: odd.occlusion_density(),
            fracture_scale: odd.fracture_strength(),
            overlap_scale: odd.overlap_strength(),
        }
    }
}

/// Per-image metadata written next to every PNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetadata {
    /// `[rows, cols]`
    pub grid_size: [usize; 2],
    pub base_shape: String,
    pub base_lab: [f32; 3],
    pub odd_count: usize,
    pub odd_list: Vec<OddRecord>,
    /// `[height, width]`
    pub image_size: [usize; 2],
    pub base_angle: f32,
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_file: Option<String>,
}

impl SampleMetadata {
    pub fn assemble(index: usize, layout: &GridLayout, spec: &BlockSpec, odds: &[OddSpec]) -> Self {
        let (width, height) = layout.canvas_size();
        Self {
            grid_size: [layout.rows, layout.cols],
            base_shape: spec.shape_id.clone(),
            base_lab: spec.base_lab.to_array(),
            odd_count: odds.len(),
            odd_list: odds.iter().map(OddRecord::from).collect(),
            image_size: [height, width],
            base_angle: spec.base_angle,
            index,
            image_file: None,
            metadata_file: None,
        }
    }
}
