use crate::assets::AssetLoader;
use crate::error::ConfigError;
use crate::models::{Attribute, AttributeSet};
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[min, max]` range, written as a two-element list in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T>(pub T, pub T);

impl<T: Copy + PartialOrd + fmt::Display> Span<T> {
    pub fn min(&self) -> T {
        self.0
    }

    pub fn max(&self) -> T {
        self.1
    }

    pub fn contains(&self, value: T) -> bool {
        self.0 <= value && value <= self.1
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        // NaN bounds compare as unordered and are rejected.
        if self.0.partial_cmp(&self.1).map_or(true, |o| o.is_gt()) {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.0.to_string(),
                max: self.1.to_string(),
            });
        }
        Ok(())
    }
}

impl<T: Copy + PartialOrd + SampleUniform> Span<T> {
    /// Uniform draw from the inclusive range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.0..=self.1)
    }
}

/// Strength range for one attribute, with an optional exclusion band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthRange {
    pub range: Span<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Span<f32>>,
}

impl StrengthRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            range: Span(min, max),
            exclude: None,
        }
    }

    pub fn excluding(mut self, min: f32, max: f32) -> Self {
        self.exclude = Some(Span(min, max));
        self
    }

    /// True when the exclusion band lies strictly inside the range.
    pub fn has_effective_exclusion(&self) -> bool {
        match self.exclude {
            Some(ex) => ex.min() > self.range.min() && ex.max() < self.range.max(),
            None => false,
        }
    }

    /// Exclusion-aware uniform draw.
    ///
    /// Without an effective exclusion this is a plain uniform draw over the
    /// range. Otherwise a fair coin picks the left remainder
    /// `[min, exclude_min]` or the right remainder `[exclude_max, max]`, so no
    /// value inside `(exclude_min, exclude_max)` is ever returned.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self.exclude {
            Some(ex) if self.has_effective_exclusion() => {
                if rng.gen_bool(0.5) {
                    rng.gen_range(self.range.min()..=ex.min())
                } else {
                    rng.gen_range(ex.max()..=self.range.max())
                }
            }
            _ => self.range.sample(rng),
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        self.range.validate(name)?;
        if let Some(ex) = self.exclude {
            ex.validate(name)?;
        }
        Ok(())
    }
}

/// How the odd cell's color is derived from the base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStrategy {
    /// Uniform per-component Lab noise scaled by ΔE
    #[default]
    Noise,
    /// Best-effort CIEDE2000 search for the requested ΔE
    Calibrated,
}

/// Run configuration loaded from config.yaml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub odd: OddConfig,
    pub shapes: ShapeConfig,
    pub background: BackgroundConfig,
    pub output: OutputConfig,
}

/// Grid geometry ranges, sampled once per image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub grid_rows: Span<usize>,
    pub grid_cols: Span<usize>,
    pub block_size: Span<usize>,
    pub gap: Span<usize>,
    pub margin: Span<usize>,
    /// Shared rotation of normal cells, in whole degrees
    pub base_angle: Span<i32>,
    /// Widen the gap to the computed safe gap before layout
    pub enforce_safe_gap: bool,
    /// Draw a 1 px black frame around every cell
    pub debug_border: bool,
    /// Sigma of the sensor noise pass over the finished canvas
    pub sensor_noise_sigma: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_rows: Span(3, 6),
            grid_cols: Span(3, 6),
            block_size: Span(100, 200),
            gap: Span(10, 30),
            margin: Span(30, 60),
            base_angle: Span(0, 360),
            enforce_safe_gap: false,
            debug_border: true,
            sensor_noise_sigma: 0.01,
        }
    }
}

/// Odd-cell selection and per-attribute strength ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddConfig {
    /// Upper bound on odd cells per image (clamped to the cell count)
    pub max_odds: usize,
    /// Upper bound on attributes per odd cell (clamped to the universe)
    pub max_attributes: usize,
    /// Attribute universe odd cells draw from
    pub attributes: AttributeSet,
    pub color_strategy: ColorStrategy,
    pub delta_e: StrengthRange,
    pub size_ratio: StrengthRange,
    pub angle: StrengthRange,
    /// Position factor; the pixel offset ratio is the sample minus 1
    pub position: StrengthRange,
    pub blur: StrengthRange,
    pub occlusion: StrengthRange,
    pub fracture: StrengthRange,
    pub overlap: StrengthRange,
}

impl Default for OddConfig {
    fn default() -> Self {
        Self {
            max_odds: 5,
            max_attributes: Attribute::ALL.len(),
            attributes: AttributeSet::all(),
            color_strategy: ColorStrategy::Noise,
            delta_e: StrengthRange::new(5.0, 15.0),
            size_ratio: StrengthRange::new(0.85, 1.15).excluding(0.95, 1.05),
            angle: StrengthRange::new(-20.0, 20.0).excluding(-5.0, 5.0),
            position: StrengthRange::new(0.85, 1.15).excluding(0.95, 1.05),
            blur: StrengthRange::new(0.6, 1.1),
            occlusion: StrengthRange::new(0.05, 0.15),
            fracture: StrengthRange::new(0.05, 0.2),
            overlap: StrengthRange::new(0.5, 1.0),
        }
    }
}

/// Shape rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Rotationally symmetric shapes that never get the rotation attribute
    pub rotation_banned: Vec<String>,
    pub render_noise_sigma: f32,
    /// Drawn shape side as a fraction of the cell side
    pub shrink_ratio: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            rotation_banned: vec!["geometric(&)circle".to_string()],
            render_noise_sigma: 0.02,
            shrink_ratio: 0.75,
        }
    }
}

/// Canvas background color policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub white_probability: f64,
    pub light_range: Span<f32>,
    /// Keep channels close together for a soft tint
    pub smooth: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            white_probability: 0.5,
            light_range: Span(0.8, 1.0),
            smooth: true,
        }
    }
}

/// Optional side outputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Also write a copy with row/column numbers in the margin
    pub numbered_variant: bool,
    /// Also write a copy with red boxes around the odd cells
    pub draw_bbox: bool,
}

impl AppConfig {
    /// Load and validate configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let content = loader.read_config_string()?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            attributes = %config.odd.attributes,
            max_odds = config.odd.max_odds,
            color_strategy = ?config.odd.color_strategy,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range and bound once, before any sample is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        layout.grid_rows.validate("layout.grid_rows")?;
        layout.grid_cols.validate("layout.grid_cols")?;
        layout.block_size.validate("layout.block_size")?;
        layout.gap.validate("layout.gap")?;
        layout.margin.validate("layout.margin")?;
        layout.base_angle.validate("layout.base_angle")?;
        for (name, min) in [
            ("layout.grid_rows", layout.grid_rows.min()),
            ("layout.grid_cols", layout.grid_cols.min()),
            ("layout.block_size", layout.block_size.min()),
        ] {
            if min == 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        non_negative("layout.sensor_noise_sigma", layout.sensor_noise_sigma)?;

        let odd = &self.odd;
        if odd.attributes.is_empty() {
            return Err(ConfigError::EmptyAttributes);
        }
        odd.delta_e.validate("odd.delta_e")?;
        odd.size_ratio.validate("odd.size_ratio")?;
        odd.angle.validate("odd.angle")?;
        odd.position.validate("odd.position")?;
        odd.blur.validate("odd.blur")?;
        odd.occlusion.validate("odd.occlusion")?;
        odd.fracture.validate("odd.fracture")?;
        odd.overlap.validate("odd.overlap")?;
        if odd.size_ratio.range.min() <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "odd.size_ratio",
                reason: "ratios must be positive".to_string(),
            });
        }

        non_negative("shapes.render_noise_sigma", self.shapes.render_noise_sigma)?;
        if !(self.shapes.shrink_ratio > 0.0 && self.shapes.shrink_ratio <= 1.0) {
            return Err(ConfigError::InvalidValue {
                name: "shapes.shrink_ratio",
                reason: format!("{} is outside (0, 1]", self.shapes.shrink_ratio),
            });
        }

        let bg = &self.background;
        if !(0.0..=1.0).contains(&bg.white_probability) {
            return Err(ConfigError::InvalidValue {
                name: "background.white_probability",
                reason: format!("{} is outside [0, 1]", bg.white_probability),
            });
        }
        bg.light_range.validate("background.light_range")?;
        if bg.light_range.min() < 0.0 || bg.light_range.max() > 1.0 {
            return Err(ConfigError::InvalidValue {
                name: "background.light_range",
                reason: "channels must lie in [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}

impl OddConfig {
    /// Odd-cell cap for a grid of `total_cells`, clamped to `[1, total_cells]`.
    pub fn effective_max_odds(&self, total_cells: usize) -> usize {
        self.max_odds.clamp(1, total_cells.max(1))
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            name,
            reason: format!("{value} must be non-negative"),
        });
    }
    Ok(())
}
