use crate::error::SynthesisError;
use crate::models::{AppConfig, BlockSpec, GridLayout, OddSpec};
use crate::rendering::{draw_bboxes, NumberLabeler, ShapeRenderer};
use crate::services::compositor::{compose, CanvasOptions};
use crate::services::metadata::SampleMetadata;
use crate::services::{safe_gap, sampler, scene};
use block_fx::Block;
use rand::RngCore;
use std::sync::Arc;

/// Everything produced for one image.
pub struct Sample {
    pub index: usize,
    pub canvas: Block,
    /// Canvas with row/column numbers, when enabled
    pub numbered: Option<Block>,
    /// Canvas with red odd-cell boxes, when enabled
    pub highlighted: Option<Block>,
    pub metadata: SampleMetadata,
    pub layout: GridLayout,
    pub spec: BlockSpec,
    pub odds: Vec<OddSpec>,
}

/// Synthesizes single samples from a validated configuration.
///
/// Holds no per-sample state; every call draws from the generator it is
/// given, so the same seed reproduces the same image.
pub struct Generator {
    config: Arc<AppConfig>,
    renderer: Arc<dyn ShapeRenderer>,
    shape_ids: Vec<String>,
    labeler: Option<NumberLabeler>,
}

impl Generator {
    pub fn new(config: Arc<AppConfig>, renderer: Arc<dyn ShapeRenderer>) -> Self {
        let shape_ids = renderer.shape_ids();
        let labeler = config.output.numbered_variant.then(NumberLabeler::new);
        Self {
            config,
            renderer,
            shape_ids,
            labeler,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn generate(&self, index: usize, rng: &mut dyn RngCore) -> Result<Sample, SynthesisError> {
        let cfg = &*self.config;

        let background = scene::random_background(&cfg.background, rng);
        let mut layout = scene::sample_layout(&cfg.layout, background, rng);
        let spec = scene::sample_block_spec(&self.shape_ids, &cfg.layout, layout.block_size, rng)?;

        let universe = sampler::effective_universe(
            cfg.odd.attributes,
            &spec.shape_id,
            &cfg.shapes.rotation_banned,
        );
        let mut odds = sampler::plan_odds(&cfg.odd, universe, &layout, &spec, rng)?;

        let needed = safe_gap::safe_gap(&spec, &odds);
        if needed > layout.gap {
            if cfg.layout.enforce_safe_gap {
                tracing::debug!(index, from = layout.gap, to = needed, "Widening gap to safe gap");
                layout.gap = needed;
                odds = odds.into_iter().map(|odd| odd.placed_in(&layout)).collect();
            } else {
                tracing::debug!(index, gap = layout.gap, safe_gap = needed, "Gap below safe gap");
            }
        }

        let options = CanvasOptions {
            debug_border: cfg.layout.debug_border,
            sensor_noise_sigma: cfg.layout.sensor_noise_sigma,
        };
        let canvas = compose(&*self.renderer, &layout, &spec, &odds, &options, rng)?;

        let numbered = match &self.labeler {
            Some(labeler) => Some(labeler.label(&canvas, &layout)?),
            None => None,
        };
        let highlighted = cfg.output.draw_bbox.then(|| {
            let boxes: Vec<_> = odds.iter().map(|odd| odd.bbox).collect();
            draw_bboxes(&canvas, &boxes)
        });

        let metadata = SampleMetadata::assemble(index, &layout, &spec, &odds);
        tracing::debug!(
            index,
            shape = %spec.shape_id,
            grid = ?(layout.rows, layout.cols),
            odds = odds.len(),
            "Generated sample"
        );

        Ok(Sample {
            index,
            canvas,
            numbered,
            highlighted,
            metadata,
            layout,
            spec,
            odds,
        })
    }
}
