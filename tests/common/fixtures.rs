//! Test fixtures: small configurations and deterministic renderers.

use block_fx::{Block, Srgb};
use oddgrid::error::RenderError;
use oddgrid::models::{AppConfig, AttributeSet, Span};
use oddgrid::rendering::ShapeRenderer;
use rand::RngCore;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FLAT_SHAPE: &str = "flat";
pub const MISSING_SHAPE: &str = "missing";

/// Noise-free renderer: a centered square covering half the side.
pub struct FlatSquareRenderer {
    ids: Vec<String>,
}

impl FlatSquareRenderer {
    pub fn new() -> Self {
        Self::with_ids(&[FLAT_SHAPE])
    }

    /// Advertise extra ids; only [`FLAT_SHAPE`] actually renders.
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn flat_square(size: usize, foreground: Srgb, background: Srgb) -> Block {
    let mut block = Block::square(size, background);
    let quarter = (size / 4) as isize;
    block.fill_rect(quarter, quarter, size / 2, size / 2, foreground);
    block
}

impl ShapeRenderer for FlatSquareRenderer {
    fn render(
        &self,
        shape_id: &str,
        size: usize,
        foreground: Srgb,
        background: Srgb,
        _rng: &mut dyn RngCore,
    ) -> Result<Block, RenderError> {
        if shape_id != FLAT_SHAPE {
            return Err(RenderError::ShapeNotFound(shape_id.to_string()));
        }
        Ok(flat_square(size, foreground, background))
    }

    fn shape_ids(&self) -> Vec<String> {
        self.ids.clone()
    }
}

/// How [`FaultyRenderer`] misbehaves on its trigger call.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Error,
    Panic,
}

/// Flat renderer that fails exactly once, on the `fail_at`-th render call
/// across all threads.
pub struct FaultyRenderer {
    fail_at: usize,
    fault: Fault,
    calls: AtomicUsize,
}

impl FaultyRenderer {
    pub fn new(fail_at: usize, fault: Fault) -> Self {
        Self {
            fail_at,
            fault,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ShapeRenderer for FaultyRenderer {
    fn render(
        &self,
        _shape_id: &str,
        size: usize,
        foreground: Srgb,
        background: Srgb,
        _rng: &mut dyn RngCore,
    ) -> Result<Block, RenderError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == self.fail_at {
            match self.fault {
                Fault::Error => return Err(RenderError::ShapeNotFound("injected".to_string())),
                Fault::Panic => panic!("injected render panic"),
            }
        }
        Ok(flat_square(size, foreground, background))
    }

    fn shape_ids(&self) -> Vec<String> {
        vec![FLAT_SHAPE.to_string()]
    }
}

/// Small, noise-free configuration: 3×3 grid of 40 px cells on white.
pub fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.layout.grid_rows = Span(3, 3);
    config.layout.grid_cols = Span(3, 3);
    config.layout.block_size = Span(40, 40);
    config.layout.gap = Span(4, 4);
    config.layout.margin = Span(8, 8);
    config.layout.debug_border = false;
    config.layout.sensor_noise_sigma = 0.0;
    config.background.white_probability = 1.0;
    config
}

/// [`small_config`] restricted to the given attributes.
pub fn config_with_attributes(list: &str) -> AppConfig {
    let mut config = small_config();
    config.odd.attributes = AttributeSet::parse_list(list).unwrap();
    config
}
