//! Grid compositing and the per-cell transform pipeline.

use crate::error::SynthesisError;
use crate::models::{Attribute, BlockSpec, GridLayout, OddSpec};
use crate::rendering::ShapeRenderer;
use block_fx::{ops, Block, Srgb};
use rand::RngCore;
use std::collections::HashMap;

/// One step of the odd-cell pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Draw the shape at the cell's render size
    Render,
    /// Center crop or pad back to the block size
    Normalize,
    Shift,
    Blur,
    Occlude,
    Fracture,
    Ghost,
    /// Grid-wide rotation; runs only when some odd cell rotates
    Rotate,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Render => "render",
            Stage::Normalize => "normalize",
            Stage::Shift => "shift",
            Stage::Blur => "blur",
            Stage::Occlude => "occlude",
            Stage::Fracture => "fracture",
            Stage::Ghost => "ghost",
            Stage::Rotate => "rotate",
        }
    }
}

/// Order in which an odd cell is built.
///
/// Everything after `Normalize` works on, and must return, a
/// `block_size × block_size` buffer.
pub const ODD_PIPELINE: [Stage; 8] = [
    Stage::Render,
    Stage::Normalize,
    Stage::Shift,
    Stage::Blur,
    Stage::Occlude,
    Stage::Fracture,
    Stage::Ghost,
    Stage::Rotate,
];

/// Canvas-wide settings the compositor needs besides the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOptions {
    pub debug_border: bool,
    pub sensor_noise_sigma: f32,
}

/// Shared per-image context for building cells.
#[derive(Debug, Clone, Copy)]
struct CellContext {
    block_size: usize,
    background: Srgb,
    grid_rotates: bool,
}

fn check_size(stage: Stage, block: &Block, side: usize) -> Result<(), SynthesisError> {
    if block.is_square_of(side) {
        return Ok(());
    }
    Err(SynthesisError::StageSize {
        stage: stage.name(),
        width: block.width(),
        height: block.height(),
        side,
    })
}

fn apply_stage(
    stage: Stage,
    block: Block,
    odd: &OddSpec,
    ctx: &CellContext,
    rng: &mut dyn RngCore,
) -> Block {
    let bg = ctx.background;
    match stage {
        Stage::Render => block,
        Stage::Normalize => ops::normalize(&block, ctx.block_size, bg),
        Stage::Shift => match odd.position_offset() {
            Some((dx, dy)) => ops::shift(&block, dx, dy, bg),
            None => block,
        },
        Stage::Blur => match odd.blur_sigma() {
            Some(sigma) => ops::gaussian_blur(&block, sigma),
            None => block,
        },
        Stage::Occlude => match odd.occlusion_density() {
            Some(density) => ops::occlude(&block, density, rng),
            None => block,
        },
        Stage::Fracture => match odd.fracture_strength() {
            Some(strength) => ops::fracture(&block, strength, bg, rng),
            None => block,
        },
        Stage::Ghost => match odd.overlap_strength() {
            Some(strength) => ops::ghost(&block, strength, bg, rng),
            None => block,
        },
        Stage::Rotate if ctx.grid_rotates => ops::rotate(&block, odd.angle, bg),
        Stage::Rotate => block,
    }
}

fn render_odd_block(
    renderer: &dyn ShapeRenderer,
    spec: &BlockSpec,
    odd: &OddSpec,
    ctx: &CellContext,
    rng: &mut dyn RngCore,
) -> Result<Block, SynthesisError> {
    let mut block = renderer.render(
        &spec.shape_id,
        odd.render_size,
        odd.color,
        ctx.background,
        rng,
    )?;
    for &stage in &ODD_PIPELINE[1..] {
        block = apply_stage(stage, block, odd, ctx, rng);
        check_size(stage, &block, ctx.block_size)?;
    }
    Ok(block)
}

fn render_base_block(
    renderer: &dyn ShapeRenderer,
    spec: &BlockSpec,
    ctx: &CellContext,
    rng: &mut dyn RngCore,
) -> Result<Block, SynthesisError> {
    let mut block = renderer.render(
        &spec.shape_id,
        ctx.block_size,
        spec.base_color,
        ctx.background,
        rng,
    )?;
    check_size(Stage::Render, &block, ctx.block_size)?;
    if ctx.grid_rotates {
        block = ops::rotate(&block, spec.base_angle, ctx.background);
        check_size(Stage::Rotate, &block, ctx.block_size)?;
    }
    Ok(block)
}

/// Build the finished canvas for one image.
///
/// Cells are visited in row-major order. Normal cells are rendered fresh
/// each time, so each carries its own renderer noise. The sensor noise pass
/// runs once over the whole canvas at the end.
pub fn compose(
    renderer: &dyn ShapeRenderer,
    layout: &GridLayout,
    spec: &BlockSpec,
    odds: &[OddSpec],
    options: &CanvasOptions,
    rng: &mut dyn RngCore,
) -> Result<Block, SynthesisError> {
    let (width, height) = layout.canvas_size();
    let mut canvas = Block::filled(width, height, layout.background);

    let by_index: HashMap<usize, &OddSpec> = odds.iter().map(|odd| (odd.index, odd)).collect();
    let ctx = CellContext {
        block_size: layout.block_size,
        background: layout.background,
        grid_rotates: odds.iter().any(|odd| odd.has(Attribute::Rotation)),
    };

    tracing::debug!(
        rows = layout.rows,
        cols = layout.cols,
        block_size = layout.block_size,
        odds = odds.len(),
        grid_rotates = ctx.grid_rotates,
        "Compositing grid"
    );

    for index in 0..layout.total_cells() {
        let block = match by_index.get(&index) {
            Some(odd) => render_odd_block(renderer, spec, odd, &ctx, rng)?,
            None => render_base_block(renderer, spec, &ctx, rng)?,
        };
        let (x, y) = layout.cell_origin(index);
        canvas.paste(&block, x as isize, y as isize);
        if options.debug_border {
            canvas.stroke_rect(
                x as isize,
                y as isize,
                layout.block_size,
                layout.block_size,
                1,
                Srgb::BLACK,
            );
        }
    }

    ops::add_gaussian_noise(&mut canvas, options.sensor_noise_sigma, rng);
    Ok(canvas)
}
