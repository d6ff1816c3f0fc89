use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oddgrid::assets::{AssetCategory, AssetLoader};
use oddgrid::models::{AppConfig, AttributeSet};
use oddgrid::rendering::{ShapeRenderer, SvgShapeRenderer};
use oddgrid::services::batch::default_workers;
use oddgrid::services::{BatchRunner, Generator, SampleWriter};

#[derive(Parser)]
#[command(name = "oddgrid")]
#[command(about = "Synthetic odd-one-out grid images with ground-truth metadata")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset of grid images and metadata
    Generate {
        /// Number of images to generate
        #[arg(short, long, default_value_t = 10)]
        number: usize,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Parallel workers (defaults to the number of CPUs)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Run seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override odd.max_odds
        #[arg(long)]
        max_odds: Option<usize>,

        /// Override odd.max_attributes
        #[arg(long)]
        max_attributes: Option<usize>,

        /// Restrict the attribute universe (e.g. "color,size,rotation")
        #[arg(long)]
        attributes: Option<String>,

        /// External shapes directory, merged over the built-in shapes
        #[arg(long, env = "ODDGRID_SHAPES")]
        shapes: Option<PathBuf>,

        /// Configuration file (YAML)
        #[arg(short, long, env = "ODDGRID_CONFIG")]
        config: Option<PathBuf>,

        /// Also write images with row/column numbers
        #[arg(long)]
        numbered: bool,

        /// Also write images with red boxes around odd cells
        #[arg(long)]
        draw_bbox: bool,

        /// Remove previous output first
        #[arg(long)]
        clean: bool,
    },
    /// List registered shapes
    Shapes {
        /// External shapes directory, merged over the built-in shapes
        #[arg(long, env = "ODDGRID_SHAPES")]
        shapes: Option<PathBuf>,
    },
    /// Extract the embedded config and shapes for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            number,
            output,
            workers,
            seed,
            max_odds,
            max_attributes,
            attributes,
            shapes,
            config,
            numbered,
            draw_bbox,
            clean,
        }) => {
            let overrides = Overrides {
                max_odds,
                max_attributes,
                attributes,
                numbered,
                draw_bbox,
            };
            let options = RunOptions {
                number,
                output,
                workers,
                seed,
                clean,
            };
            run_generate_command(AssetLoader::new(shapes, config), overrides, options).await
        }
        Some(Commands::Shapes { shapes }) => run_shapes_command(shapes),
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oddgrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Command-line overrides applied on top of the loaded configuration
struct Overrides {
    max_odds: Option<usize>,
    max_attributes: Option<usize>,
    attributes: Option<String>,
    numbered: bool,
    draw_bbox: bool,
}

impl Overrides {
    fn apply(self, mut config: AppConfig) -> anyhow::Result<AppConfig> {
        if let Some(max_odds) = self.max_odds {
            config.odd.max_odds = max_odds;
        }
        if let Some(max_attributes) = self.max_attributes {
            config.odd.max_attributes = max_attributes;
        }
        if let Some(list) = self.attributes {
            config.odd.attributes = AttributeSet::parse_list(&list)?;
        }
        config.output.numbered_variant |= self.numbered;
        config.output.draw_bbox |= self.draw_bbox;
        config.validate()?;
        Ok(config)
    }
}

struct RunOptions {
    number: usize,
    output: PathBuf,
    workers: Option<usize>,
    seed: Option<u64>,
    clean: bool,
}

async fn run_generate_command(
    loader: AssetLoader,
    overrides: Overrides,
    options: RunOptions,
) -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::load_from_assets(&loader).context("Failed to load configuration")?;
    let config = overrides.apply(config)?;

    let renderer = SvgShapeRenderer::from_assets(
        &loader,
        config.shapes.shrink_ratio,
        config.shapes.render_noise_sigma,
    )?;
    let generator = Arc::new(Generator::new(Arc::new(config), Arc::new(renderer)));

    let writer = Arc::new(SampleWriter::new(&options.output));
    writer
        .prepare(options.clean)
        .with_context(|| format!("Failed to prepare {}", options.output.display()))?;

    let seed = options.seed.unwrap_or_else(rand::random);
    let runner = BatchRunner::new(generator, writer.clone(), seed)
        .with_workers(options.workers.unwrap_or_else(default_workers));

    let summary = runner.run(options.number).await;
    let summary_path = writer.write_summary(&summary)?;

    println!(
        "Generated {}/{} images in {} (seed {seed})",
        summary.succeeded,
        summary.requested,
        options.output.display()
    );
    if !summary.failures.is_empty() {
        println!("\nFailed samples:");
        for failure in &summary.failures {
            println!("  #{}: {}", failure.index, failure.message);
        }
    }
    println!("Summary: {}", summary_path.display());
    Ok(())
}

fn run_shapes_command(shapes_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let loader = AssetLoader::new(shapes_dir, None);
    let renderer = SvgShapeRenderer::from_assets(&loader, 0.75, 0.0)?;
    let ids = renderer.shape_ids();

    println!("Registered shapes ({}):", ids.len());
    for id in ids {
        println!("  {id}");
    }
    Ok(())
}

fn run_init_command(force: bool) -> anyhow::Result<()> {
    let shapes_dir = std::env::var("ODDGRID_SHAPES").ok().map(PathBuf::from);
    let config_file = std::env::var("ODDGRID_CONFIG").ok().map(PathBuf::from);
    let loader = AssetLoader::new(shapes_dir, config_file);

    let report = loader.init(&[AssetCategory::Config, AssetCategory::Shapes], force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("ODDGRID_CONFIG").ok();
    let shapes_dir = std::env::var("ODDGRID_SHAPES").ok();

    println!("Oddgrid v{VERSION}");
    println!("Synthetic odd-one-out grid images with ground-truth metadata\n");

    println!("Environment Variables:");
    println!(
        "  ODDGRID_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  ODDGRID_SHAPES = {}",
        shapes_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config: {config_source}");

    let embedded = AssetLoader::list_embedded(AssetCategory::Shapes).len();
    match shapes_dir {
        Some(ref path) if PathBuf::from(path).is_dir() => {
            let loader = AssetLoader::new(Some(PathBuf::from(path)), None);
            let total = loader.load_shapes().map(|s| s.len()).unwrap_or(0);
            println!("  Shapes: {path} ({total} total, {embedded} embedded)");
        }
        Some(ref path) => println!("  Shapes: embedded ({path} not found, {embedded} embedded)"),
        None => println!("  Shapes: embedded ({embedded} shapes)"),
    }

    println!("\nCommands:");
    println!("  oddgrid generate   Generate a dataset");
    println!("  oddgrid shapes     List registered shapes");
    println!("  oddgrid init       Extract embedded assets for customization");
    println!("  oddgrid --help     Show all options");
}
