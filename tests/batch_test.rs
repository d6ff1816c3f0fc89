//! Batch runner tests: file layout, failure isolation and run summary.

mod common;

use common::{assert_png_file, small_config, Fault, FaultyRenderer, FlatSquareRenderer};
use oddgrid::assets::AssetLoader;
use oddgrid::models::AppConfig;
use oddgrid::rendering::{ShapeRenderer, SvgShapeRenderer};
use oddgrid::services::{BatchRunner, Generator, RunSummary, SampleMetadata, SampleWriter};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn runner(
    config: AppConfig,
    renderer: impl ShapeRenderer + 'static,
    out: &Path,
    seed: u64,
) -> (BatchRunner, Arc<SampleWriter>) {
    let generator = Arc::new(Generator::new(Arc::new(config), Arc::new(renderer)));
    let writer = Arc::new(SampleWriter::new(out));
    writer.prepare(false).unwrap();
    let runner = BatchRunner::new(generator, writer.clone(), seed).with_workers(3);
    (runner, writer)
}

fn read_metadata(out: &Path, index: usize) -> SampleMetadata {
    let path = out.join(format!("metadata/metadata_{index}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap()
}

fn assert_written(out: &Path, index: usize) {
    assert_png_file(&out.join(format!("image/image_{index}.png")));
    assert!(out.join(format!("metadata/metadata_{index}.json")).exists());
}

fn assert_not_written(out: &Path, index: usize) {
    assert!(!out.join(format!("image/image_{index}.png")).exists());
    assert!(!out.join(format!("metadata/metadata_{index}.json")).exists());
}

#[tokio::test]
async fn test_batch_writes_dataset_layout() {
    let temp = TempDir::new().unwrap();
    let mut config = small_config();
    config.output.numbered_variant = true;
    config.output.draw_bbox = true;
    let (runner, writer) = runner(config, FlatSquareRenderer::new(), temp.path(), 1);

    let summary = runner.run(5).await;
    assert_eq!(summary.requested, 5);
    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 0);

    for index in 0..5 {
        assert_written(temp.path(), index);
        assert_png_file(&temp.path().join(format!("image_number/image_{index}.png")));
        assert_png_file(&temp.path().join(format!("image_red/image_{index}.png")));

        let metadata = read_metadata(temp.path(), index);
        assert_eq!(metadata.index, index);
        assert_eq!(metadata.image_file.as_deref(), Some(format!("image/image_{index}.png").as_str()));
        assert_eq!(
            metadata.metadata_file.as_deref(),
            Some(format!("metadata/metadata_{index}.json").as_str())
        );
        common::assert_metadata_consistent(&metadata, 5);
    }

    let path = writer.write_summary(&summary).unwrap();
    let written: RunSummary = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written, summary);
}

#[tokio::test]
async fn test_batch_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let (a, _) = runner(small_config(), FlatSquareRenderer::new(), first.path(), 77);
    let (b, _) = runner(small_config(), FlatSquareRenderer::new(), second.path(), 77);
    a.run(4).await;
    b.run(4).await;

    for index in 0..4 {
        assert_eq!(read_metadata(first.path(), index), read_metadata(second.path(), index));
    }
}

#[tokio::test]
async fn test_failed_sample_does_not_abort_batch() {
    let temp = TempDir::new().unwrap();
    // 9 cells per sample, so call 20 lands inside exactly one sample.
    let (runner, _) = runner(
        small_config(),
        FaultyRenderer::new(20, Fault::Error),
        temp.path(),
        2,
    );

    let summary = runner.run(6).await;
    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 1);

    let failure = &summary.failures[0];
    assert!(failure.message.contains("injected"), "{}", failure.message);
    assert_not_written(temp.path(), failure.index);
    for index in (0..6).filter(|&i| i != failure.index) {
        assert_written(temp.path(), index);
    }
}

#[tokio::test]
async fn test_panicking_sample_does_not_abort_batch() {
    let temp = TempDir::new().unwrap();
    let (runner, _) = runner(
        small_config(),
        FaultyRenderer::new(30, Fault::Panic),
        temp.path(),
        3,
    );

    let summary = runner.run(6).await;
    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 1);
    assert!(summary.failures[0].message.contains("injected render panic"));
    assert_not_written(temp.path(), summary.failures[0].index);
}

#[tokio::test]
async fn test_invalid_shape_id_is_isolated() {
    let temp = TempDir::new().unwrap();
    let renderer = FlatSquareRenderer::with_ids(&[common::FLAT_SHAPE, common::MISSING_SHAPE]);
    let (runner, _) = runner(small_config(), renderer, temp.path(), 4);

    let count = 16;
    let summary = runner.run(count).await;
    assert_eq!(summary.succeeded + summary.failed, count);

    let failed: Vec<usize> = summary.failures.iter().map(|f| f.index).collect();
    let mut sorted = failed.clone();
    sorted.sort_unstable();
    assert_eq!(failed, sorted);

    for failure in &summary.failures {
        assert_eq!(failure.message, "Rendering error: Shape not found: missing");
    }
    for index in 0..count {
        if failed.contains(&index) {
            assert_not_written(temp.path(), index);
        } else {
            assert_written(temp.path(), index);
            assert_eq!(read_metadata(temp.path(), index).base_shape, common::FLAT_SHAPE);
        }
    }
}

#[tokio::test]
async fn test_embedded_shapes_end_to_end() {
    let temp = TempDir::new().unwrap();
    let config = small_config();
    let renderer = SvgShapeRenderer::from_assets(
        &AssetLoader::new(None, None),
        config.shapes.shrink_ratio,
        config.shapes.render_noise_sigma,
    )
    .unwrap();
    let (runner, _) = runner(config, renderer, temp.path(), 5);

    let summary = runner.run(3).await;
    assert_eq!(summary.succeeded, 3, "{:?}", summary.failures);
    for index in 0..3 {
        assert_written(temp.path(), index);
        assert!(read_metadata(temp.path(), index).base_shape.contains("(&)"));
    }
}
