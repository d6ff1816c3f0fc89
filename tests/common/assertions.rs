//! Assertion helpers for tests.

use oddgrid::models::Attribute;
use oddgrid::services::{OddRecord, SampleMetadata};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::Path;

/// Assert the file exists and starts with the PNG signature
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "{} is not a PNG ({} bytes)",
        path.display(),
        bytes.len()
    );
}

fn strength_present(record: &OddRecord, attr: Attribute) -> bool {
    match attr {
        Attribute::Color => record.delta_e.is_some(),
        Attribute::Size => record.size_ratio.is_some(),
        Attribute::Rotation => record.angle_strength.is_some(),
        Attribute::Position => record.position_scale.is_some(),
        Attribute::Blur => record.blur_scale.is_some(),
        Attribute::Occlusion => record.occlusion_scale.is_some(),
        Attribute::Fracture => record.fracture_scale.is_some(),
        Attribute::Overlap => record.overlap_scale.is_some(),
    }
}

/// Assert the structural invariants every metadata record must satisfy
pub fn assert_metadata_consistent(metadata: &SampleMetadata, max_odds: usize) {
    let [rows, cols] = metadata.grid_size;
    let total = rows * cols;

    assert_eq!(metadata.odd_count, metadata.odd_list.len());
    assert!(
        (1..=max_odds.min(total)).contains(&metadata.odd_count),
        "odd_count {} outside 1..={}",
        metadata.odd_count,
        max_odds.min(total)
    );

    let mut cells = HashSet::new();
    let [height, width] = metadata.image_size;
    for record in &metadata.odd_list {
        assert!(!record.types.is_empty(), "empty attribute set");
        let unique: HashSet<_> = record.types.iter().collect();
        assert_eq!(unique.len(), record.types.len(), "duplicate attributes");

        assert!((1..=rows).contains(&record.row));
        assert!((1..=cols).contains(&record.col));
        assert!(cells.insert((record.row, record.col)), "odd cell listed twice");

        assert!(record.bbox.x + record.bbox.w <= width);
        assert!(record.bbox.y + record.bbox.h <= height);

        for attr in Attribute::ALL {
            assert_eq!(
                strength_present(record, attr),
                record.types.contains(&attr),
                "strength for {attr} does not match attribute presence"
            );
        }
        assert_eq!(record.achieved_delta_e.is_some(), record.delta_e.is_some());
    }
}
