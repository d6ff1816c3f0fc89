//! On-disk layout of a generated dataset.
//!
//! ```text
//! <out>/image/image_<i>.png
//! <out>/metadata/metadata_<i>.json
//! <out>/image_number/image_<i>.png   (numbered variant)
//! <out>/image_red/image_<i>.png      (bbox variant)
//! <out>/run_summary.json
//! ```

use crate::error::PersistError;
use crate::rendering::encode_png;
use crate::services::batch::RunSummary;
use crate::services::generator::Sample;
use block_fx::Block;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const IMAGE_DIR: &str = "image";
pub const METADATA_DIR: &str = "metadata";
pub const NUMBERED_DIR: &str = "image_number";
pub const BBOX_DIR: &str = "image_red";
pub const SUMMARY_FILE: &str = "run_summary.json";

const OUTPUT_DIRS: [&str; 4] = [IMAGE_DIR, METADATA_DIR, NUMBERED_DIR, BBOX_DIR];

pub fn image_file_name(index: usize) -> String {
    format!("image_{index}.png")
}

pub fn metadata_file_name(index: usize) -> String {
    format!("metadata_{index}.json")
}

/// Writes samples under one output root.
///
/// Every sample owns its own files, so concurrent writers never touch the
/// same path.
#[derive(Debug, Clone)]
pub struct SampleWriter {
    root: PathBuf,
}

impl SampleWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directories, removing previous output first when
    /// `clean` is set.
    pub fn prepare(&self, clean: bool) -> io::Result<()> {
        if clean {
            for dir in OUTPUT_DIRS {
                let path = self.root.join(dir);
                if path.exists() {
                    fs::remove_dir_all(&path)?;
                    tracing::info!(path = %path.display(), "Removed previous output");
                }
            }
            let summary = self.root.join(SUMMARY_FILE);
            if summary.exists() {
                fs::remove_file(summary)?;
            }
        }
        fs::create_dir_all(self.root.join(IMAGE_DIR))?;
        fs::create_dir_all(self.root.join(METADATA_DIR))?;
        Ok(())
    }

    fn write_png(&self, dir: &str, index: usize, block: &Block) -> Result<PathBuf, PersistError> {
        let dir = self.root.join(dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(image_file_name(index));
        fs::write(&path, encode_png(block)?)?;
        Ok(path)
    }

    /// Write the image, its side outputs and finally its metadata.
    ///
    /// Returns the metadata path.
    pub fn write(&self, sample: &Sample) -> Result<PathBuf, PersistError> {
        let index = sample.index;
        self.write_png(IMAGE_DIR, index, &sample.canvas)?;
        if let Some(numbered) = &sample.numbered {
            self.write_png(NUMBERED_DIR, index, numbered)?;
        }
        if let Some(highlighted) = &sample.highlighted {
            self.write_png(BBOX_DIR, index, highlighted)?;
        }

        let mut metadata = sample.metadata.clone();
        metadata.image_file = Some(format!("{IMAGE_DIR}/{}", image_file_name(index)));
        metadata.metadata_file = Some(format!("{METADATA_DIR}/{}", metadata_file_name(index)));

        let dir = self.root.join(METADATA_DIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(metadata_file_name(index));
        fs::write(&path, serde_json::to_string_pretty(&metadata)?)?;

        tracing::debug!(index, path = %path.display(), "Wrote sample");
        Ok(path)
    }

    pub fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(SUMMARY_FILE);
        fs::write(&path, serde_json::to_string_pretty(summary)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        assert_eq!(image_file_name(7), "image_7.png");
        assert_eq!(metadata_file_name(12), "metadata_12.json");
    }

    #[test]
    fn test_prepare_creates_dirs() {
        let temp = TempDir::new().unwrap();
        let writer = SampleWriter::new(temp.path().join("out"));
        writer.prepare(false).unwrap();

        assert!(temp.path().join("out/image").is_dir());
        assert!(temp.path().join("out/metadata").is_dir());
    }

    #[test]
    fn test_prepare_clean_removes_previous_output() {
        let temp = TempDir::new().unwrap();
        let writer = SampleWriter::new(temp.path());
        writer.prepare(false).unwrap();

        let stale = temp.path().join("image/image_99.png");
        fs::write(&stale, b"old").unwrap();
        fs::create_dir_all(temp.path().join("image_red")).unwrap();
        fs::write(temp.path().join("notes.txt"), b"keep").unwrap();

        writer.prepare(false).unwrap();
        assert!(stale.exists());

        writer.prepare(true).unwrap();
        assert!(!stale.exists());
        assert!(!temp.path().join("image_red").exists());
        assert!(temp.path().join("image").is_dir());
        assert!(temp.path().join("notes.txt").exists());
    }
}
