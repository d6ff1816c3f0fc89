//! Asset loading with embedded fallbacks
//!
//! Shapes and the default run configuration are compiled into the binary.
//! An external shapes directory is merged over the embedded set (same id
//! wins from disk), and an external config file replaces the embedded one.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded shape library (SVG files, one subdirectory per family)
#[derive(RustEmbed)]
#[folder = "shapes/"]
#[include = "*.svg"]
#[include = "**/*.svg"]
struct EmbeddedShapes;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Separator between a shape's family directory and its file stem.
pub const SHAPE_ID_SEPARATOR: &str = "(&)";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Shapes,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Shape id for an SVG path relative to the shapes root.
///
/// `star.svg` becomes `star`; `geometric/circle.svg` becomes
/// `geometric(&)circle`. Returns `None` for non-SVG paths.
pub fn shape_id_for(relative: &Path) -> Option<String> {
    let is_svg = relative
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return None;
    }
    let stem = relative.file_stem()?.to_str()?;
    match relative.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            let family: Vec<_> = parent
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect();
            Some(format!("{}{SHAPE_ID_SEPARATOR}{stem}", family.join("/")))
        }
        None => Some(stem.to_string()),
    }
}

/// Asset loader with merge behavior and optional filesystem override
pub struct AssetLoader {
    /// External shapes directory (from --shapes or ODDGRID_SHAPES)
    shapes_dir: Option<PathBuf>,
    /// External config file path (from --config or ODDGRID_CONFIG)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the user configured them.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(shapes_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            shapes_dir,
            config_file,
        }
    }

    pub fn shapes_dir(&self) -> Option<&Path> {
        self.shapes_dir.as_deref()
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// All shape SVGs keyed by shape id, embedded first, external on top.
    pub fn load_shapes(&self) -> io::Result<BTreeMap<String, Cow<'static, [u8]>>> {
        let mut shapes = BTreeMap::new();

        for file in EmbeddedShapes::iter() {
            if let (Some(id), Some(data)) = (
                shape_id_for(Path::new(file.as_ref())),
                EmbeddedShapes::get(&file),
            ) {
                tracing::trace!(shape = %id, "Loading shape from embedded assets");
                shapes.insert(id, data.data);
            }
        }

        if let Some(ref dir) = self.shapes_dir {
            if !dir.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Shapes directory not found: {}", dir.display()),
                ));
            }
            let mut files = Vec::new();
            collect_svg_files(dir, dir, &mut files)?;
            for relative in files {
                if let Some(id) = shape_id_for(&relative) {
                    let data = fs::read(dir.join(&relative))?;
                    tracing::trace!(shape = %id, "Loading shape from filesystem");
                    shapes.insert(id, Cow::Owned(data));
                }
            }
        }

        Ok(shapes)
    }

    /// Read the config file
    ///
    /// If an external path is configured, it must exist.
    /// Otherwise the embedded config is used.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            tracing::trace!(path = %path.display(), "Loading config from filesystem");
            return Ok(Cow::Owned(fs::read(path)?));
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Shapes => {
                    let dir = self
                        .shapes_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./shapes"));
                    fs::create_dir_all(&dir)?;

                    for file in EmbeddedShapes::iter() {
                        let path = dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedShapes::get(&file) {
                            if let Some(parent) = path.parent() {
                                fs::create_dir_all(parent)?;
                            }
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Shapes => EmbeddedShapes::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}

/// Recursively collect `*.svg` paths under `dir`, relative to `root`.
fn collect_svg_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().collect();
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_svg_files(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            if shape_id_for(relative).is_some() {
                out.push(relative.to_path_buf());
            }
        }
    }
    Ok(())
}
