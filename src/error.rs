use block_fx::BlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid range for {name}: min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: String,
        max: String,
    },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Attribute universe is empty")]
    EmptyAttributes,

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(String),

    #[error("No shapes registered")]
    NoShapes,

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Block error: {0}")]
    Block(#[from] BlockError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Block error: {0}")]
    Block(#[from] BlockError),

    #[error("Block {stage} produced {width}x{height}, expected {side}x{side}")]
    StageSize {
        stage: &'static str,
        width: usize,
        height: usize,
        side: usize,
    },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Metadata serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why one sample of a batch did not make it to disk
#[derive(Debug, Error)]
pub enum SampleError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_invalid_range() {
        let error = ConfigError::InvalidRange {
            name: "layout.block_size",
            min: "200".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid range for layout.block_size: min 200 > max 100"
        );
    }

    #[test]
    fn test_config_error_unknown_attribute() {
        let error = ConfigError::UnknownAttribute("sparkle".to_string());
        assert_eq!(error.to_string(), "Unknown attribute: sparkle");
    }

    #[test]
    fn test_config_error_empty_attributes() {
        assert_eq!(
            ConfigError::EmptyAttributes.to_string(),
            "Attribute universe is empty"
        );
    }

    #[test]
    fn test_render_error_shape_not_found() {
        let error = RenderError::ShapeNotFound("geometric(&)blob".to_string());
        assert_eq!(error.to_string(), "Shape not found: geometric(&)blob");
    }

    #[test]
    fn test_render_error_svg_parse() {
        let error = RenderError::SvgParse("Invalid XML".to_string());
        assert_eq!(error.to_string(), "SVG parse error: Invalid XML");
    }

    #[test]
    fn test_render_error_pixmap_allocation() {
        let error = RenderError::PixmapAllocation;
        assert_eq!(error.to_string(), "Failed to allocate pixmap");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_synthesis_error_from_render_error() {
        let error: SynthesisError = RenderError::NoShapes.into();
        match error {
            SynthesisError::Render(_) => {}
            _ => panic!("Expected Render variant"),
        }
    }

    #[test]
    fn test_synthesis_error_stage_size() {
        let error = SynthesisError::StageSize {
            stage: "fracture",
            width: 99,
            height: 100,
            side: 100,
        };
        assert_eq!(
            error.to_string(),
            "Block fracture produced 99x100, expected 100x100"
        );
    }

    #[test]
    fn test_persist_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error: PersistError = io.into();
        assert_eq!(error.to_string(), "IO error: disk full");
    }

    #[test]
    fn test_sample_error_is_transparent() {
        let error: SampleError =
            SynthesisError::from(RenderError::ShapeNotFound("missing".to_string())).into();
        assert_eq!(error.to_string(), "Rendering error: Shape not found: missing");
    }
}
