pub mod attribute;
pub mod config;
pub mod grid;
pub mod odd;

pub use attribute::{Attribute, AttributeSet};
pub use config::{
    AppConfig, BackgroundConfig, ColorStrategy, LayoutConfig, OddConfig, OutputConfig,
    ShapeConfig, Span, StrengthRange,
};
pub use grid::{BBox, GridLayout};
pub use odd::{BlockSpec, OddSpec, Perturbation, Strengths};
