pub mod batch;
pub mod compositor;
pub mod generator;
pub mod metadata;
pub mod safe_gap;
pub mod sampler;
pub mod scene;
pub mod writer;

pub use batch::{BatchRunner, FailedSample, RunSummary, SampleOutcome};
pub use compositor::{compose, CanvasOptions, Stage, ODD_PIPELINE};
pub use generator::{Generator, Sample};
pub use metadata::{OddRecord, SampleMetadata};
pub use safe_gap::safe_gap;
pub use writer::SampleWriter;
