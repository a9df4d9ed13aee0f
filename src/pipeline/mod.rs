// Orchestration for the two pipelines: sources in, one replaced table out

pub mod projection_pipeline;
pub mod table_pipeline;

pub use projection_pipeline::{ProjectionPipeline, ProjectionRunReport};
pub use table_pipeline::{SkippedSource, TablePipeline, TableRunReport};
