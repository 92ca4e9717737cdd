mod answerer;
mod artifact_sweeper;
mod query_pipeline;
mod synthesizer;
mod transcriber;

pub use answerer::{Answerer, DEFAULT_SYSTEM_PROMPT};
pub use artifact_sweeper::{ArtifactSweeper, RetentionPolicy, SweepReport};
pub use query_pipeline::{
    AudioUpload, PipelineError, PipelineFailure, PipelineInput, PipelineOutput, QueryPipeline,
};
pub use synthesizer::{SynthesisError, Synthesizer};
pub use transcriber::Transcriber;
