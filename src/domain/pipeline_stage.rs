use std::fmt;
use std::str::FromStr;

/// Lifecycle of a single question as it moves through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Idle,
    Acquiring,
    Transcribing,
    Answering,
    Synthesizing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "IDLE",
            PipelineStage::Acquiring => "ACQUIRING",
            PipelineStage::Transcribing => "TRANSCRIBING",
            PipelineStage::Answering => "ANSWERING",
            PipelineStage::Synthesizing => "SYNTHESIZING",
            PipelineStage::Done => "DONE",
            PipelineStage::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl FromStr for PipelineStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(PipelineStage::Idle),
            "ACQUIRING" => Ok(PipelineStage::Acquiring),
            "TRANSCRIBING" => Ok(PipelineStage::Transcribing),
            "ANSWERING" => Ok(PipelineStage::Answering),
            "SYNTHESIZING" => Ok(PipelineStage::Synthesizing),
            "DONE" => Ok(PipelineStage::Done),
            "FAILED" => Ok(PipelineStage::Failed),
            _ => Err(format!("Invalid pipeline stage: {}", s)),
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
