use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;

use crate::application::ports::{
    AudioStore, AudioStoreError, CompletionError, TranscriptionError,
};
use crate::domain::{
    ArtifactId, AudioArtifact, AudioFormat, PipelineStage, Question, StoragePath, ValidationError,
};

use super::answerer::Answerer;
use super::synthesizer::{SynthesisError, Synthesizer};
use super::transcriber::Transcriber;

#[derive(Debug, Clone)]
pub enum PipelineInput {
    Text(String),
    Audio(AudioUpload),
}

#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub question: String,
    pub transcript: Option<String>,
    pub answer: String,
    pub audio: AudioArtifact,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("intake: {0}")]
    Intake(AudioStoreError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("completion: {0}")]
    Completion(#[from] CompletionError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
}

/// Terminal `Failed` state of a run. `failed_at` is the stage that was
/// active when the error occurred; `Idle` means the run never started.
#[derive(Debug, thiserror::Error)]
#[error("pipeline failed while {failed_at}: {error}")]
pub struct PipelineFailure {
    pub failed_at: PipelineStage,
    #[source]
    pub error: PipelineError,
}

impl PipelineFailure {
    pub fn stage(&self) -> PipelineStage {
        PipelineStage::Failed
    }
}

/// Per-request stage tracker. Never shared between requests.
struct PipelineRun {
    stage: PipelineStage,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            stage: PipelineStage::Idle,
        }
    }

    fn enter(&mut self, next: PipelineStage) {
        debug_assert!(
            !self.stage.is_terminal(),
            "no transition out of {}",
            self.stage
        );
        tracing::debug!(from = %self.stage, to = %next, "Pipeline stage transition");
        self.stage = next;
    }

    fn fail(&self, error: impl Into<PipelineError>) -> PipelineFailure {
        PipelineFailure {
            failed_at: self.stage,
            error: error.into(),
        }
    }
}

/// Input -> [Transcriber] -> Answerer -> Synthesizer, strictly in sequence.
pub struct QueryPipeline {
    transcriber: Arc<Transcriber>,
    answerer: Arc<Answerer>,
    synthesizer: Arc<Synthesizer>,
    uploads: Arc<dyn AudioStore>,
}

impl QueryPipeline {
    pub fn new(
        transcriber: Arc<Transcriber>,
        answerer: Arc<Answerer>,
        synthesizer: Arc<Synthesizer>,
        uploads: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            transcriber,
            answerer,
            synthesizer,
            uploads,
        }
    }

    pub async fn run(&self, input: PipelineInput) -> Result<PipelineOutput, PipelineFailure> {
        let mut run = PipelineRun::new();

        match input {
            PipelineInput::Text(raw) => {
                let question = Question::parse(&raw).map_err(|e| run.fail(e))?;
                run.enter(PipelineStage::Acquiring);
                self.answer_and_speak(run, question, None).await
            }
            PipelineInput::Audio(upload) => {
                let format = validate_upload(&upload).map_err(|e| run.fail(e))?;

                run.enter(PipelineStage::Acquiring);
                let path = self
                    .persist_upload(upload.data, format)
                    .await
                    .map_err(|e| run.fail(PipelineError::Intake(e)))?;
                tracing::debug!(path = %path, original = %upload.filename, "Upload persisted");

                run.enter(PipelineStage::Transcribing);
                let transcript = self
                    .transcriber
                    .transcribe(&path)
                    .await
                    .map_err(|e| run.fail(e))?;
                let question = Question::parse(&transcript).map_err(|e| run.fail(e))?;

                self.answer_and_speak(run, question, Some(transcript)).await
            }
        }
    }

    async fn answer_and_speak(
        &self,
        mut run: PipelineRun,
        question: Question,
        transcript: Option<String>,
    ) -> Result<PipelineOutput, PipelineFailure> {
        run.enter(PipelineStage::Answering);
        let answer = self
            .answerer
            .answer(&question)
            .await
            .map_err(|e| run.fail(e))?;

        run.enter(PipelineStage::Synthesizing);
        let audio = self
            .synthesizer
            .synthesize(&answer)
            .await
            .map_err(|e| run.fail(e))?;

        run.enter(PipelineStage::Done);

        Ok(PipelineOutput {
            question: question.into_inner(),
            transcript,
            answer,
            audio,
        })
    }

    async fn persist_upload(
        &self,
        data: Bytes,
        format: AudioFormat,
    ) -> Result<StoragePath, AudioStoreError> {
        let path = StoragePath::new(&ArtifactId::new(), format);
        let content_length = data.len() as u64;
        let byte_stream = Box::pin(stream::once(async move { Ok::<Bytes, io::Error>(data) }));
        self.uploads
            .store(&path, byte_stream, Some(content_length))
            .await?;
        Ok(path)
    }
}

fn validate_upload(upload: &AudioUpload) -> Result<AudioFormat, ValidationError> {
    let filename = upload.filename.trim();
    if filename.is_empty() && upload.data.is_empty() {
        return Err(ValidationError::MissingUpload);
    }

    let format = AudioFormat::from_filename(filename)
        .ok_or_else(|| ValidationError::UnsupportedFormat(filename.to_string()))?;

    if upload.data.is_empty() {
        return Err(ValidationError::EmptyUpload);
    }

    Ok(format)
}
