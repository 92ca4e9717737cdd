use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{PipelineError, PipelineFailure, PipelineOutput};
use crate::domain::ValidationError;
use crate::presentation::router::AUDIO_ROUTE;

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    pub answer: String,
    pub audio_url: String,
}

#[derive(Serialize)]
pub struct WarningResponse {
    pub warning: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

pub(super) fn pipeline_response(
    outcome: Result<PipelineOutput, PipelineFailure>,
    expose_error_details: bool,
) -> Response {
    match outcome {
        Ok(output) => {
            tracing::info!(
                transcribed = output.transcript.is_some(),
                audio = %output.audio.path,
                "Question answered"
            );
            (
                StatusCode::OK,
                Json(AskResponse {
                    question: output.question,
                    transcript: output.transcript,
                    answer: output.answer,
                    audio_url: format!("{}/{}", AUDIO_ROUTE, output.audio.path),
                }),
            )
                .into_response()
        }
        Err(failure) => failure_response(failure, expose_error_details),
    }
}

pub(super) fn warning_response(error: &ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(WarningResponse {
            warning: error.to_string(),
        }),
    )
        .into_response()
}

fn failure_response(failure: PipelineFailure, expose_error_details: bool) -> Response {
    let (status, summary) = match &failure.error {
        PipelineError::Validation(e) => {
            tracing::warn!(stage = %failure.failed_at, warning = %e, "Question rejected");
            return warning_response(e);
        }
        PipelineError::Intake(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error saving the uploaded audio",
        ),
        PipelineError::Transcription(_) => (StatusCode::BAD_GATEWAY, "Error during transcription"),
        PipelineError::Completion(_) => (StatusCode::BAD_GATEWAY, "Error communicating with AI"),
        PipelineError::Synthesis(_) => (
            StatusCode::BAD_GATEWAY,
            "Error generating the spoken answer",
        ),
    };

    tracing::error!(
        state = %failure.stage(),
        failed_at = %failure.failed_at,
        error = %failure.error,
        "Pipeline failed"
    );

    let error = if expose_error_details {
        format!("{}: {}", summary, failure.error)
    } else {
        summary.to_string()
    };

    (
        status,
        Json(ErrorResponse {
            error,
            stage: Some(failure.failed_at.as_str().to_string()),
        }),
    )
        .into_response()
}
