use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::{AudioUpload, PipelineInput};
use crate::domain::{AudioFormat, ValidationError};
use crate::presentation::state::AppState;

use super::pipeline_response::{ErrorResponse, pipeline_response, warning_response};

const FILE_FIELD: &str = "file";

#[tracing::instrument(skip(state, multipart))]
pub async fn ask_audio_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break None,
            Err(e) => return multipart_error_response(&state, e, "Failed to read multipart"),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = upload_filename(field.file_name(), field.content_type());
        match field.bytes().await {
            Ok(data) => break Some(AudioUpload { filename, data }),
            Err(e) => return multipart_error_response(&state, e, "Failed to read file"),
        }
    };

    let Some(upload) = upload else {
        tracing::warn!("Audio question submitted without a file");
        return warning_response(&ValidationError::MissingUpload);
    };

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        "Audio question received"
    );

    let outcome = state.pipeline.run(PipelineInput::Audio(upload)).await;

    pipeline_response(outcome, state.settings.server.expose_error_details)
}

fn multipart_error_response(state: &AppState, e: MultipartError, context: &str) -> Response {
    let status = e.status();
    let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
        let limit_mb = state.settings.server.max_upload_mb;
        tracing::warn!(limit_mb, "Upload rejected: body exceeds limit");
        format!("Uploaded audio exceeds the {} MB limit", limit_mb)
    } else {
        tracing::error!(error = %e, status = %status, "{}", context);
        format!("{}: {}", context, e.body_text())
    };

    (status, Json(ErrorResponse { error, stage: None })).into_response()
}

/// Browser recorders post blobs without an extension; fall back to the part's
/// content type so the format can still be resolved.
fn upload_filename(file_name: Option<&str>, content_type: Option<&str>) -> String {
    let name = file_name.unwrap_or_default();
    if AudioFormat::from_filename(name).is_some() {
        return name.to_string();
    }
    match content_type.and_then(AudioFormat::from_mime) {
        Some(format) if name.is_empty() => format!("recording.{}", format.extension()),
        Some(format) => format!("{}.{}", name, format.extension()),
        None => name.to_string(),
    }
}
