use axum::Json;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;

use crate::application::services::PipelineInput;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::pipeline_response::pipeline_response;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Response {
    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing text question");

    let outcome = state
        .pipeline
        .run(PipelineInput::Text(request.question))
        .await;

    pipeline_response(outcome, state.settings.server.expose_error_details)
}
