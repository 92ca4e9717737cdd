use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ask_audio_handler, ask_handler, health_handler, index_handler,
};
use crate::presentation::state::AppState;

/// Prefix under which synthesized answers are served.
pub const AUDIO_ROUTE: &str = "/audio";

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let audio_files = ServeDir::new(&state.settings.storage.audio_dir);
    let body_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes());

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/ask", post(ask_handler))
        .route("/api/v1/ask/audio", post(ask_audio_handler))
        .nest_service(AUDIO_ROUTE, audio_files)
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
