mod ask;
mod ask_audio;
mod health;
mod index;
mod pipeline_response;

pub use ask::{AskRequest, ask_handler};
pub use ask_audio::ask_audio_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use pipeline_response::{AskResponse, ErrorResponse, WarningResponse};
