pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    Environment, ScaffoldConfig, Settings, SpeechProviderSetting, TranscriptionProviderSetting,
};
pub use router::{AUDIO_ROUTE, create_router};
pub use state::AppState;
