mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    LlmSettings, LoggingSettings, RetentionSettings, ServerSettings, Settings,
    SpeechProviderSetting, StorageSettings, SynthesisSettings, TranscriptionProviderSetting,
    TranscriptionSettings,
};
