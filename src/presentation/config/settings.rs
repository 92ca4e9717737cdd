use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_SYSTEM_PROMPT, RetentionPolicy};
use crate::infrastructure::audio::{DEFAULT_BASE_URL, TranscriptionProvider};
use crate::infrastructure::speech::SpeechProvider;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub synthesis: SynthesisSettings,
    pub storage: StorageSettings,
    pub retention: RetentionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub expose_error_details: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub system_prompt: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisSettings {
    pub provider: SpeechProviderSetting,
    pub language: String,
    pub model: String,
    pub voice: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProviderSetting {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub audio_dir: String,
    pub upload_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetentionSettings {
    pub enabled: bool,
    pub max_age_secs: u64,
    pub max_files: usize,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.<environment>.toml`, then `APP_*`
    /// variables (`APP_LLM__API_KEY`, `APP_SERVER__PORT`, ...).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.max_upload_mb", 25_i64)?
            .set_default(
                "server.expose_error_details",
                environment == Environment::Local,
            )?
            .set_default(
                "llm.api_key",
                std::env::var("GROQ_API_KEY").unwrap_or_default(),
            )?
            .set_default("llm.base_url", DEFAULT_BASE_URL)?
            .set_default("llm.chat_model", "llama-3.1-70b-versatile")?
            .set_default("llm.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("llm.timeout_secs", 60_i64)?
            .set_default("transcription.provider", "openai")?
            .set_default("transcription.model", "whisper-large-v3")?
            .set_default("synthesis.provider", "google")?
            .set_default("synthesis.language", "en")?
            .set_default("synthesis.model", "playai-tts")?
            .set_default("synthesis.voice", "Fritz-PlayAI")?
            .set_default("storage.audio_dir", "static/audio")?
            .set_default("storage.upload_dir", "uploads")?
            .set_default("retention.enabled", true)?
            .set_default("retention.max_age_secs", 86_400_i64)?
            .set_default("retention.max_files", 500_i64)?
            .set_default("retention.sweep_interval_secs", 600_i64)?
            .set_default("logging.level", "info")?
            .set_default(
                "logging.json",
                std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            )?
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn api_key(&self) -> Option<String> {
        let key = self.llm.api_key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }

    pub fn transcription_base_url(&self) -> String {
        self.transcription
            .base_url
            .clone()
            .unwrap_or_else(|| self.llm.base_url.clone())
    }

    /// Google speech has its own host; OpenAI-compatible speech shares the
    /// chat endpoint unless overridden.
    pub fn speech_base_url(&self) -> Option<String> {
        match self.synthesis.provider {
            SpeechProviderSetting::OpenAi => Some(
                self.synthesis
                    .base_url
                    .clone()
                    .unwrap_or_else(|| self.llm.base_url.clone()),
            ),
            _ => self.synthesis.base_url.clone(),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_age: Duration::from_secs(self.retention.max_age_secs),
            max_files: self.retention.max_files,
        }
    }
}

impl From<TranscriptionProviderSetting> for TranscriptionProvider {
    fn from(setting: TranscriptionProviderSetting) -> Self {
        match setting {
            TranscriptionProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
            TranscriptionProviderSetting::Mock => TranscriptionProvider::Mock,
        }
    }
}

impl From<SpeechProviderSetting> for SpeechProvider {
    fn from(setting: SpeechProviderSetting) -> Self {
        match setting {
            SpeechProviderSetting::Google => SpeechProvider::Google,
            SpeechProviderSetting::OpenAi => SpeechProvider::OpenAi,
            SpeechProviderSetting::Mock => SpeechProvider::Mock,
        }
    }
}
