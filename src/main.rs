use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use agrivoice::application::ports::AudioStore;
use agrivoice::application::services::{
    Answerer, ArtifactSweeper, QueryPipeline, Synthesizer, Transcriber,
};
use agrivoice::infrastructure::audio::{TranscriptionEngineFactory, TranscriptionProvider};
use agrivoice::infrastructure::llm::{LlmClientFactory, LlmProvider};
use agrivoice::infrastructure::observability::{TracingConfig, init_tracing};
use agrivoice::infrastructure::speech::{SpeechEngineFactory, SpeechProvider};
use agrivoice::infrastructure::storage::LocalAudioStore;
use agrivoice::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        &settings.logging.level,
    ));

    if environment.is_production() && settings.server.expose_error_details {
        tracing::warn!("server.expose_error_details is on in production");
    }

    let scaffold_config = ScaffoldConfig::default();
    let api_key = settings.api_key();

    if api_key.is_none() && !scaffold_config.enabled {
        anyhow::bail!(
            "No API key configured: set GROQ_API_KEY or APP_LLM__API_KEY, \
             or run with SCAFFOLD_MODE=true"
        );
    }

    let (llm_provider, transcription_provider, speech_provider) = if scaffold_config.enabled {
        tracing::warn!("Scaffold mode enabled: hosted services replaced by mocks");
        (
            LlmProvider::Mock,
            TranscriptionProvider::Mock,
            SpeechProvider::Mock,
        )
    } else {
        (
            LlmProvider::OpenAi,
            settings.transcription.provider.into(),
            settings.synthesis.provider.into(),
        )
    };

    let timeout = settings.request_timeout();

    let llm_client = LlmClientFactory::create(
        llm_provider,
        &settings.llm.chat_model,
        api_key.clone(),
        &settings.llm.base_url,
        timeout,
    )
    .context("Failed to create chat completion client")?;

    let transcription_engine = TranscriptionEngineFactory::create(
        transcription_provider,
        &settings.transcription.model,
        api_key.clone(),
        Some(settings.transcription_base_url()),
        timeout,
    )
    .context("Failed to create transcription engine")?;

    let speech_engine = SpeechEngineFactory::create(
        speech_provider,
        &settings.synthesis.language,
        &settings.synthesis.model,
        &settings.synthesis.voice,
        api_key,
        settings.speech_base_url(),
        timeout,
    )
    .context("Failed to create speech engine")?;

    let audio_store: Arc<dyn AudioStore> = Arc::new(
        LocalAudioStore::new(PathBuf::from(&settings.storage.audio_dir))
            .context("Failed to prepare audio output directory")?,
    );
    let upload_store: Arc<dyn AudioStore> = Arc::new(
        LocalAudioStore::new(PathBuf::from(&settings.storage.upload_dir))
            .context("Failed to prepare upload directory")?,
    );

    let pipeline = Arc::new(QueryPipeline::new(
        Arc::new(Transcriber::new(
            transcription_engine,
            Arc::clone(&upload_store),
        )),
        Arc::new(Answerer::new(llm_client, settings.llm.system_prompt.clone())),
        Arc::new(Synthesizer::new(speech_engine, Arc::clone(&audio_store))),
        Arc::clone(&upload_store),
    ));

    if settings.retention.enabled {
        let policy = settings.retention_policy();
        let interval = Duration::from_secs(settings.retention.sweep_interval_secs.max(1));
        tokio::spawn(ArtifactSweeper::new(audio_store, policy, "audio").run(interval));
        tokio::spawn(ArtifactSweeper::new(upload_store, policy, "uploads").run(interval));
    }

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .context("Invalid server.host")?;
    let addr = SocketAddr::from((host, settings.server.port));

    tracing::info!(
        model = %settings.llm.chat_model,
        transcription_model = %settings.transcription.model,
        scaffold_mode = scaffold_config.enabled,
        "Pipeline ready"
    );

    let router = create_router(AppState::new(pipeline, settings, scaffold_config));

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
