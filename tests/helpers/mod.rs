#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream::BoxStream;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use agrivoice::application::ports::{
    AudioStore, AudioStoreError, CompletionError, LlmClient, SpeechEngine, SpeechEngineError,
    StoredAudio, TranscriptionEngine, TranscriptionError,
};
use agrivoice::application::services::{
    Answerer, DEFAULT_SYSTEM_PROMPT, QueryPipeline, Synthesizer, Transcriber,
};
use agrivoice::domain::{AudioFormat, ChatTurn, StoragePath};
use agrivoice::infrastructure::storage::LocalAudioStore;

pub const FAKE_MP3: &[u8] = b"ID3fake-mp3-frames";

pub struct FakeTranscriptionEngine {
    reply: Option<String>,
    calls: AtomicUsize,
    formats: Mutex<Vec<AudioFormat>>,
}

impl FakeTranscriptionEngine {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            formats: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            formats: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn formats(&self) -> Vec<AudioFormat> {
        self.formats.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for FakeTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.formats.lock().unwrap().push(format);
        self.reply
            .clone()
            .ok_or_else(|| TranscriptionError::ApiRequestFailed("simulated outage".to_string()))
    }
}

pub struct FakeLlmClient {
    reply: Option<String>,
    calls: AtomicUsize,
    received: Mutex<Vec<Vec<ChatTurn>>>,
}

impl FakeLlmClient {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Vec<ChatTurn>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(turns.to_vec());
        self.reply.clone().ok_or(CompletionError::RateLimited)
    }
}

pub struct FakeSpeechEngine {
    fail: bool,
    calls: AtomicUsize,
    received: Mutex<Vec<String>>,
}

impl FakeSpeechEngine {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpeechEngine for FakeSpeechEngine {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechEngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(SpeechEngineError::ApiRequestFailed(
                "simulated outage".to_string(),
            ));
        }
        Ok(Bytes::from_static(FAKE_MP3))
    }
}

/// Store kept in memory with caller-controlled modification times.
#[derive(Default)]
pub struct InMemoryAudioStore {
    entries: Mutex<Vec<(StoredAudio, Vec<u8>)>>,
}

impl InMemoryAudioStore {
    pub fn insert(&self, name: &str, last_modified: DateTime<Utc>) {
        self.entries.lock().unwrap().push((
            StoredAudio {
                path: StoragePath::from_raw(name),
                size_bytes: 1,
                last_modified,
            },
            vec![0],
        ));
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(meta, _)| meta.path.to_string())
            .collect();
        names.sort();
        names
    }
}

#[async_trait::async_trait]
impl AudioStore for InMemoryAudioStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
        _content_length: Option<u64>,
    ) -> Result<u64, AudioStoreError> {
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk?);
        }
        let size_bytes = data.len() as u64;
        self.entries.lock().unwrap().push((
            StoredAudio {
                path: path.clone(),
                size_bytes,
                last_modified: Utc::now(),
            },
            data,
        ));
        Ok(size_bytes)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(meta, _)| &meta.path == path)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| AudioStoreError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|(meta, _)| &meta.path != path);
        if entries.len() == before {
            return Err(AudioStoreError::NotFound(path.to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredAudio>, AudioStoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(meta, _)| meta.clone())
            .collect())
    }
}

/// Store whose writes always fail, as on a full or read-only disk.
pub struct FailingAudioStore;

#[async_trait::async_trait]
impl AudioStore for FailingAudioStore {
    async fn store(
        &self,
        _path: &StoragePath,
        _stream: BoxStream<'_, Result<Bytes, io::Error>>,
        _content_length: Option<u64>,
    ) -> Result<u64, AudioStoreError> {
        Err(AudioStoreError::WriteFailed(
            "No space left on device".to_string(),
        ))
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError> {
        Err(AudioStoreError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError> {
        Err(AudioStoreError::NotFound(path.to_string()))
    }

    async fn list(&self) -> Result<Vec<StoredAudio>, AudioStoreError> {
        Ok(Vec::new())
    }
}

/// Pipeline over in-memory fakes with caller-chosen stores.
pub fn pipeline_with_stores(
    transcription: Arc<FakeTranscriptionEngine>,
    llm: Arc<FakeLlmClient>,
    speech: Arc<FakeSpeechEngine>,
    audio_store: Arc<dyn AudioStore>,
    upload_store: Arc<dyn AudioStore>,
) -> QueryPipeline {
    QueryPipeline::new(
        Arc::new(Transcriber::new(
            transcription as Arc<dyn TranscriptionEngine>,
            Arc::clone(&upload_store),
        )),
        Arc::new(Answerer::new(
            llm as Arc<dyn LlmClient>,
            DEFAULT_SYSTEM_PROMPT.to_string(),
        )),
        Arc::new(Synthesizer::new(speech as Arc<dyn SpeechEngine>, audio_store)),
        upload_store,
    )
}

/// A pipeline wired to fakes and two temporary local stores.
pub struct Harness {
    pub pipeline: Arc<QueryPipeline>,
    pub transcription: Arc<FakeTranscriptionEngine>,
    pub llm: Arc<FakeLlmClient>,
    pub speech: Arc<FakeSpeechEngine>,
    pub audio_store: Arc<LocalAudioStore>,
    pub upload_store: Arc<LocalAudioStore>,
    audio_dir: PathBuf,
    _dir: TempDir,
}

impl Harness {
    pub fn new(
        transcription: Arc<FakeTranscriptionEngine>,
        llm: Arc<FakeLlmClient>,
        speech: Arc<FakeSpeechEngine>,
    ) -> Self {
        let dir = TempDir::new().unwrap();
        let audio_dir = dir.path().join("audio");
        let audio_store = Arc::new(LocalAudioStore::new(audio_dir.clone()).unwrap());
        let upload_store = Arc::new(LocalAudioStore::new(dir.path().join("uploads")).unwrap());

        let transcriber = Transcriber::new(
            Arc::clone(&transcription) as Arc<dyn TranscriptionEngine>,
            Arc::clone(&upload_store) as Arc<dyn AudioStore>,
        );
        let answerer = Answerer::new(
            Arc::clone(&llm) as Arc<dyn LlmClient>,
            DEFAULT_SYSTEM_PROMPT.to_string(),
        );
        let synthesizer = Synthesizer::new(
            Arc::clone(&speech) as Arc<dyn SpeechEngine>,
            Arc::clone(&audio_store) as Arc<dyn AudioStore>,
        );

        let pipeline = Arc::new(QueryPipeline::new(
            Arc::new(transcriber),
            Arc::new(answerer),
            Arc::new(synthesizer),
            Arc::clone(&upload_store) as Arc<dyn AudioStore>,
        ));

        Self {
            pipeline,
            transcription,
            llm,
            speech,
            audio_store,
            upload_store,
            audio_dir,
            _dir: dir,
        }
    }

    pub fn happy() -> Self {
        Self::new(
            FakeTranscriptionEngine::replying("What fertilizer for rice?"),
            FakeLlmClient::replying("Apply urea in three split doses."),
            FakeSpeechEngine::working(),
        )
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }
}

/// Serves `app` on an ephemeral port, returning its base URL.
pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}
