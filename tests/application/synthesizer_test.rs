use std::sync::Arc;

use agrivoice::application::ports::{AudioStore, AudioStoreError, SpeechEngine};
use agrivoice::application::services::{SynthesisError, Synthesizer};
use agrivoice::domain::AudioFormat;
use agrivoice::infrastructure::storage::LocalAudioStore;

use crate::helpers::{FAKE_MP3, FailingAudioStore, FakeSpeechEngine};

fn create_synthesizer(
    engine: Arc<FakeSpeechEngine>,
) -> (tempfile::TempDir, Arc<LocalAudioStore>, Synthesizer) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(LocalAudioStore::new(dir.path().to_path_buf()).unwrap());
    let synthesizer = Synthesizer::new(
        engine as Arc<dyn SpeechEngine>,
        Arc::clone(&store) as Arc<dyn AudioStore>,
    );
    (dir, store, synthesizer)
}

#[tokio::test]
async fn given_answer_text_when_synthesizing_then_mp3_is_written_with_engine_bytes() {
    let (_dir, store, synthesizer) = create_synthesizer(FakeSpeechEngine::working());

    let artifact = synthesizer.synthesize("Water every third day.").await.unwrap();

    assert_eq!(artifact.format, AudioFormat::Mp3);
    assert_eq!(artifact.size_bytes, FAKE_MP3.len() as u64);
    assert_eq!(store.fetch(&artifact.path).await.unwrap(), FAKE_MP3);
}

#[tokio::test]
async fn given_identical_text_when_synthesizing_twice_then_paths_are_unique() {
    let (_dir, store, synthesizer) = create_synthesizer(FakeSpeechEngine::working());

    let first = synthesizer.synthesize("Same answer.").await.unwrap();
    let second = synthesizer.synthesize("Same answer.").await.unwrap();

    assert_ne!(first.path, second.path);
    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn given_blank_text_when_synthesizing_then_engine_is_not_called() {
    let engine = FakeSpeechEngine::working();
    let (_dir, _store, synthesizer) = create_synthesizer(Arc::clone(&engine));

    let result = synthesizer.synthesize("  ").await;

    assert!(matches!(result, Err(SynthesisError::EmptyText)));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_engine_outage_when_synthesizing_then_returns_engine_error() {
    let (_dir, _store, synthesizer) = create_synthesizer(FakeSpeechEngine::failing());

    let result = synthesizer.synthesize("Spray in the evening.").await;

    assert!(matches!(result, Err(SynthesisError::Engine(_))));
}

#[tokio::test]
async fn given_store_rejecting_writes_when_synthesizing_then_returns_storage_error() {
    let engine = FakeSpeechEngine::working();
    let synthesizer = Synthesizer::new(
        Arc::clone(&engine) as Arc<dyn SpeechEngine>,
        Arc::new(FailingAudioStore) as Arc<dyn AudioStore>,
    );

    let result = synthesizer.synthesize("Mulch the beds after sowing.").await;

    assert!(matches!(
        result,
        Err(SynthesisError::Storage(AudioStoreError::WriteFailed(_)))
    ));
    assert_eq!(engine.calls(), 1);
}
