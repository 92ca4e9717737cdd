use std::io;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use crate::domain::StoragePath;

#[async_trait::async_trait]
pub trait AudioStore: Send + Sync {
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, AudioStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError>;

    async fn list(&self) -> Result<Vec<StoredAudio>, AudioStoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    pub path: StoragePath,
    pub size_bytes: u64,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("list failed: {0}")]
    ListFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
