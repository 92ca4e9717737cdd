use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError, StoredAudio};
use crate::domain::StoragePath;

/// Audio files under a local directory, created on construction if absent.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&base_path).map_err(AudioStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

fn not_found_or(e: object_store::Error, other: fn(String) -> AudioStoreError) -> AudioStoreError {
    match e {
        object_store::Error::NotFound { path, .. } => AudioStoreError::NotFound(path),
        e => other(e.to_string()),
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
        _content_length: Option<u64>,
    ) -> Result<u64, AudioStoreError> {
        let store_path = StorePath::from(path.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(AudioStoreError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(AudioStoreError::WriteFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        Ok(total_bytes)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| not_found_or(e, AudioStoreError::ReadFailed))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| AudioStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| not_found_or(e, AudioStoreError::DeleteFailed))
    }

    async fn list(&self) -> Result<Vec<StoredAudio>, AudioStoreError> {
        self.inner
            .list(None)
            .map_ok(|meta| StoredAudio {
                path: StoragePath::from_raw(meta.location.to_string()),
                size_bytes: meta.size as u64,
                last_modified: meta.last_modified,
            })
            .try_collect()
            .await
            .map_err(|e| AudioStoreError::ListFailed(e.to_string()))
    }
}
