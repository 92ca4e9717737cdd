use std::fmt;

use super::artifact::ArtifactId;
use super::audio_format::AudioFormat;

/// Store-relative location of an audio artifact, `<uuid>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(artifact_id: &ArtifactId, format: AudioFormat) -> Self {
        Self(format!(
            "{}.{}",
            artifact_id.as_uuid().simple(),
            format.extension()
        ))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self) -> Option<AudioFormat> {
        AudioFormat::from_filename(&self.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
