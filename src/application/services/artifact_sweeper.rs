use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::application::ports::{AudioStore, AudioStoreError, StoredAudio};

/// Bounds applied to a store of generated audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_age: Duration,
    pub max_files: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub evicted: usize,
    pub retained: usize,
}

impl SweepReport {
    pub fn removed(&self) -> usize {
        self.expired + self.evicted
    }
}

/// Deletes stale audio so a store behaves like a bounded cache.
pub struct ArtifactSweeper {
    store: Arc<dyn AudioStore>,
    policy: RetentionPolicy,
    name: String,
}

impl ArtifactSweeper {
    pub fn new(store: Arc<dyn AudioStore>, policy: RetentionPolicy, name: impl Into<String>) -> Self {
        Self {
            store,
            policy,
            name: name.into(),
        }
    }

    /// Removes files older than `max_age`, then the oldest survivors until at
    /// most `max_files` remain.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, AudioStoreError> {
        let mut entries = self.store.list().await?;
        entries.sort_by_key(|entry| entry.last_modified);

        let cutoff = TimeDelta::from_std(self.policy.max_age)
            .ok()
            .and_then(|max_age| now.checked_sub_signed(max_age));

        let (expired, fresh): (Vec<StoredAudio>, Vec<StoredAudio>) = entries
            .into_iter()
            .partition(|entry| cutoff.is_some_and(|cutoff| entry.last_modified < cutoff));

        let overflow = fresh.len().saturating_sub(self.policy.max_files);

        let mut report = SweepReport {
            retained: fresh.len() - overflow,
            ..SweepReport::default()
        };

        for entry in &expired {
            if self.remove(entry).await? {
                report.expired += 1;
            }
        }
        for entry in &fresh[..overflow] {
            if self.remove(entry).await? {
                report.evicted += 1;
            }
        }

        Ok(report)
    }

    async fn remove(&self, entry: &StoredAudio) -> Result<bool, AudioStoreError> {
        match self.store.delete(&entry.path).await {
            Ok(()) => Ok(true),
            Err(AudioStoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn run(self, interval: Duration) {
        tracing::info!(
            store = %self.name,
            max_age_secs = self.policy.max_age.as_secs(),
            max_files = self.policy.max_files,
            "Artifact sweeper started"
        );

        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match self.sweep(Utc::now()).await {
                Ok(report) if report.removed() > 0 => {
                    tracing::info!(
                        store = %self.name,
                        expired = report.expired,
                        evicted = report.evicted,
                        retained = report.retained,
                        "Swept audio artifacts"
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::error!(store = %self.name, error = %e, "Artifact sweep failed"),
            }
        }
    }
}
