//! Audit Backup Stores
//!
//! Best-effort, write-only copies of the raw messages that were successfully
//! indexed. The backup is an advisory audit trail: the caller logs a failure
//! and moves on, it never retries and never fails the ingestion.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::AuditStore;

/// Filesystem-backed audit store: one JSON file per ingested message, named
/// `{record name}-{timestamp}.json`, in the configured directory.
pub struct FsAuditStore {
    dir: PathBuf,
}

impl FsAuditStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl AuditStore for FsAuditStore {
    async fn backup(&self, name: &str, raw_message: &str) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S");
        let path = self.dir.join(format!("{}-{}.json", name, stamp));
        tokio::fs::write(&path, raw_message).await?;
        Ok(())
    }
}

/// In-memory audit store, keyed the same way. For tests and local runs.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: DashMap<String, String>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when some backup was taken for the given record name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.key().starts_with(&format!("{}-", name)))
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn backup(&self, name: &str, raw_message: &str) -> anyhow::Result<()> {
        let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S");
        self.entries
            .insert(format!("{}-{}", name, stamp), raw_message.to_string());
        Ok(())
    }
}
