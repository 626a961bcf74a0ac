//! Record Indexer
//!
//! Upserts one canonical record into the index, then takes a best-effort
//! audit backup of the raw message. The two steps are strictly ordered: a
//! record that failed to index is never backed up, and a backup failure
//! after a successful index write is absorbed here because the index write
//! is the durability-critical step.

use std::sync::Arc;

use super::types::CanonicalRecord;
use crate::error::CatalogError;
use crate::storage::{AuditStore, CatalogIndex};

pub struct RecordIndexer {
    index: Arc<dyn CatalogIndex>,
    audit: Arc<dyn AuditStore>,
}

impl RecordIndexer {
    pub fn new(index: Arc<dyn CatalogIndex>, audit: Arc<dyn AuditStore>) -> Self {
        Self { index, audit }
    }

    /// Indexes one record and backs up the raw message it came from.
    ///
    /// An index failure aborts the ingestion and skips the backup; the
    /// external transport owns redelivery. A backup failure is logged at
    /// warn and the ingestion still counts as successful.
    pub async fn ingest(
        &self,
        record: &CanonicalRecord,
        raw_message: &str,
    ) -> Result<(), CatalogError> {
        self.index
            .upsert(record)
            .await
            .map_err(|source| CatalogError::IndexWrite {
                name: record.name.clone(),
                source,
            })?;

        if let Err(source) = self.audit.backup(&record.name, raw_message).await {
            let err = CatalogError::Backup {
                name: record.name.clone(),
                source,
            };
            tracing::warn!("{:#}; index write stands", anyhow::Error::new(err));
        }

        tracing::info!("indexed record {}", record.name);
        Ok(())
    }
}
