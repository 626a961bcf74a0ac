//! In-Process Catalog Index
//!
//! A DashMap-backed implementation of the index boundary. Filter evaluation
//! happens locally: date bounds by lexicographic ISO-8601 comparison, shape
//! predicates by planar geometry intersection. Used by tests and standalone
//! deployments without a remote document store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::CatalogIndex;
use crate::ingestion::types::CanonicalRecord;
use crate::search::query::CompiledQuery;

#[derive(Default)]
pub struct MemoryIndex {
    documents: DashMap<String, CanonicalRecord>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Snapshot of every document, ordered by name so responses are stable.
    fn sorted_documents(&self) -> Vec<CanonicalRecord> {
        let mut records: Vec<CanonicalRecord> = self
            .documents
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }
}

#[async_trait]
impl CatalogIndex for MemoryIndex {
    async fn upsert(&self, record: &CanonicalRecord) -> anyhow::Result<()> {
        // DashMap's per-key locking supplies the last-write-wins ordering.
        self.documents.insert(record.name.clone(), record.clone());
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> anyhow::Result<Option<CanonicalRecord>> {
        Ok(self.documents.get(name).map(|entry| entry.value().clone()))
    }

    async fn search(&self, query: &CompiledQuery) -> anyhow::Result<Vec<CanonicalRecord>> {
        let mut hits: Vec<CanonicalRecord> = self
            .sorted_documents()
            .into_iter()
            .filter(|record| query.matches(record))
            .collect();
        hits.truncate(query.size);
        Ok(hits)
    }

    async fn all(&self) -> anyhow::Result<Vec<CanonicalRecord>> {
        Ok(self.sorted_documents())
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self.documents.len())
    }
}
