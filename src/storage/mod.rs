//! Storage Module
//!
//! Boundaries to the two external stores the catalog writes to.
//!
//! ## Core Concepts
//! - **Index boundary**: `CatalogIndex` abstracts the opaque document store.
//!   One logical collection of canonical records keyed by `name`, with
//!   full-document upsert, date-range and geo-shape filtering, exact lookup
//!   and count. Per-key write ordering is the store's own concern
//!   (last-write-wins); no application-level locking exists here.
//! - **Audit boundary**: `AuditStore` is the write-only backup target for raw
//!   messages, keyed by record name + wall-clock timestamp. Advisory only.
//! - **Implementations**: `MemoryIndex` evaluates filters in process,
//!   `HttpIndex` speaks the document store's REST dialect. Both are injected
//!   as trait objects by the process entry point.

use async_trait::async_trait;

use crate::ingestion::types::CanonicalRecord;
use crate::search::query::CompiledQuery;

pub mod backup;
pub mod memory;
pub mod remote;

#[cfg(test)]
mod tests;

/// The opaque document store holding canonical records, keyed by `name`.
#[async_trait]
pub trait CatalogIndex: Send + Sync {
    /// Full-document insert-or-replace. Never a merge.
    async fn upsert(&self, record: &CanonicalRecord) -> anyhow::Result<()>;

    /// Exact lookup by record name. `None` is a normal outcome.
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Option<CanonicalRecord>>;

    /// Executes a compiled filter conjunction, capped at the query's size.
    async fn search(&self, query: &CompiledQuery) -> anyhow::Result<Vec<CanonicalRecord>>;

    /// Every record, unpaginated. Bounded internal use only.
    async fn all(&self) -> anyhow::Result<Vec<CanonicalRecord>>;

    /// Number of indexed records.
    async fn count(&self) -> anyhow::Result<usize>;
}

/// Write-only audit trail of raw messages, for traceability, not recovery.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Stores the verbatim raw message under the record name and the current
    /// wall-clock timestamp.
    async fn backup(&self, name: &str, raw_message: &str) -> anyhow::Result<()>;
}
