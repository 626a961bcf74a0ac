//! Search Data Types
//!
//! Response shapes for the query API. Records come back exactly as indexed;
//! the façade only wraps them with a count or an explicit outcome marker.

use serde::Serialize;

use crate::ingestion::types::CanonicalRecord;

/// A filtered search that reached the index: the matching records, capped.
#[derive(Debug, Serialize)]
pub struct SearchHits {
    pub count: usize,
    pub results: Vec<CanonicalRecord>,
}

/// Returned when no recognized search parameter was supplied. Deliberately a
/// different shape from an empty `SearchHits`, so callers can tell "nothing
/// was asked" from "nothing matched".
#[derive(Debug, Serialize)]
pub struct NoFiltersResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
