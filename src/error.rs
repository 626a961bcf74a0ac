//! Error Taxonomy
//!
//! One enum covers every failure the catalog can produce, split along the
//! propagation boundaries that matter:
//!
//! - validation failures abort the ingestion and surface to the external
//!   redelivery mechanism (422 at the front door),
//! - index write failures abort the ingestion and skip the audit backup (502),
//! - backup failures after a successful index write are absorbed and logged,
//! - query compilation failures are request errors (400), never retried,
//! - a lookup miss is a normal outcome (404), distinct from an empty search.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field of the raw metadata message is absent.
    #[error("required field `{0}` missing from metadata message")]
    MissingField(&'static str),

    /// The acquisition timestamp is not exactly 14 ASCII digits.
    #[error("acquisition timestamp `{0}` is not a yyyyMMddHHmmss string")]
    MalformedTimestamp(String),

    /// The bounds value is not a usable GeoJSON geometry.
    #[error("bounds is not a usable geometry: {0}")]
    InvalidBounds(String),

    /// A nested metadata tag shadows a canonical field but its value does
    /// not coerce to the field's type.
    #[error("metadata tag `{tag}` shadows a canonical field but holds {found}")]
    ShadowedField { tag: String, found: &'static str },

    /// The index upsert failed; the ingestion is aborted and no backup runs.
    #[error("index write for `{name}` failed")]
    IndexWrite {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A search-side call to the index failed.
    #[error("index query failed")]
    IndexQuery(#[source] anyhow::Error),

    /// The audit backup failed after a successful index write. Non-fatal.
    #[error("audit backup for `{name}` failed")]
    Backup {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The shape query parameter is not valid WKT.
    #[error("shape parameter is not valid WKT: {0}")]
    InvalidShape(String),

    /// No record is indexed under the requested name.
    #[error("no record named `{0}`")]
    NotFound(String),
}
