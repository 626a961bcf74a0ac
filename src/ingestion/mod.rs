//! Ingestion Service Module
//!
//! Turns inbound imagery-tile notifications into indexed canonical records.
//!
//! ## Workflow
//! 1. **Receive**: One notification envelope per invocation, embedding a raw
//!    metadata message as its payload.
//! 2. **Map**: The `FieldMapper` normalizes the message into a canonical
//!    record — required-field validation, timestamp reformatting, link
//!    derivation, tag flattening. Pure, no I/O.
//! 3. **Index**: The `RecordIndexer` upserts the record (keyed by `name`,
//!    last write wins) and takes a best-effort audit backup of the raw
//!    message.
//! 4. **Propagate**: Any mapping or index failure aborts the invocation;
//!    redelivery is the transport's job.

pub mod handlers;
pub mod indexer;
pub mod mapper;
pub mod types;
