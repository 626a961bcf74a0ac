//! Imagery Catalog Service Library
//!
//! This library crate defines the core modules of the imagery metadata
//! catalog. It serves as the foundation for the binary executable
//! (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems plus shared
//! configuration and errors:
//!
//! - **`ingestion`**: The intake pipeline. Receives tile notifications,
//!   normalizes the embedded image-format metadata into canonical records
//!   and writes them through the index boundary with a best-effort audit
//!   backup.
//! - **`search`**: The query side. Compiles recognized request parameters
//!   into a composable filter conjunction and executes it, with explicit
//!   outcomes for debug requests and unrecognized parameter sets.
//! - **`storage`**: The boundaries to the external stores — the opaque
//!   document index (in-memory and remote HTTP implementations) and the
//!   write-only audit backup target.
//! - **`config`** / **`error`**: Environment-driven configuration and the
//!   one error taxonomy shared across the pipeline.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod search;
pub mod storage;
