//! Search Service Module
//!
//! The query side of the catalog: compiles request parameters into filtered
//! queries and executes them against the index boundary.
//!
//! ## Responsibilities
//! - **Compilation**: Translating recognized parameters (`start-time`,
//!   `end-time`, `shape`, `debug`) into a conjunction of filter predicates
//!   with a fixed result cap.
//! - **Execution**: Running compiled queries, single-name lookups, and the
//!   full listing through the `CatalogIndex` trait.
//! - **API**: Shaping responses for the Axum handlers, including the
//!   distinct "no filters recognized" and debug outcomes.
//!
//! ## Submodules
//! - **`query`**: The query compiler and local predicate evaluation.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Response DTOs.

pub mod handlers;
pub mod query;
pub mod types;
