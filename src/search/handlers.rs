//! Search Façade
//!
//! HTTP handlers over the catalog index: filtered search, lookup by record
//! name, and the full listing. Search-side failures surface to the caller;
//! nothing here retries internally.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::query::{compile, Compiled, NO_FILTERS_MESSAGE};
use super::types::{ErrorResponse, NoFiltersResponse, SearchHits};
use crate::error::CatalogError;
use crate::storage::CatalogIndex;

/// `GET /search` — compiles the query parameters and executes the result.
///
/// Outcomes: matching records (capped), the DSL document when `debug` is
/// present, an explicit no-filters payload when nothing was recognized, or a
/// 400 for malformed shape input.
pub async fn handle_search(
    Query(params): Query<HashMap<String, String>>,
    Extension(index): Extension<Arc<dyn CatalogIndex>>,
) -> Response {
    match compile(&params) {
        Ok(Compiled::Debug(dsl)) => Json(dsl).into_response(),
        Ok(Compiled::NoFilters) => Json(NoFiltersResponse {
            message: NO_FILTERS_MESSAGE,
        })
        .into_response(),
        Ok(Compiled::Query(query)) => match index.search(&query).await {
            Ok(results) => Json(SearchHits {
                count: results.len(),
                results,
            })
            .into_response(),
            Err(err) => index_failure(CatalogError::IndexQuery(err)),
        },
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

/// `GET /:collection_id` — single record lookup by name. A miss is a normal
/// outcome (404), not an error to retry.
pub async fn handle_get_by_id(
    Path(collection_id): Path<String>,
    Extension(index): Extension<Arc<dyn CatalogIndex>>,
) -> Response {
    match index.get_by_name(&collection_id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: CatalogError::NotFound(collection_id).to_string(),
            }),
        )
            .into_response(),
        Err(err) => index_failure(CatalogError::IndexQuery(err)),
    }
}

/// `GET /all_imagery` — every record, unpaginated.
///
/// Result size is unbounded, so this is for bounded internal consumers only;
/// do not expose it unauthenticated or to high-volume callers.
pub async fn handle_get_all(Extension(index): Extension<Arc<dyn CatalogIndex>>) -> Response {
    match index.all().await {
        Ok(results) => Json(SearchHits {
            count: results.len(),
            results,
        })
        .into_response(),
        Err(err) => index_failure(CatalogError::IndexQuery(err)),
    }
}

/// Shared 502 path for index calls that failed underneath a search request.
fn index_failure(err: CatalogError) -> Response {
    let error = err.to_string();
    tracing::error!("{:#}", anyhow::Error::new(err));
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error })).into_response()
}
