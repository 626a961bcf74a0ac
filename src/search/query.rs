//! Query Compiler
//!
//! Translates recognized request parameters into a composable filtered query
//! against the document store. Filters combine by implicit logical AND and
//! are order-independent; the result cap is fixed regardless of how many
//! filters are active.
//!
//! Two outcomes never reach the index at all: `debug` short-circuits with the
//! query's DSL representation, and a request with zero recognized filters
//! yields [`Compiled::NoFilters`] so callers can tell "nothing was asked"
//! from "nothing matched".

use std::collections::HashMap;

use geo::Intersects;
use serde_json::{json, Value};
use wkt::TryFromWkt;

use crate::error::CatalogError;
use crate::ingestion::types::CanonicalRecord;

/// Fixed cap on matches returned by a filtered search.
pub const MAX_RESULTS: usize = 1000;

/// Message returned when no recognized parameter was supplied.
pub const NO_FILTERS_MESSAGE: &str = "no search parameters were recognized";

#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub shape: Option<geo_types::Geometry<f64>>,
    pub filter_count: usize,
    pub size: usize,
}

/// Result of compiling one set of request parameters.
#[derive(Debug)]
pub enum Compiled {
    /// At least one filter predicate; execute against the index.
    Query(CompiledQuery),
    /// `debug` was present: the DSL representation, never executed.
    Debug(Value),
    /// Zero recognized parameters. Distinct from an empty result set.
    NoFilters,
}

/// Compiles a parameter map into a query.
///
/// Recognized parameters: `start-time` (`date >= value`), `end-time`
/// (`date <= value`), `shape` (WKT geometry that `bounds` must intersect)
/// and `debug`. Malformed WKT is a request error, reported before the debug
/// short-circuit is considered.
pub fn compile(params: &HashMap<String, String>) -> Result<Compiled, CatalogError> {
    let mut query = CompiledQuery {
        start_time: None,
        end_time: None,
        shape: None,
        filter_count: 0,
        size: MAX_RESULTS,
    };

    if let Some(start) = params.get("start-time") {
        query.start_time = Some(start.clone());
        query.filter_count += 1;
    }
    if let Some(end) = params.get("end-time") {
        query.end_time = Some(end.clone());
        query.filter_count += 1;
    }
    if let Some(raw) = params.get("shape") {
        let shape = geo_types::Geometry::<f64>::try_from_wkt_str(raw)
            .map_err(|e| CatalogError::InvalidShape(e.to_string()))?;
        query.shape = Some(shape);
        query.filter_count += 1;
    }

    // The debug short-circuit wins even when other filters are present.
    if params.contains_key("debug") {
        return Ok(Compiled::Debug(query.to_dsl()));
    }

    if query.filter_count == 0 {
        return Ok(Compiled::NoFilters);
    }

    Ok(Compiled::Query(query))
}

impl CompiledQuery {
    /// The document-store DSL body for this query: a `bool`/`filter`
    /// conjunction of `range` and `geo_shape` clauses plus the size cap.
    /// Also what the `debug` parameter returns to the caller.
    pub fn to_dsl(&self) -> Value {
        let mut filters: Vec<Value> = Vec::new();

        if let Some(start) = &self.start_time {
            filters.push(json!({ "range": { "date": { "gte": start } } }));
        }
        if let Some(end) = &self.end_time {
            filters.push(json!({ "range": { "date": { "lte": end } } }));
        }
        if let Some(shape) = &self.shape {
            let geometry = geojson::Geometry::new(geojson::Value::from(shape));
            filters.push(json!({
                "geo_shape": {
                    "bounds": { "shape": geometry, "relation": "intersects" }
                }
            }));
        }

        json!({
            "query": { "bool": { "filter": filters } },
            "size": self.size,
        })
    }

    /// Evaluates the conjunction locally, for the in-process index.
    ///
    /// Date bounds compare lexicographically, which is order-correct for the
    /// canonical ISO-8601 form the mapper emits. A record whose bounds fail
    /// planar conversion matches no shape filter.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        if let Some(start) = &self.start_time {
            if record.date.as_str() < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end_time {
            if record.date.as_str() > end.as_str() {
                return false;
            }
        }
        if let Some(shape) = &self.shape {
            match record.planar_bounds() {
                Ok(bounds) => {
                    if !bounds.intersects(shape) {
                        return false;
                    }
                }
                Err(_) => return false,
            }
        }
        true
    }
}
