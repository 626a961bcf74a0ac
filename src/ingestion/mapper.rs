//! Field Mapper
//!
//! Pure transformation of a raw metadata message into a [`CanonicalRecord`].
//! No I/O happens here; every failure is a validation error that the caller
//! propagates to the external redelivery mechanism.
//!
//! ## Derivations
//! - `date`: the nested `IDATIM` tag (`yyyyMMddHHmmss`) rewritten by fixed
//!   positional slicing into ISO-8601 with millisecond precision and UTC zone.
//! - `imageLink`: the configured tileserver base URL joined with `name`,
//!   colons rewritten to path separators.
//! - `thumbnailLink`: `imageLink` plus the lowest-detail pyramid tile at the
//!   origin coordinate (`/{maxRLevel}/0/0/0.png`).

use regex::Regex;
use serde_json::Value;

use super::types::{geometry_from_value, CanonicalRecord, RawMetadataMessage};
use crate::error::CatalogError;

/// Nested tag carrying the raw rational-polynomial coefficients. Stripped
/// unconditionally; it must never reach a stored record.
const EXCLUDED_COEFFICIENT_TAG: &str = "RPC00B";

/// Nested tag carrying the acquisition time.
const ACQUISITION_TIME_TAG: &str = "IDATIM";

pub struct FieldMapper {
    tileserver_url: String,
    timestamp_format: Regex,
}

impl FieldMapper {
    pub fn new(tileserver_url: impl Into<String>) -> Self {
        let tileserver_url = tileserver_url.into();
        Self {
            tileserver_url: tileserver_url.trim_end_matches('/').to_string(),
            // ASCII-only: `\d` would admit Unicode digits, which the fixed
            // byte slicing below cannot handle.
            timestamp_format: Regex::new(r"^[0-9]{14}$").unwrap(),
        }
    }

    /// Maps one raw metadata message to a canonical record.
    ///
    /// Required fields are extracted fail-fast; a corrupt upstream message is
    /// rejected whole rather than indexed incomplete. Nested metadata tags
    /// are flattened last, so a tag named like a canonical field shadows the
    /// derived value (see [`CanonicalRecord::assign_tag`]).
    pub fn map(&self, message: &RawMetadataMessage) -> Result<CanonicalRecord, CatalogError> {
        let mut metadata = match message.get("metadata") {
            Some(Value::Object(tags)) => tags.clone(),
            _ => return Err(CatalogError::MissingField("metadata")),
        };
        // No-op when the tag is absent.
        metadata.remove(EXCLUDED_COEFFICIENT_TAG);

        let edh_identifier = require_string(message, "edhIdentifier")?;
        let name = require_string(message, "name")?;

        let bounds_value = message
            .get("bounds")
            .ok_or(CatalogError::MissingField("bounds"))?;
        let bounds = geometry_from_value(bounds_value).map_err(CatalogError::InvalidBounds)?;
        // Reject geometries the planar predicates cannot evaluate later.
        geo_types::Geometry::<f64>::try_from(bounds.clone())
            .map_err(|e| CatalogError::InvalidBounds(e.to_string()))?;

        // The upstream feed spells the minimum level in lower case.
        let min_r_level = require_integer(message, "minrlevel")?;
        let max_r_level = require_integer(message, "maxRLevel")?;

        // The raw tag is read, not removed: flattening keeps it alongside
        // the derived `date`, as the upstream pipeline always has.
        let date = match metadata.get(ACQUISITION_TIME_TAG) {
            Some(raw) => self.reformat_acquisition_time(raw)?,
            None => return Err(CatalogError::MissingField(ACQUISITION_TIME_TAG)),
        };

        let image_link = format!("{}/{}", self.tileserver_url, name.replace(':', "/"));
        let thumbnail_link = format!("{}/{}/0/0/0.png", image_link, max_r_level);

        let mut record = CanonicalRecord {
            id: name.clone(),
            edh_identifier,
            name,
            bounds,
            min_r_level,
            max_r_level,
            date,
            image_link,
            thumbnail_link,
            extra: serde_json::Map::new(),
        };

        for (tag, value) in metadata {
            record.assign_tag(tag, value)?;
        }

        Ok(record)
    }

    /// Rewrites `yyyyMMddHHmmss` to `yyyy-MM-ddTHH:mm:ss.000Z` by positional
    /// slicing. Fractional seconds are fixed at `000`. Anything other than
    /// exactly 14 ASCII digits is rejected.
    fn reformat_acquisition_time(&self, raw: &Value) -> Result<String, CatalogError> {
        // Some feeds publish the tag as a bare number.
        let text = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(CatalogError::MalformedTimestamp(raw.to_string())),
        };

        if !self.timestamp_format.is_match(&text) {
            return Err(CatalogError::MalformedTimestamp(text));
        }

        Ok(format!(
            "{}-{}-{}T{}:{}:{}.000Z",
            &text[0..4],
            &text[4..6],
            &text[6..8],
            &text[8..10],
            &text[10..12],
            &text[12..14],
        ))
    }
}

fn require_string(
    message: &RawMetadataMessage,
    field: &'static str,
) -> Result<String, CatalogError> {
    match message.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(CatalogError::MissingField(field)),
    }
}

fn require_integer(
    message: &RawMetadataMessage,
    field: &'static str,
) -> Result<i64, CatalogError> {
    message
        .get(field)
        .and_then(Value::as_i64)
        .ok_or(CatalogError::MissingField(field))
}
