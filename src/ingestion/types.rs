//! Ingestion Data Types
//!
//! Defines the notification envelope delivered by the pub/sub transport, the
//! semi-structured raw metadata message embedded in it, and the canonical
//! record that ingestion produces and the index stores.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

/// One pub/sub delivery. The transport wraps the metadata message as a JSON
/// string inside the first record's payload.
#[derive(Debug, Deserialize)]
pub struct NotificationEnvelope {
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsPayload,
}

#[derive(Debug, Deserialize)]
pub struct SnsPayload {
    #[serde(rename = "Message")]
    pub message: String,
}

/// The raw metadata message as published upstream: a JSON object with a
/// handful of required top-level fields and a nested `metadata` object of
/// format-specific tags. Kept semi-structured; the mapper does the fail-fast
/// extraction.
pub type RawMetadataMessage = serde_json::Map<String, Value>;

/// Response returned to the transport after one notification is processed.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub name: String,
    pub status: String,
}

/// The normalized, indexed representation of one imagery tile's metadata.
///
/// `id` always equals `name`; the index keys documents by `name`, which makes
/// re-ingestion of the same message a full-document replace rather than a
/// duplicate. The `extra` map carries every nested metadata tag that is not a
/// canonical field, flattened into the top level of the serialized document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub id: String,
    #[serde(rename = "edhIdentifier")]
    pub edh_identifier: String,
    pub name: String,
    pub bounds: geojson::Geometry,
    #[serde(rename = "minRLevel")]
    pub min_r_level: i64,
    #[serde(rename = "maxRLevel")]
    pub max_r_level: i64,
    pub date: String,
    #[serde(rename = "imageLink")]
    pub image_link: String,
    #[serde(rename = "thumbnailLink")]
    pub thumbnail_link: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CanonicalRecord {
    /// Flattens one nested metadata tag into the record.
    ///
    /// The upstream pipeline assigned derived fields first and then dumped
    /// every nested tag into the same output dict, so a tag named like a
    /// canonical field silently replaced the derived value. That precedence
    /// is contractual by now: a tag matching a canonical field overwrites it
    /// here too, except that with typed fields the value must coerce to the
    /// field's type or the whole message is rejected.
    pub fn assign_tag(&mut self, tag: String, value: Value) -> Result<(), CatalogError> {
        match tag.as_str() {
            "id" => self.id = coerce_string(&tag, value)?,
            "edhIdentifier" => self.edh_identifier = coerce_string(&tag, value)?,
            "name" => self.name = coerce_string(&tag, value)?,
            "date" => self.date = coerce_string(&tag, value)?,
            "imageLink" => self.image_link = coerce_string(&tag, value)?,
            "thumbnailLink" => self.thumbnail_link = coerce_string(&tag, value)?,
            "minRLevel" => self.min_r_level = coerce_integer(&tag, value)?,
            "maxRLevel" => self.max_r_level = coerce_integer(&tag, value)?,
            "bounds" => {
                self.bounds =
                    geometry_from_value(&value).map_err(|_| CatalogError::ShadowedField {
                        tag,
                        found: "a non-geometry value",
                    })?
            }
            _ => {
                self.extra.insert(tag, value);
            }
        }
        Ok(())
    }

    /// The record's bounds as a planar geometry, for local intersection
    /// tests. The mapper guarantees convertibility at ingestion time.
    pub fn planar_bounds(&self) -> Result<geo_types::Geometry<f64>, CatalogError> {
        geo_types::Geometry::<f64>::try_from(self.bounds.clone())
            .map_err(|e| CatalogError::InvalidBounds(e.to_string()))
    }
}

fn coerce_string(tag: &str, value: Value) -> Result<String, CatalogError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(CatalogError::ShadowedField {
            tag: tag.to_string(),
            found: json_type_name(&other),
        }),
    }
}

fn coerce_integer(tag: &str, value: Value) -> Result<i64, CatalogError> {
    value.as_i64().ok_or_else(|| CatalogError::ShadowedField {
        tag: tag.to_string(),
        found: json_type_name(&value),
    })
}

/// Parses a JSON value as a GeoJSON geometry.
pub fn geometry_from_value(value: &Value) -> Result<geojson::Geometry, String> {
    geojson::Geometry::try_from(value.clone()).map_err(|e| e.to_string())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
