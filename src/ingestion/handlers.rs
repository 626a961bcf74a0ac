//! Ingestion Handler
//!
//! Receives one notification envelope from the pub/sub transport, extracts
//! the embedded raw metadata message, maps it to a canonical record and hands
//! it to the record indexer. Failures surface as HTTP status codes so the
//! transport's retry/dead-letter mechanics can act on them; nothing is
//! retried or partially committed here, and no state survives between
//! invocations.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::Value;

use super::indexer::RecordIndexer;
use super::mapper::FieldMapper;
use super::types::{IngestResponse, NotificationEnvelope, RawMetadataMessage};

pub async fn handle_notification(
    Extension(mapper): Extension<Arc<FieldMapper>>,
    Extension(indexer): Extension<Arc<RecordIndexer>>,
    Json(envelope): Json<NotificationEnvelope>,
) -> (StatusCode, Json<IngestResponse>) {
    let raw_message = match envelope.records.first() {
        Some(record) => record.sns.message.clone(),
        None => {
            tracing::error!("notification envelope carries no records");
            return (
                StatusCode::BAD_REQUEST,
                Json(IngestResponse {
                    name: String::new(),
                    status: "empty_envelope".to_string(),
                }),
            );
        }
    };

    let message: RawMetadataMessage = match serde_json::from_str(&raw_message) {
        Ok(message) => message,
        Err(err) => {
            tracing::error!("notification payload is not a JSON object: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(IngestResponse {
                    name: String::new(),
                    status: "unparseable_payload".to_string(),
                }),
            );
        }
    };

    // Best-effort name for log lines and rejection responses.
    let name = message
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let record = match mapper.map(&message) {
        Ok(record) => record,
        Err(err) => {
            tracing::error!("rejected metadata message for {:?}: {}", name, err);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(IngestResponse {
                    name,
                    status: "validation_failed".to_string(),
                }),
            );
        }
    };

    match indexer.ingest(&record, &raw_message).await {
        Ok(()) => (
            StatusCode::OK,
            Json(IngestResponse {
                name: record.name,
                status: "indexed".to_string(),
            }),
        ),
        Err(err) => {
            tracing::error!("index write for {} failed: {:#}", record.name, err);
            (
                StatusCode::BAD_GATEWAY,
                Json(IngestResponse {
                    name: record.name,
                    status: "index_write_failed".to_string(),
                }),
            )
        }
    }
}
