//! Storage Module Tests
//!
//! Validates the in-process index boundary and the audit backup stores.
//!
//! ## Test Scopes
//! - **MemoryIndex**: Upsert/get/count mechanics, last-write-wins keying,
//!   filtered search with the result cap.
//! - **HttpIndex**: Wire shapes and the not-found branch, against a stub
//!   document store bound to a local port.
//! - **Audit stores**: Verbatim payloads and name-plus-timestamp keying.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post, put};
    use axum::{Extension, Json, Router};
    use dashmap::DashMap;
    use serde_json::{json, Value};

    use crate::ingestion::mapper::FieldMapper;
    use crate::ingestion::types::{CanonicalRecord, RawMetadataMessage};
    use crate::search::query::{compile, Compiled};
    use crate::storage::backup::{FsAuditStore, MemoryAuditStore};
    use crate::storage::memory::MemoryIndex;
    use crate::storage::remote::HttpIndex;
    use crate::storage::{AuditStore, CatalogIndex};

    fn record_named(name: &str, idatim: &str) -> CanonicalRecord {
        let message: RawMetadataMessage = match json!({
            "edhIdentifier": format!("edh-{}", name),
            "name": name,
            "bounds": {
                "type": "Polygon",
                "coordinates": [[
                    [-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0]
                ]]
            },
            "minrlevel": 0,
            "maxRLevel": 2,
            "metadata": { "IDATIM": idatim }
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        FieldMapper::new("https://tiles.example.com/tileserver")
            .map(&message)
            .unwrap()
    }

    fn date_query(start: &str, end: &str) -> crate::search::query::CompiledQuery {
        let params = [
            ("start-time".to_string(), start.to_string()),
            ("end-time".to_string(), end.to_string()),
        ]
        .into_iter()
        .collect();
        match compile(&params).unwrap() {
            Compiled::Query(query) => query,
            other => panic!("expected an executable query, got {:?}", other),
        }
    }

    // ============================================================
    // MEMORY INDEX TESTS
    // ============================================================

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let index = MemoryIndex::new();
        let record = record_named("x:1", "20230101000000");

        index.upsert(&record).await.unwrap();

        let stored = index.get_by_name("x:1").await.unwrap().unwrap();
        assert_eq!(stored.edh_identifier, "edh-x:1");
        assert_eq!(index.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_name_is_none_not_error() {
        let index = MemoryIndex::new();
        assert!(index.get_by_name("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_document() {
        let index = MemoryIndex::new();
        index
            .upsert(&record_named("x:1", "20230101000000"))
            .await
            .unwrap();
        index
            .upsert(&record_named("x:1", "20240601000000"))
            .await
            .unwrap();

        assert_eq!(index.count().await.unwrap(), 1);
        let stored = index.get_by_name("x:1").await.unwrap().unwrap();
        assert_eq!(stored.date, "2024-06-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn test_all_returns_every_record_sorted() {
        let index = MemoryIndex::new();
        index
            .upsert(&record_named("b:2", "20230201000000"))
            .await
            .unwrap();
        index
            .upsert(&record_named("a:1", "20230101000000"))
            .await
            .unwrap();

        let records = index.all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "a:1");
        assert_eq!(records[1].name, "b:2");
    }

    #[tokio::test]
    async fn test_search_filters_by_date_range() {
        let index = MemoryIndex::new();
        index
            .upsert(&record_named("a:1", "20230115000000"))
            .await
            .unwrap();
        index
            .upsert(&record_named("b:2", "20231115000000"))
            .await
            .unwrap();

        let hits = index
            .search(&date_query("2023-01-01", "2023-06-30"))
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "a:1");
    }

    #[tokio::test]
    async fn test_search_applies_result_cap() {
        let index = MemoryIndex::new();
        index
            .upsert(&record_named("a:1", "20230115000000"))
            .await
            .unwrap();
        index
            .upsert(&record_named("b:2", "20230116000000"))
            .await
            .unwrap();

        let mut query = date_query("2023-01-01", "2023-12-31");
        query.size = 1;

        let hits = index.search(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    // ============================================================
    // HTTP INDEX TESTS (stub document store)
    // ============================================================

    type StubDocs = Arc<DashMap<String, Value>>;

    async fn stub_put(
        Path(name): Path<String>,
        Extension(docs): Extension<StubDocs>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        docs.insert(name, body);
        StatusCode::OK
    }

    async fn stub_get(Path(name): Path<String>, Extension(docs): Extension<StubDocs>) -> Response {
        match docs.get(&name) {
            Some(doc) => Json(json!({ "_source": doc.value() })).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn stub_search(Extension(docs): Extension<StubDocs>) -> Json<Value> {
        let hits: Vec<Value> = docs
            .iter()
            .map(|entry| json!({ "_source": entry.value() }))
            .collect();
        Json(json!({ "hits": { "hits": hits } }))
    }

    async fn stub_count(Extension(docs): Extension<StubDocs>) -> Json<Value> {
        Json(json!({ "count": docs.len() }))
    }

    /// Binds a stub document store to a local port and returns its base URL.
    async fn spawn_stub_store() -> String {
        let docs: StubDocs = Arc::new(DashMap::new());
        let app = Router::new()
            .route("/imagery/_doc/:name", put(stub_put).get(stub_get))
            .route("/imagery/_search", post(stub_search))
            .route("/imagery/_count", get(stub_count))
            .layer(Extension(docs));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_http_index_upsert_and_get_round_trip() {
        let index = HttpIndex::new(&spawn_stub_store().await);
        let record = record_named("x:1", "20230101000000");

        index.upsert(&record).await.unwrap();

        let stored = index.get_by_name("x:1").await.unwrap().unwrap();
        assert_eq!(stored.name, "x:1");
        assert_eq!(stored.date, "2023-01-01T00:00:00.000Z");
        assert_eq!(index.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_http_index_missing_doc_is_none_not_error() {
        let index = HttpIndex::new(&spawn_stub_store().await);
        assert!(index.get_by_name("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_http_index_search_and_all_parse_hits() {
        let index = HttpIndex::new(&spawn_stub_store().await);
        index
            .upsert(&record_named("a:1", "20230115000000"))
            .await
            .unwrap();
        index
            .upsert(&record_named("b:2", "20231115000000"))
            .await
            .unwrap();

        let hits = index
            .search(&date_query("2023-01-01", "2023-12-31"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);

        let everything = index.all().await.unwrap();
        assert_eq!(everything.len(), 2);
    }

    #[tokio::test]
    async fn test_http_index_unreachable_store_is_an_error() {
        // Nothing listens here; the failure must propagate, not retry.
        let index = HttpIndex::new("http://127.0.0.1:1");
        assert!(index.upsert(&record_named("x:1", "20230101000000")).await.is_err());
        assert!(index.get_by_name("x:1").await.is_err());
    }

    // ============================================================
    // AUDIT STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_fs_audit_store_writes_verbatim_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAuditStore::new(dir.path());

        store.backup("a:b:c", "{\"original\":true}").await.unwrap();

        let mut entries = std::fs::read_dir(dir.path()).unwrap();
        let entry = entries.next().unwrap().unwrap();
        let file_name = entry.file_name().into_string().unwrap();
        assert!(file_name.starts_with("a:b:c-"));
        assert!(file_name.ends_with(".json"));

        let contents = std::fs::read_to_string(entry.path()).unwrap();
        assert_eq!(contents, "{\"original\":true}");
    }

    #[tokio::test]
    async fn test_memory_audit_store_keys_by_name() {
        let store = MemoryAuditStore::new();
        store.backup("a:b:c", "{}").await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.contains("a:b:c"));
        assert!(!store.contains("other"));
    }
}
