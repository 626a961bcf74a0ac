use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use imagery_catalog::config::CatalogConfig;
use imagery_catalog::ingestion::handlers::handle_notification;
use imagery_catalog::ingestion::indexer::RecordIndexer;
use imagery_catalog::ingestion::mapper::FieldMapper;
use imagery_catalog::search::handlers::{handle_get_all, handle_get_by_id, handle_search};
use imagery_catalog::storage::backup::FsAuditStore;
use imagery_catalog::storage::memory::MemoryIndex;
use imagery_catalog::storage::remote::HttpIndex;
use imagery_catalog::storage::{AuditStore, CatalogIndex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = CatalogConfig::from_env()?;
    tracing::info!("Starting imagery catalog on {}", config.bind_addr);

    // 1. Index boundary: remote document store when configured, otherwise
    //    the in-process index.
    let index: Arc<dyn CatalogIndex> = match &config.index_endpoint {
        Some(endpoint) => {
            tracing::info!("Using remote index at {}", endpoint);
            Arc::new(HttpIndex::new(endpoint))
        }
        None => {
            tracing::info!("No INDEX_ENDPOINT set, using in-memory index");
            Arc::new(MemoryIndex::new())
        }
    };

    // 2. Audit backup boundary:
    let audit: Arc<dyn AuditStore> = Arc::new(FsAuditStore::new(&config.backup_dir));
    tracing::info!("Audit backups in {}", config.backup_dir.display());

    // 3. Pipeline components, dependency-injected into the handlers:
    let mapper = Arc::new(FieldMapper::new(config.tileserver_url.clone()));
    let indexer = Arc::new(RecordIndexer::new(index.clone(), audit));

    // 4. HTTP Router:
    let app = Router::new()
        .route("/ingest", post(handle_notification))
        .route("/search", get(handle_search))
        .route("/all_imagery", get(handle_get_all))
        .route("/:collection_id", get(handle_get_by_id))
        .layer(Extension(mapper))
        .layer(Extension(indexer))
        .layer(Extension(index));

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
