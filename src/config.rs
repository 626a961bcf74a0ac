//! Service Configuration
//!
//! Everything injectable comes from the environment, mirroring how the
//! service is deployed: the index endpoint, the audit backup location, and
//! the tileserver base URL used to derive record links. Nothing here is
//! global state; `main` reads the config once and hands the pieces to the
//! components that need them.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the tileserver that hosts the imagery pyramids. Used to
    /// derive `imageLink` and `thumbnailLink` on every canonical record.
    pub tileserver_url: String,
    /// Remote document-store endpoint. When unset the service runs against
    /// the in-process memory index.
    pub index_endpoint: Option<String>,
    /// Directory for the best-effort audit backups of raw messages.
    pub backup_dir: PathBuf,
    /// HTTP listen address.
    pub bind_addr: SocketAddr,
}

impl CatalogConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let tileserver_url = std::env::var("TILESERVER_URL")
            .context("TILESERVER_URL must be set (base URL for derived image links)")?;

        let index_endpoint = std::env::var("INDEX_ENDPOINT").ok();

        let backup_dir = std::env::var("BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./audit"));

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            tileserver_url,
            index_endpoint,
            backup_dir,
            bind_addr,
        })
    }
}
