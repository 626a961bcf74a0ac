//! Remote Catalog Index
//!
//! A reqwest client for the document store's REST dialect: documents live in
//! one collection, upserts are `PUT /{collection}/_doc/{name}`, searches post
//! the compiled DSL body. Every call is a single attempt; failures propagate
//! promptly so the external redelivery mechanism can act. Retries do not
//! belong here.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::CatalogIndex;
use crate::ingestion::types::CanonicalRecord;
use crate::search::query::CompiledQuery;

/// Name of the logical collection holding imagery records.
const COLLECTION: &str = "imagery";

pub struct HttpIndex {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIndex {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn doc_url(&self, name: &str) -> String {
        format!("{}/{}/_doc/{}", self.base_url, COLLECTION, name)
    }

    fn collection_url(&self, verb: &str) -> String {
        format!("{}/{}/{}", self.base_url, COLLECTION, verb)
    }

    async fn execute_search(&self, body: serde_json::Value) -> anyhow::Result<Vec<CanonicalRecord>> {
        let response = self
            .client
            .post(self.collection_url("_search"))
            .json(&body)
            .send()
            .await
            .context("search request failed")?
            .error_for_status()
            .context("search request rejected")?;

        let body: SearchBody = response
            .json()
            .await
            .context("search response is not the expected shape")?;

        Ok(body.hits.hits.into_iter().map(|hit| hit.source).collect())
    }
}

#[async_trait]
impl CatalogIndex for HttpIndex {
    async fn upsert(&self, record: &CanonicalRecord) -> anyhow::Result<()> {
        self.client
            .put(self.doc_url(&record.name))
            .json(record)
            .send()
            .await
            .context("upsert request failed")?
            .error_for_status()
            .context("upsert rejected by index")?;
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> anyhow::Result<Option<CanonicalRecord>> {
        let response = self
            .client
            .get(self.doc_url(name))
            .send()
            .await
            .context("lookup request failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: DocBody = response
            .error_for_status()
            .context("lookup rejected by index")?
            .json()
            .await
            .context("lookup response is not the expected shape")?;

        Ok(Some(body.source))
    }

    async fn search(&self, query: &CompiledQuery) -> anyhow::Result<Vec<CanonicalRecord>> {
        self.execute_search(query.to_dsl()).await
    }

    async fn all(&self) -> anyhow::Result<Vec<CanonicalRecord>> {
        // Size the match-all to the current count, as the store caps
        // unsized searches far below a full listing.
        let total = self.count().await?;
        self.execute_search(serde_json::json!({
            "query": { "match_all": {} },
            "size": total,
        }))
        .await
    }

    async fn count(&self) -> anyhow::Result<usize> {
        let body: CountBody = self
            .client
            .get(self.collection_url("_count"))
            .send()
            .await
            .context("count request failed")?
            .error_for_status()
            .context("count rejected by index")?
            .json()
            .await
            .context("count response is not the expected shape")?;
        Ok(body.count)
    }
}

#[derive(Deserialize)]
struct SearchBody {
    hits: HitsBody,
}

#[derive(Deserialize)]
struct HitsBody {
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: CanonicalRecord,
}

#[derive(Deserialize)]
struct DocBody {
    #[serde(rename = "_source")]
    source: CanonicalRecord,
}

#[derive(Deserialize)]
struct CountBody {
    count: usize,
}
