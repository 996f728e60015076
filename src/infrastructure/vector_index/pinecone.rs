use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::VectorIndex, DomainError, Embedding, RetrievedDocument};

const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// A named, pre-populated Pinecone index. Connecting resolves the index
/// name to its data-plane host through the control plane; queries go
/// straight to that host afterwards.
pub struct PineconeIndex {
    client: reqwest::Client,
    query_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<serde_json::Value>,
}

impl PineconeIndex {
    pub async fn connect(api_key: &str, index_name: &str) -> Result<Self, DomainError> {
        let client = reqwest::Client::new();

        let response = client
            .get(format!("{}/indexes/{}", CONTROL_PLANE_URL, index_name))
            .header("Api-Key", api_key)
            .send()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::retrieval(format!(
                "describe index {} returned {}",
                index_name,
                response.status()
            )));
        }

        let described: DescribeIndexResponse = response
            .json()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        tracing::info!(index = index_name, host = %described.host, "connected to vector index");

        Ok(Self {
            client,
            query_url: format!("https://{}/query", described.host),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let response = self
            .client
            .post(&self.query_url)
            .header("Api-Key", &self.api_key)
            .json(&QueryRequest {
                vector: query.as_slice(),
                top_k,
                include_metadata: true,
            })
            .send()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::retrieval(format!(
                "vector index returned {}",
                response.status()
            )));
        }

        let results: QueryResponse = response
            .json()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        Ok(results
            .matches
            .into_iter()
            .map(|m| {
                // ingestion stores the chunk text under the "text" metadata key
                let text = m
                    .metadata
                    .as_ref()
                    .and_then(|md| md.get("text"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                RetrievedDocument {
                    id: m.id,
                    text,
                    score: m.score,
                }
            })
            .collect())
    }
}
