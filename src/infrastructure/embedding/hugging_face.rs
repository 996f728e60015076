use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

const FEATURE_EXTRACTION_URL: &str = "https://api-inference.huggingface.co/pipeline/feature-extraction";

/// Sentence embeddings via the Hugging Face Inference API
/// feature-extraction pipeline.
pub struct HuggingFaceEmbedding {
    client: reqwest::Client,
    endpoint: String,
    dimension: usize,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: [&'a str; 1],
}

impl HuggingFaceEmbedding {
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/{}", FEATURE_EXTRACTION_URL, config.model),
            dimension: config.dimension,
            api_token: config.api_token.clone(),
        }
    }
}

#[async_trait]
impl EmbeddingService for HuggingFaceEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { inputs: [text] });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::retrieval(format!(
                "embedding service returned {}",
                response.status()
            )));
        }

        // one pooled vector per input
        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| DomainError::retrieval(e.to_string()))?;

        vectors
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| DomainError::retrieval("no embedding returned"))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
