use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::GenerationService, DomainError};
use crate::infrastructure::config::GenerationConfig;

const INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Text generation against a hosted Hugging Face Hub model.
///
/// The response carries the full text, prompt included, which is why the
/// session layer splits on the answer marker afterwards.
pub struct HuggingFaceGeneration {
    client: reqwest::Client,
    endpoint: String,
    temperature: f32,
    top_k: u32,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    temperature: f32,
    top_k: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

impl HuggingFaceGeneration {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/{}", INFERENCE_URL, config.model),
            temperature: config.temperature,
            top_k: config.top_k,
            api_token: config.api_token.clone(),
        }
    }
}

#[async_trait]
impl GenerationService for HuggingFaceGeneration {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let mut request = self.client.post(&self.endpoint).json(&GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                temperature: self.temperature,
                top_k: self.top_k,
                return_full_text: true,
            },
        });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::generation(format!(
                "generation service returned {}",
                response.status()
            )));
        }

        let outputs: Vec<GenerateResponse> = response
            .json()
            .await
            .map_err(|e| DomainError::generation(e.to_string()))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| DomainError::generation("no generated text returned"))
    }
}
