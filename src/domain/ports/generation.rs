use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Remote text-generation model. One blocking round trip per call, no
/// streaming. Decoding parameters are fixed on the adapter at startup.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
