use crate::domain::{errors::DomainError, Embedding, RetrievedDocument};
use async_trait::async_trait;

/// Nearest-neighbor search over a pre-populated index. Ingestion happens
/// out of process; this side only reads.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError>;
}
