use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{ports::VectorIndex, DomainError, Embedding, RetrievedDocument};

/// Cosine-similarity index held in process memory. Stands in for the hosted
/// index in tests and local development; seeded through [`insert`].
///
/// [`insert`]: InMemoryVectorIndex::insert
pub struct InMemoryVectorIndex {
    entries: RwLock<Vec<(RetrievedDocument, Embedding)>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, id: impl Into<String>, text: impl Into<String>, embedding: Embedding) {
        let document = RetrievedDocument {
            id: id.into(),
            text: text.into(),
            score: 0.0,
        };
        self.entries
            .write()
            .expect("index lock poisoned")
            .push((document, embedding));
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut scored: Vec<RetrievedDocument> = entries
            .iter()
            .map(|(document, embedding)| RetrievedDocument {
                score: query.cosine_similarity(embedding),
                ..document.clone()
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let index = InMemoryVectorIndex::new();
        index.insert("a", "exact", Embedding::new(vec![1.0, 0.0, 0.0]));
        index.insert("b", "close", Embedding::new(vec![0.8, 0.6, 0.0]));
        index.insert("c", "far", Embedding::new(vec![0.0, 0.0, 1.0]));

        let query = Embedding::new(vec![1.0, 0.0, 0.0]);
        let results = index.search(&query, 3).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!((results[0].score - 1.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_search_truncates_to_top_k() {
        let index = InMemoryVectorIndex::new();
        for i in 0..5 {
            index.insert(
                format!("doc-{i}"),
                "text",
                Embedding::new(vec![1.0, i as f32]),
            );
        }

        let query = Embedding::new(vec![1.0, 0.0]);
        let results = index.search(&query, 3).await.unwrap();

        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_search_empty_index() {
        let index = InMemoryVectorIndex::new();
        let query = Embedding::new(vec![1.0]);

        let results = index.search(&query, 3).await.unwrap();
        assert!(results.is_empty());
    }
}
