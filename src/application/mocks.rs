//! Port stand-ins shared by the application and api test modules.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::{
    ports::{EmbeddingService, GenerationService, VectorIndex},
    DomainError, Embedding, RetrievedDocument,
};

pub struct FixedEmbedding {
    dimension: usize,
}

impl FixedEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl EmbeddingService for FixedEmbedding {
    async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
        Ok(Embedding::new(vec![0.1; self.dimension]))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

pub struct FailingEmbedding;

#[async_trait]
impl EmbeddingService for FailingEmbedding {
    async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
        Err(DomainError::retrieval("embedding service unreachable"))
    }

    fn dimension(&self) -> usize {
        0
    }
}

pub struct StaticIndex {
    documents: Vec<RetrievedDocument>,
}

impl StaticIndex {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl VectorIndex for StaticIndex {
    async fn search(
        &self,
        _query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        Ok(self.documents.iter().take(top_k).cloned().collect())
    }
}

/// Records the `top_k` of every search it serves.
pub struct RecordingIndex {
    documents: Vec<RetrievedDocument>,
    requested: Mutex<Vec<usize>>,
}

impl RecordingIndex {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self {
            documents,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for RecordingIndex {
    async fn search(
        &self,
        _query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        self.requested.lock().unwrap().push(top_k);
        Ok(self.documents.iter().take(top_k).cloned().collect())
    }
}

pub struct FailingIndex;

#[async_trait]
impl VectorIndex for FailingIndex {
    async fn search(
        &self,
        _query: &Embedding,
        _top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        Err(DomainError::retrieval("vector index unreachable"))
    }
}

pub struct CannedGeneration {
    text: String,
}

impl CannedGeneration {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl GenerationService for CannedGeneration {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        Ok(self.text.clone())
    }
}

/// Keeps the last prompt it was asked to complete.
pub struct RecordingGeneration {
    text: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGeneration {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerationService for RecordingGeneration {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.text.clone())
    }
}

pub struct FailingGeneration;

#[async_trait]
impl GenerationService for FailingGeneration {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::generation("generation service unreachable"))
    }
}

pub fn sample_documents() -> Vec<RetrievedDocument> {
    vec![
        RetrievedDocument {
            id: "doc-1".into(),
            text: "The HeartStart Intrepid is a monitor/defibrillator.".into(),
            score: 0.92,
        },
        RetrievedDocument {
            id: "doc-2".into(),
            text: "It supports manual and automated external defibrillation.".into(),
            score: 0.81,
        },
        RetrievedDocument {
            id: "doc-3".into(),
            text: "Operating instructions are in the service manual.".into(),
            score: 0.74,
        },
    ]
}

/// An engine wired entirely from canned collaborators.
pub fn canned_engine(generated: &str) -> Arc<crate::application::AnswerEngine> {
    Arc::new(crate::application::AnswerEngine::new(
        Arc::new(FixedEmbedding::new(8)),
        Arc::new(StaticIndex::new(sample_documents())),
        Arc::new(CannedGeneration::new(generated)),
    ))
}
