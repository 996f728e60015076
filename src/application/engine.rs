use std::sync::Arc;
use tracing::instrument;

use crate::application::prompt::PromptTemplate;
use crate::domain::{
    ports::{EmbeddingService, GenerationService, VectorIndex},
    AnswerResult, DomainError,
};

pub const DEFAULT_TOP_K: usize = 3;

/// The retrieval-augmented answer pipeline: embed the question, fetch the
/// nearest documents, render the prompt, generate.
///
/// Configured once at startup; holds no mutable state across calls.
pub struct AnswerEngine {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    generation: Arc<dyn GenerationService>,
    prompt: PromptTemplate,
    top_k: usize,
}

impl AnswerEngine {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
        generation: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            embedding,
            index,
            generation,
            prompt: PromptTemplate::qa(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answers one question. Every collaborator failure propagates; no
    /// fabricated fallback answer.
    #[instrument(skip(self, question), fields(top_k = self.top_k))]
    pub async fn answer(&self, question: &str) -> Result<AnswerResult, DomainError> {
        let embedded = self.embedding.embed(question).await?;
        let documents = self.index.search(&embedded, self.top_k).await?;

        let context = documents
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = self.prompt.render(&context, question);

        let raw_text = self.generation.generate(&prompt).await?;

        Ok(AnswerResult {
            raw_text,
            source_documents: documents,
        })
    }
}
