use serde::{Deserialize, Serialize};

/// A document chunk as returned by the vector index, with the index's
/// similarity score. Never created or mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub text: String,
    pub score: f32,
}

/// The full model output for one question plus the documents it was
/// conditioned on, ordered most similar first.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    pub raw_text: String,
    pub source_documents: Vec<RetrievedDocument>,
}
