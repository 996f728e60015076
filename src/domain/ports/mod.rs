mod embedding;
mod generation;
mod vector_index;

pub use embedding::EmbeddingService;
pub use generation::GenerationService;
pub use vector_index::VectorIndex;
