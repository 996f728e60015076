pub mod config;
pub mod embedding;
pub mod generation;
pub mod vector_index;

pub use config::{
    AppConfig, ChatConfig, EmbeddingConfig, GenerationConfig, IndexConfig, ServerConfig,
};
pub use embedding::HuggingFaceEmbedding;
pub use generation::HuggingFaceGeneration;
pub use vector_index::{InMemoryVectorIndex, PineconeIndex};
