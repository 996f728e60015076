mod in_memory;
mod pinecone;

pub use in_memory::InMemoryVectorIndex;
pub use pinecone::PineconeIndex;
