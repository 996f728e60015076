mod hugging_face;

pub use hugging_face::HuggingFaceGeneration;
