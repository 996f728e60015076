mod conversation;
mod document;
mod embedding;

pub use conversation::{Message, MessageRole, Transcript};
pub use document::{AnswerResult, RetrievedDocument};
pub use embedding::Embedding;
