//! Retrieval-augmented chatbot QA service.
//!
//! A question is embedded, the nearest documents are fetched from a hosted
//! vector index, and both are handed to a hosted text-generation model. The
//! resulting answer is surfaced through a single-page chat UI served by the
//! same process.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
