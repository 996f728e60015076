/// Marker the prompt template ends with; the model's text after the first
/// occurrence is the display answer.
pub const ANSWER_MARKER: &str = "Helpful Answer:";

const QA_TEMPLATE: &str = r#"Use the following pieces of context to answer the question. Please follow the following rules:
1. Only share the final answer in the "result".
2. If you don't know the answer, don't try to make up an answer. Just say "I can't find the final answer but you may want to check the following links".
3. If you find the answer, write the answer in a concise way with five sentences maximum.

{context}

Question: {question}

Helpful Answer:
"#;

/// Instruction text with named `{context}` and `{question}` slots.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The fixed question-answering template.
    pub fn qa() -> Self {
        Self::new(QA_TEMPLATE)
    }

    pub fn render(&self, context: &str, question: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{question}", question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::qa()
    }
}

/// Splits the raw model output on the first occurrence of [`ANSWER_MARKER`].
///
/// Returns the text strictly after the marker, without the leading
/// whitespace the template forces there. When the marker is absent the
/// whole string comes back unchanged. Total; never fails.
pub fn extract_answer(raw: &str) -> &str {
    match raw.find(ANSWER_MARKER) {
        Some(pos) => raw[pos + ANSWER_MARKER.len()..].trim_start(),
        None => raw,
    }
}
