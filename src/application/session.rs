use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::engine::AnswerEngine;
use crate::application::prompt::extract_answer;
use crate::domain::{AnswerResult, DomainError, Message, MessageRole, Transcript};

/// One interactive conversation over an [`AnswerEngine`].
///
/// Owns the transcript for its session id. Created (or resumed) through the
/// api layer's session registry.
pub struct ChatSession {
    id: Uuid,
    engine: Arc<AnswerEngine>,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(id: Uuid, engine: Arc<AnswerEngine>, greeting: impl Into<String>) -> Self {
        Self {
            id,
            engine,
            transcript: Transcript::seeded(greeting),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True when the last turn is a user turn still waiting for its reply.
    pub fn awaiting_reply(&self) -> bool {
        self.transcript.last_role() == Some(MessageRole::User)
    }

    /// Accepts one line of user input: records the user turn, generates the
    /// reply, records the assistant turn.
    ///
    /// Empty or whitespace-only input is rejected before anything is
    /// recorded. If the engine fails the user turn stays in the transcript
    /// and the error propagates; the caller decides how to surface it
    /// (see [`ChatSession::record_failure`]).
    #[instrument(skip(self, user_text), fields(session_id = %self.id))]
    pub async fn submit(&mut self, user_text: &str) -> Result<AnswerResult, DomainError> {
        if user_text.trim().is_empty() {
            return Err(DomainError::invalid_input("message is empty"));
        }

        self.transcript.push(MessageRole::User, user_text);
        self.reply().await
    }

    /// Generates the answer for the pending user turn.
    ///
    /// Only runs when the last turn's role is user, so a render-triggered
    /// call can never double-answer an already-answered turn.
    pub async fn reply(&mut self) -> Result<AnswerResult, DomainError> {
        if !self.awaiting_reply() {
            return Err(DomainError::internal("no user turn awaiting a reply"));
        }

        let question = self
            .transcript
            .last_content_of(MessageRole::User)
            .map(str::to_owned)
            .unwrap_or_default();

        let result = self.engine.answer(&question).await?;
        let answer = extract_answer(&result.raw_text).to_string();
        self.transcript.push(MessageRole::Assistant, answer);

        Ok(result)
    }

    /// Appends an assistant turn carrying an error notice, restoring
    /// alternation after a failed [`ChatSession::submit`].
    pub fn record_failure(&mut self, notice: impl Into<String>) {
        self.transcript.push(MessageRole::Assistant, notice);
    }

    /// Ordered read-only view of the transcript. Idempotent.
    pub fn render(&self) -> &[Message] {
        self.transcript.turns()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{
        canned_engine, FailingGeneration, FailingIndex, FixedEmbedding, StaticIndex,
    };

    const GREETING: &str = "Welcome, how may I help you!!";

    fn roles(session: &ChatSession) -> Vec<MessageRole> {
        session.render().iter().map(|m| m.role).collect()
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_assistant() {
        let engine = canned_engine(
            "Context recap... Helpful Answer: It is a defibrillator model.",
        );
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        session.submit("What is a heart start intrepid?").await.unwrap();

        let turns = session.render();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, MessageRole::Assistant);
        assert_eq!(turns[0].content, GREETING);
        assert_eq!(turns[1].role, MessageRole::User);
        assert_eq!(turns[1].content, "What is a heart start intrepid?");
        assert_eq!(turns[2].role, MessageRole::Assistant);
        assert_eq!(turns[2].content, "It is a defibrillator model.");
    }

    #[tokio::test]
    async fn test_submit_keeps_whole_text_when_marker_absent() {
        let engine = canned_engine("Unable to answer.");
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        session.submit("anything").await.unwrap();

        assert_eq!(session.render().last().unwrap().content, "Unable to answer.");
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_input() {
        let engine = canned_engine("irrelevant");
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        for input in ["", "   ", "\n\t"] {
            let err = session.submit(input).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }

        assert_eq!(session.render().len(), 1);
    }

    #[tokio::test]
    async fn test_retrieval_failure_leaves_dangling_user_turn() {
        let engine = Arc::new(AnswerEngine::new(
            Arc::new(FixedEmbedding::new(4)),
            Arc::new(FailingIndex),
            Arc::new(FailingGeneration),
        ));
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        let err = session.submit("a question").await.unwrap_err();

        assert!(matches!(err, DomainError::Retrieval(_)));
        let turns = session.render();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, MessageRole::User);
        assert!(session.awaiting_reply());
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let engine = Arc::new(AnswerEngine::new(
            Arc::new(FixedEmbedding::new(4)),
            Arc::new(StaticIndex::new(vec![])),
            Arc::new(FailingGeneration),
        ));
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        let err = session.submit("a question").await.unwrap_err();
        assert!(matches!(err, DomainError::Generation(_)));
    }

    #[tokio::test]
    async fn test_record_failure_restores_alternation() {
        let engine = Arc::new(AnswerEngine::new(
            Arc::new(FixedEmbedding::new(4)),
            Arc::new(FailingIndex),
            Arc::new(FailingGeneration),
        ));
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        session.submit("a question").await.unwrap_err();
        session.record_failure("Something went wrong while answering, please try again.");

        assert!(!session.awaiting_reply());
        assert_eq!(session.render().last().unwrap().role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_reply_refuses_when_nothing_pending() {
        let engine = canned_engine("irrelevant");
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        let err = session.reply().await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
        assert_eq!(session.render().len(), 1);
    }

    #[tokio::test]
    async fn test_transcript_alternates_over_many_submits() {
        let engine = canned_engine("Helpful Answer: ok");
        let mut session = ChatSession::new(Uuid::new_v4(), engine, GREETING);

        for question in ["one", "two", "three"] {
            session.submit(question).await.unwrap();
        }

        let roles = roles(&session);
        assert_eq!(roles[0], MessageRole::Assistant);
        for pair in roles[1..].chunks(2) {
            assert_eq!(pair, [MessageRole::User, MessageRole::Assistant]);
        }
    }
}
