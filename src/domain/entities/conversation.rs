use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One conversational turn. Immutable once appended to a [`Transcript`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Append-only log of conversational turns, owned by exactly one session.
///
/// A new transcript always carries one assistant greeting turn before any
/// user turn exists.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    turns: Vec<Message>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Creates a transcript seeded with the assistant greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            turns: vec![Message::new(MessageRole::Assistant, greeting)],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push(&mut self, role: MessageRole, content: impl Into<String>) {
        self.turns.push(Message::new(role, content));
        self.updated_at = Utc::now();
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_role(&self) -> Option<MessageRole> {
        self.turns.last().map(|m| m.role)
    }

    pub fn last_content_of(&self, role: MessageRole) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
