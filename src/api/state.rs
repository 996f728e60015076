use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::application::{AnswerEngine, ChatSession};
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnswerEngine>,
    pub sessions: SessionRegistry,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(engine: Arc<AnswerEngine>, config: AppConfig) -> Self {
        let sessions = SessionRegistry::new(engine.clone(), &config.chat.greeting);
        Self {
            engine,
            sessions,
            config: Arc::new(config),
        }
    }
}

/// Process-local sessions keyed by id, created on first access and dropped
/// with the process.
///
/// Each session sits behind its own async mutex, so a second submission for
/// the same session waits for the in-flight one; distinct sessions proceed
/// independently.
#[derive(Clone)]
pub struct SessionRegistry {
    engine: Arc<AnswerEngine>,
    greeting: String,
    inner: Arc<RwLock<HashMap<Uuid, Arc<Mutex<ChatSession>>>>>,
}

impl SessionRegistry {
    pub fn new(engine: Arc<AnswerEngine>, greeting: impl Into<String>) -> Self {
        Self {
            engine,
            greeting: greeting.into(),
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Resumes the session under `id`, or creates a fresh seeded one — under
    /// the supplied id if any, so clients keep their id across a server
    /// restart, else under a new one.
    pub async fn create_or_resume(&self, id: Option<Uuid>) -> (Uuid, Arc<Mutex<ChatSession>>) {
        let id = id.unwrap_or_else(Uuid::new_v4);

        {
            let sessions = self.inner.read().await;
            if let Some(session) = sessions.get(&id) {
                return (id, session.clone());
            }
        }

        let mut sessions = self.inner.write().await;
        let session = sessions.entry(id).or_insert_with(|| {
            tracing::debug!(session_id = %id, "created chat session");
            Arc::new(Mutex::new(ChatSession::new(
                id,
                self.engine.clone(),
                self.greeting.clone(),
            )))
        });
        (id, session.clone())
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.inner.read().await.get(&id).cloned()
    }
}
