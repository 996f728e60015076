use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::application::extract_answer;
use crate::domain::{DomainError, Message, RetrievedDocument};

const FAILURE_NOTICE: &str = "Something went wrong while answering, please try again.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub answer: String,
    pub sources: Vec<RetrievedDocument>,
    pub transcript: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub transcript: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub transcript: Vec<Message>,
}

pub async fn submit_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (session_id, session) = state.sessions.create_or_resume(request.session_id).await;
    let mut session = session.lock().await;

    match session.submit(&request.message).await {
        Ok(result) => Ok(Json(ChatResponse {
            session_id,
            answer: extract_answer(&result.raw_text).to_string(),
            sources: result.source_documents,
            transcript: session.render().to_vec(),
        })),
        Err(err) => {
            tracing::error!(error = %err, session_id = %session_id, "chat submission failed");
            // a collaborator failure leaves a dangling user turn; surface it
            // as a visible assistant error turn
            if matches!(err, DomainError::Retrieval(_) | DomainError::Generation(_)) {
                session.record_failure(FAILURE_NOTICE);
            }
            Err((
                error_status(&err),
                Json(ErrorResponse {
                    error: err.to_string(),
                    transcript: session.render().to_vec(),
                }),
            ))
        }
    }
}

pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, StatusCode> {
    match state.sessions.get(session_id).await {
        Some(session) => {
            let session = session.lock().await;
            Ok(Json(TranscriptResponse {
                session_id,
                transcript: session.render().to_vec(),
            }))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Retrieval(_) | DomainError::Generation(_) => StatusCode::BAD_GATEWAY,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
