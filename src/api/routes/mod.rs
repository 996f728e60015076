pub mod chat;
pub mod health;
pub mod page;

use axum::http::{header, Method};
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(page::chat_page))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::submit_message))
        .route("/chat/{session_id}", get(chat::get_transcript))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::canned_engine;
    use crate::infrastructure::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let engine = canned_engine("Context... Helpful Answer: It is a defibrillator model.");
        create_router(AppState::new(engine, AppConfig::default()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_page_is_served_at_root() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("Heart Start Intrepid Chat Bot"));
    }

    #[tokio::test]
    async fn test_submit_message_answers_and_returns_transcript() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"message":"What is a heart start intrepid?"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["answer"], "It is a defibrillator model.");
        assert_eq!(json["sources"].as_array().unwrap().len(), 3);

        let transcript = json["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0]["role"], "assistant");
        assert_eq!(transcript[1]["role"], "user");
        assert_eq!(transcript[2]["content"], "It is a defibrillator model.");
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message":"   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_transcript_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/chat/00000000-0000-0000-0000-000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_is_resumed_across_requests() {
        let app = test_app();

        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message":"first"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        let first_json = body_json(first).await;
        let session_id = first_json["session_id"].as_str().unwrap().to_string();

        let second = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(format!(
                        r#"{{"message":"second","session_id":"{session_id}"}}"#
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        let second_json = body_json(second).await;

        assert_eq!(second_json["session_id"].as_str().unwrap(), session_id);
        // greeting + two user/assistant pairs
        assert_eq!(second_json["transcript"].as_array().unwrap().len(), 5);
    }
}
