use axum::response::Html;

/// The chat page; everything else it needs comes from `/api/v1`.
pub async fn chat_page() -> Html<&'static str> {
    Html(include_str!("../../../assets/chat.html"))
}
