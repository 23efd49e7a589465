// handler/messages.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::{
    dtos::chatdtos::{ConversationQuery, SendMessageDto},
    error::HttpError,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/messages", get(get_conversation).post(send_message))
        .route("/messages/:id/read", post(mark_read))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<SendMessageDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let message = app_state
        .chat_service
        .send_message(body)
        .await
        .map_err(|e| e.into_http_with("Error sending message!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Message sent successfully!",
        "message_id": message.id,
        "created_at": message.created_at,
    })))
}

pub async fn get_conversation(
    Query(query): Query<ConversationQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .chat_service
        .conversation(query.user_id, query.other_user_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching messages!"))?;

    Ok(Json(messages))
}

pub async fn mark_read(
    Path(message_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .chat_service
        .mark_read(message_id)
        .await
        .map_err(|e| e.into_http_with("Error marking message as read!"))?;

    Ok(Json(json!({"status": "success", "message": "Message marked as read!"})))
}
