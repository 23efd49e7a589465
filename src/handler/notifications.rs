// handler/notifications.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;

use crate::{dtos::userdtos::UserIdQuery, error::HttpError, AppState};

pub fn notifications_handler() -> Router {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", post(mark_read))
}

pub async fn list_notifications(
    Query(query): Query<UserIdQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .notification_service
        .list_notifications(query.user_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching notifications!"))?;

    Ok(Json(notifications))
}

pub async fn mark_read(
    Path(notification_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .notification_service
        .mark_read(notification_id)
        .await
        .map_err(|e| e.into_http_with("Error marking notification as read!"))?;

    Ok(Json(json!({"status": "success", "message": "Notification marked as read!"})))
}
