// handler/bookmarks.rs
use std::sync::Arc;

use axum::{extract::Query, response::IntoResponse, routing::get, Extension, Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::{
    dtos::jobdtos::{BookmarkDto, FreelancerQuery},
    error::HttpError,
    models::jobmodel::BookmarkToggle,
    AppState,
};

pub fn bookmarks_handler() -> Router {
    Router::new().route("/bookmarks", get(list_bookmarks).post(toggle_bookmark))
}

pub async fn list_bookmarks(
    Query(query): Query<FreelancerQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .bookmark_service
        .list(query.freelancer_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching bookmarked jobs!"))?;

    Ok(Json(jobs))
}

pub async fn toggle_bookmark(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<BookmarkDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = app_state
        .bookmark_service
        .toggle(body)
        .await
        .map_err(|e| e.into_http_with("Error updating bookmark!"))?;

    let message = match outcome {
        BookmarkToggle::Added => "Bookmark added successfully!",
        BookmarkToggle::Removed => "Bookmark removed successfully!",
    };

    Ok(Json(json!({
        "status": "success",
        "message": message,
        "bookmarked": outcome == BookmarkToggle::Added,
    })))
}
