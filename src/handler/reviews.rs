// handler/reviews.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{dtos::jobdtos::CreateReviewDto, error::HttpError, AppState};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/reviews", post(submit_review))
        .route("/reviews/:user_id", get(reviews_received))
        .route("/reviews-given/:user_id", get(reviews_given))
}

pub async fn submit_review(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateReviewDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .review_service
        .submit(body)
        .await
        .map_err(|e| e.into_http_with("Error submitting review!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Review submitted successfully!",
        "review_id": review.id,
    })))
}

pub async fn reviews_received(
    Path(user_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .review_service
        .received(user_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching reviews!"))?;

    Ok(Json(reviews))
}

pub async fn reviews_given(
    Path(user_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .review_service
        .given(user_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching reviews given!"))?;

    Ok(Json(reviews))
}
