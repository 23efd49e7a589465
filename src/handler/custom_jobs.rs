// handler/custom_jobs.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::jobdtos::{CreateCustomJobDto, FreelancerQuery},
    error::HttpError,
    AppState,
};

pub fn custom_jobs_handler() -> Router {
    Router::new()
        .route("/custom-jobs", get(list_custom_jobs).post(submit_custom_job))
        .route("/custom-jobs/:id/approve", post(approve_custom_job))
        .route("/custom-jobs/:id/decline", post(decline_custom_job))
}

pub async fn list_custom_jobs(
    Query(query): Query<FreelancerQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let offers = app_state
        .custom_job_service
        .list_for_freelancer(query.freelancer_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching custom jobs!"))?;

    Ok(Json(offers))
}

pub async fn submit_custom_job(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateCustomJobDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let offer = app_state
        .custom_job_service
        .submit(body)
        .await
        .map_err(|e| e.into_http_with("Error submitting custom job!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Custom job submitted successfully!",
        "custom_job_id": offer.id,
    })))
}

pub async fn approve_custom_job(
    Path(custom_job_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .custom_job_service
        .approve(custom_job_id)
        .await
        .map_err(|e| e.into_http_with("Error approving custom job!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Custom job approved successfully!",
        "job_id": job.id,
    })))
}

pub async fn decline_custom_job(
    Path(custom_job_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .custom_job_service
        .decline(custom_job_id)
        .await
        .map_err(|e| e.into_http_with("Error declining custom job!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Custom job declined successfully!",
    })))
}
