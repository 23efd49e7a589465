// handler/jobs.rs
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
    dtos::jobdtos::{ClientQuery, CreateBidDto, CreateJobDto, JobQuery, PartyQuery},
    error::HttpError,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/jobs", get(list_jobs).post(post_job))
        .route("/jobs/:id", get(get_job))
        .route("/client-jobs", get(client_jobs))
        .route("/bids", post(submit_bid))
        .route("/proposals", get(list_proposals))
        .route("/approve-proposal/:id", post(approve_proposal))
        .route("/complete-job/:job_id", post(complete_job))
        .route("/ongoing-jobs", get(ongoing_jobs))
        .route("/completed-jobs", get(completed_jobs))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .list_open_jobs()
        .await
        .map_err(|e| e.into_http_with("Error fetching jobs!"))?;

    Ok(Json(jobs))
}

pub async fn post_job(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateJobDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .job_service
        .post_job(body)
        .await
        .map_err(|e| e.into_http_with("Error posting job!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Job posted successfully!",
        "job_id": job.id,
    })))
}

pub async fn get_job(
    Path(job_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .get_job_with_bids(job_id)
        .await
        .map_err(|e| e.into_http_with("Error retrieving job details!"))?;

    Ok(Json(job))
}

pub async fn client_jobs(
    Query(query): Query<ClientQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .list_client_open_jobs(query.client_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching jobs!"))?;

    Ok(Json(jobs))
}

pub async fn submit_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateBidDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bid = app_state
        .job_service
        .submit_bid(body)
        .await
        .map_err(|e| e.into_http_with("Error submitting bid!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Bid submitted successfully!",
        "bid_id": bid.id,
    })))
}

pub async fn list_proposals(
    Query(query): Query<JobQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bids = app_state
        .job_service
        .list_proposals(query.job_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching proposals"))?;

    Ok(Json(bids))
}

pub async fn approve_proposal(
    Path(bid_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .job_service
        .approve_proposal(bid_id)
        .await
        .map_err(|e| e.into_http_with("Error approving proposal!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Proposal approved and job closed!",
    })))
}

pub async fn complete_job(
    Path(job_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .job_service
        .complete_job(job_id)
        .await
        .map_err(|e| e.into_http_with("Error marking job as completed!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Job marked as completed!",
    })))
}

pub async fn ongoing_jobs(
    Query(query): Query<PartyQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .list_ongoing_jobs(query.client_id, query.freelancer_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching ongoing jobs!"))?;

    Ok(Json(jobs))
}

pub async fn completed_jobs(
    Query(query): Query<PartyQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .list_completed_jobs(query.client_id, query.freelancer_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching completed jobs!"))?;

    Ok(Json(jobs))
}
