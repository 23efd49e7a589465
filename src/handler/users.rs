// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::Query,
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::userdtos::{
        FreelancerSearchQuery, UpdateEmailDto, UpdatePasswordDto, UpdateProfileDto, UserIdQuery,
    },
    error::HttpError,
    middleware::{auth, JWTAuthMiddleware},
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/users/me", get(get_me).layer(middleware::from_fn(auth)))
        .route("/user/profile", get(get_profile).put(update_profile))
        .route("/user/update-email", put(update_email))
        .route("/user/update-password", put(update_password))
        .route("/freelancers", get(list_freelancers))
}

pub async fn get_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(session): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .account_service
        .get_user(session.user.id)
        .await
        .map_err(|e| e.into_http_with("Error fetching user profile!"))?;

    Ok(Json(json!({"status": "success", "user": user})))
}

pub async fn get_profile(
    Query(query): Query<UserIdQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .account_service
        .get_profile(query.user_id)
        .await
        .map_err(|e| e.into_http_with("Error fetching user profile!"))?;

    Ok(Json(profile))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateProfileDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .account_service
        .update_profile(body)
        .await
        .map_err(|e| e.into_http_with("Error updating profile!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Profile updated successfully!",
        "user": profile,
    })))
}

pub async fn update_email(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateEmailDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .account_service
        .update_email(body)
        .await
        .map_err(|e| e.into_http_with("Error updating email! Email may already exist."))?;

    Ok(Json(json!({"status": "success", "message": "Email updated successfully!"})))
}

pub async fn update_password(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<UpdatePasswordDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .account_service
        .update_password(body)
        .await
        .map_err(|e| e.into_http_with("Error updating password!"))?;

    Ok(Json(json!({"status": "success", "message": "Password updated successfully!"})))
}

pub async fn list_freelancers(
    Query(query): Query<FreelancerSearchQuery>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let freelancers = app_state
        .account_service
        .list_freelancers(query.name)
        .await
        .map_err(|e| e.into_http_with("Error fetching freelancers!"))?;

    Ok(Json(freelancers))
}
