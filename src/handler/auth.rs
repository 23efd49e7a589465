// handler/auth.rs
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::WithRejection;
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::userdtos::{FilterUserDto, LoginUserDto, SignupDto, UserLoginResponseDto},
    error::{ErrorMessage, HttpError},
    utils::token,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn signup(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<SignupDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .account_service
        .signup(body)
        .await
        .map_err(|e| e.into_http_with("Error creating user!"))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Signup successful!",
        "user_id": user.id,
    })))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<LoginUserDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .account_service
        .login(body.email, body.password)
        .await
        .map_err(|e| e.into_http_with("Error logging in!"))?;

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| {
        tracing::error!("failed to issue token for user {}: {}", user.id, e);
        HttpError::server_error(ErrorMessage::ServerError.to_string())
    })?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(time::Duration::minutes(app_state.env.jwt_maxage))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, session_cookie(cookie)?);

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        message: "Login successful!".to_string(),
        user: FilterUserDto::filter_user(&user),
        token,
    });

    Ok((headers, response))
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, session_cookie(cookie)?);

    Ok((
        headers,
        Json(json!({"status": "success", "message": "Logged out successfully!"})),
    ))
}

fn session_cookie(cookie: Cookie<'_>) -> Result<HeaderValue, HttpError> {
    cookie
        .to_string()
        .parse()
        .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))
}
