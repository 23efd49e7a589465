// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, bookmarks::bookmarks_handler, custom_jobs::custom_jobs_handler,
        jobs::jobs_handler, messages::messages_handler, notifications::notifications_handler,
        reviews::reviews_handler, users::users_handler,
    },
    realtime::socket::ws_handler,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(ws_handler))
        .merge(auth_handler())
        .merge(users_handler())
        .merge(jobs_handler())
        .merge(custom_jobs_handler())
        .merge(bookmarks_handler())
        .merge(reviews_handler())
        .merge(notifications_handler())
        .merge(messages_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn signup(app: &Router, name: &str, email: &str, role: &str) -> i64 {
        let (status, body) = call(
            app,
            "POST",
            "/signup",
            Some(json!({"name": name, "email": email, "password": "secret1", "role": role})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["user_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state().await);
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_signup_errors() {
        let app = create_router(test_state().await);

        let (status, body) = call(
            &app,
            "POST",
            "/signup",
            Some(json!({"name": "X", "email": "x@y.io", "password": "secret1", "role": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid role selected!");
        assert_eq!(body["status"], "fail");

        signup(&app, "Carol", "carol@example.com", "client").await;
        let (status, body) = call(
            &app,
            "POST",
            "/signup",
            Some(json!({"name": "C2", "email": "carol@example.com", "password": "secret1", "role": "client"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already exists!");
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let app = create_router(test_state().await);
        signup(&app, "Carol", "carol@example.com", "client").await;

        let (status, body) = call(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "carol@example.com", "password": "wrong12"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password!");

        let (status, body) = call(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "carol@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "client");
        assert!(body["user"].get("password").is_none());
        let token = body["token"].as_str().unwrap().to_string();

        let (status, _) = call(&app, "GET", "/users/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/users/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_end_to_end_job_lifecycle() {
        let app = create_router(test_state().await);
        let client_id = signup(&app, "Carol", "carol@example.com", "client").await;
        let freelancer_id = signup(&app, "Frank", "frank@example.com", "freelancer").await;

        let (status, body) = call(
            &app,
            "POST",
            "/jobs",
            Some(json!({"title": "Logo Design", "description": "A logo", "budget": 100, "client_id": client_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let job_id = body["job_id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            "POST",
            "/jobs",
            Some(json!({"title": "Nope", "description": "x", "budget": 10, "client_id": freelancer_id})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Only clients can post jobs!");

        let (_, inbox) = call(&app, "GET", &format!("/notifications?user_id={}", freelancer_id), None).await;
        assert_eq!(inbox[0]["type"], "new_job");

        let (status, body) = call(
            &app,
            "POST",
            "/bids",
            Some(json!({"job_id": job_id, "freelancer_id": freelancer_id, "bidAmount": 90, "proposal": "Mine"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let bid_id = body["bid_id"].as_i64().unwrap();

        let (_, proposals) = call(&app, "GET", &format!("/proposals?job_id={}", job_id), None).await;
        assert_eq!(proposals[0]["freelancerName"], "Frank");
        assert_eq!(proposals[0]["bidAmount"], 90.0);

        let (status, body) = call(&app, "POST", &format!("/approve-proposal/{}", bid_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Proposal approved and job closed!");

        let (status, body) = call(&app, "POST", &format!("/approve-proposal/{}", bid_id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Proposal has already been processed!");

        let (status, _) = call(&app, "POST", "/approve-proposal/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, job) = call(&app, "GET", &format!("/jobs/{}", job_id), None).await;
        assert_eq!(job["status"], "Closed");
        assert_eq!(job["bids"][0]["status"], "Approved");

        let (status, _) = call(&app, "POST", &format!("/complete-job/{}", job_id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, job) = call(&app, "GET", &format!("/jobs/{}", job_id), None).await;
        assert_eq!(job["status"], "Completed");
        assert_eq!(job["bids"][0]["status"], "Completed");

        for (reviewer, reviewed) in [(client_id, freelancer_id), (freelancer_id, client_id)] {
            let review = json!({
                "reviewer_id": reviewer,
                "reviewed_id": reviewed,
                "job_id": job_id,
                "rating": 5,
                "comment": "Great"
            });
            let (status, body) = call(&app, "POST", "/reviews", Some(review.clone())).await;
            assert_eq!(status, StatusCode::OK, "{}", body);

            let (status, body) = call(&app, "POST", "/reviews", Some(review)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "You have already reviewed this job!");
        }

        let (_, profile) = call(&app, "GET", &format!("/user/profile?user_id={}", freelancer_id), None).await;
        assert_eq!(profile["completedJobs"], 1);
        assert_eq!(profile["averageRating"], "5.0");
        assert_eq!(profile["totalEarnings"], 90.0);
    }

    #[tokio::test]
    async fn test_bookmark_toggle_over_http() {
        let app = create_router(test_state().await);
        let client_id = signup(&app, "Carol", "carol@example.com", "client").await;
        let freelancer_id = signup(&app, "Frank", "frank@example.com", "freelancer").await;
        let (_, body) = call(
            &app,
            "POST",
            "/jobs",
            Some(json!({"title": "Logo", "description": "A logo", "budget": 50, "client_id": client_id})),
        )
        .await;
        let job_id = body["job_id"].as_i64().unwrap();

        let toggle = json!({"freelancer_id": freelancer_id, "job_id": job_id});
        let (_, first) = call(&app, "POST", "/bookmarks", Some(toggle.clone())).await;
        assert_eq!(first["message"], "Bookmark added successfully!");
        let (_, second) = call(&app, "POST", "/bookmarks", Some(toggle)).await;
        assert_eq!(second["message"], "Bookmark removed successfully!");

        let (_, list) = call(&app, "GET", &format!("/bookmarks?freelancer_id={}", freelancer_id), None).await;
        assert_eq!(list.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_same_role_message_rejected_over_http() {
        let app = create_router(test_state().await);
        let a = signup(&app, "Ann", "ann@example.com", "client").await;
        let b = signup(&app, "Bob", "bob@example.com", "client").await;

        let (status, body) = call(
            &app,
            "POST",
            "/messages",
            Some(json!({"sender_id": a, "receiver_id": b, "content": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Messaging is only allowed between clients and freelancers!");

        let (_, history) = call(&app, "GET", &format!("/messages?user_id={}&other_user_id={}", a, b), None).await;
        assert_eq!(history.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_form_style_numbers_and_malformed_bodies() {
        let app = create_router(test_state().await);
        let client_id = signup(&app, "Carol", "carol@example.com", "client").await;
        let freelancer_id = signup(&app, "Frank", "frank@example.com", "freelancer").await;

        let (status, body) = call(
            &app,
            "POST",
            "/jobs",
            Some(json!({"title": "Logo", "description": "A logo", "budget": "100", "client_id": client_id.to_string()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let job_id = body["job_id"].as_i64().unwrap();

        let (_, job) = call(&app, "GET", &format!("/jobs/{}", job_id), None).await;
        assert_eq!(job["budget"], 100.0);

        let (status, body) = call(
            &app,
            "POST",
            "/bids",
            Some(json!({"job_id": job_id, "freelancer_id": freelancer_id, "bidAmount": "90.5", "proposal": "Mine"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);

        let (status, body) = call(
            &app,
            "POST",
            "/jobs",
            Some(json!({"title": "Logo", "description": "A logo", "budget": "lots", "client_id": client_id})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");

        let request = Request::builder()
            .method("POST")
            .uri("/jobs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn test_unknown_references_are_bad_requests() {
        let app = create_router(test_state().await);
        let client_id = signup(&app, "Carol", "carol@example.com", "client").await;
        let freelancer_id = signup(&app, "Frank", "frank@example.com", "freelancer").await;

        let (status, body) = call(
            &app,
            "POST",
            "/messages",
            Some(json!({"sender_id": client_id, "receiver_id": freelancer_id, "job_id": 9999, "content": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid job ID!");

        let (status, body) = call(
            &app,
            "POST",
            "/reviews",
            Some(json!({"reviewer_id": 9999, "reviewed_id": freelancer_id, "job_id": 1, "rating": "4"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid reviewer ID!");
    }
}
