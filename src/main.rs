mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod realtime;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use db::db::DBClient;
use dotenv::dotenv;
use realtime::PresenceHub;
use routes::create_router;
use service::{
    account_service::AccountService, bookmark_service::BookmarkService,
    chat_service::ChatService, custom_job_service::CustomJobService, job_service::JobService,
    notification_service::NotificationService, review_service::ReviewService,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub presence: Arc<PresenceHub>,
    pub notification_service: Arc<NotificationService>,
    pub account_service: Arc<AccountService>,
    pub job_service: Arc<JobService>,
    pub custom_job_service: Arc<CustomJobService>,
    pub bookmark_service: Arc<BookmarkService>,
    pub review_service: Arc<ReviewService>,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    pub fn new(env: Config, db_client: DBClient) -> Self {
        let db_client = Arc::new(db_client);
        let presence = Arc::new(PresenceHub::new());
        let notification_service =
            Arc::new(NotificationService::new(db_client.clone(), presence.clone()));

        AppState {
            account_service: Arc::new(AccountService::new(db_client.clone())),
            job_service: Arc::new(JobService::new(
                db_client.clone(),
                notification_service.clone(),
            )),
            custom_job_service: Arc::new(CustomJobService::new(
                db_client.clone(),
                notification_service.clone(),
            )),
            bookmark_service: Arc::new(BookmarkService::new(db_client.clone())),
            review_service: Arc::new(ReviewService::new(
                db_client.clone(),
                notification_service.clone(),
            )),
            chat_service: Arc::new(ChatService::new(
                db_client.clone(),
                presence.clone(),
                notification_service.clone(),
            )),
            notification_service,
            presence,
            db_client,
            env,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::init();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let db_client =
        match DBClient::connect(&config.database_url, config.database_max_connections).await {
            Ok(db_client) => {
                tracing::info!("✅ Connection to the database is successful!");
                db_client
            }
            Err(err) => {
                tracing::error!("🔥 Failed to connect to the database: {:?}", err);
                std::process::exit(1);
            }
        };

    if let Err(err) = db_client.migrate().await {
        tracing::error!("🔥 Failed to run database migrations: {:?}", err);
        std::process::exit(1);
    }

    let allowed_origin = match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(err) => {
            tracing::error!("🔥 Invalid ALLOWED_ORIGIN {:?}: {}", config.allowed_origin, err);
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(allowed_origin))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT]);

    let app_state = Arc::new(AppState::new(config.clone(), db_client));
    let app = create_router(app_state).layer(cors);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind port {}: {}", config.port, err);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Server is running on http://localhost:{}", config.port);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("🔥 Server error: {}", err);
    }
}

#[cfg(test)]
pub async fn test_state() -> Arc<AppState> {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        allowed_origin: "http://localhost:3000".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_maxage: 60,
        port: 5000,
        log_level: tracing_subscriber::filter::LevelFilter::OFF,
    };

    Arc::new(AppState::new(config, db::db::test_client().await))
}
