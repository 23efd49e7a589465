pub mod auth;
pub mod bookmarks;
pub mod custom_jobs;
pub mod jobs;
pub mod messages;
pub mod notifications;
pub mod reviews;
pub mod users;
