pub mod account_service;
pub mod bookmark_service;
pub mod chat_service;
pub mod custom_job_service;
pub mod error;
pub mod job_service;
pub mod notification_service;
pub mod review_service;
