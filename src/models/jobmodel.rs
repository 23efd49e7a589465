// models/jobmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "PascalCase")]
pub enum JobStatus {
    Open,
    Closed,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "PascalCase")]
pub enum BidStatus {
    Pending,
    Approved,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "PascalCase")]
pub enum CustomJobStatus {
    Pending,
    Approved,
    Declined,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub client_id: i64,
    pub status: JobStatus,
}

/// A bid row joined with the bidder's current display name.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Bid {
    pub id: i64,
    pub job_id: i64,
    pub freelancer_id: i64,
    #[serde(rename = "freelancerName")]
    pub freelancer_name: String,
    #[serde(rename = "bidAmount")]
    pub bid_amount: f64,
    pub proposal: String,
    pub status: BidStatus,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct CustomJob {
    pub id: i64,
    pub client_id: i64,
    pub freelancer_id: i64,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub status: CustomJobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct CustomJobWithClient {
    pub id: i64,
    pub client_id: i64,
    pub freelancer_id: i64,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub status: CustomJobStatus,
    #[serde(rename = "clientName")]
    pub client_name: String,
    pub created_at: DateTime<Utc>,
}

/// Job plus the approved bid currently working on it.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct OngoingJob {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub client_id: i64,
    pub freelancer_id: i64,
    #[serde(rename = "freelancerName")]
    pub freelancer_name: String,
    #[serde(rename = "bidAmount")]
    pub bid_amount: f64,
    pub status: BidStatus,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct CompletedJob {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub client_id: i64,
    #[serde(rename = "clientName")]
    pub client_name: String,
    pub freelancer_id: i64,
    #[serde(rename = "freelancerName")]
    pub freelancer_name: String,
    #[serde(rename = "bidAmount")]
    pub bid_amount: f64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: i64,
    pub reviewer_id: i64,
    pub reviewed_id: i64,
    pub job_id: i64,
    pub rating: i64,
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ReceivedReview {
    pub id: i64,
    pub rating: i64,
    pub comment: String,
    #[serde(rename = "reviewerName")]
    pub reviewer_name: String,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "jobDescription")]
    pub job_description: String,
    #[serde(rename = "jobAmount")]
    pub job_amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct GivenReview {
    pub id: i64,
    pub rating: i64,
    pub comment: String,
    pub job_id: i64,
    pub reviewed_id: i64,
    #[serde(rename = "reviewedName")]
    pub reviewed_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkToggle {
    Added,
    Removed,
}
