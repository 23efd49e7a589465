// models/usermodel.rs
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Freelancer,
    Client,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Freelancer => "freelancer",
            UserRole::Client => "client",
        }
    }

    /// Parses the role names accepted at signup. Anything else is rejected.
    pub fn parse(value: &str) -> Option<UserRole> {
        match value {
            "freelancer" => Some(UserRole::Freelancer),
            "client" => Some(UserRole::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
    pub skills: Option<String>,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct FreelancerSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct FreelancerStats {
    #[serde(rename = "completedJobs")]
    pub completed_jobs: i64,
    #[serde(rename = "ongoingJobs")]
    pub ongoing_jobs: i64,
    #[serde(skip)]
    pub average_rating: Option<f64>,
    #[serde(rename = "totalEarnings")]
    pub total_earnings: f64,
}
