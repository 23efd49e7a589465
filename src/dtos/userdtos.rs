// dtos/userdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::de::opt_number_or_string;
use crate::models::usermodel::{FreelancerStats, User};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SignupDto {
    #[validate(length(max = 100, message = "Name must not be more than 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 254, message = "Email must not be more than 254 characters"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(max = 254, message = "Email must not be more than 254 characters"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FreelancerSearchQuery {
    pub name: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub user_id: Option<i64>,
    #[validate(length(max = 500, message = "Skills must not be more than 500 characters"))]
    pub skills: Option<String>,
    #[serde(rename = "companyName")]
    #[validate(length(max = 200, message = "Company name must not be more than 200 characters"))]
    pub company_name: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateEmailDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub user_id: Option<i64>,
    #[validate(length(max = 254, message = "Email must not be more than 254 characters"))]
    pub email: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub user_id: Option<i64>,
    pub password: Option<String>,
}

/// The user projection handed to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterUserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreelancerStatsDto {
    #[serde(rename = "completedJobs")]
    pub completed_jobs: i64,
    #[serde(rename = "ongoingJobs")]
    pub ongoing_jobs: i64,
    /// One decimal, or "N/A" without reviews.
    #[serde(rename = "averageRating")]
    pub average_rating: String,
    #[serde(rename = "totalEarnings")]
    pub total_earnings: f64,
}

impl From<FreelancerStats> for FreelancerStatsDto {
    fn from(stats: FreelancerStats) -> Self {
        FreelancerStatsDto {
            completed_jobs: stats.completed_jobs,
            ongoing_jobs: stats.ongoing_jobs,
            average_rating: stats
                .average_rating
                .map(|avg| format!("{:.1}", avg))
                .unwrap_or_else(|| "N/A".to_string()),
            total_earnings: stats.total_earnings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub skills: Option<String>,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub stats: Option<FreelancerStatsDto>,
}

impl ProfileDto {
    pub fn new(user: &User, stats: Option<FreelancerStats>) -> Self {
        ProfileDto {
            id: user.id,
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            skills: user.skills.clone(),
            company_name: user.company_name.clone(),
            stats: stats.map(FreelancerStatsDto::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub message: String,
    pub user: FilterUserDto,
    pub token: String,
}
