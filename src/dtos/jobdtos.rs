// dtos/jobdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::de::opt_number_or_string;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateJobDto {
    #[validate(length(max = 200, message = "Title must not be more than 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description must not be more than 5000 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub client_id: Option<i64>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateBidDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub job_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub freelancer_id: Option<i64>,
    #[serde(default, rename = "bidAmount", deserialize_with = "opt_number_or_string")]
    pub bid_amount: Option<f64>,
    #[validate(length(max = 5000, message = "Proposal must not be more than 5000 characters"))]
    pub proposal: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateCustomJobDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub client_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub freelancer_id: Option<i64>,
    #[validate(length(max = 200, message = "Title must not be more than 200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description must not be more than 5000 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub budget: Option<f64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BookmarkDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub freelancer_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub job_id: Option<i64>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub reviewer_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub reviewed_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub job_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub rating: Option<i64>,
    #[validate(length(max = 2000, message = "Comment must not be more than 2000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClientQuery {
    pub client_id: Option<i64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FreelancerQuery {
    pub freelancer_id: Option<i64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct JobQuery {
    pub job_id: Option<i64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PartyQuery {
    pub client_id: Option<i64>,
    pub freelancer_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobWithBidsDto {
    #[serde(flatten)]
    pub job: crate::models::jobmodel::Job,
    pub bids: Vec<crate::models::jobmodel::Bid>,
}
