// service/error.rs
use thiserror::Error;

use crate::error::{ErrorMessage, HttpError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    Persistence,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Invalid role selected!")]
    InvalidRole,

    #[error("Invalid email format!")]
    InvalidEmailFormat,

    #[error("Password must be at least 6 characters!")]
    WeakPassword,

    #[error("Email already exists!")]
    DuplicateEmail,

    #[error("Error updating email! Email may already exist.")]
    EmailTaken,

    #[error("Invalid email or password!")]
    InvalidCredentials,

    #[error("User not found!")]
    UserNotFound,

    #[error("Budget must be greater than 0!")]
    InvalidBudget,

    #[error("Invalid client ID!")]
    InvalidClient,

    #[error("Invalid freelancer ID!")]
    InvalidFreelancer,

    #[error("Invalid job ID!")]
    InvalidJob,

    #[error("Job not found!")]
    JobNotFound,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Bid amount must be greater than 0!")]
    InvalidBidAmount,

    #[error("This job is no longer accepting bids!")]
    JobNotOpen,

    #[error("Proposal not found!")]
    ProposalNotFound,

    #[error("Proposal has already been processed!")]
    AlreadyProcessed,

    #[error("No approved bid found for this job!")]
    NoApprovedBid,

    #[error("Custom job not found or already processed!")]
    NotFoundOrProcessed,

    #[error("Rating must be between 1 and 5!")]
    InvalidRating,

    #[error("Reviews can only be submitted for completed jobs!")]
    JobNotCompleted,

    #[error("You have already reviewed this job!")]
    AlreadyReviewed,

    #[error("Invalid reviewer ID!")]
    InvalidReviewer,

    #[error("Invalid reviewed user ID!")]
    InvalidReviewed,

    #[error("You cannot review yourself!")]
    SelfReview,

    #[error("Invalid sender ID!")]
    InvalidSender,

    #[error("Invalid receiver ID!")]
    InvalidReceiver,

    #[error("Messaging is only allowed between clients and freelancers!")]
    SameRoleMessaging,

    #[error("Notification not found!")]
    NotificationNotFound,

    #[error("Message not found!")]
    MessageNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::MissingFields(_)
            | ServiceError::InvalidRole
            | ServiceError::InvalidEmailFormat
            | ServiceError::WeakPassword
            | ServiceError::InvalidBudget
            | ServiceError::InvalidClient
            | ServiceError::InvalidFreelancer
            | ServiceError::InvalidJob
            | ServiceError::InvalidBidAmount
            | ServiceError::JobNotOpen
            | ServiceError::NoApprovedBid
            | ServiceError::InvalidRating
            | ServiceError::JobNotCompleted
            | ServiceError::InvalidReviewer
            | ServiceError::InvalidReviewed
            | ServiceError::SelfReview
            | ServiceError::InvalidSender
            | ServiceError::InvalidReceiver
            | ServiceError::SameRoleMessaging
            | ServiceError::Validation(_) => ErrorKind::Validation,

            ServiceError::InvalidCredentials => ErrorKind::Authentication,

            ServiceError::Forbidden(_) => ErrorKind::Authorization,

            ServiceError::UserNotFound
            | ServiceError::JobNotFound
            | ServiceError::ProposalNotFound
            | ServiceError::NotFoundOrProcessed
            | ServiceError::NotificationNotFound
            | ServiceError::MessageNotFound => ErrorKind::NotFound,

            ServiceError::DuplicateEmail
            | ServiceError::EmailTaken
            | ServiceError::AlreadyProcessed
            | ServiceError::AlreadyReviewed => ErrorKind::Conflict,

            ServiceError::Database(_) | ServiceError::Internal(_) => ErrorKind::Persistence,
        }
    }

    /// Maps to an `HttpError`, hiding persistence causes behind `fallback`.
    pub fn into_http_with(self, fallback: &str) -> HttpError {
        let message = self.to_string();
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => HttpError::bad_request(message),
            ErrorKind::Authentication => HttpError::unauthorized(message),
            ErrorKind::Authorization => HttpError::forbidden(message),
            ErrorKind::NotFound => HttpError::not_found(message),
            ErrorKind::Persistence => {
                tracing::error!("{}", message);
                HttpError::server_error(fallback)
            }
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        error.into_http_with(&ErrorMessage::ServerError.to_string())
    }
}

impl From<ErrorMessage> for ServiceError {
    fn from(err: ErrorMessage) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            HttpError::from(ServiceError::InvalidRole).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HttpError::from(ServiceError::InvalidCredentials).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            HttpError::from(ServiceError::Forbidden("Only clients can post jobs!")).status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            HttpError::from(ServiceError::ProposalNotFound).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HttpError::from(ServiceError::DuplicateEmail).status,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_persistence_cause_is_hidden() {
        let err = ServiceError::Database(sqlx::Error::RowNotFound).into_http_with("Error fetching jobs!");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error fetching jobs!");
    }

    #[test]
    fn test_forbidden_carries_its_message() {
        let err = HttpError::from(ServiceError::Forbidden("Only freelancers can submit bids!"));
        assert_eq!(err.message, "Only freelancers can submit bids!");
    }
}
