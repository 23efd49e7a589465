// service/review_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, jobdb::JobExt, reviewdb::ReviewExt, userdb::UserExt},
    dtos::jobdtos::CreateReviewDto,
    models::jobmodel::{GivenReview, JobStatus, ReceivedReview, Review},
    service::{
        error::{is_unique_violation, ServiceError},
        notification_service::NotificationService,
    },
};

#[derive(Debug, Clone)]
pub struct ReviewService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl ReviewService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn submit(&self, body: CreateReviewDto) -> Result<Review, ServiceError> {
        let (Some(reviewer_id), Some(reviewed_id), Some(job_id), Some(rating)) =
            (body.reviewer_id, body.reviewed_id, body.job_id, body.rating)
        else {
            return Err(ServiceError::MissingFields("Missing required fields!"));
        };

        if !(1..=5).contains(&rating) {
            return Err(ServiceError::InvalidRating);
        }

        let reviewer = self
            .db_client
            .get_user(Some(reviewer_id), None)
            .await?
            .ok_or(ServiceError::InvalidReviewer)?;

        let reviewed = self
            .db_client
            .get_user(Some(reviewed_id), None)
            .await?
            .ok_or(ServiceError::InvalidReviewed)?;

        if reviewer.id == reviewed.id {
            return Err(ServiceError::SelfReview);
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::InvalidJob)?;

        if job.status != JobStatus::Completed {
            return Err(ServiceError::JobNotCompleted);
        }

        // The two parties are the job's client and the freelancer on its completed bid.
        let freelancer_id = self
            .db_client
            .get_completed_bid(job.id)
            .await?
            .map(|bid| bid.freelancer_id);
        let is_party = |user_id: i64| user_id == job.client_id || Some(user_id) == freelancer_id;

        if !is_party(reviewer.id) || !is_party(reviewed.id) {
            return Err(ServiceError::Forbidden(
                "Only the client and freelancer on this job can review each other!",
            ));
        }

        if self.db_client.has_reviewed(reviewer.id, job.id).await? {
            return Err(ServiceError::AlreadyReviewed);
        }

        let comment = body.comment.unwrap_or_default();
        let review = self
            .db_client
            .create_review(reviewer.id, reviewed.id, job.id, rating, comment.trim())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::AlreadyReviewed
                } else {
                    ServiceError::Database(e)
                }
            })?;

        self.notification_service
            .notify_quietly(
                reviewed.id,
                "new_review",
                &format!("You received a {}-star review for \"{}\"", rating, job.title),
            )
            .await;

        Ok(review)
    }

    pub async fn received(&self, user_id: i64) -> Result<Vec<ReceivedReview>, ServiceError> {
        Ok(self.db_client.get_reviews_received(user_id).await?)
    }

    pub async fn given(&self, user_id: i64) -> Result<Vec<GivenReview>, ServiceError> {
        Ok(self.db_client.get_reviews_given(user_id).await?)
    }
}
