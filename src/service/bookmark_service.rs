// service/bookmark_service.rs
use std::sync::Arc;

use crate::{
    db::{bookmarkdb::BookmarkExt, db::DBClient, jobdb::JobExt, userdb::UserExt},
    dtos::jobdtos::BookmarkDto,
    models::{
        jobmodel::{BookmarkToggle, Job},
        usermodel::UserRole,
    },
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct BookmarkService {
    db_client: Arc<DBClient>,
}

impl BookmarkService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn toggle(&self, body: BookmarkDto) -> Result<BookmarkToggle, ServiceError> {
        let (Some(freelancer_id), Some(job_id)) = (body.freelancer_id, body.job_id) else {
            return Err(ServiceError::MissingFields(
                "Freelancer ID and Job ID are required!",
            ));
        };

        let freelancer = self
            .db_client
            .get_user(Some(freelancer_id), None)
            .await?
            .ok_or(ServiceError::InvalidFreelancer)?;
        if freelancer.role != UserRole::Freelancer {
            return Err(ServiceError::Forbidden("Only freelancers can bookmark jobs!"));
        }

        self.db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::InvalidJob)?;

        let outcome = self.db_client.toggle_bookmark(freelancer.id, job_id).await?;
        tracing::debug!("bookmark {:?} for freelancer {} on job {}", outcome, freelancer.id, job_id);

        Ok(outcome)
    }

    pub async fn list(&self, freelancer_id: Option<i64>) -> Result<Vec<Job>, ServiceError> {
        let freelancer_id =
            freelancer_id.ok_or(ServiceError::MissingFields("Freelancer ID is required!"))?;
        Ok(self.db_client.get_bookmarked_jobs(freelancer_id).await?)
    }
}
