// service/custom_job_service.rs
use std::sync::Arc;

use crate::{
    db::{customjobdb::CustomJobExt, db::DBClient, userdb::UserExt},
    dtos::jobdtos::CreateCustomJobDto,
    models::{
        jobmodel::{CustomJob, CustomJobWithClient, Job},
        usermodel::UserRole,
    },
    service::{error::ServiceError, notification_service::NotificationService},
};

#[derive(Debug, Clone)]
pub struct CustomJobService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl CustomJobService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn submit(&self, body: CreateCustomJobDto) -> Result<CustomJob, ServiceError> {
        let (Some(client_id), Some(freelancer_id), Some(title), Some(description), Some(budget)) = (
            body.client_id,
            body.freelancer_id,
            body.title.filter(|t| !t.trim().is_empty()),
            body.description.filter(|d| !d.trim().is_empty()),
            body.budget,
        ) else {
            return Err(ServiceError::MissingFields("Missing required fields!"));
        };

        if budget <= 0.0 {
            return Err(ServiceError::InvalidBudget);
        }

        let client = self
            .db_client
            .get_user(Some(client_id), None)
            .await?
            .ok_or(ServiceError::InvalidClient)?;
        if client.role != UserRole::Client {
            return Err(ServiceError::Forbidden("Only clients can send custom jobs!"));
        }

        let freelancer = self
            .db_client
            .get_user(Some(freelancer_id), None)
            .await?
            .ok_or(ServiceError::InvalidFreelancer)?;
        if freelancer.role != UserRole::Freelancer {
            return Err(ServiceError::Forbidden(
                "Custom jobs can only be sent to freelancers!",
            ));
        }

        let offer = self
            .db_client
            .create_custom_job(
                client.id,
                freelancer.id,
                title.trim(),
                description.trim(),
                budget,
            )
            .await?;

        tracing::info!(
            "custom job {} sent from client {} to freelancer {}",
            offer.id,
            client.id,
            freelancer.id
        );

        self.notification_service
            .notify_quietly(
                freelancer.id,
                "custom_job",
                &format!("{} sent you a custom job: {}", client.name, offer.title),
            )
            .await;

        Ok(offer)
    }

    pub async fn approve(&self, custom_job_id: i64) -> Result<Job, ServiceError> {
        let (offer, job) = self
            .db_client
            .approve_custom_job(custom_job_id)
            .await?
            .ok_or(ServiceError::NotFoundOrProcessed)?;

        tracing::info!("custom job {} approved as job {}", offer.id, job.id);

        self.notification_service
            .notify_quietly(
                offer.client_id,
                "custom_job_approved",
                &format!("Your custom job \"{}\" was approved", offer.title),
            )
            .await;

        Ok(job)
    }

    pub async fn decline(&self, custom_job_id: i64) -> Result<CustomJob, ServiceError> {
        let offer = self
            .db_client
            .decline_custom_job(custom_job_id)
            .await?
            .ok_or(ServiceError::NotFoundOrProcessed)?;

        tracing::info!("custom job {} declined", offer.id);

        self.notification_service
            .notify_quietly(
                offer.client_id,
                "custom_job_declined",
                &format!("Your custom job \"{}\" was declined", offer.title),
            )
            .await;

        Ok(offer)
    }

    pub async fn list_for_freelancer(
        &self,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<CustomJobWithClient>, ServiceError> {
        let freelancer_id =
            freelancer_id.ok_or(ServiceError::MissingFields("Freelancer ID is required!"))?;
        Ok(self.db_client.get_pending_custom_jobs(freelancer_id).await?)
    }
}
