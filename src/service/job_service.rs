// service/job_service.rs
use std::sync::Arc;

use crate::{
    db::{
        db::DBClient,
        jobdb::{JobExt, Transition},
        userdb::UserExt,
    },
    dtos::jobdtos::{CreateBidDto, CreateJobDto, JobWithBidsDto},
    models::{
        jobmodel::{Bid, BidStatus, CompletedJob, Job, JobStatus, OngoingJob},
        usermodel::UserRole,
    },
    service::{error::ServiceError, notification_service::NotificationService},
};

#[derive(Debug, Clone)]
pub struct JobService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl JobService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn post_job(&self, body: CreateJobDto) -> Result<Job, ServiceError> {
        let (Some(title), Some(description), Some(budget), Some(client_id)) = (
            body.title.filter(|t| !t.trim().is_empty()),
            body.description.filter(|d| !d.trim().is_empty()),
            body.budget,
            body.client_id,
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
            return Err(ServiceError::Forbidden("Only clients can post jobs!"));
        }

        let job = self
            .db_client
            .create_job(title.trim(), description.trim(), budget, client.id)
            .await?;

        tracing::info!("job {} posted by client {}", job.id, client.id);

        self.notification_service
            .notify_all_freelancers("new_job", &format!("New job posted: {}", job.title))
            .await;

        Ok(job)
    }

    pub async fn submit_bid(&self, body: CreateBidDto) -> Result<Bid, ServiceError> {
        let bid_amount = body.bid_amount.unwrap_or_default();
        if bid_amount <= 0.0 {
            return Err(ServiceError::InvalidBidAmount);
        }

        let (Some(job_id), Some(freelancer_id)) = (body.job_id, body.freelancer_id) else {
            return Err(ServiceError::MissingFields("Missing required fields!"));
        };

        let freelancer = self
            .db_client
            .get_user(Some(freelancer_id), None)
            .await?
            .ok_or(ServiceError::InvalidFreelancer)?;

        if freelancer.role != UserRole::Freelancer {
            return Err(ServiceError::Forbidden("Only freelancers can submit bids!"));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::InvalidJob)?;

        if job.status != JobStatus::Open {
            return Err(ServiceError::JobNotOpen);
        }

        let proposal = body.proposal.unwrap_or_default();
        let bid = self
            .db_client
            .create_bid(job.id, freelancer.id, bid_amount, proposal.trim())
            .await?;

        tracing::info!("bid {} submitted on job {} by {}", bid.id, job.id, freelancer.id);

        self.notification_service
            .notify_quietly(
                job.client_id,
                "bid_submitted",
                &format!("{} submitted a bid on \"{}\"", freelancer.name, job.title),
            )
            .await;

        Ok(bid)
    }

    pub async fn approve_proposal(&self, bid_id: i64) -> Result<Bid, ServiceError> {
        let bid = self
            .db_client
            .get_bid_by_id(bid_id)
            .await?
            .ok_or(ServiceError::ProposalNotFound)?;

        if bid.status != BidStatus::Pending {
            return Err(ServiceError::AlreadyProcessed);
        }

        match self.db_client.approve_bid(bid.id, bid.job_id).await? {
            Transition::Applied => {}
            Transition::StaleBid => return Err(ServiceError::AlreadyProcessed),
            Transition::StaleJob => return Err(ServiceError::JobNotOpen),
        }

        tracing::info!("bid {} approved, job {} closed", bid.id, bid.job_id);

        let title = self.job_title(bid.job_id).await;
        self.notification_service
            .notify_quietly(
                bid.freelancer_id,
                "bid_approved",
                &format!("Your bid on \"{}\" was approved", title),
            )
            .await;

        Ok(Bid {
            status: BidStatus::Approved,
            ..bid
        })
    }

    pub async fn complete_job(&self, job_id: i64) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::InvalidJob)?;

        let bid = self
            .db_client
            .get_approved_bid(job.id)
            .await?
            .ok_or(ServiceError::NoApprovedBid)?;

        match self.db_client.complete_job(job.id).await? {
            Transition::Applied => {}
            Transition::StaleBid | Transition::StaleJob => return Err(ServiceError::NoApprovedBid),
        }

        tracing::info!("job {} completed by freelancer {}", job.id, bid.freelancer_id);

        let message = format!("Job \"{}\" has been marked as completed", job.title);
        self.notification_service
            .notify_quietly(job.client_id, "job_completed", &message)
            .await;
        self.notification_service
            .notify_quietly(bid.freelancer_id, "job_completed", &message)
            .await;

        Ok(Job {
            status: JobStatus::Completed,
            ..job
        })
    }

    pub async fn list_open_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.db_client.get_open_jobs().await?)
    }

    pub async fn get_job_with_bids(&self, job_id: i64) -> Result<JobWithBidsDto, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound)?;
        let bids = self.db_client.get_job_bids(job.id).await?;

        Ok(JobWithBidsDto { job, bids })
    }

    pub async fn list_client_open_jobs(
        &self,
        client_id: Option<i64>,
    ) -> Result<Vec<Job>, ServiceError> {
        let client_id = client_id.ok_or(ServiceError::MissingFields("Client ID is required!"))?;
        Ok(self.db_client.get_client_open_jobs(client_id).await?)
    }

    pub async fn list_proposals(&self, job_id: Option<i64>) -> Result<Vec<Bid>, ServiceError> {
        let job_id = job_id.ok_or(ServiceError::MissingFields("Job ID is required!"))?;
        Ok(self.db_client.get_job_bids(job_id).await?)
    }

    pub async fn list_ongoing_jobs(
        &self,
        client_id: Option<i64>,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<OngoingJob>, ServiceError> {
        // A client filter wins over a freelancer filter.
        let freelancer_id = if client_id.is_some() { None } else { freelancer_id };
        Ok(self.db_client.get_ongoing_jobs(client_id, freelancer_id).await?)
    }

    pub async fn list_completed_jobs(
        &self,
        client_id: Option<i64>,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<CompletedJob>, ServiceError> {
        Ok(self
            .db_client
            .get_completed_jobs(client_id, freelancer_id)
            .await?)
    }

    async fn job_title(&self, job_id: i64) -> String {
        match self.db_client.get_job_by_id(job_id).await {
            Ok(Some(job)) => job.title,
            _ => format!("job #{}", job_id),
        }
    }
}
