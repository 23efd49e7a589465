// db/customjobdb.rs
use async_trait::async_trait;
use chrono::Utc;

use super::db::DBClient;
use crate::models::jobmodel::{CustomJob, CustomJobWithClient, Job};

#[async_trait]
pub trait CustomJobExt {
    async fn create_custom_job(
        &self,
        client_id: i64,
        freelancer_id: i64,
        title: &str,
        description: &str,
        budget: f64,
    ) -> Result<CustomJob, sqlx::Error>;

    async fn get_pending_custom_jobs(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<CustomJobWithClient>, sqlx::Error>;

    /// Turns a pending offer into a closed job with an approved bid.
    /// `None` when the offer is missing or no longer pending.
    async fn approve_custom_job(
        &self,
        custom_job_id: i64,
    ) -> Result<Option<(CustomJob, Job)>, sqlx::Error>;

    async fn decline_custom_job(&self, custom_job_id: i64)
        -> Result<Option<CustomJob>, sqlx::Error>;
}

#[async_trait]
impl CustomJobExt for DBClient {
    async fn create_custom_job(
        &self,
        client_id: i64,
        freelancer_id: i64,
        title: &str,
        description: &str,
        budget: f64,
    ) -> Result<CustomJob, sqlx::Error> {
        sqlx::query_as::<_, CustomJob>(
            r#"
            INSERT INTO custom_jobs (client_id, freelancer_id, title, description, budget, status, created_at)
            VALUES (?, ?, ?, ?, ?, 'Pending', ?)
            RETURNING id, client_id, freelancer_id, title, description, budget, status, created_at
            "#,
        )
        .bind(client_id)
        .bind(freelancer_id)
        .bind(title)
        .bind(description)
        .bind(budget)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_pending_custom_jobs(
        &self,
        freelancer_id: i64,
    ) -> Result<Vec<CustomJobWithClient>, sqlx::Error> {
        sqlx::query_as::<_, CustomJobWithClient>(
            r#"
            SELECT cj.id, cj.client_id, cj.freelancer_id, cj.title, cj.description,
                   cj.budget, cj.status, u.name AS client_name, cj.created_at
            FROM custom_jobs cj
            JOIN users u ON u.id = cj.client_id
            WHERE cj.freelancer_id = ? AND cj.status = 'Pending'
            ORDER BY cj.created_at DESC, cj.id DESC
            "#,
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn approve_custom_job(
        &self,
        custom_job_id: i64,
    ) -> Result<Option<(CustomJob, Job)>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let offer = sqlx::query_as::<_, CustomJob>(
            r#"
            UPDATE custom_jobs
            SET status = 'Approved'
            WHERE id = ? AND status = 'Pending'
            RETURNING id, client_id, freelancer_id, title, description, budget, status, created_at
            "#,
        )
        .bind(custom_job_id)
        .fetch_optional(&mut *tx)
        .await?;

        let offer = match offer {
            Some(offer) => offer,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, description, budget, client_id, status)
            VALUES (?, ?, ?, ?, 'Closed')
            RETURNING id, title, description, budget, client_id, status
            "#,
        )
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(offer.budget)
        .bind(offer.client_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO bids (job_id, freelancer_id, bid_amount, proposal, status)
            VALUES (?, ?, ?, ?, 'Approved')
            "#,
        )
        .bind(job.id)
        .bind(offer.freelancer_id)
        .bind(offer.budget)
        .bind(&offer.description)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((offer, job)))
    }

    async fn decline_custom_job(
        &self,
        custom_job_id: i64,
    ) -> Result<Option<CustomJob>, sqlx::Error> {
        sqlx::query_as::<_, CustomJob>(
            r#"
            UPDATE custom_jobs
            SET status = 'Declined'
            WHERE id = ? AND status = 'Pending'
            RETURNING id, client_id, freelancer_id, title, description, budget, status, created_at
            "#,
        )
        .bind(custom_job_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::test_client;
    use crate::db::jobdb::JobExt;
    use crate::db::userdb::UserExt;
    use crate::models::jobmodel::{BidStatus, CustomJobStatus, JobStatus};
    use crate::models::usermodel::UserRole;

    async fn seed(db: &DBClient) -> (i64, i64) {
        let client = db
            .save_user("Carol", "carol@example.com", "hash", UserRole::Client)
            .await
            .unwrap();
        let freelancer = db
            .save_user("Frank", "frank@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();
        (client.id, freelancer.id)
    }

    #[tokio::test]
    async fn test_approve_creates_closed_job_with_approved_bid() {
        let db = test_client().await;
        let (client_id, freelancer_id) = seed(&db).await;
        let offer = db
            .create_custom_job(client_id, freelancer_id, "Site", "Build a site", 900.0)
            .await
            .unwrap();

        let pending = db.get_pending_custom_jobs(freelancer_id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].client_name, "Carol");

        let (approved, job) = db.approve_custom_job(offer.id).await.unwrap().unwrap();
        assert_eq!(approved.status, CustomJobStatus::Approved);
        assert_eq!(job.status, JobStatus::Closed);
        assert_eq!(job.budget, 900.0);

        let bid = db.get_approved_bid(job.id).await.unwrap().unwrap();
        assert_eq!(bid.freelancer_id, freelancer_id);
        assert_eq!(bid.bid_amount, 900.0);
        assert_eq!(bid.proposal, "Build a site");
        assert_eq!(bid.status, BidStatus::Approved);

        assert!(db.get_pending_custom_jobs(freelancer_id).await.unwrap().is_empty());
        assert!(db.approve_custom_job(offer.id).await.unwrap().is_none());
        assert!(db.decline_custom_job(offer.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_decline_only_once() {
        let db = test_client().await;
        let (client_id, freelancer_id) = seed(&db).await;
        let offer = db
            .create_custom_job(client_id, freelancer_id, "Site", "Build a site", 900.0)
            .await
            .unwrap();

        let declined = db.decline_custom_job(offer.id).await.unwrap().unwrap();
        assert_eq!(declined.status, CustomJobStatus::Declined);
        assert!(db.decline_custom_job(offer.id).await.unwrap().is_none());
        assert!(db.approve_custom_job(offer.id).await.unwrap().is_none());
        assert!(db.get_open_jobs().await.unwrap().is_empty());
    }
}
