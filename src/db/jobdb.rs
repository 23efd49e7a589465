// db/jobdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::jobmodel::{Bid, CompletedJob, Job, OngoingJob};

/// Outcome of a guarded status change on a bid and its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    StaleBid,
    StaleJob,
}

const BID_COLUMNS: &str = r#"
    b.id, b.job_id, b.freelancer_id, u.name AS freelancer_name,
    b.bid_amount, b.proposal, b.status
"#;

#[async_trait]
pub trait JobExt {
    async fn create_job(
        &self,
        title: &str,
        description: &str,
        budget: f64,
        client_id: i64,
    ) -> Result<Job, sqlx::Error>;

    async fn get_job_by_id(&self, job_id: i64) -> Result<Option<Job>, sqlx::Error>;

    async fn get_open_jobs(&self) -> Result<Vec<Job>, sqlx::Error>;

    async fn get_client_open_jobs(&self, client_id: i64) -> Result<Vec<Job>, sqlx::Error>;

    async fn get_job_bids(&self, job_id: i64) -> Result<Vec<Bid>, sqlx::Error>;

    async fn create_bid(
        &self,
        job_id: i64,
        freelancer_id: i64,
        bid_amount: f64,
        proposal: &str,
    ) -> Result<Bid, sqlx::Error>;

    async fn get_bid_by_id(&self, bid_id: i64) -> Result<Option<Bid>, sqlx::Error>;

    async fn get_approved_bid(&self, job_id: i64) -> Result<Option<Bid>, sqlx::Error>;

    async fn get_completed_bid(&self, job_id: i64) -> Result<Option<Bid>, sqlx::Error>;

    async fn approve_bid(&self, bid_id: i64, job_id: i64) -> Result<Transition, sqlx::Error>;

    async fn complete_job(&self, job_id: i64) -> Result<Transition, sqlx::Error>;

    async fn get_ongoing_jobs(
        &self,
        client_id: Option<i64>,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<OngoingJob>, sqlx::Error>;

    async fn get_completed_jobs(
        &self,
        client_id: Option<i64>,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<CompletedJob>, sqlx::Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        title: &str,
        description: &str,
        budget: f64,
        client_id: i64,
    ) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, description, budget, client_id, status)
            VALUES (?, ?, ?, ?, 'Open')
            RETURNING id, title, description, budget, client_id, status
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(budget)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: i64) -> Result<Option<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            "SELECT id, title, description, budget, client_id, status FROM jobs WHERE id = ?",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_open_jobs(&self) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, description, budget, client_id, status
            FROM jobs
            WHERE status = 'Open'
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_client_open_jobs(&self, client_id: i64) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, description, budget, client_id, status
            FROM jobs
            WHERE client_id = ? AND status = 'Open'
            ORDER BY id DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_job_bids(&self, job_id: i64) -> Result<Vec<Bid>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {BID_COLUMNS}
            FROM bids b
            JOIN users u ON u.id = b.freelancer_id
            WHERE b.job_id = ?
            ORDER BY b.id ASC
            "#
        );

        sqlx::query_as::<_, Bid>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn create_bid(
        &self,
        job_id: i64,
        freelancer_id: i64,
        bid_amount: f64,
        proposal: &str,
    ) -> Result<Bid, sqlx::Error> {
        let bid_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bids (job_id, freelancer_id, bid_amount, proposal, status)
            VALUES (?, ?, ?, ?, 'Pending')
            RETURNING id
            "#,
        )
        .bind(job_id)
        .bind(freelancer_id)
        .bind(bid_amount)
        .bind(proposal)
        .fetch_one(&self.pool)
        .await?;

        self.get_bid_by_id(bid_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn get_bid_by_id(&self, bid_id: i64) -> Result<Option<Bid>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {BID_COLUMNS}
            FROM bids b
            JOIN users u ON u.id = b.freelancer_id
            WHERE b.id = ?
            "#
        );

        sqlx::query_as::<_, Bid>(&sql)
            .bind(bid_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_approved_bid(&self, job_id: i64) -> Result<Option<Bid>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {BID_COLUMNS}
            FROM bids b
            JOIN users u ON u.id = b.freelancer_id
            WHERE b.job_id = ? AND b.status = 'Approved'
            LIMIT 1
            "#
        );

        sqlx::query_as::<_, Bid>(&sql)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_completed_bid(&self, job_id: i64) -> Result<Option<Bid>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {BID_COLUMNS}
            FROM bids b
            JOIN users u ON u.id = b.freelancer_id
            WHERE b.job_id = ? AND b.status = 'Completed'
            LIMIT 1
            "#
        );

        sqlx::query_as::<_, Bid>(&sql)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn approve_bid(&self, bid_id: i64, job_id: i64) -> Result<Transition, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let bid = sqlx::query(
            "UPDATE bids SET status = 'Approved' WHERE id = ? AND status = 'Pending'",
        )
        .bind(bid_id)
        .execute(&mut *tx)
        .await?;

        if bid.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Transition::StaleBid);
        }

        let job = sqlx::query("UPDATE jobs SET status = 'Closed' WHERE id = ? AND status = 'Open'")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;

        if job.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Transition::StaleJob);
        }

        tx.commit().await?;
        Ok(Transition::Applied)
    }

    async fn complete_job(&self, job_id: i64) -> Result<Transition, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let bid = sqlx::query(
            "UPDATE bids SET status = 'Completed' WHERE job_id = ? AND status = 'Approved'",
        )
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

        if bid.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Transition::StaleBid);
        }

        let job = sqlx::query(
            "UPDATE jobs SET status = 'Completed' WHERE id = ? AND status = 'Closed'",
        )
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

        if job.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Transition::StaleJob);
        }

        tx.commit().await?;
        Ok(Transition::Applied)
    }

    async fn get_ongoing_jobs(
        &self,
        client_id: Option<i64>,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<OngoingJob>, sqlx::Error> {
        sqlx::query_as::<_, OngoingJob>(
            r#"
            SELECT j.id, j.title, j.description, j.budget, j.client_id,
                   b.freelancer_id, u.name AS freelancer_name, b.bid_amount, b.status
            FROM jobs j
            JOIN bids b ON b.job_id = j.id AND b.status = 'Approved'
            JOIN users u ON u.id = b.freelancer_id
            WHERE j.status = 'Closed'
              AND (?1 IS NULL OR j.client_id = ?1)
              AND (?2 IS NULL OR b.freelancer_id = ?2)
            ORDER BY j.id DESC
            "#,
        )
        .bind(client_id)
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_completed_jobs(
        &self,
        client_id: Option<i64>,
        freelancer_id: Option<i64>,
    ) -> Result<Vec<CompletedJob>, sqlx::Error> {
        sqlx::query_as::<_, CompletedJob>(
            r#"
            SELECT j.id, j.title, j.description, j.budget, j.client_id,
                   c.name AS client_name, b.freelancer_id, f.name AS freelancer_name,
                   b.bid_amount
            FROM jobs j
            JOIN bids b ON b.job_id = j.id AND b.status = 'Completed'
            JOIN users c ON c.id = j.client_id
            JOIN users f ON f.id = b.freelancer_id
            WHERE j.status = 'Completed'
              AND (?1 IS NULL OR j.client_id = ?1)
              AND (?2 IS NULL OR b.freelancer_id = ?2)
            ORDER BY j.id DESC
            "#,
        )
        .bind(client_id)
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }
}
