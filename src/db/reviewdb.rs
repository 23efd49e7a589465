// db/reviewdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::jobmodel::{GivenReview, ReceivedReview, Review};

#[async_trait]
pub trait ReviewExt {
    async fn create_review(
        &self,
        reviewer_id: i64,
        reviewed_id: i64,
        job_id: i64,
        rating: i64,
        comment: &str,
    ) -> Result<Review, sqlx::Error>;

    async fn has_reviewed(&self, reviewer_id: i64, job_id: i64) -> Result<bool, sqlx::Error>;

    async fn get_reviews_received(&self, user_id: i64) -> Result<Vec<ReceivedReview>, sqlx::Error>;

    async fn get_reviews_given(&self, user_id: i64) -> Result<Vec<GivenReview>, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(
        &self,
        reviewer_id: i64,
        reviewed_id: i64,
        job_id: i64,
        rating: i64,
        comment: &str,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (reviewer_id, reviewed_id, job_id, rating, comment)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, reviewer_id, reviewed_id, job_id, rating, comment
            "#,
        )
        .bind(reviewer_id)
        .bind(reviewed_id)
        .bind(job_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn has_reviewed(&self, reviewer_id: i64, job_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE reviewer_id = ? AND job_id = ?)",
        )
        .bind(reviewer_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_reviews_received(&self, user_id: i64) -> Result<Vec<ReceivedReview>, sqlx::Error> {
        sqlx::query_as::<_, ReceivedReview>(
            r#"
            SELECT r.id, r.rating, r.comment,
                   u.name AS reviewer_name,
                   j.title AS job_title,
                   j.description AS job_description,
                   (SELECT b.bid_amount FROM bids b
                     WHERE b.job_id = r.job_id AND b.status = 'Completed'
                     LIMIT 1) AS job_amount
            FROM reviews r
            JOIN users u ON u.id = r.reviewer_id
            JOIN jobs j ON j.id = r.job_id
            WHERE r.reviewed_id = ?
            ORDER BY r.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reviews_given(&self, user_id: i64) -> Result<Vec<GivenReview>, sqlx::Error> {
        sqlx::query_as::<_, GivenReview>(
            r#"
            SELECT r.id, r.rating, r.comment, r.job_id, r.reviewed_id,
                   u.name AS reviewed_name
            FROM reviews r
            JOIN users u ON u.id = r.reviewed_id
            WHERE r.reviewer_id = ?
            ORDER BY r.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
