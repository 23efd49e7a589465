// db/bookmarkdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::jobmodel::{BookmarkToggle, Job};

#[async_trait]
pub trait BookmarkExt {
    /// Delete-first toggle. A lost insert race counts as already bookmarked.
    async fn toggle_bookmark(
        &self,
        freelancer_id: i64,
        job_id: i64,
    ) -> Result<BookmarkToggle, sqlx::Error>;

    async fn get_bookmarked_jobs(&self, freelancer_id: i64) -> Result<Vec<Job>, sqlx::Error>;
}

#[async_trait]
impl BookmarkExt for DBClient {
    async fn toggle_bookmark(
        &self,
        freelancer_id: i64,
        job_id: i64,
    ) -> Result<BookmarkToggle, sqlx::Error> {
        let removed = sqlx::query("DELETE FROM bookmarks WHERE freelancer_id = ? AND job_id = ?")
            .bind(freelancer_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;

        if removed.rows_affected() > 0 {
            return Ok(BookmarkToggle::Removed);
        }

        sqlx::query(
            r#"
            INSERT INTO bookmarks (freelancer_id, job_id)
            VALUES (?, ?)
            ON CONFLICT (freelancer_id, job_id) DO NOTHING
            "#,
        )
        .bind(freelancer_id)
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(BookmarkToggle::Added)
    }

    async fn get_bookmarked_jobs(&self, freelancer_id: i64) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT j.id, j.title, j.description, j.budget, j.client_id, j.status
            FROM bookmarks bm
            JOIN jobs j ON j.id = bm.job_id
            WHERE bm.freelancer_id = ?
            ORDER BY bm.id DESC
            "#,
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }
}
