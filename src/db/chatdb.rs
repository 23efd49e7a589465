// db/chatdb.rs
use async_trait::async_trait;
use chrono::Utc;

use super::db::DBClient;
use crate::models::chatmodels::Message;

#[async_trait]
pub trait ChatExt {
    async fn save_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        job_id: Option<i64>,
        content: &str,
    ) -> Result<Message, sqlx::Error>;

    /// Both directions between two users, oldest first.
    async fn get_conversation(
        &self,
        user_id: i64,
        other_user_id: i64,
    ) -> Result<Vec<Message>, sqlx::Error>;

    async fn mark_message_read(&self, message_id: i64) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn save_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        job_id: Option<i64>,
        content: &str,
    ) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, job_id, content, created_at, is_read)
            VALUES (?, ?, ?, ?, ?, 0)
            RETURNING id, sender_id, receiver_id, job_id, content, created_at, is_read
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(job_id)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_conversation(
        &self,
        user_id: i64,
        other_user_id: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, receiver_id, job_id, content, created_at, is_read
            FROM messages
            WHERE (sender_id = ?1 AND receiver_id = ?2)
               OR (sender_id = ?2 AND receiver_id = ?1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(other_user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_message_read(&self, message_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE messages SET is_read = 1 WHERE id = ?")
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
