// db/notificationdb.rs
use async_trait::async_trait;
use chrono::Utc;

use super::db::DBClient;
use crate::models::chatmodels::Notification;

#[async_trait]
pub trait NotificationExt {
    async fn create_notification(
        &self,
        user_id: i64,
        notification_type: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error>;

    async fn get_user_notifications(&self, user_id: i64)
        -> Result<Vec<Notification>, sqlx::Error>;

    async fn mark_notification_read(&self, notification_id: i64) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn create_notification(
        &self,
        user_id: i64,
        notification_type: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, type, message, created_at, is_read)
            VALUES (?, ?, ?, ?, 0)
            RETURNING id, user_id, type, message, created_at, is_read
            "#,
        )
        .bind(user_id)
        .bind(notification_type)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_notifications(
        &self,
        user_id: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, type, message, created_at, is_read
            FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_notification_read(&self, notification_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
