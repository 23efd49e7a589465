// service/notification_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt, userdb::UserExt},
    models::{chatmodels::Notification, usermodel::UserRole},
    realtime::{events::ServerEvent, PresenceHub},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
    presence: Arc<PresenceHub>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>, presence: Arc<PresenceHub>) -> Self {
        Self {
            db_client,
            presence,
        }
    }

    /// Stores the notification, then pushes it if the user is connected.
    pub async fn notify(
        &self,
        user_id: i64,
        notification_type: &str,
        message: &str,
    ) -> Result<Notification, ServiceError> {
        let notification = self
            .db_client
            .create_notification(user_id, notification_type, message)
            .await?;

        let pushed = self
            .presence
            .send_to_user(user_id, ServerEvent::Notification(notification.clone()))
            .await;

        tracing::debug!(
            "notification {} ({}) for user {} pushed live: {}",
            notification.id,
            notification_type,
            user_id,
            pushed
        );

        Ok(notification)
    }

    /// Runs after a committed transition, so a failure here is only logged.
    pub async fn notify_quietly(&self, user_id: i64, notification_type: &str, message: &str) {
        if let Err(e) = self.notify(user_id, notification_type, message).await {
            tracing::warn!(
                "failed to deliver {} notification to user {}: {}",
                notification_type,
                user_id,
                e
            );
        }
    }

    pub async fn notify_all_freelancers(&self, notification_type: &str, message: &str) {
        let freelancers = match self.db_client.get_user_ids_by_role(UserRole::Freelancer).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("failed to load freelancers for {}: {}", notification_type, e);
                return;
            }
        };

        for freelancer_id in freelancers {
            self.notify_quietly(freelancer_id, notification_type, message)
                .await;
        }
    }

    pub async fn list_notifications(
        &self,
        user_id: Option<i64>,
    ) -> Result<Vec<Notification>, ServiceError> {
        let user_id = user_id.ok_or(ServiceError::MissingFields("User ID is required!"))?;
        Ok(self.db_client.get_user_notifications(user_id).await?)
    }

    pub async fn mark_read(&self, notification_id: i64) -> Result<(), ServiceError> {
        if self.db_client.mark_notification_read(notification_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotificationNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::test_client;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_notify_persists_and_pushes_to_live_user() {
        let db = Arc::new(test_client().await);
        let hub = Arc::new(PresenceHub::new());
        let service = NotificationService::new(db.clone(), hub.clone());

        let user = db
            .save_user("Frank", "frank@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();

        let conn = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.register(conn, tx).await;
        hub.join(user.id, conn).await;

        let stored = service.notify(user.id, "new_job", "New job posted: Logo").await.unwrap();

        match rx.recv().await {
            Some(ServerEvent::Notification(pushed)) => assert_eq!(pushed.id, stored.id),
            other => panic!("expected a notification event, got {:?}", other),
        }

        let listed = service.list_notifications(Some(user.id)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].notification_type, "new_job");
    }

    #[tokio::test]
    async fn test_list_requires_user_and_mark_read_404() {
        let db = Arc::new(test_client().await);
        let service = NotificationService::new(db, Arc::new(PresenceHub::new()));

        assert!(matches!(
            service.list_notifications(None).await,
            Err(ServiceError::MissingFields("User ID is required!"))
        ));
        assert!(matches!(
            service.mark_read(77).await,
            Err(ServiceError::NotificationNotFound)
        ));
    }
}
