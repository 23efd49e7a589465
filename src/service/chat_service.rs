// service/chat_service.rs
use std::sync::Arc;

use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, db::DBClient, jobdb::JobExt, userdb::UserExt},
    dtos::chatdtos::SendMessageDto,
    models::chatmodels::Message,
    realtime::{events::ServerEvent, PresenceHub},
    service::{error::ServiceError, notification_service::NotificationService},
};

#[derive(Debug, Clone)]
pub struct ChatService {
    db_client: Arc<DBClient>,
    presence: Arc<PresenceHub>,
    notification_service: Arc<NotificationService>,
}

impl ChatService {
    pub fn new(
        db_client: Arc<DBClient>,
        presence: Arc<PresenceHub>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            db_client,
            presence,
            notification_service,
        }
    }

    /// Shared by `POST /messages` and the socket `send_message` event.
    pub async fn send_message(&self, body: SendMessageDto) -> Result<Message, ServiceError> {
        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let (Some(sender_id), Some(receiver_id), Some(content)) = (
            body.sender_id,
            body.receiver_id,
            body.content.filter(|c| !c.trim().is_empty()),
        ) else {
            return Err(ServiceError::MissingFields("Missing required fields!"));
        };

        let sender = self
            .db_client
            .get_user(Some(sender_id), None)
            .await?
            .ok_or(ServiceError::InvalidSender)?;

        let receiver = self
            .db_client
            .get_user(Some(receiver_id), None)
            .await?
            .ok_or(ServiceError::InvalidReceiver)?;

        if sender.role == receiver.role {
            return Err(ServiceError::SameRoleMessaging);
        }

        if let Some(job_id) = body.job_id {
            self.db_client
                .get_job_by_id(job_id)
                .await?
                .ok_or(ServiceError::InvalidJob)?;
        }

        let message = self
            .db_client
            .save_message(sender.id, receiver.id, body.job_id, &content)
            .await?;

        let delivered = self
            .presence
            .broadcast_to_conversation(
                sender.id,
                receiver.id,
                ServerEvent::ReceiveMessage(message.clone()),
            )
            .await;

        tracing::debug!(
            "message {} from {} to {} delivered to {} connection(s)",
            message.id,
            sender.id,
            receiver.id,
            delivered
        );

        self.notification_service
            .notify_quietly(
                receiver.id,
                "new_message",
                &format!("New message from {}", sender.name),
            )
            .await;

        Ok(message)
    }

    pub async fn conversation(
        &self,
        user_id: Option<i64>,
        other_user_id: Option<i64>,
    ) -> Result<Vec<Message>, ServiceError> {
        let (Some(user_id), Some(other_user_id)) = (user_id, other_user_id) else {
            return Err(ServiceError::MissingFields(
                "User ID and other user ID are required!",
            ));
        };

        Ok(self.db_client.get_conversation(user_id, other_user_id).await?)
    }

    pub async fn mark_read(&self, message_id: i64) -> Result<(), ServiceError> {
        if self.db_client.mark_message_read(message_id).await? {
            Ok(())
        } else {
            Err(ServiceError::MessageNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::test_client;
    use crate::models::usermodel::UserRole;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    struct Fixture {
        db: Arc<DBClient>,
        hub: Arc<PresenceHub>,
        service: ChatService,
    }

    async fn fixture() -> Fixture {
        let db = Arc::new(test_client().await);
        let hub = Arc::new(PresenceHub::new());
        let notifications = Arc::new(NotificationService::new(db.clone(), hub.clone()));
        Fixture {
            service: ChatService::new(db.clone(), hub.clone(), notifications),
            db,
            hub,
        }
    }

    fn dto(sender: i64, receiver: i64, content: &str) -> SendMessageDto {
        SendMessageDto {
            sender_id: Some(sender),
            receiver_id: Some(receiver),
            job_id: None,
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_same_role_is_rejected_and_nothing_persisted() {
        let f = fixture().await;
        let a = f
            .db
            .save_user("Ann", "ann@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();
        let b = f
            .db
            .save_user("Ben", "ben@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();

        assert!(matches!(
            f.service.send_message(dto(a.id, b.id, "hi")).await,
            Err(ServiceError::SameRoleMessaging)
        ));
        assert!(matches!(
            f.service.send_message(dto(a.id, b.id, "   ")).await,
            Err(ServiceError::MissingFields(_))
        ));
        assert!(matches!(
            f.service.send_message(dto(999, b.id, "hi")).await,
            Err(ServiceError::InvalidSender)
        ));
        assert!(matches!(
            f.service.send_message(dto(a.id, 999, "hi")).await,
            Err(ServiceError::InvalidReceiver)
        ));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&f.db.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_job_reference_and_length_are_checked() {
        let f = fixture().await;
        let client = f
            .db
            .save_user("Carol", "carol@example.com", "hash", UserRole::Client)
            .await
            .unwrap();
        let freelancer = f
            .db
            .save_user("Frank", "frank@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();

        let mut unknown_job = dto(client.id, freelancer.id, "about the job");
        unknown_job.job_id = Some(9999);
        assert!(matches!(
            f.service.send_message(unknown_job).await,
            Err(ServiceError::InvalidJob)
        ));

        let too_long = dto(client.id, freelancer.id, &"x".repeat(5001));
        assert!(matches!(
            f.service.send_message(too_long).await,
            Err(ServiceError::Validation(_))
        ));

        let job = f.db.create_job("Logo", "Design", 100.0, client.id).await.unwrap();
        let mut about_job = dto(client.id, freelancer.id, "about the job");
        about_job.job_id = Some(job.id);
        let sent = f.service.send_message(about_job).await.unwrap();
        assert_eq!(sent.job_id, Some(job.id));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&f.db.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_message_reaches_conversation_room() {
        let f = fixture().await;
        let client = f
            .db
            .save_user("Carol", "carol@example.com", "hash", UserRole::Client)
            .await
            .unwrap();
        let freelancer = f
            .db
            .save_user("Frank", "frank@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();

        let conn = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.hub.register(conn, tx).await;
        f.hub.join(freelancer.id, conn).await;
        f.hub.join_conversation(conn, freelancer.id, client.id).await;

        let sent = f
            .service
            .send_message(dto(client.id, freelancer.id, "hello"))
            .await
            .unwrap();

        match rx.recv().await {
            Some(ServerEvent::ReceiveMessage(m)) => assert_eq!(m.id, sent.id),
            other => panic!("expected receive_message, got {:?}", other),
        }
        match rx.recv().await {
            Some(ServerEvent::Notification(n)) => assert_eq!(n.notification_type, "new_message"),
            other => panic!("expected notification, got {:?}", other),
        }

        let history = f
            .service
            .conversation(Some(freelancer.id), Some(client.id))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);

        f.service.mark_read(sent.id).await.unwrap();
        assert!(matches!(
            f.service.mark_read(999).await,
            Err(ServiceError::MessageNotFound)
        ));
    }
}
