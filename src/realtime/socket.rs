// realtime/socket.rs
use std::sync::Arc;

use axum::{
    extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    Extension,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::events::{ClientEvent, ServerEvent};
use crate::{service::error::ErrorKind, AppState};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(app_state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let conn = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    app_state.presence.register(conn, tx).await;
    tracing::info!("socket {} connected", conn);

    // Single writer per connection keeps outbound events in queue order.
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("failed to encode socket event: {}", e);
                    continue;
                }
            };

            if sink.send(WsMessage::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => dispatch(&app_state, conn, &text).await,
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("socket {} read error: {}", conn, e);
                break;
            }
        }
    }

    app_state.presence.disconnect(conn).await;
    writer.abort();
    tracing::info!("socket {} disconnected", conn);
}

/// Handles one inbound text frame from connection `conn`.
pub async fn dispatch(app_state: &AppState, conn: Uuid, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("socket {} sent an unreadable frame: {}", conn, e);
            app_state
                .presence
                .send_to_connection(conn, ServerEvent::error("Invalid event payload!"))
                .await;
            return;
        }
    };

    match event {
        ClientEvent::Join(user) => {
            app_state.presence.join(user.0, conn).await;
            tracing::info!("user {} joined on socket {}", user.0, conn);
        }
        ClientEvent::JoinConversation {
            user_id,
            other_user_id,
        } => {
            let room = app_state
                .presence
                .join_conversation(conn, user_id, other_user_id)
                .await;
            tracing::debug!("socket {} joined {}", conn, room);
        }
        ClientEvent::SendMessage(body) => {
            if let Err(e) = app_state.chat_service.send_message(body).await {
                let message = if e.kind() == ErrorKind::Persistence {
                    tracing::error!("socket {} failed to send message: {}", conn, e);
                    "Error sending message!".to_string()
                } else {
                    e.to_string()
                };

                app_state
                    .presence
                    .send_to_connection(conn, ServerEvent::error(message))
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::userdb::UserExt;
    use crate::models::usermodel::UserRole;
    use crate::test_state;

    #[tokio::test]
    async fn test_same_role_send_yields_error_event_only_to_sender() {
        let state = test_state().await;
        let a = state
            .db_client
            .save_user("Ann", "ann@example.com", "hash", UserRole::Client)
            .await
            .unwrap();
        let b = state
            .db_client
            .save_user("Bob", "bob@example.com", "hash", UserRole::Client)
            .await
            .unwrap();

        let (sender_conn, other_conn) = (Uuid::new_v4(), Uuid::new_v4());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        state.presence.register(sender_conn, tx).await;
        state.presence.register(other_conn, other_tx).await;

        dispatch(&state, sender_conn, &format!(r#"{{"event":"join","data":"{}"}}"#, a.id)).await;
        dispatch(&state, other_conn, &format!(r#"{{"event":"join","data":{}}}"#, b.id)).await;

        let frame = format!(
            r#"{{"event":"send_message","data":{{"sender_id":{},"receiver_id":{},"content":"hi"}}}}"#,
            a.id, b.id
        );
        dispatch(&state, sender_conn, &frame).await;

        assert_eq!(
            rx.recv().await,
            Some(ServerEvent::error(
                "Messaging is only allowed between clients and freelancers!"
            ))
        );
        assert!(other_rx.try_recv().is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&state.db_client.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_oversized_message_is_rejected_on_socket() {
        let state = test_state().await;
        let client = state
            .db_client
            .save_user("Carol", "carol@example.com", "hash", UserRole::Client)
            .await
            .unwrap();
        let freelancer = state
            .db_client
            .save_user("Frank", "frank@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();

        let conn = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.presence.register(conn, tx).await;

        let frame = serde_json::json!({
            "event": "send_message",
            "data": {
                "sender_id": client.id,
                "receiver_id": freelancer.id,
                "content": "x".repeat(100_000),
            }
        })
        .to_string();
        dispatch(&state, conn, &frame).await;

        match rx.recv().await {
            Some(ServerEvent::Error { message }) => {
                assert!(message.contains("Message must not be more than 5000 characters"))
            }
            other => panic!("expected error event, got {:?}", other),
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&state.db_client.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_garbage_frame_reports_error() {
        let state = test_state().await;
        let conn = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.presence.register(conn, tx).await;

        dispatch(&state, conn, "not json").await;
        assert_eq!(rx.recv().await, Some(ServerEvent::error("Invalid event payload!")));
    }

    #[tokio::test]
    async fn test_join_conversation_then_receive() {
        let state = test_state().await;
        let client = state
            .db_client
            .save_user("Carol", "carol@example.com", "hash", UserRole::Client)
            .await
            .unwrap();
        let freelancer = state
            .db_client
            .save_user("Frank", "frank@example.com", "hash", UserRole::Freelancer)
            .await
            .unwrap();

        let conn = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.presence.register(conn, tx).await;

        let join = format!(
            r#"{{"event":"join_conversation","data":{{"user_id":{},"other_user_id":{}}}}}"#,
            freelancer.id, client.id
        );
        dispatch(&state, conn, &join).await;

        let send = format!(
            r#"{{"event":"send_message","data":{{"sender_id":{},"receiver_id":{},"content":"hello"}}}}"#,
            client.id, freelancer.id
        );
        dispatch(&state, conn, &send).await;

        match rx.recv().await {
            Some(ServerEvent::ReceiveMessage(message)) => assert_eq!(message.content, "hello"),
            other => panic!("expected receive_message, got {:?}", other),
        }
    }
}
