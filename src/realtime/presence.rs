// realtime/presence.rs
use std::collections::{HashMap, HashSet};

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::events::ServerEvent;

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

#[derive(Debug, Default)]
struct PresenceState {
    connections: HashMap<Uuid, EventSender>,
    users: HashMap<i64, Uuid>,
    rooms: HashMap<String, HashSet<Uuid>>,
}

/// Live socket connections, the user each one is addressable as, and the
/// conversation rooms they have joined.
#[derive(Debug, Default)]
pub struct PresenceHub {
    state: RwLock<PresenceState>,
}

pub fn conversation_room(a: i64, b: i64) -> String {
    format!("conversation_{}_{}", a.min(b), a.max(b))
}

impl PresenceHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, conn: Uuid, sender: EventSender) {
        self.state.write().await.connections.insert(conn, sender);
    }

    /// Points `user_id` at `conn`. An older connection stays open but is no
    /// longer addressable.
    pub async fn join(&self, user_id: i64, conn: Uuid) {
        let previous = self.state.write().await.users.insert(user_id, conn);
        match previous {
            Some(old) if old != conn => {
                tracing::debug!("user {} moved from connection {} to {}", user_id, old, conn)
            }
            _ => tracing::debug!("user {} joined on connection {}", user_id, conn),
        }
    }

    pub async fn join_conversation(&self, conn: Uuid, a: i64, b: i64) -> String {
        let room = conversation_room(a, b);
        self.state
            .write()
            .await
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(conn);
        room
    }

    pub async fn disconnect(&self, conn: Uuid) {
        let mut state = self.state.write().await;
        state.connections.remove(&conn);

        state.rooms.retain(|_, members| {
            members.remove(&conn);
            !members.is_empty()
        });

        state.users.retain(|_, current| *current != conn);
    }

    pub async fn send_to_user(&self, user_id: i64, event: ServerEvent) -> bool {
        let state = self.state.read().await;
        let sender = state
            .users
            .get(&user_id)
            .and_then(|conn| state.connections.get(conn));

        match sender {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    pub async fn send_to_connection(&self, conn: Uuid, event: ServerEvent) -> bool {
        match self.state.read().await.connections.get(&conn) {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Returns how many connections the event was queued on.
    pub async fn broadcast_to_conversation(&self, a: i64, b: i64, event: ServerEvent) -> usize {
        let state = self.state.read().await;
        let Some(members) = state.rooms.get(&conversation_room(a, b)) else {
            return 0;
        };

        members
            .iter()
            .filter_map(|conn| state.connections.get(conn))
            .filter(|sender| sender.send(event.clone()).is_ok())
            .count()
    }
}
