// realtime/events.rs
//! Frames exchanged over `/ws`, shaped as `{"event": <name>, "data": <payload>}`.
use serde::{Deserialize, Deserializer, Serialize};

use crate::dtos::{chatdtos::SendMessageDto, de::number_or_string};
use crate::models::chatmodels::{Message, Notification};

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Join(UserRef),
    JoinConversation {
        #[serde(deserialize_with = "number_or_string")]
        user_id: i64,
        #[serde(deserialize_with = "number_or_string")]
        other_user_id: i64,
    },
    SendMessage(SendMessageDto),
}

/// A user id sent either as a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRef(pub i64);

impl<'de> Deserialize<'de> for UserRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        number_or_string(deserializer).map(UserRef)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    ReceiveMessage(Message),
    Notification(Notification),
    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}
