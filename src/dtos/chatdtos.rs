// dtos/chatdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::de::opt_number_or_string;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub sender_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub receiver_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub job_id: Option<i64>,
    #[validate(length(max = 5000, message = "Message must not be more than 5000 characters"))]
    pub content: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConversationQuery {
    pub user_id: Option<i64>,
    pub other_user_id: Option<i64>,
}
