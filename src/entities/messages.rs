use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use sqlx::types::Json;
use uuid::Uuid;

/// A row of the `messages` table.
///
/// `server_id` is empty for direct conversations; `reply` is empty when the
/// message does not reply to anything.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Message {
    pub server_id: String,
    pub target_id: String,
    pub sent_at: String,
    pub sent_at_time: DateTime<Utc>,
    pub message_id: Uuid,
    pub content: String,
    pub edited: bool,
    pub reactions: Json<HashMap<Uuid, String>>,
    pub reply: String,
    pub sent_by: Uuid,
}

impl Message {
    pub fn key(&self) -> MessageKey {
        MessageKey {
            server_id: self.server_id.clone(),
            target_id: self.target_id.clone(),
            sent_at: self.sent_at.clone(),
            sent_at_time: self.sent_at_time,
            message_id: self.message_id,
        }
    }
}

/// Full primary key of a message row. Point lookups and updates always bind
/// every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageKey {
    pub server_id: String,
    pub target_id: String,
    pub sent_at: String,
    pub sent_at_time: DateTime<Utc>,
    pub message_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct PageQuery {
    pub target_id: String,
    pub server_id: String,
    pub after: Option<DateTime<Utc>>,
    pub limit: u32,
}
