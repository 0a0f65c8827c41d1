use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Announced to live clients after a message edit has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEdited {
    pub server_id: String,
    pub target_id: String,
    pub sent_at: String,
    /// Milliseconds since the unix epoch.
    pub sent_at_time: i64,
    pub message_id: Uuid,
    pub content: String,
}
