use crate::common::error::AppError;
use crate::entities::messages::Message as MessageEntity;
use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct EditMessageArgs {
    pub target: Uuid,
    pub server: Option<Uuid>,
    pub message: Uuid,
    #[serde(rename = "sentat")]
    pub sent_at: String,
    /// Milliseconds since the unix epoch.
    #[serde(rename = "sentattime")]
    pub sent_at_time: i64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct LoadMessagesArgs {
    pub target: Uuid,
    pub server: Option<Uuid>,
    /// RFC 3339 cursor, only messages sent strictly after it are returned.
    pub latest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub server_id: String,
    pub target_id: String,
    pub sent_at: String,
    pub sent_at_time: DateTime<Utc>,
    pub message_id: Uuid,
    pub content: String,
    pub edited: bool,
    pub reactions: HashMap<Uuid, String>,
    pub reply: String,
    pub sent_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_body: Option<ReplyBody>,
}

/// The message a reply points at. Never carries a reply body of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplyBody {
    pub server_id: String,
    pub target_id: String,
    pub sent_at: String,
    pub sent_at_time: DateTime<Utc>,
    pub message_id: Uuid,
    pub content: String,
    pub edited: bool,
    pub reactions: HashMap<Uuid, String>,
    pub sent_by: Uuid,
}

/// One row of a loaded page. `ReplyError` is set when the message replies
/// to something that could not be resolved; the row is returned regardless.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageEntry {
    #[serde(flatten)]
    pub message: Message,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_error_code"
    )]
    pub reply_error: Option<AppError>,
}

fn serialize_error_code<S: Serializer>(
    error: &Option<AppError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(error.code()),
        None => serializer.serialize_none(),
    }
}

impl From<MessageEntity> for Message {
    fn from(value: MessageEntity) -> Self {
        Self {
            server_id: value.server_id,
            target_id: value.target_id,
            sent_at: value.sent_at,
            sent_at_time: value.sent_at_time,
            message_id: value.message_id,
            content: value.content,
            edited: value.edited,
            reactions: value.reactions.0,
            reply: value.reply,
            sent_by: value.sent_by,
            reply_body: None,
        }
    }
}

impl From<MessageEntity> for ReplyBody {
    fn from(value: MessageEntity) -> Self {
        Self {
            server_id: value.server_id,
            target_id: value.target_id,
            sent_at: value.sent_at,
            sent_at_time: value.sent_at_time,
            message_id: value.message_id,
            content: value.content,
            edited: value.edited,
            reactions: value.reactions.0,
            sent_by: value.sent_by,
        }
    }
}
