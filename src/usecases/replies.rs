use crate::common::context::{Context, bounded};
use crate::common::error::{AppError, ServiceResult};
use crate::entities::messages::Message as MessageEntity;
use crate::models::messages::{Message, PageEntry, ReplyBody};
use tracing::{error, warn};
use uuid::Uuid;

/// Embeds the message `message.reply` points at.
///
/// Replies are looked up in the same conversation as the parent. A reply
/// that can't be resolved is recorded on the entry and the parent is still
/// returned.
pub async fn attach<C: Context>(ctx: &C, message: MessageEntity) -> PageEntry {
    if message.reply.is_empty() {
        return PageEntry {
            message: Message::from(message),
            reply_error: None,
        };
    }

    let reply = fetch_reply(ctx, &message).await;
    let mut message = Message::from(message);
    match reply {
        Ok(body) => {
            message.reply_body = Some(body);
            PageEntry {
                message,
                reply_error: None,
            }
        }
        Err(e) => {
            match e {
                AppError::MessagesNotFound => warn!(
                    message_id = %message.message_id,
                    reply = %message.reply,
                    "Replied-to message does not exist"
                ),
                _ => error!(
                    message_id = %message.message_id,
                    reply = %message.reply,
                    code = e.code(),
                    "Failed to resolve replied-to message"
                ),
            }
            PageEntry {
                message,
                reply_error: Some(e),
            }
        }
    }
}

async fn fetch_reply<C: Context>(ctx: &C, message: &MessageEntity) -> ServiceResult<ReplyBody> {
    let reply_id = Uuid::parse_str(&message.reply).map_err(|_| AppError::MessagesNotFound)?;
    let reply = bounded(
        ctx,
        ctx.messages()
            .fetch_by_id(&message.target_id, &message.server_id, reply_id),
    )
    .await?;
    reply
        .map(ReplyBody::from)
        .ok_or(AppError::MessagesNotFound)
}
