use crate::common::context::{Context, bounded};
use crate::common::error::{AppError, ServiceResult};
use crate::entities::messages::{Message as MessageEntity, MessageKey, PageQuery};
use crate::models::conversations::Conversation;
use crate::models::messages::{EditMessageArgs, LoadMessagesArgs, PageEntry};
use crate::models::notifications::MessageEdited;
use crate::repositories::notifications::Topic;
use crate::usecases::{addresses, authorization, notifications, replies};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use tracing::info;
use uuid::Uuid;

pub const PAGE_SIZE: u32 = 50;

/// Parses the RFC 3339 page cursor. A malformed cursor rejects the request
/// instead of silently loading from the start.
pub fn parse_cursor(latest: Option<&str>) -> ServiceResult<Option<DateTime<Utc>>> {
    latest
        .map(|latest| {
            DateTime::parse_from_rfc3339(latest)
                .map(|cursor| cursor.with_timezone(&Utc))
                .map_err(|_| AppError::MessagesInvalidCursor)
        })
        .transpose()
}

pub async fn load_page<C: Context>(
    ctx: &C,
    requester: Uuid,
    args: LoadMessagesArgs,
) -> ServiceResult<Vec<PageEntry>> {
    let after = parse_cursor(args.latest.as_deref())?;
    let conversation = Conversation::from_request(requester, args.target, args.server);
    let address = addresses::resolve(&conversation);
    let query = PageQuery {
        target_id: address.target,
        server_id: address.server,
        after,
        limit: PAGE_SIZE,
    };

    let rows: Vec<MessageEntity> = bounded(ctx, ctx.messages().fetch_page(query).try_collect()).await?;
    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(replies::attach(ctx, row).await);
    }
    Ok(entries)
}

pub async fn edit<C: Context>(ctx: &C, requester: Uuid, args: EditMessageArgs) -> ServiceResult<()> {
    if args.sent_at.is_empty() {
        return Err(AppError::MessagesInvalidKey);
    }
    let sent_at_time =
        DateTime::from_timestamp_millis(args.sent_at_time).ok_or(AppError::MessagesInvalidKey)?;

    let conversation = Conversation::from_request(requester, args.target, args.server);
    let address = addresses::resolve(&conversation);
    let key = MessageKey {
        server_id: address.server,
        target_id: address.target,
        sent_at: args.sent_at,
        sent_at_time,
        message_id: args.message,
    };

    authorization::authorize_edit(ctx, requester, address.scope, &key).await?;

    let updated = bounded(ctx, ctx.messages().update_content(&key, &args.content)).await?;
    if !updated {
        return Err(AppError::MessagesNotFound);
    }
    info!(
        %requester,
        message_id = %key.message_id,
        scope = ?address.scope,
        "Edited message"
    );

    let topic = Topic::new(key.server_id.clone(), args.target.to_string());
    let event = MessageEdited {
        server_id: key.server_id,
        target_id: key.target_id,
        sent_at: key.sent_at,
        sent_at_time: args.sent_at_time,
        message_id: key.message_id,
        content: args.content,
    };
    notifications::publish_edit(ctx, topic, event).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_is_optional() {
        assert_eq!(parse_cursor(None), Ok(None));
    }

    #[test]
    fn cursor_accepts_rfc3339_offsets() {
        let cursor = parse_cursor(Some("2024-05-01T12:00:00.250+02:00")).unwrap();
        assert_eq!(
            cursor,
            DateTime::parse_from_rfc3339("2024-05-01T10:00:00.250Z")
                .ok()
                .map(|c| c.with_timezone(&Utc))
        );
    }

    #[test]
    fn malformed_cursor_is_rejected() {
        for latest in ["", "yesterday", "2024-05-01 12:00:00", "1714564800"] {
            assert_eq!(
                parse_cursor(Some(latest)),
                Err(AppError::MessagesInvalidCursor)
            );
        }
    }
}
