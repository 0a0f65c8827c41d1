use crate::common::context::{Context, bounded};
use crate::common::error::{AppError, ServiceResult};
use crate::entities::messages::MessageKey;
use crate::models::authorization::ChannelEditPolicy;
use crate::models::conversations::Scope;
use tracing::warn;
use uuid::Uuid;

/// Gates an edit before anything is written.
///
/// Direct messages may only be edited by their author. Channel messages
/// follow the configured [`ChannelEditPolicy`]; with `TrustTarget` the
/// authorship is not looked up at all.
pub async fn authorize_edit<C: Context>(
    ctx: &C,
    requester: Uuid,
    scope: Scope,
    key: &MessageKey,
) -> ServiceResult<()> {
    let check_author = match scope {
        Scope::Direct => true,
        Scope::Channel => ctx.channel_edit_policy() == ChannelEditPolicy::RequireAuthor,
    };
    if !check_author {
        return Ok(());
    }

    match bounded(ctx, ctx.messages().fetch_author(key)).await? {
        None => Err(AppError::MessagesNotFound),
        Some(author) if author != requester => {
            warn!(
                %requester,
                %author,
                message_id = %key.message_id,
                "Rejected edit of a message sent by someone else"
            );
            Err(AppError::MessagesForbidden)
        }
        Some(_) => Ok(()),
    }
}
