use crate::common::context::Context;
use crate::models::notifications::MessageEdited;
use crate::repositories::notifications::Topic;
use tracing::{info, warn};

/// Announces a stored edit. Delivery is best-effort: publish failures are
/// logged and never reach the caller.
pub async fn publish_edit<C: Context>(ctx: &C, topic: Topic, event: MessageEdited) {
    match ctx.notifier().notify(&topic, &event).await {
        Ok(()) => info!(
            %topic,
            message_id = %event.message_id,
            "Announced message edit"
        ),
        Err(e) => warn!(
            %topic,
            message_id = %event.message_id,
            "Failed to announce message edit: {e}"
        ),
    }
}
