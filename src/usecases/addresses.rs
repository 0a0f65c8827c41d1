use crate::models::conversations::{Conversation, ConversationAddress};
use uuid::Uuid;

/// Storage key of the direct conversation between `a` and `b`.
///
/// The pair is ordered before joining, so either participant resolves to the
/// same key. The `:` separator never appears in a hyphenated uuid, so a
/// direct key can't be mistaken for a channel id.
pub fn combine(a: Uuid, b: Uuid) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{low}:{high}")
}

pub fn resolve(conversation: &Conversation) -> ConversationAddress {
    match *conversation {
        Conversation::Direct { requester, peer } => ConversationAddress {
            scope: conversation.scope(),
            target: combine(requester, peer),
            server: String::new(),
        },
        Conversation::Channel { server, channel } => ConversationAddress {
            scope: conversation.scope(),
            target: channel.to_string(),
            server: server.to_string(),
        },
    }
}
