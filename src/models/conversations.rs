use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Direct,
    Channel,
}

/// A conversation as named by an incoming request, before it is collapsed
/// into a storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversation {
    Direct { requester: Uuid, peer: Uuid },
    Channel { server: Uuid, channel: Uuid },
}

impl Conversation {
    /// A request naming a server addresses a channel, otherwise the target
    /// is the other participant of a direct conversation.
    pub fn from_request(requester: Uuid, target: Uuid, server: Option<Uuid>) -> Self {
        match server {
            Some(server) => Conversation::Channel {
                server,
                channel: target,
            },
            None => Conversation::Direct {
                requester,
                peer: target,
            },
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Conversation::Direct { .. } => Scope::Direct,
            Conversation::Channel { .. } => Scope::Channel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationAddress {
    pub scope: Scope,
    pub target: String,
    /// Empty for direct conversations.
    pub server: String,
}
