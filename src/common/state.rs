use crate::common::context::Context;
use crate::models::authorization::ChannelEditPolicy;
use crate::repositories::identities::IdentityVerifier;
use crate::repositories::messages::MessageStore;
use crate::repositories::notifications::Notifier;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageStore>,
    pub identities: Arc<dyn IdentityVerifier>,
    pub notifier: Arc<dyn Notifier>,
    pub store_timeout: Duration,
    pub channel_edit_policy: ChannelEditPolicy,
}

impl Context for AppState {
    fn messages(&self) -> &dyn MessageStore {
        self.messages.as_ref()
    }

    fn identities(&self) -> &dyn IdentityVerifier {
        self.identities.as_ref()
    }

    fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    fn channel_edit_policy(&self) -> ChannelEditPolicy {
        self.channel_edit_policy
    }
}
