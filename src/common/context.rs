use crate::common::error::{ServiceResult, unexpected};
use crate::models::authorization::ChannelEditPolicy;
use crate::repositories::identities::IdentityVerifier;
use crate::repositories::messages::MessageStore;
use crate::repositories::notifications::Notifier;
use std::time::Duration;

pub trait Context: Sync + Send {
    fn messages(&self) -> &dyn MessageStore;
    fn identities(&self) -> &dyn IdentityVerifier;
    fn notifier(&self) -> &dyn Notifier;
    fn store_timeout(&self) -> Duration;
    fn channel_edit_policy(&self) -> ChannelEditPolicy;
}

/// Runs a store call under the configured timeout. Faults and timeouts both
/// surface as `StoreUnavailable`.
pub async fn bounded<C, T, F>(ctx: &C, operation: F) -> ServiceResult<T>
where
    C: Context + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(ctx.store_timeout(), operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => unexpected(e),
        Err(elapsed) => unexpected(elapsed),
    }
}
