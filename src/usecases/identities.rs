use crate::common::context::{Context, bounded};
use crate::common::error::{AppError, ServiceResult};
use tracing::debug;
use uuid::Uuid;

pub async fn verify<C: Context>(ctx: &C, token: &str) -> ServiceResult<Uuid> {
    match bounded(ctx, ctx.identities().verify(token)).await? {
        Some(user_id) => Ok(user_id),
        None => {
            debug!("Rejected unknown session token");
            Err(AppError::Unauthenticated)
        }
    }
}
