use crate::api::RequestContext;
use crate::common::error::{AppError, ServiceResponse, ServiceResult};
use crate::models::messages::{EditMessageArgs, LoadMessagesArgs, PageEntry};
use crate::usecases::messages;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::debug;

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> ServiceResult<T> {
    match payload {
        Ok(Json(args)) => Ok(args),
        Err(rejection) => {
            debug!("Rejected request body: {rejection}");
            Err(AppError::DecodingRequestFailed)
        }
    }
}

pub async fn edit(
    ctx: RequestContext,
    payload: Result<Json<EditMessageArgs>, JsonRejection>,
) -> ServiceResult<StatusCode> {
    let args = decode(payload)?;
    messages::edit(&ctx, ctx.user_id, args).await?;
    Ok(StatusCode::OK)
}

pub async fn load(
    ctx: RequestContext,
    payload: Result<Json<LoadMessagesArgs>, JsonRejection>,
) -> ServiceResponse<Vec<PageEntry>> {
    let args = decode(payload)?;
    let page = messages::load_page(&ctx, ctx.user_id, args).await?;
    Ok(Json(page))
}
