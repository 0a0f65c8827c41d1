use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

/// Logs the store-level cause and collapses it into [`AppError::StoreUnavailable`].
#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::StoreUnavailable)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    Unauthenticated,
    DecodingRequestFailed,
    StoreUnavailable,

    MessagesInvalidCursor,
    MessagesInvalidKey,
    MessagesForbidden,
    MessagesNotFound,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::DecodingRequestFailed => "decoding_request_failed",
            AppError::StoreUnavailable => "store_unavailable",

            AppError::MessagesInvalidCursor => "messages.invalid_cursor",
            AppError::MessagesInvalidKey => "messages.invalid_key",
            AppError::MessagesForbidden => "messages.forbidden",
            AppError::MessagesNotFound => "messages.not_found",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "Your identity could not be verified.",
            AppError::DecodingRequestFailed => "Failed to decode request",
            AppError::StoreUnavailable => "An internal server error has occurred.",

            AppError::MessagesInvalidCursor => {
                "The message cursor must be an RFC 3339 date-time."
            }
            AppError::MessagesInvalidKey => "The message key is incomplete or malformed.",
            AppError::MessagesForbidden => "You can't edit a message sent by someone else.",
            AppError::MessagesNotFound => "The message could not be found.",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DecodingRequestFailed
            | AppError::MessagesInvalidCursor
            | AppError::MessagesInvalidKey => StatusCode::BAD_REQUEST,

            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,

            AppError::MessagesForbidden => StatusCode::FORBIDDEN,

            AppError::MessagesNotFound => StatusCode::NOT_FOUND,

            AppError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
