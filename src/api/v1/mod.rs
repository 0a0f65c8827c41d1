pub mod messages;

use crate::common::state::AppState;
use axum::Router;
use axum::routing::post;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages/edit", post(messages::edit))
        .route("/messages/load", post(messages::load))
}
