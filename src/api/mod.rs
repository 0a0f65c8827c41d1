use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::init;
use crate::common::state::AppState;
use crate::models::authorization::ChannelEditPolicy;
use crate::repositories::identities::IdentityVerifier;
use crate::repositories::messages::MessageStore;
use crate::repositories::notifications::Notifier;
use crate::settings::AppSettings;
use crate::usecases::identities;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::routing::get;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

pub mod v1;

/// Per-request handles plus the identity the `Authorization` header
/// resolved to.
pub struct RequestContext {
    pub state: AppState,
    pub user_id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/api/v1", v1::router())
}

pub async fn index() -> &'static str {
    "Running message-service v0.1"
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router().with_state(state);
    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|token| token.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;
        let user_id = identities::verify(state, token).await?;
        Ok(Self {
            state: state.clone(),
            user_id,
        })
    }
}

impl Context for RequestContext {
    fn messages(&self) -> &dyn MessageStore {
        self.state.messages()
    }

    fn identities(&self) -> &dyn IdentityVerifier {
        self.state.identities()
    }

    fn notifier(&self) -> &dyn Notifier {
        self.state.notifier()
    }

    fn store_timeout(&self) -> Duration {
        self.state.store_timeout()
    }

    fn channel_edit_policy(&self) -> ChannelEditPolicy {
        self.state.channel_edit_policy()
    }
}
