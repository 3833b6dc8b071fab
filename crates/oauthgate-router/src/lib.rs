//! HTTP boundary for oauthgate.
//!
//! [`oauth_router`] mounts the dispatch routes behind the `credential_scope`
//! middleware, which turns `X-OAuth-Provider` / `X-OAuth-Token` into a
//! per-request credential scope for everything downstream of it.

mod dispatch;
mod scope;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use oauthgate_core::{AmbientStore, Gateway};

pub use scope::ScopeMode;

#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<Gateway>,
    pub ambient: Arc<dyn AmbientStore>,
    pub mode: ScopeMode,
}

pub fn oauth_router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/oauth/dispatch", post(dispatch::dispatch))
        .route("/healthz", get(dispatch::healthz))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            scope::credential_scope,
        ))
        .with_state(state)
}
