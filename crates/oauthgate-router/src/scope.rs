use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{Instrument, debug, error, info_span};

use oauthgate_core::{OverrideSet, with_scoped_overrides, with_shared_overrides};
use oauthgate_provider_core::{OAUTH_TOKEN_HEADER, extract_context_from_map};

use crate::GatewayState;

/// How credential overrides reach code running inside a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeMode {
    /// Task-local only. Safe with any number of concurrent requests.
    #[default]
    ScopedOnly,
    /// Task-local plus writes into the shared ambient store for code that
    /// reads the process environment. Only correct with one such request in
    /// flight at a time.
    SharedEnv,
}

#[derive(Clone)]
pub(crate) struct RequestTraceId(pub(crate) String);

pub(crate) async fn credential_scope(
    State(state): State<GatewayState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let trace_id = uuid::Uuid::now_v7().to_string();
    let span = info_span!("request", trace_id = %trace_id);
    req.extensions_mut()
        .insert(RequestTraceId(trace_id.clone()));

    let Some(ctx) = extract_context_from_map(req.headers()) else {
        return next.run(req).instrument(span).await;
    };

    // The raw token must not travel further than the scope built from it.
    req.headers_mut().remove(OAUTH_TOKEN_HEADER);
    let overrides = OverrideSet::for_context(&ctx);
    let provider = ctx.provider.clone();
    req.extensions_mut().insert(ctx);

    let Some(overrides) = overrides else {
        debug!(parent: &span, provider = %provider, "no ambient mapping for provider");
        return next.run(req).instrument(span).await;
    };

    debug!(
        parent: &span,
        provider = %provider,
        mode = ?state.mode,
        keys = overrides.len(),
        "credential scope installed"
    );
    match state.mode {
        ScopeMode::ScopedOnly => {
            with_scoped_overrides(overrides, next.run(req))
                .instrument(span)
                .await
        }
        ScopeMode::SharedEnv => {
            let result = with_shared_overrides(state.ambient.clone(), overrides, next.run(req))
                .instrument(span.clone())
                .await;
            match result {
                Ok(resp) => resp,
                Err(err) => {
                    error!(
                        parent: &span,
                        provider = %provider,
                        error = %err,
                        "ambient override failed"
                    );
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": err.to_string() })),
                    )
                        .into_response()
                }
            }
        }
    }
}
