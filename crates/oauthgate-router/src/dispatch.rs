use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use oauthgate_provider_core::{CredentialContext, OAUTH_PROVIDER_HEADER, OAUTH_TOKEN_HEADER};

use crate::GatewayState;
use crate::scope::RequestTraceId;

#[derive(Debug, Deserialize)]
pub(crate) struct DispatchBody {
    model: String,
    #[serde(default)]
    request: Value,
}

pub(crate) async fn dispatch(
    State(state): State<GatewayState>,
    Extension(trace_id): Extension<RequestTraceId>,
    ctx: Option<Extension<CredentialContext>>,
    Json(body): Json<DispatchBody>,
) -> Response {
    let Some(Extension(ctx)) = ctx else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("missing {OAUTH_PROVIDER_HEADER} or {OAUTH_TOKEN_HEADER} header")
            })),
        )
            .into_response();
    };

    let (status, payload) = state.gateway.respond(&ctx, body.request, &body.model).await;
    info!(
        event = "downstream_response",
        trace_id = %trace_id.0,
        provider = %ctx.provider,
        model = %body.model,
        status = status
    );
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(payload)).into_response()
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}
