use bytes::Bytes;
use serde_json::Value;

use oauthgate_provider_core::{
    CredentialContext, Headers, ProviderConfig, ProviderError, ProviderResult, ProviderSettings,
    UpstreamHttpRequest,
};

use crate::auth_extractor::build_request_headers;
use crate::envelope::wrap_body;
use crate::registry::resolve;

/// Headers and body are fixed for the whole retry loop; only the URL changes
/// from one attempt to the next.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub config: &'static ProviderConfig,
    pub headers: Headers,
    pub body: Bytes,
}

impl PreparedRequest {
    pub fn for_attempt(&self, attempt: u32) -> UpstreamHttpRequest {
        UpstreamHttpRequest {
            url: self.config.url_for_attempt(attempt),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

pub fn prepare_request(
    ctx: &CredentialContext,
    settings: &ProviderSettings,
    body: Value,
    model: &str,
) -> ProviderResult<PreparedRequest> {
    let config = resolve(&ctx.provider)?;
    let wrapped = wrap_body(body, ctx, config, model)?;
    let body = serde_json::to_vec(&wrapped).map_err(|err| ProviderError::Other(err.to_string()))?;
    Ok(PreparedRequest {
        config,
        headers: build_request_headers(ctx, config, settings),
        body: Bytes::from(body),
    })
}
