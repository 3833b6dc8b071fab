use http::HeaderMap;
use serde::Deserialize;

use crate::headers::{Headers, header_get};
use crate::provider::ProviderId;

pub const OAUTH_PROVIDER_HEADER: &str = "X-OAuth-Provider";
pub const OAUTH_TOKEN_HEADER: &str = "X-OAuth-Token";

/// Credentials carried by one inbound request.
///
/// Built once per request and never shared, cached or persisted. `provider` is
/// kept as the raw header value so an id outside the registry can be reported
/// as such by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialContext {
    pub provider: String,
    pub token: String,
    pub project_id: Option<String>,
    pub account_id: Option<String>,
    pub enterprise_url: Option<String>,
}

impl CredentialContext {
    pub fn new(provider: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            token: token.into(),
            project_id: None,
            account_id: None,
            enterprise_url: None,
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn provider_id(&self) -> Option<ProviderId> {
        ProviderId::parse(&self.provider)
    }
}

// The token must never reach logs through `{:?}`.
impl std::fmt::Debug for CredentialContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialContext")
            .field("provider", &self.provider)
            .field("token", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("account_id", &self.account_id)
            .field("enterprise_url", &self.enterprise_url)
            .finish()
    }
}

#[derive(Deserialize)]
struct JsonToken {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "projectId")]
    project_id: Option<String>,
}

/// Reads the OAuth headers from an ordered header list.
///
/// Returns `None` when either header is missing or empty; callers then fall back
/// to ambient credentials.
pub fn extract_context(headers: &Headers) -> Option<CredentialContext> {
    build_context(
        header_get(headers, OAUTH_PROVIDER_HEADER),
        header_get(headers, OAUTH_TOKEN_HEADER),
    )
}

pub fn extract_context_from_map(headers: &HeaderMap) -> Option<CredentialContext> {
    let lookup = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
    build_context(lookup(OAUTH_PROVIDER_HEADER), lookup(OAUTH_TOKEN_HEADER))
}

fn build_context(provider: Option<&str>, token: Option<&str>) -> Option<CredentialContext> {
    let provider = provider.filter(|value| !value.is_empty())?;
    let raw_token = token.filter(|value| !value.is_empty())?;

    let mut ctx = CredentialContext::new(provider, raw_token);
    if ctx.provider_id().is_some_and(|id| id.uses_json_token())
        && let Ok(decoded) = decode_json_token(raw_token)
    {
        if let Some(token) = decoded.token {
            ctx.token = token;
        }
        ctx.project_id = decoded.project_id.filter(|value| !value.is_empty());
    }
    Some(ctx)
}

// serde would also accept a JSON array for a struct; only objects count.
fn decode_json_token(raw: &str) -> serde_json::Result<JsonToken> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde::de::Error::custom("token JSON is not an object")),
    }
}
