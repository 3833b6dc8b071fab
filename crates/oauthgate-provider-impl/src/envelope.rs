use rand::Rng;
use serde_json::{Map, Value};
use time::OffsetDateTime;

use oauthgate_provider_core::{
    CredentialContext, EnvelopeKind, ProviderConfig, ProviderError, ProviderId, ProviderResult,
};

use crate::providers::{antigravity, geminicli};

const REQUEST_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const REQUEST_ID_SUFFIX_LEN: usize = 9;

/// Per-client literals of the Cloud Code Assist envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudCodeProfile {
    pub user_agent: &'static str,
    pub request_id_prefix: &'static str,
    /// Only the sandbox-capable client sends `requestType`.
    pub request_type: Option<&'static str>,
}

pub fn cloud_code_profile(id: ProviderId) -> Option<CloudCodeProfile> {
    match id {
        ProviderId::GoogleAntigravity => Some(CloudCodeProfile {
            user_agent: antigravity::ENVELOPE_USER_AGENT,
            request_id_prefix: antigravity::REQUEST_ID_PREFIX,
            request_type: Some(antigravity::REQUEST_TYPE),
        }),
        ProviderId::GoogleGeminiCli => Some(CloudCodeProfile {
            user_agent: geminicli::ENVELOPE_USER_AGENT,
            request_id_prefix: geminicli::REQUEST_ID_PREFIX,
            request_type: None,
        }),
        _ => None,
    }
}

/// Shapes `body` into what `config`'s gateway expects.
///
/// OpenAI and Anthropic bodies are assumed to already be in the provider's
/// native shape and go out untouched.
pub fn wrap_body(
    body: Value,
    ctx: &CredentialContext,
    config: &ProviderConfig,
    model: &str,
) -> ProviderResult<Value> {
    match config.envelope {
        EnvelopeKind::Passthrough | EnvelopeKind::OpenAI | EnvelopeKind::Anthropic => Ok(body),
        EnvelopeKind::CloudCodeAssist => {
            let profile = cloud_code_profile(config.id).ok_or_else(|| {
                ProviderError::InvalidConfig(format!(
                    "{} has no cloud code assist profile",
                    config.id
                ))
            })?;
            Ok(wrap_cloud_code_assist(body, ctx, model, profile))
        }
    }
}

fn wrap_cloud_code_assist(
    body: Value,
    ctx: &CredentialContext,
    model: &str,
    profile: CloudCodeProfile,
) -> Value {
    let mut envelope = Map::new();
    envelope.insert(
        "project".to_string(),
        Value::String(ctx.project_id.clone().unwrap_or_default()),
    );
    envelope.insert("model".to_string(), Value::String(model.to_string()));
    envelope.insert("request".to_string(), body);
    envelope.insert(
        "userAgent".to_string(),
        Value::String(profile.user_agent.to_string()),
    );
    envelope.insert(
        "requestId".to_string(),
        Value::String(make_request_id(profile.request_id_prefix)),
    );
    if let Some(request_type) = profile.request_type {
        envelope.insert(
            "requestType".to_string(),
            Value::String(request_type.to_string()),
        );
    }
    Value::Object(envelope)
}

/// `{prefix}-{epoch millis}-{9 base-36 chars}`.
pub fn make_request_id(prefix: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::rng();
    let suffix: String = (0..REQUEST_ID_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..REQUEST_ID_ALPHABET.len());
            char::from(REQUEST_ID_ALPHABET[idx])
        })
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}
