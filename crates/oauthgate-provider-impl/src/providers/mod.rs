pub(crate) mod anthropic;
pub(crate) mod antigravity;
pub(crate) mod codex;
pub(crate) mod copilot;
pub(crate) mod geminicli;

use oauthgate_provider_core::{Headers, ProviderSettings};

/// Sent by both Cloud Code Assist clients.
pub(crate) const CLIENT_METADATA: &str =
    r#"{"ideType":"IDE_UNSPECIFIED","platform":"PLATFORM_UNSPECIFIED","pluginType":"GEMINI"}"#;

pub(crate) fn no_extra_headers(_settings: &ProviderSettings) -> Headers {
    Vec::new()
}

pub(crate) fn fixed(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}
