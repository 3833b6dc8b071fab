use oauthgate_provider_core::{ProviderConfig, ProviderError, ProviderId, ProviderResult};

use crate::providers::{anthropic, antigravity, codex, copilot, geminicli};

static BUILTIN: [ProviderConfig; 5] = [
    antigravity::CONFIG,
    geminicli::CONFIG,
    copilot::CONFIG,
    anthropic::CONFIG,
    codex::CONFIG,
];

pub fn builtin_providers() -> &'static [ProviderConfig] {
    &BUILTIN
}

pub fn config_for(id: ProviderId) -> &'static ProviderConfig {
    match id {
        ProviderId::GoogleAntigravity => &BUILTIN[0],
        ProviderId::GoogleGeminiCli => &BUILTIN[1],
        ProviderId::GithubCopilot => &BUILTIN[2],
        ProviderId::Anthropic => &BUILTIN[3],
        ProviderId::OpenaiCodex => &BUILTIN[4],
    }
}

/// Looks up a raw provider id as it arrived on the request.
pub fn resolve(provider: &str) -> ProviderResult<&'static ProviderConfig> {
    ProviderId::parse(provider)
        .map(config_for)
        .ok_or_else(|| ProviderError::UnknownProvider(provider.to_string()))
}
