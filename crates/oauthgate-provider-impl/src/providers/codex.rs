use oauthgate_provider_core::{AuthScheme, EnvelopeKind, ProviderConfig, ProviderId};

use super::no_extra_headers;

pub(crate) const CONFIG: ProviderConfig = ProviderConfig {
    id: ProviderId::OpenaiCodex,
    endpoints: &["https://api.openai.com"],
    path: "/v1/chat/completions",
    headers_fn: no_extra_headers,
    envelope: EnvelopeKind::OpenAI,
    auth: AuthScheme::Bearer,
};
