use oauthgate_provider_core::{AuthScheme, EnvelopeKind, ProviderConfig, ProviderId};

use super::no_extra_headers;

pub(crate) const CONFIG: ProviderConfig = ProviderConfig {
    id: ProviderId::Anthropic,
    endpoints: &["https://api.anthropic.com"],
    path: "/v1/messages",
    headers_fn: no_extra_headers,
    envelope: EnvelopeKind::Anthropic,
    auth: AuthScheme::Bearer,
};
