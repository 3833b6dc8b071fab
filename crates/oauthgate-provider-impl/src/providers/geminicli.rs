use oauthgate_provider_core::{
    AuthScheme, EnvelopeKind, Headers, ProviderConfig, ProviderId, ProviderSettings,
};

use super::{CLIENT_METADATA, fixed};

const PROD_BASE_URL: &str = "https://cloudcode-pa.googleapis.com";

pub(crate) const ENVELOPE_USER_AGENT: &str = "pi-coding-agent";
pub(crate) const REQUEST_ID_PREFIX: &str = "pi";

pub(crate) const CONFIG: ProviderConfig = ProviderConfig {
    id: ProviderId::GoogleGeminiCli,
    endpoints: &[PROD_BASE_URL],
    path: "/v1internal:streamGenerateContent",
    headers_fn: headers,
    envelope: EnvelopeKind::CloudCodeAssist,
    auth: AuthScheme::Bearer,
};

fn headers(_settings: &ProviderSettings) -> Headers {
    fixed(&[
        ("User-Agent", "google-cloud-sdk vscode_cloudshelleditor/0.1"),
        ("X-Goog-Api-Client", "gl-node/22.17.0"),
        ("Client-Metadata", CLIENT_METADATA),
    ])
}
