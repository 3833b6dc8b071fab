use oauthgate_provider_core::{
    AuthScheme, EnvelopeKind, Headers, ProviderConfig, ProviderId, ProviderSettings,
};

use super::CLIENT_METADATA;

const SANDBOX_BASE_URL: &str = "https://daily-cloudcode-pa.sandbox.googleapis.com";
const PROD_BASE_URL: &str = "https://cloudcode-pa.googleapis.com";
const GOOG_API_CLIENT: &str = "google-cloud-sdk vscode_cloudshelleditor/0.1";

pub(crate) const ENVELOPE_USER_AGENT: &str = "antigravity";
pub(crate) const REQUEST_ID_PREFIX: &str = "agent";
pub(crate) const REQUEST_TYPE: &str = "agent";

pub(crate) const CONFIG: ProviderConfig = ProviderConfig {
    id: ProviderId::GoogleAntigravity,
    endpoints: &[SANDBOX_BASE_URL, PROD_BASE_URL],
    path: "/v1internal:streamGenerateContent",
    headers_fn: headers,
    envelope: EnvelopeKind::CloudCodeAssist,
    auth: AuthScheme::Bearer,
};

fn headers(settings: &ProviderSettings) -> Headers {
    vec![
        (
            "User-Agent".to_string(),
            format!("antigravity/{} darwin/arm64", settings.antigravity_version),
        ),
        ("X-Goog-Api-Client".to_string(), GOOG_API_CLIENT.to_string()),
        ("Client-Metadata".to_string(), CLIENT_METADATA.to_string()),
    ]
}
