use oauthgate_provider_core::{
    AuthScheme, EnvelopeKind, Headers, ProviderConfig, ProviderId, ProviderSettings,
};

use super::fixed;

pub(crate) const CONFIG: ProviderConfig = ProviderConfig {
    id: ProviderId::GithubCopilot,
    endpoints: &["https://api.individual.githubcopilot.com"],
    path: "/chat/completions",
    headers_fn: headers,
    envelope: EnvelopeKind::OpenAI,
    auth: AuthScheme::Bearer,
};

fn headers(_settings: &ProviderSettings) -> Headers {
    fixed(&[
        ("User-Agent", "GitHubCopilotChat/0.35.0"),
        ("Editor-Version", "vscode/1.107.0"),
        ("Editor-Plugin-Version", "copilot-chat/0.35.0"),
        ("Copilot-Integration-Id", "vscode-chat"),
        ("Openai-Intent", "conversation-edits"),
    ])
}
