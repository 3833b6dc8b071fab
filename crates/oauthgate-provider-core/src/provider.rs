use std::fmt;

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// Antigravity client version advertised in its `User-Agent`.
pub const DEFAULT_ANTIGRAVITY_VERSION: &str = "1.15.8";
pub const ANTIGRAVITY_VERSION_ENV: &str = "PI_AI_ANTIGRAVITY_VERSION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    GoogleAntigravity,
    GoogleGeminiCli,
    GithubCopilot,
    Anthropic,
    OpenaiCodex,
}

impl ProviderId {
    pub const ALL: [ProviderId; 5] = [
        ProviderId::GoogleAntigravity,
        ProviderId::GoogleGeminiCli,
        ProviderId::GithubCopilot,
        ProviderId::Anthropic,
        ProviderId::OpenaiCodex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::GoogleAntigravity => "google-antigravity",
            ProviderId::GoogleGeminiCli => "google-gemini-cli",
            ProviderId::GithubCopilot => "github-copilot",
            ProviderId::Anthropic => "anthropic",
            ProviderId::OpenaiCodex => "openai-codex",
        }
    }

    /// Exact match; ids are not normalized.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == value)
    }

    /// Google-family providers carry `{"token", "projectId"}` JSON in the token header.
    pub fn uses_json_token(&self) -> bool {
        matches!(
            self,
            ProviderId::GoogleAntigravity | ProviderId::GoogleGeminiCli
        )
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the body the provider gateway expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Passthrough,
    CloudCodeAssist,
    OpenAI,
    Anthropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
}

/// Values that feed header construction. Passed down explicitly instead of
/// being read from the process environment at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub antigravity_version: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            antigravity_version: DEFAULT_ANTIGRAVITY_VERSION.to_string(),
        }
    }
}

impl ProviderSettings {
    /// Reads `PI_AI_ANTIGRAVITY_VERSION`, falling back to the default when it is
    /// unset or blank.
    pub fn from_env() -> Self {
        let version = std::env::var(ANTIGRAVITY_VERSION_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        match version {
            Some(antigravity_version) => Self {
                antigravity_version,
            },
            None => Self::default(),
        }
    }
}

pub type HeadersFn = fn(&ProviderSettings) -> Headers;

/// Static, process-lifetime description of one upstream provider.
///
/// `endpoints` is never empty: the first entries are preferred (sandbox), later
/// ones are fallbacks.
#[derive(Clone, Copy)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub endpoints: &'static [&'static str],
    pub path: &'static str,
    pub headers_fn: HeadersFn,
    pub envelope: EnvelopeKind,
    pub auth: AuthScheme,
}

impl ProviderConfig {
    /// Endpoint for a 0-based attempt. Attempts past the fallback list reuse the
    /// last entry.
    pub fn endpoint_for_attempt(&self, attempt: u32) -> &'static str {
        let last = self.endpoints.len().saturating_sub(1);
        let idx = usize::try_from(attempt).unwrap_or(usize::MAX).min(last);
        self.endpoints[idx]
    }

    pub fn url_for_attempt(&self, attempt: u32) -> String {
        format!(
            "{}{}",
            self.endpoint_for_attempt(attempt).trim_end_matches('/'),
            self.path
        )
    }

    pub fn provider_headers(&self, settings: &ProviderSettings) -> Headers {
        (self.headers_fn)(settings)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field("endpoints", &self.endpoints)
            .field("path", &self.path)
            .field("envelope", &self.envelope)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
