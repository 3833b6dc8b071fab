use std::collections::BTreeMap;

use oauthgate_provider_core::{CredentialContext, ProviderId};

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const GOOGLE_CLOUD_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";

/// Ambient key legacy code reads the provider's API key from.
pub fn ambient_key_for(id: ProviderId) -> &'static str {
    match id {
        ProviderId::GoogleAntigravity | ProviderId::GoogleGeminiCli => GEMINI_API_KEY,
        ProviderId::GithubCopilot | ProviderId::OpenaiCodex => OPENAI_API_KEY,
        ProviderId::Anthropic => ANTHROPIC_API_KEY,
    }
}

/// Configuration key to override value, for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    values: BTreeMap<String, String>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` for providers outside the registry; those requests run with the
    /// ambient configuration untouched.
    pub fn for_context(ctx: &CredentialContext) -> Option<Self> {
        let id = ctx.provider_id()?;
        let mut set = Self::new();
        set.insert(ambient_key_for(id), ctx.token.clone());
        if id.uses_json_token()
            && let Some(project_id) = ctx.project_id.as_deref().filter(|p| !p.is_empty())
        {
            set.insert(GOOGLE_CLOUD_PROJECT, project_id);
        }
        Some(set)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_providers_also_set_project() {
        let ctx = CredentialContext::new("google-antigravity", "T").with_project_id("P");
        let set = OverrideSet::for_context(&ctx).unwrap();
        assert_eq!(set.get(GEMINI_API_KEY), Some("T"));
        assert_eq!(set.get(GOOGLE_CLOUD_PROJECT), Some("P"));
        assert_eq!(set.len(), 2);

        let ctx = CredentialContext::new("google-gemini-cli", "T");
        let set = OverrideSet::for_context(&ctx).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(GOOGLE_CLOUD_PROJECT), None);
    }

    #[test]
    fn key_mapping_per_provider() {
        let cases = [
            ("github-copilot", OPENAI_API_KEY),
            ("openai-codex", OPENAI_API_KEY),
            ("anthropic", ANTHROPIC_API_KEY),
        ];
        for (provider, key) in cases {
            let ctx = CredentialContext::new(provider, "tok").with_project_id("ignored");
            let set = OverrideSet::for_context(&ctx).unwrap();
            assert_eq!(set.keys().collect::<Vec<_>>(), vec![key]);
            assert_eq!(set.get(key), Some("tok"));
        }
    }

    #[test]
    fn unknown_provider_has_no_overrides() {
        let ctx = CredentialContext::new("vertex", "tok");
        assert!(OverrideSet::for_context(&ctx).is_none());
    }
}
