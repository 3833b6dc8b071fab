use http::{HeaderMap, HeaderValue};
use oauthgate_provider_core::{
    CredentialContext, Headers, extract_context, extract_context_from_map,
};

fn headers(provider: &str, token: &str) -> Headers {
    vec![
        ("X-OAuth-Provider".to_string(), provider.to_string()),
        ("X-OAuth-Token".to_string(), token.to_string()),
    ]
}

#[test]
fn json_token_providers_unwrap_token_and_project() {
    for provider in ["google-antigravity", "google-gemini-cli"] {
        let ctx = extract_context(&headers(provider, r#"{"token":"T","projectId":"P"}"#))
            .expect("context");
        assert_eq!(ctx.provider, provider);
        assert_eq!(ctx.token, "T");
        assert_eq!(ctx.project_id.as_deref(), Some("P"));
    }
}

#[test]
fn non_json_token_is_used_verbatim() {
    for provider in ["google-antigravity", "google-gemini-cli"] {
        let ctx = extract_context(&headers(provider, "ya29.plain-access-token")).expect("context");
        assert_eq!(ctx.token, "ya29.plain-access-token");
        assert_eq!(ctx.project_id, None);
    }
}

#[test]
fn wrong_json_shapes_degrade_to_raw_token() {
    for raw in [r#"{"token": 42}"#, r#"["a","b"]"#, "123", r#"{"token":"T""#] {
        let ctx = extract_context(&headers("google-antigravity", raw)).expect("context");
        assert_eq!(ctx.token, raw);
        assert_eq!(ctx.project_id, None);
    }
}

#[test]
fn json_without_token_keeps_raw_string_but_captures_project() {
    let raw = r#"{"projectId":"proj-1"}"#;
    let ctx = extract_context(&headers("google-gemini-cli", raw)).expect("context");
    assert_eq!(ctx.token, raw);
    assert_eq!(ctx.project_id.as_deref(), Some("proj-1"));
}

#[test]
fn other_providers_never_decode_json() {
    let raw = r#"{"token":"T","projectId":"P"}"#;
    let ctx = extract_context(&headers("anthropic", raw)).expect("context");
    assert_eq!(ctx.token, raw);
    assert_eq!(ctx.project_id, None);
}

#[test]
fn unknown_provider_still_yields_a_context() {
    let ctx = extract_context(&headers("vertex", "tok")).expect("context");
    assert_eq!(ctx.provider_id(), None);
    assert_eq!(ctx, CredentialContext::new("vertex", "tok"));
}

#[test]
fn missing_or_empty_headers_mean_no_context() {
    let only_provider: Headers = vec![("x-oauth-provider".to_string(), "anthropic".to_string())];
    assert!(extract_context(&only_provider).is_none());
    assert!(extract_context(&headers("", "tok")).is_none());
    assert!(extract_context(&headers("anthropic", "")).is_none());
    assert!(extract_context(&Vec::new()).is_none());
}

#[test]
fn lookup_is_case_insensitive() {
    let lower: Headers = vec![
        ("x-oauth-provider".to_string(), "openai-codex".to_string()),
        ("x-oauth-token".to_string(), "sk-1".to_string()),
    ];
    let ctx = extract_context(&lower).expect("context");
    assert_eq!(ctx.token, "sk-1");

    let mut map = HeaderMap::new();
    map.insert("x-oauth-provider", HeaderValue::from_static("github-copilot"));
    map.insert("x-oauth-token", HeaderValue::from_static("gho_x"));
    let ctx = extract_context_from_map(&map).expect("context");
    assert_eq!(ctx.provider, "github-copilot");
    assert_eq!(ctx.token, "gho_x");
}

#[test]
fn debug_output_redacts_token() {
    let ctx = CredentialContext::new("anthropic", "sk-ant-secret");
    let rendered = format!("{ctx:?}");
    assert!(!rendered.contains("sk-ant-secret"));
    assert!(rendered.contains("<redacted>"));
}
