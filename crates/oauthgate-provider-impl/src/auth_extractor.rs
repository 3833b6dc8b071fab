use oauthgate_provider_core::{
    AuthScheme, CredentialContext, Headers, ProviderConfig, ProviderSettings, header_merge,
    header_set,
};

fn set_bearer(headers: &mut Headers, access_token: &str) {
    header_set(headers, "Authorization", format!("Bearer {access_token}"));
}

fn set_content_type_json(headers: &mut Headers) {
    header_set(headers, "Content-Type", "application/json");
}

/// Auth and content-type first, then the provider's fixed set layered on top.
pub fn build_request_headers(
    ctx: &CredentialContext,
    config: &ProviderConfig,
    settings: &ProviderSettings,
) -> Headers {
    let mut headers = Vec::new();
    match config.auth {
        AuthScheme::Bearer => set_bearer(&mut headers, &ctx.token),
    }
    set_content_type_json(&mut headers);
    header_merge(&mut headers, config.provider_headers(settings));
    headers
}
