use std::sync::Arc;

use serde_json::{Value, json};

use oauthgate_provider_core::{CredentialContext, ProviderResult, ProviderSettings};
use oauthgate_provider_impl::prepare_request;

use crate::dispatch::{DispatchOutcome, Dispatcher, RetryPolicy};
use crate::upstream_client::UpstreamClient;

/// Turns a credential context plus request body into an upstream call.
#[derive(Clone)]
pub struct Gateway {
    dispatcher: Dispatcher,
    settings: Arc<ProviderSettings>,
}

impl Gateway {
    pub fn new(
        client: Arc<dyn UpstreamClient>,
        settings: ProviderSettings,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(client, policy),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn policy(&self) -> &RetryPolicy {
        self.dispatcher.policy()
    }

    /// Fails only when the request cannot be built (unknown provider, body
    /// not serializable). Upstream failures are reported in the outcome.
    pub async fn call(
        &self,
        ctx: &CredentialContext,
        body: Value,
        model: &str,
    ) -> ProviderResult<DispatchOutcome> {
        self.call_with_retries(ctx, body, model, self.dispatcher.policy().max_retries)
            .await
    }

    pub async fn call_with_retries(
        &self,
        ctx: &CredentialContext,
        body: Value,
        model: &str,
        max_retries: u32,
    ) -> ProviderResult<DispatchOutcome> {
        let prepared = prepare_request(ctx, &self.settings, body, model)?;
        Ok(self.dispatcher.send(&prepared, max_retries).await)
    }

    /// `(status, body)` for a request boundary; build errors become
    /// `{"error": message}` with the error's own status.
    pub async fn respond(&self, ctx: &CredentialContext, body: Value, model: &str) -> (u16, Value) {
        match self.call(ctx, body, model).await {
            Ok(outcome) => outcome.into_parts(),
            Err(err) => (err.status(), json!({ "error": err.to_string() })),
        }
    }
}
