//! Retry/backoff loop over a provider's ordered endpoint list.
//!
//! Each call walks an explicit state machine:
//!
//! ```text
//! Attempting(n) --success / non-retryable--> Done
//! Attempting(n) --retryable, n < max-------> Waiting(n + 1, base * 2^n) --> Attempting(n + 1)
//! Attempting(n) --retryable, n == max------> Done(exhausted)
//! ```
//!
//! All state is local to one `send` call. Dropping the returned future
//! abandons the in-flight request or pending backoff sleep immediately.

mod classify;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::Instant;
use tracing::{info, warn};

use oauthgate_provider_core::{ProviderId, UpstreamFailure, UpstreamHttpResponse};
use oauthgate_provider_impl::PreparedRequest;

use crate::upstream_client::UpstreamClient;

pub use classify::{ERROR_TEXT_LIMIT, error_body, is_retryable, success_body, truncate_chars};

pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const BASE_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Synthetic status returned when every attempt failed.
pub const EXHAUSTED_STATUS: u16 = 502;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: BASE_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// Delay after the 0-based `attempt` failed.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Upstream answered below 400.
    Success { status: u16, body: Value },
    /// Upstream answered with a non-retryable error; passed through verbatim.
    Terminal { status: u16, body: Value },
    /// Every attempt failed with a retryable status or a transport error.
    Exhausted { attempts: u32, last_error: String },
}

impl DispatchOutcome {
    pub fn status(&self) -> u16 {
        match self {
            DispatchOutcome::Success { status, .. } | DispatchOutcome::Terminal { status, .. } => {
                *status
            }
            DispatchOutcome::Exhausted { .. } => EXHAUSTED_STATUS,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success { .. })
    }

    pub fn into_parts(self) -> (u16, Value) {
        match self {
            DispatchOutcome::Success { status, body }
            | DispatchOutcome::Terminal { status, body } => (status, body),
            DispatchOutcome::Exhausted {
                attempts,
                last_error,
            } => (
                EXHAUSTED_STATUS,
                json!({
                    "error": format!(
                        "All endpoints failed after {attempts} attempts. Last error: {last_error}"
                    )
                }),
            ),
        }
    }
}

#[derive(Debug)]
enum RetryState {
    Attempting { attempt: u32 },
    Waiting { next_attempt: u32, delay: Duration },
    Done(DispatchOutcome),
}

enum AttemptResult {
    Finished(DispatchOutcome),
    Retryable(String),
}

#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn UpstreamClient>,
    policy: RetryPolicy,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn UpstreamClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `prepared` with up to `max_retries` additional attempts.
    pub async fn send(&self, prepared: &PreparedRequest, max_retries: u32) -> DispatchOutcome {
        let provider = prepared.config.id;
        let mut last_error = String::new();
        let mut state = RetryState::Attempting { attempt: 0 };
        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    match self.attempt(prepared, provider, attempt).await {
                        AttemptResult::Finished(outcome) => RetryState::Done(outcome),
                        AttemptResult::Retryable(description) => {
                            last_error = description;
                            self.after_failure(provider, attempt, max_retries, &last_error)
                        }
                    }
                }
                RetryState::Waiting {
                    next_attempt,
                    delay,
                } => {
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting {
                        attempt: next_attempt,
                    }
                }
                RetryState::Done(outcome) => {
                    if let DispatchOutcome::Exhausted { attempts, .. } = &outcome {
                        warn!(
                            event = "upstream_exhausted",
                            provider = %provider,
                            attempts = *attempts,
                            last_error = %last_error
                        );
                    }
                    return outcome;
                }
            };
        }
    }

    fn after_failure(
        &self,
        provider: ProviderId,
        attempt: u32,
        max_retries: u32,
        last_error: &str,
    ) -> RetryState {
        if attempt < max_retries {
            let delay = self.policy.backoff(attempt);
            warn!(
                event = "upstream_retry",
                provider = %provider,
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                error = %last_error
            );
            RetryState::Waiting {
                next_attempt: attempt + 1,
                delay,
            }
        } else {
            RetryState::Done(DispatchOutcome::Exhausted {
                attempts: max_retries.saturating_add(1),
                last_error: last_error.to_string(),
            })
        }
    }

    async fn attempt(
        &self,
        prepared: &PreparedRequest,
        provider: ProviderId,
        attempt: u32,
    ) -> AttemptResult {
        let request = prepared.for_attempt(attempt);
        info!(
            event = "upstream_request",
            provider = %provider,
            attempt = attempt,
            url = %request.url
        );
        let started_at = Instant::now();
        let sent = tokio::time::timeout(self.policy.request_timeout, self.client.send(request))
            .await
            .unwrap_or_else(|_| {
                Err(UpstreamFailure::timeout(format!(
                    "request timed out after {}s",
                    self.policy.request_timeout.as_secs()
                )))
            });
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        match sent {
            Ok(response) => {
                info!(
                    event = "upstream_response",
                    provider = %provider,
                    attempt = attempt,
                    status = response.status,
                    elapsed_ms = elapsed_ms
                );
                classify_response(&response)
            }
            Err(failure) => {
                warn!(
                    event = "upstream_response",
                    provider = %provider,
                    attempt = attempt,
                    status = "error",
                    kind = %failure.kind(),
                    elapsed_ms = elapsed_ms,
                    error = %failure
                );
                AttemptResult::Retryable(failure.to_string())
            }
        }
    }
}

fn classify_response(response: &UpstreamHttpResponse) -> AttemptResult {
    let status = response.status;
    if status < 400 {
        return AttemptResult::Finished(DispatchOutcome::Success {
            status,
            body: success_body(&response.body),
        });
    }
    let text = response.text();
    let error_text = truncate_chars(&text, ERROR_TEXT_LIMIT);
    if is_retryable(status, error_text) {
        return AttemptResult::Retryable(format!("{status}: {error_text}"));
    }
    AttemptResult::Finished(DispatchOutcome::Terminal {
        status,
        body: error_body(&response.body, error_text),
    })
}
