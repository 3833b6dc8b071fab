use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use serde_json::json;
use tokio::time::Instant;

use oauthgate_core::dispatch::{DispatchOutcome, Dispatcher, RetryPolicy};
use oauthgate_core::upstream_client::UpstreamClient;
use oauthgate_provider_core::{
    CredentialContext, ProviderSettings, UpstreamFailure, UpstreamHttpRequest,
    UpstreamHttpResponse,
};
use oauthgate_provider_impl::{PreparedRequest, prepare_request};

type Reply = Result<UpstreamHttpResponse, UpstreamFailure>;

/// Replies from a fixed script and records every request it sees.
#[derive(Default)]
struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<(String, Instant)>>,
    hang: bool,
}

impl ScriptedClient {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    fn hanging() -> Arc<Self> {
        Arc::new(Self {
            hang: true,
            ..Default::default()
        })
    }

    fn urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl UpstreamClient for ScriptedClient {
    fn send<'a>(
        &'a self,
        req: UpstreamHttpRequest,
    ) -> Pin<Box<dyn Future<Output = Reply> + Send + 'a>> {
        self.seen.lock().unwrap().push((req.url, Instant::now()));
        if self.hang {
            return Box::pin(std::future::pending());
        }
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        Box::pin(async move { reply })
    }
}

fn response(status: u16, body: &'static str) -> Reply {
    Ok(UpstreamHttpResponse {
        status,
        body: Bytes::from_static(body.as_bytes()),
    })
}

fn prepared(provider: &str) -> PreparedRequest {
    let ctx = CredentialContext::new(provider, "tok").with_project_id("proj");
    prepare_request(
        &ctx,
        &ProviderSettings::default(),
        json!({"contents": []}),
        "gemini-3-pro",
    )
    .unwrap()
}

fn dispatcher(client: Arc<ScriptedClient>) -> Dispatcher {
    Dispatcher::new(client, RetryPolicy::default())
}

#[tokio::test(start_paused = true)]
async fn rate_limited_twice_then_success_walks_endpoints_with_backoff() {
    let client = ScriptedClient::new(vec![
        response(429, "slow down"),
        response(429, "slow down"),
        response(200, r#"{"ok":true}"#),
    ]);
    let prepared = prepared("google-antigravity");
    let started = Instant::now();

    let outcome = dispatcher(client.clone()).send(&prepared, 2).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Success {
            status: 200,
            body: json!({"ok": true})
        }
    );
    let config = prepared.config;
    assert_eq!(
        client.urls(),
        vec![
            config.url_for_attempt(0),
            config.url_for_attempt(1),
            config.url_for_attempt(2),
        ]
    );
    assert_eq!(config.url_for_attempt(1), config.url_for_attempt(2));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(6), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(7), "{elapsed:?}");

    let seen = client.seen.lock().unwrap();
    let first_gap = seen[1].1 - seen[0].1;
    let second_gap = seen[2].1 - seen[1].1;
    assert!(first_gap >= Duration::from_secs(2) && first_gap < Duration::from_secs(3));
    assert!(second_gap >= Duration::from_secs(4) && second_gap < Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn non_retryable_error_returns_after_one_call() {
    let client = ScriptedClient::new(vec![response(404, r#"{"error":"not found"}"#)]);
    let started = Instant::now();

    let outcome = dispatcher(client.clone())
        .send(&prepared("google-gemini-cli"), 2)
        .await;

    assert_eq!(client.calls(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(
        outcome.into_parts(),
        (404, json!({"error": "not found"}))
    );
}

#[tokio::test(start_paused = true)]
async fn non_json_error_body_is_wrapped() {
    let client = ScriptedClient::new(vec![response(401, "bad token")]);
    let outcome = dispatcher(client).send(&prepared("anthropic"), 2).await;
    assert_eq!(outcome.into_parts(), (401, json!({"error": "bad token"})));
}

#[tokio::test(start_paused = true)]
async fn resource_exhausted_text_is_retried() {
    let client = ScriptedClient::new(vec![
        response(400, r#"{"error":{"status":"resource_exhausted"}}"#),
        response(200, "{}"),
    ]);
    let outcome = dispatcher(client.clone())
        .send(&prepared("google-antigravity"), 2)
        .await;
    assert!(outcome.is_success());
    assert_eq!(client.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_synthesize_502() {
    let client = ScriptedClient::new(vec![
        response(503, "unavailable"),
        response(503, "still unavailable"),
    ]);

    let outcome = dispatcher(client.clone())
        .send(&prepared("google-antigravity"), 1)
        .await;

    assert_eq!(client.calls(), 2);
    assert_eq!(
        outcome,
        DispatchOutcome::Exhausted {
            attempts: 2,
            last_error: "503: still unavailable".to_string()
        }
    );
    let (status, body) = outcome.into_parts();
    assert_eq!(status, 502);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("2 attempts"), "{message}");
    assert!(message.contains("still unavailable"), "{message}");
}

#[tokio::test(start_paused = true)]
async fn zero_retries_makes_a_single_attempt() {
    let client = ScriptedClient::new(vec![response(500, "boom")]);
    let started = Instant::now();
    let outcome = dispatcher(client.clone())
        .send(&prepared("openai-codex"), 0)
        .await;
    assert_eq!(client.calls(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(outcome.status(), 502);
}

#[tokio::test(start_paused = true)]
async fn transport_errors_are_retried() {
    let client = ScriptedClient::new(vec![
        Err(UpstreamFailure::other("connection reset")),
        response(200, r#"{"candidates":[]}"#),
    ]);
    let outcome = dispatcher(client.clone())
        .send(&prepared("google-gemini-cli"), 2)
        .await;
    assert_eq!(client.calls(), 2);
    assert_eq!(outcome.into_parts(), (200, json!({"candidates": []})));
}

#[tokio::test(start_paused = true)]
async fn non_json_success_is_wrapped_as_response() {
    let client = ScriptedClient::new(vec![response(200, "data: hello")]);
    let outcome = dispatcher(client).send(&prepared("github-copilot"), 2).await;
    assert_eq!(
        outcome.into_parts(),
        (200, json!({"response": "data: hello"}))
    );
}

#[tokio::test(start_paused = true)]
async fn hung_attempt_times_out_and_counts_as_failure() {
    let client = ScriptedClient::hanging();
    let policy = RetryPolicy {
        request_timeout: Duration::from_secs(1),
        ..RetryPolicy::default()
    };
    let outcome = Dispatcher::new(client.clone(), policy)
        .send(&prepared("anthropic"), 0)
        .await;

    assert_eq!(client.calls(), 1);
    match outcome {
        DispatchOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 1);
            assert!(last_error.contains("timed out"), "{last_error}");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn dropping_the_call_stops_further_attempts() {
    let client = ScriptedClient::new(vec![
        response(503, "a"),
        response(503, "b"),
        response(503, "c"),
    ]);
    let dispatcher = dispatcher(client.clone());
    let prepared = prepared("google-antigravity");

    let cancelled =
        tokio::time::timeout(Duration::from_secs(1), dispatcher.send(&prepared, 2)).await;
    assert!(cancelled.is_err());

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(client.calls(), 1);
}

#[test]
fn backoff_doubles_from_base() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.backoff(0), Duration::from_secs(2));
    assert_eq!(policy.backoff(1), Duration::from_secs(4));
    assert_eq!(policy.backoff(2), Duration::from_secs(8));
}
