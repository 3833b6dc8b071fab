use serde_json::{Value, json};

/// Upstream error text is cut to this many characters before it is matched or
/// echoed back.
pub const ERROR_TEXT_LIMIT: usize = 500;

const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Rate limits, server errors and quota exhaustion are worth another attempt.
/// Everything else (401, 403, 404, 400, ...) goes straight back to the caller.
pub fn is_retryable(status: u16, error_text: &str) -> bool {
    status == 429
        || status >= 500
        || error_text
            .to_ascii_uppercase()
            .contains(RESOURCE_EXHAUSTED)
}

pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parsed JSON, or the raw text under `"response"`.
pub fn success_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| json!({ "response": String::from_utf8_lossy(bytes) }))
}

/// Parsed JSON, or the truncated text under `"error"`.
pub fn error_body(bytes: &[u8], error_text: &str) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| json!({ "error": error_text }))
}
