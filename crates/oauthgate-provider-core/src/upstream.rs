use std::fmt;

use bytes::Bytes;

use crate::headers::Headers;

/// One outbound POST, fully assembled.
#[derive(Debug, Clone)]
pub struct UpstreamHttpRequest {
    pub url: String,
    pub headers: Headers,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct UpstreamHttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamHttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamTransportErrorKind {
    Timeout,
    Connect,
    Tls,
    Other,
}

/// The outbound call did not produce an HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    Transport {
        kind: UpstreamTransportErrorKind,
        message: String,
    },
}

impl UpstreamFailure {
    pub fn timeout(message: impl Into<String>) -> Self {
        UpstreamFailure::Transport {
            kind: UpstreamTransportErrorKind::Timeout,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        UpstreamFailure::Transport {
            kind: UpstreamTransportErrorKind::Other,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> UpstreamTransportErrorKind {
        match self {
            UpstreamFailure::Transport { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamFailure::Transport { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for UpstreamFailure {}

impl fmt::Display for UpstreamTransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpstreamTransportErrorKind::Timeout => "timeout",
            UpstreamTransportErrorKind::Connect => "connect",
            UpstreamTransportErrorKind::Tls => "tls",
            UpstreamTransportErrorKind::Other => "other",
        })
    }
}
