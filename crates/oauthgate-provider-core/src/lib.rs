//! Core types shared by the oauthgate crates.
//!
//! Nothing here performs network IO. Provider implementations build an
//! `UpstreamHttpRequest` from a `CredentialContext`; a higher layer owns the
//! client, the retry loop and the ambient credential scope.

pub mod context;
pub mod errors;
pub mod headers;
pub mod provider;
pub mod upstream;

pub use context::{
    CredentialContext, OAUTH_PROVIDER_HEADER, OAUTH_TOKEN_HEADER, extract_context,
    extract_context_from_map,
};
pub use errors::{ProviderError, ProviderResult};
pub use headers::{Headers, header_get, header_merge, header_remove, header_set};
pub use provider::{
    ANTIGRAVITY_VERSION_ENV, AuthScheme, DEFAULT_ANTIGRAVITY_VERSION, EnvelopeKind, HeadersFn,
    ProviderConfig, ProviderId, ProviderSettings,
};
pub use upstream::{
    UpstreamFailure, UpstreamHttpRequest, UpstreamHttpResponse, UpstreamTransportErrorKind,
};
