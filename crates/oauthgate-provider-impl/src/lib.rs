//! Built-in upstream providers.
//!
//! This crate does not perform network IO. It resolves a provider id to its
//! static `ProviderConfig`, shapes the outbound body and assembles headers into
//! a `PreparedRequest` that the dispatcher sends once per attempt.

mod auth_extractor;
mod envelope;
mod prepare;
mod providers;
mod registry;

pub use auth_extractor::build_request_headers;
pub use envelope::{CloudCodeProfile, cloud_code_profile, make_request_id, wrap_body};
pub use prepare::{PreparedRequest, prepare_request};
pub use registry::{builtin_providers, config_for, resolve};
