//! Request dispatch and credential scoping for oauthgate.
//!
//! `dispatch` owns the retry loop over a provider's endpoints, `upstream_client`
//! the HTTP transport, and `ambient` the per-request override of configuration
//! that downstream code would otherwise read from the process environment.

pub mod ambient;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod upstream_client;

pub use ambient::{
    AmbientStore, MemoryAmbient, OverrideSet, ProcessEnv, SharedOverrideGuard, effective_env,
    effective_value, get_override, scoped_overrides, with_scoped_overrides, with_shared_overrides,
};
pub use dispatch::{DispatchOutcome, Dispatcher, RetryPolicy};
pub use error::AmbientError;
pub use gateway::Gateway;
pub use upstream_client::{UpstreamClient, UpstreamClientConfig, WreqUpstreamClient};
