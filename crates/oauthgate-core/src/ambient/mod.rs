//! Per-request credential overrides for code that reads ambient configuration.
//!
//! Two mechanisms, both keyed by the same `OverrideSet`:
//!
//! * [`with_scoped_overrides`] installs the set in task-local storage. Code on
//!   the request's task sees it through [`get_override`] / [`effective_value`]
//!   and concurrent requests never observe each other's values.
//! * [`with_shared_overrides`] additionally writes the set into an
//!   [`AmbientStore`] (normally the process environment) for code that only
//!   reads `std::env`. This is a compatibility shim: the store is a single
//!   process-wide resource, so it is only correct while at most one such request
//!   is in flight. Nothing enforces that; it is a deployment contract.
//!
//! [`AmbientStore`] is the only seam through which shared state is mutated.

mod overrides;
mod scope;
mod shared;
mod store;

pub use overrides::{
    ANTHROPIC_API_KEY, GEMINI_API_KEY, GOOGLE_CLOUD_PROJECT, OPENAI_API_KEY, OverrideSet,
    ambient_key_for,
};
pub use scope::{
    effective_env, effective_value, get_override, scoped_overrides, with_scoped_overrides,
};
pub use shared::{SharedOverrideGuard, with_shared_overrides};
pub use store::{AmbientStore, MemoryAmbient, ProcessEnv};
