use std::ffi::OsString;
use std::future::Future;
use std::sync::Arc;

use super::overrides::OverrideSet;
use super::store::AmbientStore;

tokio::task_local! {
    static SCOPED_OVERRIDES: Arc<OverrideSet>;
}

/// Runs `fut` with `overrides` visible to [`get_override`] on the same task.
///
/// Task-locals do not follow `tokio::spawn`; code that spawns must re-enter the
/// scope with [`scoped_overrides`].
pub async fn with_scoped_overrides<F>(overrides: impl Into<Arc<OverrideSet>>, fut: F) -> F::Output
where
    F: Future,
{
    SCOPED_OVERRIDES.scope(overrides.into(), fut).await
}

/// The override set of the current request, if any.
pub fn scoped_overrides() -> Option<Arc<OverrideSet>> {
    SCOPED_OVERRIDES.try_with(Arc::clone).ok()
}

pub fn get_override(key: &str) -> Option<String> {
    SCOPED_OVERRIDES
        .try_with(|set| set.get(key).map(str::to_string))
        .ok()
        .flatten()
}

/// Scoped override first, then the ambient store.
pub fn effective_value(store: &dyn AmbientStore, key: &str) -> Option<OsString> {
    get_override(key)
        .map(OsString::from)
        .or_else(|| store.get(key))
}

/// Drop-in for `std::env::var(key).ok()` that honours the request's overrides.
pub fn effective_env(key: &str) -> Option<String> {
    get_override(key).or_else(|| std::env::var(key).ok())
}
