use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error};

use super::overrides::OverrideSet;
use super::scope::with_scoped_overrides;
use super::store::AmbientStore;
use crate::error::AmbientError;

/// Ambient values overwritten for one request, restored when the guard goes.
///
/// Prefer [`SharedOverrideGuard::restore`], which reports write failures. If the
/// guard is dropped instead (error path, panic, or the request future being
/// cancelled) restoration still runs and failures are logged.
pub struct SharedOverrideGuard {
    store: Arc<dyn AmbientStore>,
    saved: Vec<(String, Option<OsString>)>,
    restored: bool,
}

impl SharedOverrideGuard {
    /// Snapshots each key (present or absent) and writes its override.
    ///
    /// If a write fails, keys already overwritten are put back before the
    /// error is returned.
    pub fn install(
        store: Arc<dyn AmbientStore>,
        overrides: &OverrideSet,
    ) -> Result<Self, AmbientError> {
        let mut guard = Self {
            store,
            saved: Vec::with_capacity(overrides.len()),
            restored: false,
        };
        for (key, value) in overrides.iter() {
            let previous = guard.store.get(key);
            guard.store.set(key, OsStr::new(value))?;
            guard.saved.push((key.to_string(), previous));
        }
        debug!(keys = guard.saved.len(), "ambient overrides installed");
        Ok(guard)
    }

    pub fn restore(mut self) -> Result<(), AmbientError> {
        self.restored = true;
        self.restore_all()
    }

    /// Every key is attempted; the first failure is returned.
    fn restore_all(&self) -> Result<(), AmbientError> {
        let mut first_err = None;
        for (key, previous) in self.saved.iter().rev() {
            let result = match previous {
                Some(value) => self.store.set(key, value),
                None => self.store.remove(key),
            };
            if let Err(err) = result {
                error!(key = %key, error = %err, "ambient restore failed");
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for SharedOverrideGuard {
    fn drop(&mut self) {
        if !self.restored {
            self.restored = true;
            let _ = self.restore_all();
        }
    }
}

/// Runs `fut` with `overrides` written into `store` and installed as scoped
/// overrides, restoring every touched key afterwards.
///
/// Not safe with more than one request using this mode in flight: `store` is
/// process-wide and a second request would observe (and later clobber) the
/// first request's credentials. Use [`with_scoped_overrides`] where callers can
/// be changed to consult [`super::effective_value`].
pub async fn with_shared_overrides<F>(
    store: Arc<dyn AmbientStore>,
    overrides: OverrideSet,
    fut: F,
) -> Result<F::Output, AmbientError>
where
    F: Future,
{
    let guard = SharedOverrideGuard::install(store, &overrides)?;
    let output = with_scoped_overrides(overrides, fut).await;
    guard.restore()?;
    Ok(output)
}
