use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, PoisonError};

use crate::error::AmbientError;

/// A process-wide configuration location that legacy code reads directly.
///
/// Values are `OsString` so a snapshot taken before an override restores the
/// exact prior bytes.
pub trait AmbientStore: Send + Sync {
    fn get(&self, key: &str) -> Option<OsString>;
    fn set(&self, key: &str, value: &OsStr) -> Result<(), AmbientError>;
    fn remove(&self, key: &str) -> Result<(), AmbientError>;
}

/// The real process environment.
///
/// Writes are only sound when nothing else in the process accesses the
/// environment concurrently; see the `SAFETY` note on `set`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

fn validate_key(key: &str) -> Result<(), AmbientError> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(AmbientError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl AmbientStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn set(&self, key: &str, value: &OsStr) -> Result<(), AmbientError> {
        validate_key(key)?;
        if value.as_encoded_bytes().contains(&0) {
            return Err(AmbientError::InvalidValue(key.to_string()));
        }
        // SAFETY: key and value were checked for the inputs `set_var` rejects.
        // Callers must guarantee that no other thread reads or writes the
        // environment while this runs: one shared-mode request at a time, on a
        // process whose other threads (resolvers, TLS, logging) do not touch the
        // environment. The binary runs a current-thread runtime in this mode.
        unsafe { std::env::set_var(key, value) };
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AmbientError> {
        validate_key(key)?;
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        Ok(())
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryAmbient {
    values: Mutex<HashMap<String, OsString>>,
}

impl MemoryAmbient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        Self {
            values: Mutex::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, OsString> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AmbientStore for MemoryAmbient {
    fn get(&self, key: &str) -> Option<OsString> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &OsStr) -> Result<(), AmbientError> {
        validate_key(key)?;
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_os_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AmbientError> {
        validate_key(key)?;
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
