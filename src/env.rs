//! Environment variable access.
//!
//! Loading, saving and listing go through an [`Environment`] so tests can run
//! against a [`MemoryEnv`] instead of the real process state.

use std::collections::BTreeMap;

use thiserror::Error;

/// Why a variable couldn't be set or removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvVarError {
    #[error("empty name")]
    EmptyName,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid value")]
    InvalidValue,
}

/// Names must be non-empty and free of `=` and NUL.
pub fn validate_name(name: &str) -> Result<(), EnvVarError> {
    if name.is_empty() {
        return Err(EnvVarError::EmptyName);
    }
    if name.contains(['=', '\0']) {
        return Err(EnvVarError::InvalidName);
    }
    Ok(())
}

/// Values must be free of NUL.
pub fn validate_value(value: &str) -> Result<(), EnvVarError> {
    if value.contains('\0') {
        return Err(EnvVarError::InvalidValue);
    }
    Ok(())
}

/// A mutable set of environment variables.
pub trait Environment {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str) -> Result<(), EnvVarError>;
    fn remove(&mut self, name: &str) -> Result<(), EnvVarError>;
}

/// The real process environment.
///
/// Writes are process-global; callers must not mutate the environment from
/// several threads at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        validate_name(name).ok()?;
        std::env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), EnvVarError> {
        validate_name(name)?;
        validate_value(value)?;
        // SAFETY: the name and value were validated above, and envfig sessions
        // are single-threaded as documented on `ProcessEnv`.
        unsafe { std::env::set_var(name, value) };
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), EnvVarError> {
        validate_name(name)?;
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(name) };
        Ok(())
    }
}

/// An in-memory environment, e.g. for tests or dry runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environment for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), EnvVarError> {
        validate_name(name)?;
        validate_value(value)?;
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), EnvVarError> {
        validate_name(name)?;
        self.vars.remove(name);
        Ok(())
    }
}
