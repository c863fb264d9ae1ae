//! Config operations: listing, saving, editing, and result types.
//!
//! Provides the logic behind the show / edit actions and the `ConfigResult`
//! enum that callers use to display results.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::binding::EnvConfig;
use crate::env::{Environment, ProcessEnv};
use crate::error::EnvfigError;
use crate::introspect;
use crate::persist;
use crate::types::{FieldValue, SecrecyMode};

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// Bound variables and their displayable values, in declaration order.
    Listing { entries: Vec<(String, String)> },
    /// Confirmation that the env file was written.
    Saved { path: PathBuf },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Saved { path } => write!(f, "Config saved to {}", path.display()),
        }
    }
}

/// List every bound variable of `config` with secrecy applied.
///
/// Hidden values show as `<suppressed>`, masked values as one `*` per
/// character, and unset optional values as `<not set>`.
pub fn list_fields<C: EnvConfig>(config: &C) -> Result<ConfigResult, EnvfigError> {
    let entries = introspect::fields(config)?
        .into_iter()
        .map(|d| {
            let display = match (&d.value, d.secrecy) {
                (FieldValue::Absent, SecrecyMode::None) => "<not set>".to_string(),
                _ => d.display_value(),
            };
            (d.name, display)
        })
        .collect();
    Ok(ConfigResult::Listing { entries })
}

/// Save `config` to `path` and mirror it into the process environment.
pub fn save<C: EnvConfig>(path: &Path, config: &C) -> Result<(), EnvfigError> {
    save_with(path, config, &mut ProcessEnv)
}

/// Save `config` to `path` and mirror it into `env`.
pub fn save_with<C: EnvConfig, E: Environment + ?Sized>(
    path: &Path,
    config: &C,
    env: &mut E,
) -> Result<(), EnvfigError> {
    persist::save_config(path, config, env)
}

/// Edit `config` on the terminal with the default attempt ceiling.
#[cfg(feature = "terminal")]
pub fn edit<C: EnvConfig>(config: &mut C) -> Result<(), EnvfigError> {
    let mut prompter = crate::terminal::TerminalPrompter::new();
    crate::edit::edit_config(config, &mut prompter, crate::edit::DEFAULT_MAX_ATTEMPTS)
}
