use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::capture::CaptureError;
use crate::prompt::PromptError;
use crate::types::ValueKind;

#[derive(Debug, Error)]
pub enum EnvfigError {
    #[error("Unsupported config shape: expected a struct, found {0}")]
    UnsupportedShape(String),

    #[error("Env value '{0}' wasn't set: not found")]
    FieldNotFound(String),

    #[error("Can't set '{0}': field is not settable")]
    NotSettable(String),

    #[error("Invalid {kind} value '{value}' for '{name}': {reason}")]
    Parse {
        name: String,
        value: String,
        kind: ValueKind,
        reason: String,
    },

    #[error("Unsupported kind {kind} for '{name}'")]
    UnsupportedKind { name: String, kind: ValueKind },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Couldn't update environment variable(s): {}", join_failures(.failures))]
    EnvironmentUpdate { failures: Vec<EnvVarFailure> },

    #[error("Too many edit attempts ({attempts})")]
    TooManyAttempts { attempts: usize },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Dotenv {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("App name is required: call .app_name() on the builder")]
    AppNameRequired,

    #[error("Could not resolve the config directory")]
    NoConfigDir,
}

/// One environment variable that could not be set or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarFailure {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for EnvVarFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.reason)
    }
}

impl From<CaptureError> for EnvfigError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::UnsupportedShape(shape) => EnvfigError::UnsupportedShape(shape.to_string()),
            CaptureError::Custom(msg) => EnvfigError::Serialize(msg),
        }
    }
}

fn join_failures(failures: &[EnvVarFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
