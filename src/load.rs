//! Loading: import an env file into the process environment, bind the config
//! struct from it, and mirror the bound values back.
//!
//! Precedence, highest first:
//!
//! 1. Variables already set in the process environment
//! 2. Entries of the env file
//! 3. `default` values declared on the struct
//!
//! A field with no default that ends up unset fails the load.

use std::path::Path;

use tracing::{debug, warn};

use crate::binding::EnvConfig;
use crate::codec;
use crate::env::{Environment, ProcessEnv};
use crate::error::{EnvVarFailure, EnvfigError};
use crate::introspect;

/// Copy the entries of the env file at `path` into `env`, skipping variables
/// that are already set. Returns how many were imported.
///
/// A missing file imports nothing. A malformed file fails with
/// [`EnvfigError::Dotenv`] before anything is imported.
pub fn import_dotenv<E: Environment + ?Sized>(
    path: &Path,
    env: &mut E,
) -> Result<usize, EnvfigError> {
    let dotenv_err = |source: dotenvy::Error| EnvfigError::Dotenv {
        path: path.to_path_buf(),
        source,
    };

    let entries = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter
            .collect::<Result<Vec<(String, String)>, _>>()
            .map_err(dotenv_err)?,
        Err(e) if e.not_found() => {
            warn!(path = %path.display(), "ignored missing env file");
            return Ok(0);
        }
        Err(e) => return Err(dotenv_err(e)),
    };

    let mut imported = 0;
    let mut failures = Vec::new();
    for (name, value) in entries {
        if env.get(&name).is_some() {
            continue;
        }
        match env.set(&name, &value) {
            Ok(()) => imported += 1,
            Err(e) => failures.push(EnvVarFailure {
                name,
                reason: e.to_string(),
            }),
        }
    }

    if !failures.is_empty() {
        return Err(EnvfigError::EnvironmentUpdate { failures });
    }
    debug!(path = %path.display(), imported, "imported env file");
    Ok(imported)
}

/// Load `C` from the env file at `path` and the process environment.
///
/// On success every bound value is also present in the process environment;
/// absent optional values are removed from it. Variables that can't be
/// mirrored are logged and skipped.
pub fn load<C: EnvConfig>(path: &Path) -> Result<C, EnvfigError> {
    let mut env = ProcessEnv;
    import_dotenv(path, &mut env)?;

    let config = C::builder().env().load()?;
    mirror(&config, &mut env)?;
    Ok(config)
}

fn mirror<C: EnvConfig, E: Environment + ?Sized>(
    config: &C,
    env: &mut E,
) -> Result<(), EnvfigError> {
    let map = codec::config_map(&introspect::fields(config)?);
    match codec::apply(env, &map) {
        Err(EnvfigError::EnvironmentUpdate { failures }) => {
            for failure in &failures {
                warn!(name = %failure.name, reason = %failure.reason, "could not mirror loaded value");
            }
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::FieldMut;
    use crate::env::MemoryEnv;
    use crate::fixtures::test::env_lock;
    use confique::Config;
    use serde::{Deserialize, Serialize};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    struct LoadConfig {
        #[config(env = "ENVFIG_LOAD_NAME")]
        name: String,
        #[config(env = "ENVFIG_LOAD_PORT", default = 8080)]
        port: u16,
        #[config(env = "ENVFIG_LOAD_TOKEN")]
        token: Option<String>,
    }

    impl EnvConfig for LoadConfig {
        fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
            match field {
                "name" => Some((&mut self.name).into()),
                "port" => Some((&mut self.port).into()),
                _ => None,
            }
        }
    }

    const VARS: &[&str] = &["ENVFIG_LOAD_NAME", "ENVFIG_LOAD_PORT", "ENVFIG_LOAD_TOKEN"];

    fn clear_vars() {
        let mut env = ProcessEnv;
        for name in VARS {
            env.remove(name).unwrap();
        }
    }

    fn env_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("app.env");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn import_skips_variables_already_set() {
        let dir = TempDir::new().unwrap();
        let path = env_file(&dir, "A=from_file\nB=from_file\n");
        let mut env: MemoryEnv = [("A", "preset")].into_iter().collect();

        let imported = import_dotenv(&path, &mut env).unwrap();
        assert_eq!(imported, 1);
        assert_eq!(env.get("A").as_deref(), Some("preset"));
        assert_eq!(env.get("B").as_deref(), Some("from_file"));
    }

    #[test]
    fn import_missing_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut env = MemoryEnv::new();
        let imported = import_dotenv(&dir.path().join("absent.env"), &mut env).unwrap();
        assert_eq!(imported, 0);
        assert!(env.vars().is_empty());
    }

    #[test]
    fn import_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = env_file(&dir, "GOOD=1\nnot a valid line\n");
        let mut env = MemoryEnv::new();
        let err = import_dotenv(&path, &mut env).unwrap_err();
        assert!(matches!(err, EnvfigError::Dotenv { .. }));
        assert!(env.vars().is_empty());
    }

    #[test]
    fn load_reads_file_and_applies_defaults() {
        let _guard = env_lock();
        clear_vars();
        let dir = TempDir::new().unwrap();
        let path = env_file(&dir, "ENVFIG_LOAD_NAME=from_file\n");

        let config: LoadConfig = load(&path).unwrap();
        assert_eq!(config.name, "from_file");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token, None);
        clear_vars();
    }

    #[test]
    fn load_mirrors_values_into_environment() {
        let _guard = env_lock();
        clear_vars();
        let dir = TempDir::new().unwrap();
        let path = env_file(&dir, "ENVFIG_LOAD_NAME=n\n");

        let _: LoadConfig = load(&path).unwrap();
        assert_eq!(std::env::var("ENVFIG_LOAD_PORT").as_deref(), Ok("8080"));
        assert!(std::env::var("ENVFIG_LOAD_TOKEN").is_err());
        clear_vars();
    }

    #[test]
    fn process_environment_wins_over_file() {
        let _guard = env_lock();
        clear_vars();
        ProcessEnv.set("ENVFIG_LOAD_NAME", "from_env").unwrap();
        let dir = TempDir::new().unwrap();
        let path = env_file(&dir, "ENVFIG_LOAD_NAME=from_file\nENVFIG_LOAD_PORT=9000\n");

        let config: LoadConfig = load(&path).unwrap();
        assert_eq!(config.name, "from_env");
        assert_eq!(config.port, 9000);
        clear_vars();
    }

    #[test]
    fn missing_required_is_config_error() {
        let _guard = env_lock();
        clear_vars();
        let dir = TempDir::new().unwrap();

        let err = load::<LoadConfig>(&dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, EnvfigError::ConfigError(_)));
        clear_vars();
    }

    #[test]
    fn mirror_failures_do_not_fail_the_load() {
        let config = LoadConfig {
            name: "bad\0value".into(),
            port: 1234,
            token: Some("t".into()),
        };
        let mut env: MemoryEnv = [("ENVFIG_LOAD_NAME", "old")].into_iter().collect();

        mirror(&config, &mut env).unwrap();
        assert_eq!(env.get("ENVFIG_LOAD_NAME").as_deref(), Some("old"));
        assert_eq!(env.get("ENVFIG_LOAD_PORT").as_deref(), Some("1234"));
        assert_eq!(env.get("ENVFIG_LOAD_TOKEN").as_deref(), Some("t"));
    }

    #[test]
    fn mirror_removes_absent_values() {
        let config = LoadConfig {
            name: "n".into(),
            port: 1,
            token: None,
        };
        let mut env: MemoryEnv = [("ENVFIG_LOAD_TOKEN", "stale")].into_iter().collect();

        mirror(&config, &mut env).unwrap();
        assert_eq!(env.get("ENVFIG_LOAD_TOKEN"), None);
        assert_eq!(env.get("ENVFIG_LOAD_NAME").as_deref(), Some("n"));
    }

    #[test]
    fn missing_file_loads_from_environment() {
        let _guard = env_lock();
        clear_vars();
        ProcessEnv.set("ENVFIG_LOAD_NAME", "only_env").unwrap();
        let dir = TempDir::new().unwrap();

        let config: LoadConfig = load(&dir.path().join("absent.env")).unwrap();
        assert_eq!(config.name, "only_env");
        clear_vars();
    }
}
