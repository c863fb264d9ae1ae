//! Env file persistence: write a config map to disk and mirror it into the
//! environment.
//!
//! The file is always rewritten in full. Creates parent directories as needed
//! and, on Unix, restricts the file to its owner (`0600`).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::binding::EnvConfig;
use crate::codec::{self, ConfigMap};
use crate::env::Environment;
use crate::error::EnvfigError;
use crate::introspect;

/// I/O wrapper: encode `map` and overwrite `path` with it.
pub fn write_config_file(path: &Path, map: &ConfigMap) -> Result<(), EnvfigError> {
    let content = codec::encode(map);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| EnvfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let io_err = |e: std::io::Error| EnvfigError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;

    debug!(path = %path.display(), entries = map.len(), "wrote env file");
    Ok(())
}

/// Write `map` to `path`, then apply it to `env`.
///
/// The file is written before the environment is touched; if the write
/// fails, the environment is unchanged.
pub fn save_map<E: Environment + ?Sized>(
    path: &Path,
    map: &ConfigMap,
    env: &mut E,
) -> Result<(), EnvfigError> {
    write_config_file(path, map)?;
    codec::apply(env, map)
}

/// Save every bound field of `config` to `path` and mirror it into `env`.
pub fn save_config<C: EnvConfig, E: Environment + ?Sized>(
    path: &Path,
    config: &C,
    env: &mut E,
) -> Result<(), EnvfigError> {
    let map = codec::config_map(&introspect::fields(config)?);
    save_map(path, &map, env)
}
