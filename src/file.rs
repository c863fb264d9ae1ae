//! Env file location.
//!
//! Each [`FileLocation`] resolves to a single directory; the env file is
//! `{dir}/{file_name}`. Only [`FileLocation::Platform`] needs the app name,
//! which it passes to `directories::ProjectDirs` (e.g. `~/.config/{app_name}/`
//! on Linux).

use std::path::PathBuf;

use crate::error::EnvfigError;
use crate::types::FileLocation;

/// Resolve `location` to a concrete directory.
pub fn resolve_location(
    location: &FileLocation,
    app_name: Option<&str>,
) -> Result<PathBuf, EnvfigError> {
    match location {
        FileLocation::Platform => {
            let app_name = app_name.ok_or(EnvfigError::AppNameRequired)?;
            let proj = directories::ProjectDirs::from("", "", app_name)
                .ok_or(EnvfigError::NoConfigDir)?;
            Ok(proj.config_dir().to_path_buf())
        }
        FileLocation::Home(subdir) => {
            let user = directories::UserDirs::new().ok_or(EnvfigError::NoConfigDir)?;
            Ok(user.home_dir().join(subdir))
        }
        FileLocation::Cwd => std::env::current_dir().map_err(|e| EnvfigError::Io {
            path: PathBuf::from("."),
            source: e,
        }),
        FileLocation::Path(p) => Ok(p.clone()),
    }
}

/// Full path of the env file named `file_name` under `location`.
pub fn config_file_path(
    location: &FileLocation,
    app_name: Option<&str>,
    file_name: &str,
) -> Result<PathBuf, EnvfigError> {
    Ok(resolve_location(location, app_name)?.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn resolve_explicit_path() {
        let dir = TempDir::new().unwrap();
        let resolved =
            resolve_location(&FileLocation::Path(dir.path().to_path_buf()), None).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn explicit_path_joins_file_name() {
        let path = config_file_path(
            &FileLocation::Path(PathBuf::from("/etc/myapp")),
            None,
            "myapp.env",
        )
        .unwrap();
        assert_eq!(path, Path::new("/etc/myapp/myapp.env"));
    }

    #[test]
    fn platform_requires_app_name() {
        let err = resolve_location(&FileLocation::Platform, None).unwrap_err();
        assert!(matches!(err, EnvfigError::AppNameRequired));
    }

    #[test]
    fn platform_ends_with_app_dir() {
        // Only meaningful where a home directory is known.
        if let Ok(dir) = resolve_location(&FileLocation::Platform, Some("envfig-test-app")) {
            assert!(dir.to_string_lossy().contains("envfig-test-app"));
        }
    }

    #[test]
    fn home_joins_subdir() {
        if let Ok(dir) = resolve_location(&FileLocation::Home(".myapp"), None) {
            assert!(dir.ends_with(".myapp"));
        }
    }

    #[test]
    fn cwd_resolves_to_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_location(&FileLocation::Cwd, None).unwrap(), cwd);
    }
}
