//! Builder API: locate the env file, then load, edit, and save through it.

use std::marker::PhantomData;
use std::path::PathBuf;

use tracing::debug;

use crate::binding::EnvConfig;
use crate::edit::{self, DEFAULT_MAX_ATTEMPTS};
use crate::error::EnvfigError;
use crate::file;
use crate::load;
use crate::ops::{self, ConfigResult};
use crate::prompt::Prompter;
use crate::types::{ConfigAction, FileLocation};

/// Entry point for building an envfig session.
pub struct Envfig;

impl Envfig {
    pub fn builder<C: EnvConfig>() -> EnvfigBuilder<C> {
        EnvfigBuilder::new()
    }
}

/// Builder for locating, loading, editing and saving an env-bound config.
///
/// The env file lives at `{location}/{file_name}` unless an explicit
/// [`config_file()`](Self::config_file) is given.
pub struct EnvfigBuilder<C: EnvConfig> {
    app_name: Option<String>,
    file_name: Option<String>,
    location: FileLocation,
    config_file: Option<PathBuf>,
    max_attempts: usize,
    _phantom: PhantomData<C>,
}

impl<C: EnvConfig> EnvfigBuilder<C> {
    fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            location: FileLocation::default(),
            config_file: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            _phantom: PhantomData,
        }
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.env"`
    /// - the platform config directory for [`FileLocation::Platform`]
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the env file name (default: `"{app_name}.env"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Directory holding the env file (default: [`FileLocation::Platform`]).
    pub fn location(mut self, location: FileLocation) -> Self {
        self.location = location;
        self
    }

    /// Use this exact file, ignoring `location` and `file_name`.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Ceiling on edit passes without confirmation (default: 100).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    fn effective_file_name(&self) -> Result<String, EnvfigError> {
        if let Some(name) = &self.file_name {
            return Ok(name.clone());
        }
        let app = self
            .app_name
            .as_deref()
            .ok_or(EnvfigError::AppNameRequired)?;
        Ok(format!("{app}.env"))
    }

    /// Resolve the env file path.
    pub fn config_path(&self) -> Result<PathBuf, EnvfigError> {
        if let Some(path) = &self.config_file {
            return Ok(path.clone());
        }
        let file_name = self.effective_file_name()?;
        file::config_file_path(&self.location, self.app_name.as_deref(), &file_name)
    }

    /// Load the config from the env file and the process environment.
    pub fn load(&self) -> Result<C, EnvfigError> {
        let path = self.config_path()?;
        debug!(path = %path.display(), "loading config");
        load::load(&path)
    }

    /// Edit `config` through `prompter`.
    pub fn edit_with<P: Prompter + ?Sized>(
        &self,
        config: &mut C,
        prompter: &mut P,
    ) -> Result<(), EnvfigError> {
        edit::edit_config(config, prompter, self.max_attempts)
    }

    /// Edit `config` on the terminal.
    #[cfg(feature = "terminal")]
    pub fn edit(&self, config: &mut C) -> Result<(), EnvfigError> {
        self.edit_with(config, &mut crate::terminal::TerminalPrompter::new())
    }

    /// Save `config` to the env file and mirror it into the process environment.
    pub fn save(&self, config: &C) -> Result<ConfigResult, EnvfigError> {
        let path = self.config_path()?;
        ops::save(&path, config)?;
        Ok(ConfigResult::Saved { path })
    }

    /// Handle a `ConfigAction`, prompting through `prompter` when editing.
    pub fn handle_with<P: Prompter + ?Sized>(
        &self,
        action: &ConfigAction,
        prompter: &mut P,
    ) -> Result<ConfigResult, EnvfigError> {
        let mut config = self.load()?;
        match action {
            ConfigAction::Show => ops::list_fields(&config),
            ConfigAction::Edit => {
                self.edit_with(&mut config, prompter)?;
                self.save(&config)?;
                ops::list_fields(&config)
            }
        }
    }

    /// Handle a `ConfigAction` on the terminal.
    #[cfg(feature = "terminal")]
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, EnvfigError> {
        self.handle_with(action, &mut crate::terminal::TerminalPrompter::new())
    }

    /// Handle a `ConfigAction` on the terminal and print the result to stdout.
    #[cfg(feature = "terminal")]
    pub fn handle_and_print(&self, action: &ConfigAction) -> Result<(), EnvfigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }
}
