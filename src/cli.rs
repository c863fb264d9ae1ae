//! Clap adapter for envfig.
//!
//! This module is the **optional integration layer** between envfig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`EnvfigArgs`] can be flattened into your clap `#[derive(Parser)]` struct to
//! get `--config-file` and `--edit` flags. [`EnvfigArgs::into_action()`]
//! converts them into a [`ConfigAction`](crate::ConfigAction); from there, all
//! logic flows through the clap-free
//! [`EnvfigBuilder::handle()`](crate::EnvfigBuilder::handle) API.

use std::path::PathBuf;

use clap::Args;

use crate::binding::EnvConfig;
use crate::builder::EnvfigBuilder;
use crate::types::ConfigAction;

/// Clap-derived flags for loading and editing the env file.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     config: EnvfigArgs,
/// }
/// ```
#[derive(Debug, Args)]
pub struct EnvfigArgs {
    /// Env file to load and save instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Edit the configuration interactively, then save it.
    #[arg(long)]
    pub edit: bool,
}

impl EnvfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    pub fn into_action(self) -> ConfigAction {
        if self.edit {
            ConfigAction::Edit
        } else {
            ConfigAction::Show
        }
    }

    /// Point `builder` at `--config-file` when it was given.
    pub fn configure<C: EnvConfig>(&self, builder: EnvfigBuilder<C>) -> EnvfigBuilder<C> {
        match &self.config_file {
            Some(path) => builder.config_file(path.clone()),
            None => builder,
        }
    }
}
