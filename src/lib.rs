//! Bind a config struct to environment variables, persist it as a flat
//! `NAME=value` file, and let users review and edit it on the terminal.
//!
//! ```ignore
//! #[derive(Config, Serialize)]
//! struct AppConfig {
//!     #[config(env = "FPG")]
//!     flits_per_gazeebop: i32,
//!     #[config(env = "CONVERSION_RATE", default = 2.5)]
//!     conversion_rate: f32,
//!     #[config(env = "ACCESS_KEY")]
//!     access_key: String,
//! }
//!
//! impl EnvConfig for AppConfig {
//!     const SECRETS: &'static [(&'static str, &'static str)] = &[("access_key", "hide")];
//!
//!     fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
//!         Some(match field {
//!             "flits_per_gazeebop" => (&mut self.flits_per_gazeebop).into(),
//!             "conversion_rate" => (&mut self.conversion_rate).into(),
//!             "access_key" => (&mut self.access_key).into(),
//!             _ => return None,
//!         })
//!     }
//! }
//!
//! let path = Path::new("example.env");
//! let mut config: AppConfig = envfig::load(path)?;
//! envfig::edit(&mut config)?;
//! envfig::save(path, &config)?;
//! ```
//!
//! # Design: struct as source of truth
//!
//! Your config struct (via confique's `Config` derive) declares everything:
//!
//! - **`#[config(env = "NAME")]`** binds a top-level field to a variable. Only
//!   bound fields are listed, edited, and saved.
//! - **`#[config(default = ...)]`** provides the value used when neither the
//!   environment nor the env file sets one.
//! - **`Option<T>` fields** may stay unset. Fields without `Option` and without
//!   a default must be provided or loading fails.
//! - **[`EnvConfig::SECRETS`]** marks fields as hidden or masked. Hidden values
//!   are never echoed; masked values are echoed as `*`.
//!
//! - **[`EnvConfig::field_mut`]** hands out a [`FieldMut`] for each field that
//!   may be written. Edits go through it, one field at a time.
//!
//! Fields are read by serializing the struct, so field kinds come from the
//! declared types. `String`, `bool`, every integer width and both float
//! widths can be edited. Other kinds are listed and saved but not editable.
//!
//! # Load, edit, save
//!
//! ```text
//! env file ──import──▶ process env ──confique──▶ struct ──▶ process env
//!                                                  │
//!                                        edit dialog (bounded)
//!                                                  │
//!                       env file ◀──save── struct ──▶ process env
//! ```
//!
//! Variables already set in the environment win over the env file. Loading
//! and saving both mirror the bound values back into the environment; unset
//! optional values remove the variable.
//!
//! The edit dialog prompts once per bound field, then asks `Done`. It repeats
//! until the user answers `y`, or fails with
//! [`EnvfigError::TooManyAttempts`] after the configured number of passes.
//!
//! # Core library, no CLI framework required
//!
//! [`EnvfigBuilder`] and [`ConfigAction`] drive everything without clap. The
//! optional `clap` feature (on by default) adds [`EnvfigArgs`]; the optional
//! `terminal` feature (on by default) adds the crossterm-based
//! [`TerminalPrompter`]. Any other front end can implement [`Prompter`].
//!
//! # Error handling
//!
//! All fallible operations return [`EnvfigError`]. Values that fail to parse
//! during an edit pass are logged through `tracing` and left unchanged.

pub mod error;
pub mod types;

mod binding;
mod builder;
mod capture;
#[cfg(feature = "clap")]
mod cli;
mod codec;
mod edit;
mod env;
mod file;
mod introspect;
mod load;
mod mutate;
mod ops;
mod persist;
mod prompt;
#[cfg(feature = "terminal")]
mod terminal;

#[cfg(test)]
mod fixtures;

pub use binding::{Binding, BindingTag, EnvConfig, FieldMut, bindings};
pub use builder::{Envfig, EnvfigBuilder};
#[cfg(feature = "clap")]
pub use cli::EnvfigArgs;
pub use codec::{ConfigMap, apply, config_map, encode};
pub use edit::{DEFAULT_MAX_ATTEMPTS, edit_config};
pub use env::{EnvVarError, Environment, MemoryEnv, ProcessEnv};
pub use error::{EnvVarFailure, EnvfigError};
pub use introspect::fields;
pub use load::{import_dotenv, load};
pub use mutate::set_field;
#[cfg(feature = "terminal")]
pub use ops::edit;
pub use ops::{ConfigResult, list_fields, save, save_with};
pub use persist::{save_map, write_config_file};
pub use prompt::{ChoicePrompt, PromptError, Prompter, TextPrompt};
#[cfg(feature = "terminal")]
pub use terminal::{ChoiceInput, KeyOutcome, LineInput, TerminalPrompter};
pub use types::{
    ConfigAction, FieldDescriptor, FieldValue, FileLocation, MASK_GLYPH, SecrecyMode, ValueKind,
};
