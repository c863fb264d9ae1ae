//! # envfig demo application
//!
//! A sample CLI tool that loads its settings from `example.env` (or
//! `--config-file`), prints them with secrets redacted, and with `--edit`
//! walks through every setting on the terminal before saving.
//!
//! ## Running
//!
//! ```sh
//! printf 'ACCESS_KEY=k\nLAST4_SSN=1234\n' > example.env
//! cargo run --example envfig_demo
//! cargo run --example envfig_demo -- --edit
//! RUST_LOG=envfig=debug cargo run --example envfig_demo
//! ```

mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use envfig::{ConfigAction, Envfig, EnvfigArgs, FileLocation};

use config::DemoConfig;

const CONFIG_FILE_NAME: &str = "example.env";

/// envfig demo: show and edit env-bound settings.
#[derive(Parser, Debug)]
#[command(name = "envfig-demo")]
struct Cli {
    #[command(flatten)]
    config: EnvfigArgs,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let builder = cli.config.configure(
        Envfig::builder::<DemoConfig>()
            .app_name("envfig-demo")
            .file_name(CONFIG_FILE_NAME)
            .location(FileLocation::Cwd),
    );
    let action = cli.config.into_action();

    if action == ConfigAction::Edit {
        println!("Current configuration:");
        if let Err(e) = builder.handle_and_print(&ConfigAction::Show) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        println!();
        println!("Updated configuration:");
    }

    match builder.handle_and_print(&action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
