// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The binary plays the role of the IDE: the subcommand picks the menu
//! entry, `--project` and `--file` describe the current selection.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::ScriptAction;

/// Command-line arguments for `injector`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "injector",
    version,
    about = "Run injectorUtil for a source file and show what it reports.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: ActionCommand,

    /// Project file of the active project (e.g. `App.xcodeproj`).
    #[arg(long, global = true, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Selected source file. Omit to model "nothing selected".
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Injector.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing `injectorUtil`; overrides the config file.
    #[arg(long, global = true, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `INJECTOR_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Don't wait for Enter after each notification.
    #[arg(long, global = true)]
    pub no_confirm: bool,

    /// Validate the selection and print the command line, but don't run it.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// Menu entries of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ActionCommand {
    /// Inject the selected file into the running app (`injectSources`).
    Inject,
    /// Patch the project for injection (`patchProject`).
    Patch,
    /// Remove the injection patch from the project (`unpatchProject`).
    Unpatch,
}

impl From<ActionCommand> for ScriptAction {
    fn from(cmd: ActionCommand) -> Self {
        match cmd {
            ActionCommand::Inject => ScriptAction::Inject,
            ActionCommand::Patch => ScriptAction::Patch,
            ActionCommand::Unpatch => ScriptAction::Unpatch,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
