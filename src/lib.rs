// src/lib.rs

pub mod action;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod host;
pub mod logging;
pub mod selection;
pub mod types;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::action::{ActionOutcome, InjectorAction};
use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_or_default};
use crate::exec::{CommandInvocation, ProcessOutputRelay, RelayOutcome};
use crate::host::{ActionEvent, NoOpenDocuments, NotificationSink, TerminalDialog, UiDispatcher};
use crate::selection::{SELECTION_HINT, SelectionFilter};
use crate::types::ScriptAction;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the UI thread that renders notifications on the terminal
/// - the process relay
/// - the action handler
///
/// and then waits for the relay to finish, the way the IDE would keep
/// running while the script reports back.
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    if let Some(dir) = args.resources.clone() {
        cfg = cfg.with_resources_dir(dir);
    }

    let script = ScriptAction::from(args.command);
    let event = selection_event(args.project.clone(), args.file.clone());

    if args.dry_run {
        print_dry_run(&cfg, script, &event)?;
        return Ok(());
    }

    let confirm = !args.no_confirm && std::io::stdin().is_terminal();
    let dialog = TerminalDialog::stdio(confirm);
    let sink: Arc<dyn NotificationSink> =
        Arc::new(UiDispatcher::spawn(cfg.plugin.dialog_title.clone(), dialog)?);

    let relay = ProcessOutputRelay::new(Arc::clone(&sink));
    let action = InjectorAction::new(&cfg, sink, Arc::new(NoOpenDocuments), relay)?;

    match action.perform(script, &event).await? {
        ActionOutcome::Rejected => {
            debug!(%script, "action rejected; nothing launched");
        }
        ActionOutcome::Launched(handle) => {
            let outcome = handle.join().await?;
            log_outcome(script, outcome);
        }
    }

    Ok(())
}

/// Event for the command-line paths. Paths that exist are canonicalized;
/// the rest are passed through as given.
fn selection_event(project: Option<PathBuf>, file: Option<PathBuf>) -> ActionEvent {
    ActionEvent::new(project.map(canonical_or_raw), file.map(canonical_or_raw))
}

fn canonical_or_raw(path: PathBuf) -> PathBuf {
    std::fs::canonicalize(&path).unwrap_or(path)
}

fn log_outcome(script: ScriptAction, outcome: RelayOutcome) {
    match outcome {
        RelayOutcome::Succeeded { lines } => info!(%script, lines, "script completed"),
        RelayOutcome::Failed { lines, code } => {
            info!(%script, lines, exit_code = ?code, "script completed with failure")
        }
        RelayOutcome::ReadAborted { lines } => {
            info!(%script, lines, "relay aborted after read error")
        }
        RelayOutcome::WaitFailed { lines } => info!(%script, lines, "could not collect exit status"),
    }
}

/// Dry-run output: resolved config and the command that would run.
fn print_dry_run(cfg: &ConfigFile, script: ScriptAction, event: &ActionEvent) -> Result<()> {
    println!("injector dry-run");
    println!("  plugin.executable = {}", cfg.executable_path().display());
    println!("  selection.extensions = {:?}", cfg.selection.extensions);
    println!();

    let filter = SelectionFilter::from_config(&cfg.selection)?;
    let selected = match event.selected_file.as_deref() {
        Some(path) if filter.accepts(path) => path,
        _ => {
            println!("selection rejected: {SELECTION_HINT}");
            return Ok(());
        }
    };

    match event.project_file_path.as_deref() {
        Some(project) => {
            let invocation =
                CommandInvocation::for_script(&cfg.executable_path(), script, project, selected);
            println!("would run: {invocation}");
        }
        None => println!("no project given; nothing would run"),
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
