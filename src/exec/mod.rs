// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running `injectorUtil`, using
//! `tokio::process::Command`, and relaying what it prints back to the user
//! through a [`NotificationSink`](crate::host::NotificationSink).
//!
//! - [`invocation`] builds the argument vector for a script run.
//! - [`relay`] owns the [`ProcessOutputRelay`]: launch, stdout relay, exit
//!   status reporting.
//! - [`backend`] provides the `ScriptRunner` seam the action launches
//!   through, so tests can replace real processes with a fake.

pub mod backend;
pub mod invocation;
pub mod relay;

pub use backend::ScriptRunner;
pub use invocation::CommandInvocation;
pub use relay::{ProcessOutputRelay, RelayHandle, RelayOutcome};
