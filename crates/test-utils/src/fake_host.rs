use std::io;
use std::sync::{Arc, Mutex};

use injector::errors::{InjectorError, Result};
use injector::exec::{CommandInvocation, RelayHandle, RelayOutcome, ScriptRunner};
use injector::host::{DocumentManager, NotificationSink, NotifyFuture};

/// One observable call into the host or the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Notify(String),
    SaveAll,
    Launch(CommandInvocation),
}

/// Shared, ordered record of host calls.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the notification texts, in order.
    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Notify(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn launches(&self) -> Vec<CommandInvocation> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Launch(inv) => Some(inv),
                _ => None,
            })
            .collect()
    }
}

/// Notification sink + document manager that just record into a journal.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub journal: Journal,
}

impl RecordingHost {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl NotificationSink for RecordingHost {
    fn notify(&self, message: String) -> NotifyFuture<'_> {
        self.journal.record(HostCall::Notify(message));
        Box::pin(async {})
    }
}

impl DocumentManager for RecordingHost {
    fn save_all_documents(&self) {
        self.journal.record(HostCall::SaveAll);
    }
}

/// A fake runner that:
/// - records every launch request
/// - either completes immediately with `Succeeded`, or fails to launch.
#[derive(Debug, Clone)]
pub struct FakeRunner {
    journal: Journal,
    fail_launch: bool,
}

impl FakeRunner {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fail_launch: false,
        }
    }

    /// Every launch fails as if the executable did not exist.
    pub fn failing(journal: Journal) -> Self {
        Self {
            journal,
            fail_launch: true,
        }
    }
}

impl ScriptRunner for FakeRunner {
    fn launch(&self, invocation: &CommandInvocation) -> Result<RelayHandle> {
        self.journal.record(HostCall::Launch(invocation.clone()));

        if self.fail_launch {
            return Err(InjectorError::Launch {
                program: invocation.program.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        let handle = tokio::spawn(async { RelayOutcome::Succeeded { lines: 0 } });
        Ok(RelayHandle::new(invocation.label.clone(), handle))
    }
}
