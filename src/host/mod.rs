// src/host/mod.rs

//! Host-side collaborators of the injector action.
//!
//! The action never talks to a concrete UI. It is handed:
//! - a [`NotificationSink`] that shows one message and completes once the
//!   user dismissed it,
//! - a [`DocumentManager`] used to save open buffers before the script runs,
//! - an [`ActionEvent`] describing what is selected.
//!
//! [`ui`] contains the UI-affinity dispatcher and the terminal dialog used by
//! the `injector` binary.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::debug;

pub mod ui;

pub use ui::{Dialog, TerminalDialog, UiDispatcher};

/// Future returned by [`NotificationSink::notify`].
pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Something that can show a single text message to the user.
///
/// Implementations are expected to complete the returned future only after
/// the message has been shown *and* dismissed, so callers that await each
/// notification in turn present messages strictly one after another.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: String) -> NotifyFuture<'_>;
}

/// Access to the host's open editor buffers.
pub trait DocumentManager: Send + Sync {
    /// Flush every modified buffer to disk.
    fn save_all_documents(&self);
}

/// Document manager for hosts without editor buffers (the CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpenDocuments;

impl DocumentManager for NoOpenDocuments {
    fn save_all_documents(&self) {
        debug!("no open documents to save");
    }
}

/// Context delivered with an action invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionEvent {
    /// Project (or workspace) file of the active project.
    pub project_file_path: Option<PathBuf>,
    /// Canonical path of the selected file, if any.
    pub selected_file: Option<PathBuf>,
}

impl ActionEvent {
    pub fn new(project_file_path: Option<PathBuf>, selected_file: Option<PathBuf>) -> Self {
        Self {
            project_file_path,
            selected_file,
        }
    }
}
