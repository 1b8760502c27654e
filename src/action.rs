// src/action.rs

//! The injector action handler.
//!
//! All three menu entries (inject, patch, unpatch) go through
//! [`InjectorAction::perform`]; they differ only in the [`ScriptAction`]
//! passed in. Collaborators are handed over at construction time.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::ConfigFile;
use crate::errors::{InjectorError, Result};
use crate::exec::{CommandInvocation, RelayHandle, ScriptRunner};
use crate::host::{ActionEvent, DocumentManager, NotificationSink};
use crate::selection::{SELECTION_HINT, SelectionFilter};
use crate::types::ScriptAction;

/// Result of handling one action invocation.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The selection was not an implementation file; the user was told so.
    Rejected,
    /// The script is running; its output is being relayed.
    Launched(RelayHandle),
}

pub struct InjectorAction<R: ScriptRunner> {
    executable: PathBuf,
    filter: SelectionFilter,
    sink: Arc<dyn NotificationSink>,
    documents: Arc<dyn DocumentManager>,
    runner: R,
}

impl<R: ScriptRunner> fmt::Debug for InjectorAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectorAction")
            .field("executable", &self.executable)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<R: ScriptRunner> InjectorAction<R> {
    pub fn new(
        config: &ConfigFile,
        sink: Arc<dyn NotificationSink>,
        documents: Arc<dyn DocumentManager>,
        runner: R,
    ) -> Result<Self> {
        Ok(Self {
            executable: config.executable_path(),
            filter: SelectionFilter::from_config(&config.selection)?,
            sink,
            documents,
            runner,
        })
    }

    /// Handle one invocation of `script`.
    ///
    /// - An unusable selection shows a hint and returns `Ok(Rejected)`.
    /// - Otherwise open documents are saved and the script is launched; the
    ///   returned handle tracks the background relay.
    /// - A missing project or a launch failure is shown to the user *and*
    ///   returned as an error.
    pub async fn perform(&self, script: ScriptAction, event: &ActionEvent) -> Result<ActionOutcome> {
        let selected = match event.selected_file.as_deref() {
            Some(path) if self.filter.accepts(path) => path,
            other => {
                info!(%script, selected = ?other, "selection is not an implementation file");
                self.sink.notify(SELECTION_HINT.to_string()).await;
                return Ok(ActionOutcome::Rejected);
            }
        };

        let Some(project) = event.project_file_path.as_deref() else {
            return Err(self.report_setup_error(InjectorError::MissingProject).await);
        };

        debug!(%script, "saving open documents before launch");
        self.documents.save_all_documents();

        let invocation = CommandInvocation::for_script(&self.executable, script, project, selected);

        match self.runner.launch(&invocation) {
            Ok(handle) => Ok(ActionOutcome::Launched(handle)),
            Err(e) => Err(self.report_setup_error(e).await),
        }
    }

    async fn report_setup_error(&self, err: InjectorError) -> InjectorError {
        error!(error = %err, "run script error");
        self.sink.notify(format!("Run script error: {err}")).await;
        err
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use super::*;
    use crate::host::NotifyFuture;

    #[derive(Default)]
    struct Journal {
        entries: Mutex<Vec<String>>,
    }

    impl Journal {
        fn push(&self, entry: String) {
            self.entries.lock().unwrap().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl NotificationSink for Journal {
        fn notify(&self, message: String) -> NotifyFuture<'_> {
            self.push(format!("notify: {message}"));
            Box::pin(async {})
        }
    }

    impl DocumentManager for Journal {
        fn save_all_documents(&self) {
            self.push("save".to_string());
        }
    }

    struct JournalRunner(Arc<Journal>);

    impl ScriptRunner for JournalRunner {
        fn launch(&self, invocation: &CommandInvocation) -> Result<RelayHandle> {
            self.0.push(format!("launch: {}", invocation.label));
            let handle = tokio::spawn(async { crate::exec::RelayOutcome::Succeeded { lines: 0 } });
            Ok(RelayHandle::new(invocation.label.clone(), handle))
        }
    }

    fn action(journal: &Arc<Journal>) -> InjectorAction<JournalRunner> {
        let config = ConfigFile::default().with_resources_dir("/res");
        InjectorAction::new(
            &config,
            journal.clone(),
            journal.clone(),
            JournalRunner(journal.clone()),
        )
        .unwrap()
    }

    fn event(selected: Option<&str>) -> ActionEvent {
        ActionEvent::new(
            Some(PathBuf::from("/work/App.xcodeproj")),
            selected.map(PathBuf::from),
        )
    }

    #[tokio::test]
    async fn documents_are_saved_before_launch() {
        let journal = Arc::new(Journal::default());

        let outcome = action(&journal)
            .perform(ScriptAction::Inject, &event(Some("/work/App/View.swift")))
            .await
            .unwrap();

        assert!(matches!(outcome, ActionOutcome::Launched(_)));
        assert_eq!(journal.entries(), vec!["save", "launch: injectSources"]);
    }

    #[tokio::test]
    async fn missing_selection_shows_hint_only() {
        let journal = Arc::new(Journal::default());

        let outcome = action(&journal)
            .perform(ScriptAction::Patch, &event(None))
            .await
            .unwrap();

        assert!(matches!(outcome, ActionOutcome::Rejected));
        assert_eq!(journal.entries(), vec![format!("notify: {SELECTION_HINT}")]);
    }

    #[tokio::test]
    async fn missing_project_is_reported_and_returned() {
        let journal = Arc::new(Journal::default());
        let event = ActionEvent::new(None, Some(PathBuf::from("/work/App/View.m")));

        let result = action(&journal).perform(ScriptAction::Inject, &event).await;

        assert!(matches!(result, Err(InjectorError::MissingProject)));
        assert_eq!(
            journal.entries(),
            vec!["notify: Run script error: no project is open"]
        );
    }

    #[test]
    fn executable_comes_from_resources_dir() {
        let journal = Arc::new(Journal::default());
        assert_eq!(action(&journal).executable, Path::new("/res/injectorUtil"));
    }
}
