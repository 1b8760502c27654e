// src/host/ui.rs

//! UI-affinity dispatch.
//!
//! Dialogs may only be shown from one dedicated thread. [`UiDispatcher`] owns
//! that thread and implements [`NotificationSink`] by sending each message to
//! it and waiting for an acknowledgement that is sent after the dialog has
//! been dismissed. Notifications coming from several relays at once are
//! therefore shown one at a time, in arrival order.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::errors::Result;

use super::{NotificationSink, NotifyFuture};

/// A modal message box. Only ever called on the UI thread.
pub trait Dialog: Send {
    /// Show `text` and return once the user dismissed it.
    fn show_message(&mut self, title: &str, text: &str);
}

struct DialogRequest {
    text: String,
    dismissed: oneshot::Sender<()>,
}

/// [`NotificationSink`] that marshals every message onto a dedicated UI thread.
#[derive(Debug, Clone)]
pub struct UiDispatcher {
    tx: mpsc::UnboundedSender<DialogRequest>,
}

impl UiDispatcher {
    /// Start the UI thread, which owns `dialog` for its whole lifetime.
    ///
    /// The thread exits once every clone of the dispatcher has been dropped.
    pub fn spawn<D>(title: impl Into<String>, mut dialog: D) -> Result<Self>
    where
        D: Dialog + 'static,
    {
        let title = title.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<DialogRequest>();

        thread::Builder::new()
            .name("injector-ui".to_string())
            .spawn(move || {
                debug!("ui thread started");
                while let Some(request) = rx.blocking_recv() {
                    dialog.show_message(&title, &request.text);
                    // The requester may have given up waiting; nothing to do then.
                    let _ = request.dismissed.send(());
                }
                debug!("ui thread finished (all dispatchers dropped)");
            })?;

        Ok(Self { tx })
    }
}

impl NotificationSink for UiDispatcher {
    fn notify(&self, message: String) -> NotifyFuture<'_> {
        let tx = self.tx.clone();

        Box::pin(async move {
            let (dismissed_tx, dismissed_rx) = oneshot::channel();
            let request = DialogRequest {
                text: message,
                dismissed: dismissed_tx,
            };

            if let Err(mpsc::error::SendError(request)) = tx.send(request) {
                warn!(message = %request.text, "ui thread is gone; notification not shown");
                return;
            }

            if dismissed_rx.await.is_err() {
                warn!("ui thread stopped before the notification was dismissed");
            }
        })
    }
}

/// Dialog rendered on a terminal.
///
/// Each message is printed as `[<title>] <text>`. When an input is attached,
/// the dialog stays "open" until a line (Enter) is read from it.
pub struct TerminalDialog<W, R> {
    out: W,
    input: Option<R>,
}

impl TerminalDialog<Stdout, BufReader<Stdin>> {
    /// Terminal dialog on stdout; waits for Enter on stdin if `confirm` is set.
    pub fn stdio(confirm: bool) -> Self {
        Self {
            out: io::stdout(),
            input: confirm.then(|| BufReader::new(io::stdin())),
        }
    }
}

impl<W, R> TerminalDialog<W, R>
where
    W: Write + Send,
    R: BufRead + Send,
{
    pub fn new(out: W, input: Option<R>) -> Self {
        Self { out, input }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn render(&mut self, title: &str, text: &str) -> io::Result<()> {
        writeln!(self.out, "[{title}] {text}")?;

        if let Some(input) = self.input.as_mut() {
            write!(self.out, "  (press Enter to continue) ")?;
            self.out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // No more input; stop asking for confirmation.
                self.input = None;
                writeln!(self.out)?;
            }
        }

        self.out.flush()
    }
}

impl<W, R> Dialog for TerminalDialog<W, R>
where
    W: Write + Send,
    R: BufRead + Send,
{
    fn show_message(&mut self, title: &str, text: &str) {
        if let Err(e) = self.render(title, text) {
            warn!(error = %e, message = %text, "failed to render notification on terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingDialog {
        shown: Arc<Mutex<Vec<(String, String, String)>>>,
    }

    impl Dialog for RecordingDialog {
        fn show_message(&mut self, title: &str, text: &str) {
            let thread = thread::current().name().unwrap_or_default().to_string();
            self.shown
                .lock()
                .unwrap()
                .push((thread, title.to_string(), text.to_string()));
        }
    }

    #[tokio::test]
    async fn notifications_run_on_the_ui_thread_in_order() {
        let dialog = RecordingDialog::default();
        let shown = Arc::clone(&dialog.shown);
        let dispatcher = UiDispatcher::spawn("Injector Plugin", dialog).unwrap();

        dispatcher.notify("first".to_string()).await;
        dispatcher.notify("second".to_string()).await;

        let shown = shown.lock().unwrap().clone();
        assert_eq!(
            shown,
            vec![
                (
                    "injector-ui".to_string(),
                    "Injector Plugin".to_string(),
                    "first".to_string()
                ),
                (
                    "injector-ui".to_string(),
                    "Injector Plugin".to_string(),
                    "second".to_string()
                ),
            ]
        );
    }

    #[test]
    fn terminal_dialog_waits_for_enter_until_input_ends() {
        let mut dialog = TerminalDialog::new(Vec::new(), Some(Cursor::new(b"\n".to_vec())));

        dialog.show_message("T", "one");
        dialog.show_message("T", "two");
        dialog.show_message("T", "three");

        let out = String::from_utf8(dialog.into_output()).unwrap();
        assert_eq!(
            out,
            "[T] one\n  (press Enter to continue) \
             [T] two\n  (press Enter to continue) \n\
             [T] three\n"
        );
    }

    #[test]
    fn terminal_dialog_without_input_just_prints() {
        let mut dialog: TerminalDialog<Vec<u8>, Cursor<Vec<u8>>> =
            TerminalDialog::new(Vec::new(), None);
        dialog.show_message("Injector Plugin", "hello");
        assert_eq!(
            String::from_utf8(dialog.into_output()).unwrap(),
            "[Injector Plugin] hello\n"
        );
    }
}
