//! One translation request as an explicit state machine.
//!
//! `Pending` settles exactly once into `Succeeded` or `Failed`. Side effects
//! (clipboard, notifications) are produced by that transition and nowhere else,
//! so redrawing the view never repeats them.

use crate::config::CopyTarget;
use crate::errors::{SessionError, TranslationError};
use crate::formatter::{self, display_message, Detail};
use crate::schema::TranslationResult;
use crate::spinner::Spinner;
use anyhow::Result;
use std::future::Future;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Pending,
    Succeeded(TranslationResult),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CopyToClipboard(String),
    Notify(Toast),
}

/// What the environment around a session has to provide.
pub trait Host {
    /// Sink for pending frames; called from the spinner task.
    fn pending_sink(&self) -> Box<dyn FnMut(&Detail) + Send>;
    /// Wipes the pending view; runs when the spinner stops.
    fn pending_clear(&self) -> Box<dyn FnOnce() + Send>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
    fn notify(&mut self, toast: &Toast);
    fn present(&mut self, detail: &Detail);
}

pub struct Session {
    input: String,
    model: String,
    copy: Option<CopyTarget>,
    state: ViewState,
}

impl Session {
    pub fn new(input: impl Into<String>, model: impl Into<String>) -> Self {
        Self { input: input.into(), model: model.into(), copy: Some(CopyTarget::Translation), state: ViewState::Pending }
    }

    /// Payload copied on success; `None` copies nothing.
    pub fn copy_target(mut self, target: Option<CopyTarget>) -> Self {
        self.copy = target;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self.state, ViewState::Pending)
    }

    /// Leaves `Pending` and returns the effects of that transition.
    pub fn settle(
        &mut self,
        outcome: Result<TranslationResult, TranslationError>,
    ) -> Result<Vec<Effect>, SessionError> {
        if self.is_settled() {
            return Err(SessionError::AlreadySettled);
        }
        let effects = match outcome {
            Ok(result) => {
                self.state = ViewState::Succeeded(result);
                let mut effects = Vec::new();
                // The copied payload is the matching action's content.
                let copied = self.copy.and_then(|target| {
                    self.render(0).actions.into_iter().find(|a| a.target == target)
                });
                let title = match copied {
                    Some(action) => {
                        effects.push(Effect::CopyToClipboard(action.content));
                        match action.target {
                            CopyTarget::Translation => "Copied Translation!",
                            CopyTarget::Feedback => "Copied Feedback!",
                        }
                    }
                    None => "Translation Ready",
                };
                effects.push(Effect::Notify(Toast {
                    style: ToastStyle::Success,
                    title: title.to_string(),
                    message: None,
                }));
                effects
            }
            Err(err) => {
                let message = display_message(&err.to_string()).to_string();
                self.state = ViewState::Failed(message.clone());
                vec![Effect::Notify(Toast {
                    style: ToastStyle::Failure,
                    title: "Translation Failed".to_string(),
                    message: Some(message),
                })]
            }
        };
        Ok(effects)
    }

    /// Detail view for the current state. Pending uses `frame` to pick the glyph.
    pub fn render(&self, frame: usize) -> Detail {
        match &self.state {
            ViewState::Pending => formatter::render_pending(frame),
            ViewState::Succeeded(result) => formatter::render_succeeded(result, &self.input, &self.model),
            ViewState::Failed(message) => formatter::render_failed(message),
        }
    }
}

/// Drives a session from pending to its terminal state.
///
/// The spinner lives only inside the scope that awaits `request`, so it is
/// released before any effect runs, on success and failure alike.
pub async fn run<F, H>(session: &mut Session, request: F, host: &mut H) -> Result<()>
where
    F: Future<Output = Result<TranslationResult, TranslationError>>,
    H: Host,
{
    let outcome = {
        let mut sink = host.pending_sink();
        let _spinner = Spinner::start(move |frame| sink(&formatter::render_pending(frame)))
            .on_stop(host.pending_clear());
        request.await
    };

    if let Err(err) = &outcome {
        warn!(error=%err, "Translation failed");
    }

    let effects = session.settle(outcome)?;
    host.present(&session.render(0));
    apply_effects(effects, host);
    Ok(())
}

fn apply_effects<H: Host>(effects: Vec<Effect>, host: &mut H) {
    for effect in effects {
        match effect {
            Effect::CopyToClipboard(text) => {
                if let Err(err) = host.copy_to_clipboard(&text) {
                    warn!(?err, "Clipboard copy failed");
                    host.notify(&Toast {
                        style: ToastStyle::Failure,
                        title: "Copy Failed".to_string(),
                        message: Some(err.to_string()),
                    });
                    // The success toast claims a copy; skip it.
                    return;
                }
                info!(chars=%text.chars().count(), "Copied to clipboard");
            }
            Effect::Notify(toast) => host.notify(&toast),
        }
    }
}
