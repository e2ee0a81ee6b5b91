//! Review session state machine.
//!
//! A [`ReviewSession`] owns one [`SessionState`] and is the only thing that
//! mutates it. Phases:
//!
//! ```text
//!            submit (valid)              review text
//!   Idle ──────────────────▶ Analyzing ─────────────▶ Success
//!    │  ▲                        │                       │
//!    │  └── (no terminal state)  │ classified error      │ submit
//!    │                           ▼                       ▼
//!    └── submit (invalid) ──▶  Error ◀──────────────── Analyzing ...
//! ```
//!
//! At most one dispatch is in flight; `submit` while `Analyzing` is refused
//! without touching the network. An in-flight call is never cancelled, and
//! its result is applied even if the draft was edited meanwhile.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::error::{ReviewError, ReviewResult, ValidationError};
use crate::service::ReviewService;
use crate::types::ReviewConfig;
use crate::validate::validate;

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const CONNECTION_MESSAGE: &str = "Cannot connect to server. Make sure the backend is running.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// What the presentation layer should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

/// Snapshot of a session.
///
/// - `Success`: `result_text` non-empty, `error_message` empty.
/// - `Error`: `error_message` non-empty, `result_text` empty.
/// - `Analyzing`: both empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub phase: Phase,
    /// Last code that passed validation and was dispatched.
    pub input_code: String,
    pub result_text: String,
    pub error_message: String,
}

/// Result of a `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the dispatch is in flight.
    Started,
    /// Validation failed; the session now shows the validation message.
    Invalid(ValidationError),
    /// A dispatch is already in flight; nothing happened.
    Busy,
    /// Validation passed but there is no tokio runtime to dispatch on.
    /// State is left as it was.
    NoRuntime,
}

/// Message shown for a classified dispatch error. Never empty.
pub fn display_message(err: &ReviewError) -> String {
    match err.status_code() {
        408 => TIMEOUT_MESSAGE.to_string(),
        503 => CONNECTION_MESSAGE.to_string(),
        _ => {
            let message = err.message();
            if message.trim().is_empty() {
                UNEXPECTED_MESSAGE.to_string()
            } else {
                message
            }
        }
    }
}

/// One user's review session.
pub struct ReviewSession {
    service: Arc<dyn ReviewService>,
    max_code_length: usize,
    state: SessionState,
    draft: String,
    error_status: Option<u16>,
    in_flight: Option<oneshot::Receiver<ReviewResult<String>>>,
}

impl std::fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSession")
            .field("max_code_length", &self.max_code_length)
            .field("state", &self.state)
            .field("draft_len", &self.draft.chars().count())
            .field("error_status", &self.error_status)
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl ReviewSession {
    pub fn new(service: Arc<dyn ReviewService>, config: &ReviewConfig) -> Self {
        Self {
            service,
            max_code_length: config.max_code_length,
            state: SessionState::default(),
            draft: String::new(),
            error_status: None,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.phase == Phase::Analyzing
    }

    /// Classified status code of the last dispatch failure. `None` after a
    /// success or a local validation failure.
    pub fn error_status(&self) -> Option<u16> {
        self.error_status
    }

    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft. Never changes the phase or the displayed message.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_analyzing() && !self.draft.trim().is_empty()
    }

    /// True when a review is showing but the draft no longer matches the
    /// code it was produced for.
    pub fn is_stale(&self) -> bool {
        self.state.phase == Phase::Success && self.draft != self.state.input_code
    }

    /// Submit the current draft.
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let raw = self.draft.clone();
        self.submit(raw)
    }

    /// Validate `raw` and, if it passes, dispatch it.
    ///
    /// The dispatch runs on the current tokio runtime; call
    /// [`settle`](Self::settle) or [`try_settle`](Self::try_settle) to apply
    /// its outcome. Outside a runtime a valid submission returns
    /// [`SubmitOutcome::NoRuntime`] and nothing is dispatched.
    pub fn submit(&mut self, raw: impl Into<String>) -> SubmitOutcome {
        if self.is_analyzing() {
            debug!("submit ignored: review already in flight");
            return SubmitOutcome::Busy;
        }

        let raw = raw.into();
        self.draft.clone_from(&raw);

        if let Err(err) = validate(&raw, self.max_code_length) {
            debug!(error = %err, "submission rejected locally");
            self.error_status = None;
            self.state.phase = Phase::Error;
            self.state.result_text.clear();
            self.state.error_message = err.to_string();
            return SubmitOutcome::Invalid(err);
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("submit outside a tokio runtime; nothing dispatched");
            return SubmitOutcome::NoRuntime;
        };

        self.error_status = None;
        self.state.phase = Phase::Analyzing;
        self.state.result_text.clear();
        self.state.error_message.clear();
        self.state.input_code = raw;

        let (tx, rx) = oneshot::channel();
        let service = Arc::clone(&self.service);
        let code = self.state.input_code.clone();
        runtime.spawn(async move {
            let result = service.review(&code).await;
            let _ = tx.send(result);
        });
        self.in_flight = Some(rx);

        info!(
            code_len = self.state.input_code.chars().count(),
            "review dispatched"
        );
        SubmitOutcome::Started
    }

    /// Wait for the in-flight dispatch, if any, and apply its outcome.
    pub async fn settle(&mut self) -> &SessionState {
        if let Some(rx) = self.in_flight.take() {
            let outcome = rx.await.ok();
            self.apply(outcome);
        }
        &self.state
    }

    /// Apply the in-flight outcome if it is ready. Returns true when the
    /// session left `Analyzing`.
    pub fn try_settle(&mut self) -> bool {
        let Some(mut rx) = self.in_flight.take() else {
            return false;
        };

        match rx.try_recv() {
            Ok(result) => self.apply(Some(result)),
            Err(TryRecvError::Closed) => self.apply(None),
            Err(TryRecvError::Empty) => {
                self.in_flight = Some(rx);
                return false;
            }
        }
        true
    }

    /// `None` means the dispatch task went away without reporting.
    fn apply(&mut self, outcome: Option<ReviewResult<String>>) {
        match outcome {
            Some(Ok(text)) if !text.is_empty() => {
                info!(review_len = text.len(), "review succeeded");
                self.state.phase = Phase::Success;
                self.state.result_text = text;
                self.state.error_message.clear();
            }
            Some(Ok(_)) => self.fail(&ReviewError::no_review_content()),
            Some(Err(err)) => self.fail(&err),
            None => {
                self.error_status = Some(500);
                self.show_error(UNEXPECTED_MESSAGE.to_string());
            }
        }
    }

    fn fail(&mut self, err: &ReviewError) {
        self.error_status = Some(err.status_code());
        self.show_error(display_message(err));
    }

    fn show_error(&mut self, message: String) {
        info!(error = %message, "review failed");
        self.state.phase = Phase::Error;
        self.state.result_text.clear();
        self.state.error_message = message;
    }
}
