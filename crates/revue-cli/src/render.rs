//! Text and JSON rendering of a review session.

use revue_client::{Phase, SessionState};
use serde::Serialize;

pub const EMPTY_STATE: &str = "Your review will appear here";
pub const ANALYZING_STATE: &str = "Processing your code...";

/// The one message to show for the current phase.
pub fn phase_text(state: &SessionState) -> &str {
    match state.phase {
        Phase::Idle => EMPTY_STATE,
        Phase::Analyzing => ANALYZING_STATE,
        Phase::Success => &state.result_text,
        Phase::Error => &state.error_message,
    }
}

/// Character counter, e.g. `42 / 10000`.
pub fn counter(code: &str, max: usize) -> String {
    format!("{} / {}", code.chars().count(), max)
}

/// Machine-readable outcome of `revue review --format json`.
#[derive(Debug, Serialize)]
pub struct ReviewReport<'a> {
    pub phase: Phase,
    pub input_length: usize,
    pub max_code_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<'a> ReviewReport<'a> {
    pub fn new(
        state: &'a SessionState,
        draft: &str,
        max_code_length: usize,
        status_code: Option<u16>,
    ) -> Self {
        Self {
            phase: state.phase,
            input_length: draft.chars().count(),
            max_code_length,
            review: (state.phase == Phase::Success).then_some(state.result_text.as_str()),
            error: (state.phase == Phase::Error).then_some(state.error_message.as_str()),
            status_code,
        }
    }
}
