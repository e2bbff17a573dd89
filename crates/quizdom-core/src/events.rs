use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::AttemptState;
use crate::scoring::ScoreReport;

/// Every attempt-engine command produces an Event.
/// The presentation layer renders them; nothing in the core consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AttemptStarted {
        attempt_id: Uuid,
        quiz_id: String,
        time_limit_secs: u64,
        at: DateTime<Utc>,
    },
    AnswerSelected {
        question_id: String,
        option_id: String,
        at: DateTime<Utc>,
    },
    AnswerCleared {
        question_id: String,
        at: DateTime<Utc>,
    },
    Navigated {
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    AttemptSubmitted {
        attempt_id: Uuid,
        report: ScoreReport,
        /// True when the countdown reaching zero forced the submission.
        auto: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: AttemptState,
        quiz_id: String,
        current_index: usize,
        answered: usize,
        question_count: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}
