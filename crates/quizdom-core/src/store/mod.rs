//! Attempt persistence.
//!
//! The attempt engine talks to storage through the narrow [`AttemptStore`]
//! trait. Two implementations ship with the crate: [`MemoryStore`] for
//! tests and throwaway practice runs, and [`SqliteStore`] for durable
//! history. The store, not the engine, is the authority on per-taker
//! attempt uniqueness and on exactly-once submission.

pub mod database;
pub mod memory;

pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::scoring::{AnswerMap, ScoreReport};

/// One taker's pass through a quiz, as persisted.
///
/// `completed_at` and the four result fields are set together, exactly
/// once, by `record_submission`; a record with `completed_at` set is
/// immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub quiz_id: String,
    /// Absent for anonymous practice attempts.
    pub taker_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: AnswerMap,
    pub score: Option<u32>,
    pub total_points: Option<u32>,
    pub percentage: Option<u8>,
    pub passed: Option<bool>,
}

impl AttemptRecord {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// The recorded grade, if the attempt was submitted.
    pub fn report(&self) -> Option<ScoreReport> {
        Some(ScoreReport {
            score: self.score?,
            total_points: self.total_points?,
            percentage: self.percentage?,
            passed: self.passed?,
        })
    }
}

/// Narrow persistence boundary the attempt engine depends on.
///
/// Implementations must defend the submission invariant themselves: a
/// second `record_submission` for the same attempt id fails with
/// [`StoreError::AlreadySubmitted`] even when it comes from a different
/// engine instance (a duplicated browser tab, a second process).
pub trait AttemptStore {
    /// Create an attempt record in its initial, unsubmitted state.
    ///
    /// # Errors
    /// `QuizNotFound` for an unknown quiz, `InactiveQuiz` when the quiz is
    /// closed, `AttemptPending` when the (non-anonymous) taker already
    /// holds an open, unexpired attempt for this quiz.
    fn create_attempt(&self, quiz_id: &str, taker_id: Option<&str>) -> Result<Uuid, StoreError>;

    /// Persist the final answers and grade, stamping `completed_at`.
    ///
    /// All result fields become visible together; no partially-scored
    /// record is ever observable.
    ///
    /// # Errors
    /// `AlreadySubmitted` if the attempt already has a recorded
    /// submission, `AttemptNotFound` if the id is unknown.
    fn record_submission(
        &self,
        attempt_id: Uuid,
        answers: &AnswerMap,
        report: &ScoreReport,
    ) -> Result<(), StoreError>;

    /// Attempt history for one quiz and taker, newest first.
    fn list_attempts(
        &self,
        quiz_id: &str,
        taker_id: Option<&str>,
    ) -> Result<Vec<AttemptRecord>, StoreError>;
}

/// Returns `~/.config/quizdom[-dev]/` based on QUIZDOM_ENV.
///
/// Set QUIZDOM_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("QUIZDOM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("quizdom-dev")
    } else {
        base_dir.join("quizdom")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
