//! In-memory attempt store.
//!
//! Reference implementation of [`AttemptStore`]: used by the test suite
//! and by anonymous practice runs where nothing should outlive the
//! process. Behavior matches [`SqliteStore`](super::SqliteStore) exactly.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use super::{AttemptRecord, AttemptStore};
use crate::error::StoreError;
use crate::quiz::Quiz;
use crate::scoring::{AnswerMap, ScoreReport};

#[derive(Default)]
struct Inner {
    quizzes: HashMap<String, Quiz>,
    attempts: HashMap<Uuid, AttemptRecord>,
}

/// Mutex-backed store holding quizzes and attempts in process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quiz so attempts against it can be created.
    pub fn insert_quiz(&self, quiz: Quiz) {
        let mut inner = self.lock();
        inner.quizzes.insert(quiz.id.clone(), quiz);
    }

    /// Fetch one attempt by id (test and display helper).
    pub fn attempt(&self, attempt_id: Uuid) -> Option<AttemptRecord> {
        self.lock().attempts.get(&attempt_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AttemptStore for MemoryStore {
    fn create_attempt(&self, quiz_id: &str, taker_id: Option<&str>) -> Result<Uuid, StoreError> {
        let mut inner = self.lock();
        let quiz = inner
            .quizzes
            .get(quiz_id)
            .ok_or_else(|| StoreError::QuizNotFound(quiz_id.to_string()))?;
        if !quiz.is_active {
            return Err(StoreError::InactiveQuiz(quiz_id.to_string()));
        }
        let time_limit_secs = quiz.time_limit_secs;

        let now = Utc::now();
        if let Some(taker) = taker_id {
            let open_attempt = inner.attempts.values().any(|a| {
                a.quiz_id == quiz_id
                    && a.taker_id.as_deref() == Some(taker)
                    && !a.is_completed()
                    && a.started_at + chrono::Duration::seconds(time_limit_secs as i64) > now
            });
            if open_attempt {
                return Err(StoreError::AttemptPending {
                    quiz_id: quiz_id.to_string(),
                    taker_id: taker.to_string(),
                });
            }
        }

        let record = AttemptRecord {
            id: Uuid::new_v4(),
            quiz_id: quiz_id.to_string(),
            taker_id: taker_id.map(str::to_string),
            started_at: now,
            completed_at: None,
            answers: AnswerMap::new(),
            score: None,
            total_points: None,
            percentage: None,
            passed: None,
        };
        let id = record.id;
        inner.attempts.insert(id, record);
        tracing::debug!(attempt_id = %id, quiz_id, "attempt created");
        Ok(id)
    }

    fn record_submission(
        &self,
        attempt_id: Uuid,
        answers: &AnswerMap,
        report: &ScoreReport,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let record = inner
            .attempts
            .get_mut(&attempt_id)
            .ok_or(StoreError::AttemptNotFound(attempt_id))?;
        if record.is_completed() {
            tracing::warn!(attempt_id = %attempt_id, "duplicate submission rejected");
            return Err(StoreError::AlreadySubmitted(attempt_id));
        }

        record.completed_at = Some(Utc::now());
        record.answers = answers.clone();
        record.score = Some(report.score);
        record.total_points = Some(report.total_points);
        record.percentage = Some(report.percentage);
        record.passed = Some(report.passed);
        tracing::debug!(attempt_id = %attempt_id, score = report.score, "submission recorded");
        Ok(())
    }

    fn list_attempts(
        &self,
        quiz_id: &str,
        taker_id: Option<&str>,
    ) -> Result<Vec<AttemptRecord>, StoreError> {
        let inner = self.lock();
        let mut attempts: Vec<AttemptRecord> = inner
            .attempts
            .values()
            .filter(|a| a.quiz_id == quiz_id && a.taker_id.as_deref() == taker_id)
            .cloned()
            .collect();
        attempts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(attempts)
    }
}
