//! Attempt engine implementation.
//!
//! The attempt engine is a caller-clocked state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per wall-clock second while an attempt is in progress.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> InProgress -> Submitted
//! ```
//!
//! `Submitted` is absorbing: no transition leaves it, and every `submit`
//! call after the first successful one returns the already-computed grade
//! without touching the store.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = AttemptEngine::new(quiz, Some("alice".into()))?;
//! engine.start(&store)?;
//! engine.select_answer("q1", Some("opt-b"))?;
//! // Once per second:
//! engine.tick(&store)?; // auto-submits when the countdown hits zero
//! let report = engine.submit(&store)?;
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::quiz::{Question, Quiz};
use crate::scoring::{AnswerMap, ScoreEngine, ScoreReport};
use crate::store::AttemptStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    NotStarted,
    InProgress,
    Submitted,
}

impl AttemptState {
    fn name(self) -> &'static str {
        match self {
            AttemptState::NotStarted => "not_started",
            AttemptState::InProgress => "in_progress",
            AttemptState::Submitted => "submitted",
        }
    }
}

/// Internal phase; `InProgress` provably has an attempt id and
/// `Submitted` carries the one grade ever computed for this attempt.
#[derive(Debug, Clone, Copy)]
enum Phase {
    NotStarted,
    InProgress { attempt_id: Uuid },
    Submitted { attempt_id: Uuid, report: ScoreReport },
}

/// Drives one attempt through its lifecycle.
///
/// Owns the only mutable in-memory state for that attempt: the countdown,
/// the cursor, and the captured answers. Store calls are the only fallible
/// boundary; every other operation is computed synchronously in memory.
#[derive(Debug)]
pub struct AttemptEngine {
    quiz: Quiz,
    taker_id: Option<String>,
    phase: Phase,
    current_index: usize,
    answers: AnswerMap,
    /// Seconds left on the attempt clock.
    remaining_secs: u64,
    /// Re-entrancy guard: set for the duration of the grade-and-persist
    /// step so a second submit arriving from another event source (timer
    /// callback vs. button handler) cannot double-score.
    submitting: bool,
    /// Set when a submission failed at the store. The clock halts at the
    /// failure point; only an explicit submit retry moves the attempt on.
    clock_frozen: bool,
}

impl AttemptEngine {
    /// Build an engine for one attempt at `quiz`.
    ///
    /// Validates the quiz configuration and rejects inactive quizzes up
    /// front. Questions are put in presentation order here; the engine
    /// addresses them by position from then on.
    ///
    /// # Errors
    /// `Validation` for a malformed quiz, `InactiveQuiz` when the quiz is
    /// closed for attempts.
    pub fn new(quiz: Quiz, taker_id: Option<String>) -> Result<Self, CoreError> {
        quiz.validate()?;
        if !quiz.is_active {
            return Err(CoreError::InactiveQuiz { quiz_id: quiz.id });
        }
        let mut quiz = quiz;
        quiz.questions.sort_by_key(|q| q.order_index);
        let remaining_secs = quiz.time_limit_secs;
        Ok(Self {
            quiz,
            taker_id,
            phase: Phase::NotStarted,
            current_index: 0,
            answers: AnswerMap::new(),
            remaining_secs,
            submitting: false,
            clock_frozen: false,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> AttemptState {
        match self.phase {
            Phase::NotStarted => AttemptState::NotStarted,
            Phase::InProgress { .. } => AttemptState::InProgress,
            Phase::Submitted { .. } => AttemptState::Submitted,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn attempt_id(&self) -> Option<Uuid> {
        match self.phase {
            Phase::NotStarted => None,
            Phase::InProgress { attempt_id } | Phase::Submitted { attempt_id, .. } => {
                Some(attempt_id)
            }
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current_index)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// The final grade, once submitted.
    pub fn result(&self) -> Option<ScoreReport> {
        match self.phase {
            Phase::Submitted { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            quiz_id: self.quiz.id.clone(),
            current_index: self.current_index,
            answered: self.answers.len(),
            question_count: self.quiz.question_count(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// `NotStarted -> InProgress`: create the attempt record and arm the
    /// countdown.
    ///
    /// The store is the authority on per-taker uniqueness; its
    /// `AttemptPending` rejection propagates unchanged. On any store
    /// failure the engine stays `NotStarted` so the call can be retried.
    pub fn start(&mut self, store: &dyn AttemptStore) -> Result<Event, CoreError> {
        if !matches!(self.phase, Phase::NotStarted) {
            return Err(self.invalid_transition("start"));
        }
        let attempt_id = store.create_attempt(&self.quiz.id, self.taker_id.as_deref())?;
        self.phase = Phase::InProgress { attempt_id };
        self.remaining_secs = self.quiz.time_limit_secs;
        tracing::info!(attempt_id = %attempt_id, quiz_id = %self.quiz.id, "attempt started");
        Ok(Event::AttemptStarted {
            attempt_id,
            quiz_id: self.quiz.id.clone(),
            time_limit_secs: self.quiz.time_limit_secs,
            at: Utc::now(),
        })
    }

    /// Record (or with `None`, clear) the answer for one question.
    ///
    /// Overwrites any prior answer for that question; last write wins.
    /// Rejects ids that don't belong to this quiz without mutating any
    /// state. Never changes the cursor. Nothing is persisted until submit.
    pub fn select_answer(
        &mut self,
        question_id: &str,
        option_id: Option<&str>,
    ) -> Result<Event, CoreError> {
        if !matches!(self.phase, Phase::InProgress { .. }) {
            return Err(self.invalid_transition("select_answer"));
        }
        let question = self.quiz.question(question_id).ok_or_else(|| {
            crate::error::ValidationError::UnknownQuestion {
                quiz_id: self.quiz.id.clone(),
                question_id: question_id.to_string(),
            }
        })?;

        match option_id {
            Some(option_id) => {
                if !question.has_option(option_id) {
                    return Err(crate::error::ValidationError::UnknownOption {
                        question_id: question_id.to_string(),
                        option_id: option_id.to_string(),
                    }
                    .into());
                }
                self.answers
                    .insert(question_id.to_string(), option_id.to_string());
                Ok(Event::AnswerSelected {
                    question_id: question_id.to_string(),
                    option_id: option_id.to_string(),
                    at: Utc::now(),
                })
            }
            None => {
                self.answers.remove(question_id);
                Ok(Event::AnswerCleared {
                    question_id: question_id.to_string(),
                    at: Utc::now(),
                })
            }
        }
    }

    /// Move the cursor; out-of-range input clamps to the last question
    /// instead of failing. A no-op outside `InProgress`.
    pub fn go_to(&mut self, index: usize) -> Option<Event> {
        if !matches!(self.phase, Phase::InProgress { .. }) {
            return None;
        }
        let from_index = self.current_index;
        let last = self.quiz.question_count().saturating_sub(1);
        self.current_index = index.min(last);
        Some(Event::Navigated {
            from_index,
            to_index: self.current_index,
            at: Utc::now(),
        })
    }

    /// Advance the attempt clock by one second.
    ///
    /// On the transition to zero the engine submits synchronously before
    /// returning and yields the submission event. After a failed
    /// submission the clock is frozen at the failure point: further ticks
    /// are no-ops and never resubmit; recovery is an explicit
    /// [`submit`](Self::submit) retry.
    pub fn tick(&mut self, store: &dyn AttemptStore) -> Result<Option<Event>, CoreError> {
        let attempt_id = match self.phase {
            Phase::InProgress { attempt_id } => attempt_id,
            _ => return Ok(None),
        };
        if self.clock_frozen || self.remaining_secs == 0 {
            return Ok(None);
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return Ok(None);
        }

        tracing::info!(quiz_id = %self.quiz.id, "time limit reached, auto-submitting");
        let report = self.do_submit(store, true)?;
        Ok(Some(Event::AttemptSubmitted {
            attempt_id,
            report,
            auto: true,
            at: Utc::now(),
        }))
    }

    /// Grade the attempt and persist the result.
    ///
    /// Callable any number of times: the first successful call scores and
    /// persists, every later call returns the identical grade without
    /// touching the store. A store failure leaves the attempt
    /// `InProgress` (clock frozen where it was) and propagates, so a
    /// retry is safe; the store's own dedup makes the retry idempotent.
    pub fn submit(&mut self, store: &dyn AttemptStore) -> Result<ScoreReport, CoreError> {
        self.do_submit(store, false)
    }

    fn do_submit(&mut self, store: &dyn AttemptStore, auto: bool) -> Result<ScoreReport, CoreError> {
        let attempt_id = match self.phase {
            Phase::NotStarted => return Err(self.invalid_transition("submit")),
            Phase::Submitted { report, .. } => return Ok(report),
            Phase::InProgress { attempt_id } => attempt_id,
        };
        if self.submitting {
            return Err(CoreError::SubmissionInFlight { attempt_id });
        }
        self.submitting = true;

        let report = ScoreEngine::grade(
            &self.quiz.questions,
            &self.answers,
            self.quiz.passing_score,
        );
        let persisted = store.record_submission(attempt_id, &self.answers, &report);
        self.submitting = false;

        match persisted {
            Ok(()) => {
                self.phase = Phase::Submitted { attempt_id, report };
                tracing::info!(
                    attempt_id = %attempt_id,
                    score = report.score,
                    percentage = report.percentage,
                    passed = report.passed,
                    auto,
                    "attempt submitted"
                );
                Ok(report)
            }
            Err(StoreError::AlreadySubmitted(_)) => {
                // Another engine instance for the same attempt id won the
                // race. The store's record is the truth; adopt it.
                let adopted = store
                    .list_attempts(&self.quiz.id, self.taker_id.as_deref())?
                    .into_iter()
                    .find(|a| a.id == attempt_id)
                    .and_then(|a| a.report())
                    .unwrap_or(report);
                self.phase = Phase::Submitted {
                    attempt_id,
                    report: adopted,
                };
                tracing::info!(attempt_id = %attempt_id, "adopted previously recorded submission");
                Ok(adopted)
            }
            Err(err) => {
                self.clock_frozen = true;
                tracing::warn!(attempt_id = %attempt_id, error = %err, "submission failed, attempt stays open");
                Err(err.into())
            }
        }
    }

    fn invalid_transition(&self, operation: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            operation,
            state: self.state().name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::quiz::AnswerOption;
    use crate::store::MemoryStore;

    fn question(id: &str, order_index: u32) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            options: vec![
                AnswerOption {
                    id: "right".to_string(),
                    text: "Right".to_string(),
                },
                AnswerOption {
                    id: "wrong".to_string(),
                    text: "Wrong".to_string(),
                },
            ],
            correct_option_id: "right".to_string(),
            points: 20,
            order_index,
        }
    }

    fn quiz() -> Quiz {
        Quiz {
            id: "rust-basics".to_string(),
            title: "Rust Basics".to_string(),
            description: String::new(),
            time_limit_secs: 10,
            passing_score: 70,
            is_active: true,
            questions: (0..5).map(|i| question(&format!("q{i}"), i)).collect(),
        }
    }

    fn store_with_quiz() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_quiz(quiz());
        store
    }

    fn started_engine(store: &MemoryStore) -> AttemptEngine {
        let mut engine = AttemptEngine::new(quiz(), None).unwrap();
        engine.start(store).unwrap();
        engine
    }

    /// Delegating store that counts `record_submission` calls.
    struct CountingStore {
        inner: MemoryStore,
        submissions: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            let inner = MemoryStore::new();
            inner.insert_quiz(quiz());
            Self {
                inner,
                submissions: AtomicUsize::new(0),
            }
        }
    }

    impl AttemptStore for CountingStore {
        fn create_attempt(
            &self,
            quiz_id: &str,
            taker_id: Option<&str>,
        ) -> Result<Uuid, StoreError> {
            self.inner.create_attempt(quiz_id, taker_id)
        }

        fn record_submission(
            &self,
            attempt_id: Uuid,
            answers: &AnswerMap,
            report: &ScoreReport,
        ) -> Result<(), StoreError> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            self.inner.record_submission(attempt_id, answers, report)
        }

        fn list_attempts(
            &self,
            quiz_id: &str,
            taker_id: Option<&str>,
        ) -> Result<Vec<crate::store::AttemptRecord>, StoreError> {
            self.inner.list_attempts(quiz_id, taker_id)
        }
    }

    /// Store whose `record_submission` fails until told otherwise.
    struct FlakyStore {
        inner: MemoryStore,
        failing: Mutex<bool>,
    }

    impl FlakyStore {
        fn new() -> Self {
            let inner = MemoryStore::new();
            inner.insert_quiz(quiz());
            Self {
                inner,
                failing: Mutex::new(true),
            }
        }

        fn recover(&self) {
            *self.failing.lock().unwrap() = false;
        }
    }

    impl AttemptStore for FlakyStore {
        fn create_attempt(
            &self,
            quiz_id: &str,
            taker_id: Option<&str>,
        ) -> Result<Uuid, StoreError> {
            self.inner.create_attempt(quiz_id, taker_id)
        }

        fn record_submission(
            &self,
            attempt_id: Uuid,
            answers: &AnswerMap,
            report: &ScoreReport,
        ) -> Result<(), StoreError> {
            if *self.failing.lock().unwrap() {
                return Err(StoreError::Backend("disk on fire".to_string()));
            }
            self.inner.record_submission(attempt_id, answers, report)
        }

        fn list_attempts(
            &self,
            quiz_id: &str,
            taker_id: Option<&str>,
        ) -> Result<Vec<crate::store::AttemptRecord>, StoreError> {
            self.inner.list_attempts(quiz_id, taker_id)
        }
    }

    fn answer_correctly(engine: &mut AttemptEngine, count: usize) {
        for i in 0..count {
            engine.select_answer(&format!("q{i}"), Some("right")).unwrap();
        }
    }

    #[test]
    fn four_of_five_passes() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        answer_correctly(&mut engine, 4);
        let report = engine.submit(&store).unwrap();
        assert_eq!(report.score, 80);
        assert_eq!(report.total_points, 100);
        assert_eq!(report.percentage, 80);
        assert!(report.passed);
        assert_eq!(engine.state(), AttemptState::Submitted);
    }

    #[test]
    fn three_of_five_fails() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        answer_correctly(&mut engine, 3);
        let report = engine.submit(&store).unwrap();
        assert_eq!(report.percentage, 60);
        assert!(!report.passed);
    }

    #[test]
    fn submitted_result_is_persisted() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        answer_correctly(&mut engine, 5);
        let report = engine.submit(&store).unwrap();

        let record = store.attempt(engine.attempt_id().unwrap()).unwrap();
        assert!(record.is_completed());
        assert_eq!(record.report().unwrap(), report);
        assert_eq!(record.answers.len(), 5);
    }

    #[test]
    fn repeat_submit_returns_same_report_without_new_store_call() {
        let store = CountingStore::new();
        let mut engine = AttemptEngine::new(quiz(), None).unwrap();
        engine.start(&store).unwrap();
        answer_correctly(&mut engine, 2);
        let first = engine.submit(&store).unwrap();

        // Answers chosen after submission must not exist, and repeat calls
        // must not re-score.
        assert!(engine.select_answer("q3", Some("right")).is_err());
        for _ in 0..3 {
            assert_eq!(engine.submit(&store).unwrap(), first);
        }
        assert_eq!(store.submissions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn countdown_expiry_forces_submission_with_zero_answers() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);

        let mut submitted_event = None;
        for _ in 0..quiz().time_limit_secs {
            if let Some(event) = engine.tick(&store).unwrap() {
                submitted_event = Some(event);
            }
        }

        assert_eq!(engine.state(), AttemptState::Submitted);
        let report = engine.result().unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.total_points, 100);
        assert!(!report.passed); // passing_score is 70, not 0
        match submitted_event {
            Some(Event::AttemptSubmitted { auto, .. }) => assert!(auto),
            other => panic!("expected AttemptSubmitted, got {other:?}"),
        }
    }

    #[test]
    fn zero_passing_score_passes_on_timeout() {
        let mut q = quiz();
        q.passing_score = 0;
        let store = MemoryStore::new();
        store.insert_quiz(q.clone());
        let mut engine = AttemptEngine::new(q, None).unwrap();
        engine.start(&store).unwrap();
        for _ in 0..engine.quiz().time_limit_secs {
            engine.tick(&store).unwrap();
        }
        assert!(engine.result().unwrap().passed);
    }

    #[test]
    fn ticks_before_expiry_do_not_submit() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        for _ in 0..quiz().time_limit_secs - 1 {
            assert!(engine.tick(&store).unwrap().is_none());
        }
        assert_eq!(engine.state(), AttemptState::InProgress);
        assert_eq!(engine.remaining_secs(), 1);
    }

    #[test]
    fn tick_is_noop_outside_in_progress() {
        let store = store_with_quiz();
        let mut engine = AttemptEngine::new(quiz(), None).unwrap();
        assert!(engine.tick(&store).unwrap().is_none());

        engine.start(&store).unwrap();
        engine.submit(&store).unwrap();
        let remaining = engine.remaining_secs();
        assert!(engine.tick(&store).unwrap().is_none());
        assert_eq!(engine.remaining_secs(), remaining);
    }

    #[test]
    fn answer_overwrite_keeps_last_write() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        engine.select_answer("q0", Some("wrong")).unwrap();
        engine.select_answer("q0", Some("right")).unwrap();
        assert_eq!(engine.answers().get("q0").map(String::as_str), Some("right"));
        assert_eq!(engine.answered_count(), 1);

        let report = engine.submit(&store).unwrap();
        assert_eq!(report.score, 20);
    }

    #[test]
    fn clearing_an_answer_removes_it() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        engine.select_answer("q0", Some("right")).unwrap();
        engine.select_answer("q0", None).unwrap();
        assert!(engine.answers().is_empty());
    }

    #[test]
    fn unknown_question_or_option_rejected_without_mutation() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        assert!(engine.select_answer("ghost", Some("right")).is_err());
        assert!(engine.select_answer("q0", Some("ghost")).is_err());
        assert!(engine.answers().is_empty());
        assert_eq!(engine.state(), AttemptState::InProgress);
    }

    #[test]
    fn go_to_clamps_out_of_range_index() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        engine.go_to(2);
        assert_eq!(engine.current_index(), 2);
        engine.go_to(999);
        assert_eq!(engine.current_index(), 4);
        assert_eq!(engine.current_question().unwrap().id, "q4");
    }

    #[test]
    fn selecting_answers_does_not_move_cursor() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        engine.go_to(3);
        engine.select_answer("q1", Some("right")).unwrap();
        assert_eq!(engine.current_index(), 3);
    }

    #[test]
    fn questions_are_presented_in_order_index_order() {
        let mut q = quiz();
        q.questions.reverse();
        let store = MemoryStore::new();
        store.insert_quiz(q.clone());
        let mut engine = AttemptEngine::new(q, None).unwrap();
        engine.start(&store).unwrap();
        assert_eq!(engine.current_question().unwrap().id, "q0");
    }

    #[test]
    fn inactive_quiz_rejected_up_front() {
        let mut q = quiz();
        q.is_active = false;
        assert!(matches!(
            AttemptEngine::new(q, None),
            Err(CoreError::InactiveQuiz { .. })
        ));
    }

    #[test]
    fn malformed_quiz_rejected_up_front() {
        let mut q = quiz();
        q.questions[0].correct_option_id = "ghost".to_string();
        assert!(matches!(
            AttemptEngine::new(q, None),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn lifecycle_operations_require_matching_state() {
        let store = store_with_quiz();
        let mut engine = AttemptEngine::new(quiz(), None).unwrap();
        assert!(matches!(
            engine.submit(&store),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            engine.select_answer("q0", Some("right")),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(engine.go_to(3).is_none());

        engine.start(&store).unwrap();
        assert!(matches!(
            engine.start(&store),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn store_failure_keeps_attempt_open_and_retry_succeeds() {
        let store = FlakyStore::new();
        let mut engine = AttemptEngine::new(quiz(), None).unwrap();
        engine.start(&store).unwrap();
        answer_correctly(&mut engine, 5);
        engine.tick(&store).unwrap();
        let at_failure = engine.remaining_secs();

        assert!(engine.submit(&store).is_err());
        assert_eq!(engine.state(), AttemptState::InProgress);

        // The clock is frozen at the failure point until the retry lands.
        assert!(engine.tick(&store).unwrap().is_none());
        assert_eq!(engine.remaining_secs(), at_failure);

        store.recover();
        let report = engine.submit(&store).unwrap();
        assert_eq!(report.percentage, 100);
        assert_eq!(engine.state(), AttemptState::Submitted);
    }

    #[test]
    fn failed_auto_submit_freezes_clock_at_zero() {
        let store = FlakyStore::new();
        let mut engine = AttemptEngine::new(quiz(), None).unwrap();
        engine.start(&store).unwrap();

        for _ in 0..engine.quiz().time_limit_secs - 1 {
            engine.tick(&store).unwrap();
        }
        // The expiring tick carries the store failure out.
        assert!(engine.tick(&store).is_err());
        assert_eq!(engine.state(), AttemptState::InProgress);
        assert_eq!(engine.remaining_secs(), 0);

        // Frozen: further ticks never resubmit.
        assert!(engine.tick(&store).unwrap().is_none());
        assert_eq!(engine.remaining_secs(), 0);

        store.recover();
        let report = engine.submit(&store).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(engine.state(), AttemptState::Submitted);
    }

    #[test]
    fn concurrent_submission_elsewhere_is_adopted_not_fatal() {
        let store = store_with_quiz();
        let mut engine = started_engine(&store);
        answer_correctly(&mut engine, 1);
        let attempt_id = engine.attempt_id().unwrap();

        // A second controller instance (duplicated tab) records first.
        let winning = ScoreReport {
            score: 100,
            total_points: 100,
            percentage: 100,
            passed: true,
        };
        store
            .record_submission(attempt_id, &AnswerMap::new(), &winning)
            .unwrap();

        let report = engine.submit(&store).unwrap();
        assert_eq!(report, winning);
        assert_eq!(engine.state(), AttemptState::Submitted);
        assert_eq!(engine.result().unwrap(), winning);
    }
}
