//! SQLite-based attempt storage.
//!
//! Provides persistent storage for:
//! - Registered quizzes (the read-only quiz source for attempt creation)
//! - Attempt records and their final grades
//!
//! Timestamps are stored as RFC 3339 text; answers and quiz payloads as
//! JSON columns. The submission invariant is enforced with a guarded
//! `UPDATE ... WHERE completed_at IS NULL`, so concurrent writers for the
//! same attempt id cannot both succeed.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{data_dir, AttemptRecord, AttemptStore};
use crate::error::StoreError;
use crate::quiz::Quiz;
use crate::scoring::{AnswerMap, ScoreReport};

/// SQLite database holding quizzes and attempt history.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `~/.config/quizdom/quizdom.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .join("quizdom.db");
        Self::open_at(path)
    }

    /// Open the store at an explicit path.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (tests, throwaway practice runs).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS quizzes (
                id              TEXT PRIMARY KEY,
                is_active       INTEGER NOT NULL,
                time_limit_secs INTEGER NOT NULL,
                payload         TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS attempts (
                id           TEXT PRIMARY KEY,
                quiz_id      TEXT NOT NULL,
                taker_id     TEXT,
                started_at   TEXT NOT NULL,
                completed_at TEXT,
                answers      TEXT NOT NULL,
                score        INTEGER,
                total_points INTEGER,
                percentage   INTEGER,
                passed       INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_attempts_quiz_taker ON attempts(quiz_id, taker_id);
            CREATE INDEX IF NOT EXISTS idx_attempts_started_at ON attempts(started_at);",
        )?;
        Ok(())
    }

    /// Register or replace a quiz so attempts against it can be created.
    pub fn insert_quiz(&self, quiz: &Quiz) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string(quiz).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO quizzes (id, is_active, time_limit_secs, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![quiz.id, quiz.is_active, quiz.time_limit_secs, payload],
        )?;
        Ok(())
    }

    /// Fetch a registered quiz by id.
    pub fn quiz(&self, quiz_id: &str) -> Result<Quiz, StoreError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM quizzes WHERE id = ?1",
                params![quiz_id],
                |row| row.get(0),
            )
            .optional()?;
        let payload = payload.ok_or_else(|| StoreError::QuizNotFound(quiz_id.to_string()))?;
        serde_json::from_str(&payload).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn row_to_record(
        id: String,
        quiz_id: String,
        taker_id: Option<String>,
        started_at: String,
        completed_at: Option<String>,
        answers: String,
        score: Option<u32>,
        total_points: Option<u32>,
        percentage: Option<u8>,
        passed: Option<bool>,
    ) -> Result<AttemptRecord, StoreError> {
        let id = Uuid::parse_str(&id).map_err(|e| StoreError::Backend(e.to_string()))?;
        let started_at = parse_timestamp(&started_at)?;
        let completed_at = completed_at.as_deref().map(parse_timestamp).transpose()?;
        let answers: AnswerMap =
            serde_json::from_str(&answers).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(AttemptRecord {
            id,
            quiz_id,
            taker_id,
            started_at,
            completed_at,
            answers,
            score,
            total_points,
            percentage,
            passed,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Backend(format!("bad timestamp '{raw}': {e}")))
}

impl AttemptStore for SqliteStore {
    fn create_attempt(&self, quiz_id: &str, taker_id: Option<&str>) -> Result<Uuid, StoreError> {
        let quiz_row: Option<(bool, u64)> = self
            .conn
            .query_row(
                "SELECT is_active, time_limit_secs FROM quizzes WHERE id = ?1",
                params![quiz_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (is_active, time_limit_secs) =
            quiz_row.ok_or_else(|| StoreError::QuizNotFound(quiz_id.to_string()))?;
        if !is_active {
            return Err(StoreError::InactiveQuiz(quiz_id.to_string()));
        }

        let now = Utc::now();
        if let Some(taker) = taker_id {
            let mut stmt = self.conn.prepare(
                "SELECT started_at FROM attempts
                 WHERE quiz_id = ?1 AND taker_id = ?2 AND completed_at IS NULL",
            )?;
            let open_starts = stmt.query_map(params![quiz_id, taker], |row| {
                row.get::<_, String>(0)
            })?;
            for started in open_starts {
                let started = parse_timestamp(&started?)?;
                if started + chrono::Duration::seconds(time_limit_secs as i64) > now {
                    return Err(StoreError::AttemptPending {
                        quiz_id: quiz_id.to_string(),
                        taker_id: taker.to_string(),
                    });
                }
            }
        }

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO attempts (id, quiz_id, taker_id, started_at, answers)
             VALUES (?1, ?2, ?3, ?4, '{}')",
            params![id.to_string(), quiz_id, taker_id, now.to_rfc3339()],
        )?;
        tracing::debug!(attempt_id = %id, quiz_id, "attempt created");
        Ok(id)
    }

    fn record_submission(
        &self,
        attempt_id: Uuid,
        answers: &AnswerMap,
        report: &ScoreReport,
    ) -> Result<(), StoreError> {
        let answers_json =
            serde_json::to_string(answers).map_err(|e| StoreError::Backend(e.to_string()))?;

        // Guarded update: only an open attempt row can take a submission.
        let updated = self.conn.execute(
            "UPDATE attempts
             SET completed_at = ?2, answers = ?3,
                 score = ?4, total_points = ?5, percentage = ?6, passed = ?7
             WHERE id = ?1 AND completed_at IS NULL",
            params![
                attempt_id.to_string(),
                Utc::now().to_rfc3339(),
                answers_json,
                report.score,
                report.total_points,
                report.percentage,
                report.passed,
            ],
        )?;
        if updated == 1 {
            tracing::debug!(attempt_id = %attempt_id, score = report.score, "submission recorded");
            return Ok(());
        }

        // No row updated: distinguish "already done" from "never existed".
        let exists: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM attempts WHERE id = ?1",
                params![attempt_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            tracing::warn!(attempt_id = %attempt_id, "duplicate submission rejected");
            Err(StoreError::AlreadySubmitted(attempt_id))
        } else {
            Err(StoreError::AttemptNotFound(attempt_id))
        }
    }

    fn list_attempts(
        &self,
        quiz_id: &str,
        taker_id: Option<&str>,
    ) -> Result<Vec<AttemptRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, quiz_id, taker_id, started_at, completed_at, answers,
                    score, total_points, percentage, passed
             FROM attempts
             WHERE quiz_id = ?1
               AND ((?2 IS NULL AND taker_id IS NULL) OR taker_id = ?2)
             ORDER BY started_at DESC",
        )?;
        let rows = stmt.query_map(params![quiz_id, taker_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<u32>>(6)?,
                row.get::<_, Option<u32>>(7)?,
                row.get::<_, Option<u8>>(8)?,
                row.get::<_, Option<bool>>(9)?,
            ))
        })?;

        let mut attempts = Vec::new();
        for row in rows {
            let (id, quiz_id, taker_id, started_at, completed_at, answers, score, total, pct, passed) =
                row?;
            attempts.push(Self::row_to_record(
                id, quiz_id, taker_id, started_at, completed_at, answers, score, total, pct, passed,
            )?);
        }
        Ok(attempts)
    }
}
