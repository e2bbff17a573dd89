//! Core error types for quizdom-core.
//!
//! This module defines the error hierarchy using thiserror. Store errors
//! are the only fallible boundary of the attempt engine; everything else
//! is validated up front and rejected before any state mutates.

use thiserror::Error;

/// Core error type for quizdom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Attempt store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Quiz configuration / input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The quiz is not open for attempts
    #[error("Quiz '{quiz_id}' is not active")]
    InactiveQuiz { quiz_id: String },

    /// An operation was called from a state that does not permit it
    #[error("Invalid transition: {operation} is not allowed in state {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    /// A submit call re-entered while a submission was already in flight
    #[error("Submission already in flight for attempt {attempt_id}")]
    SubmissionInFlight { attempt_id: uuid::Uuid },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file parse errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Catalog file write errors
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Attempt-store-specific errors.
///
/// The store is the authority on attempt uniqueness and exactly-once
/// submission, so its error set mirrors those contracts.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced quiz does not exist in the store
    #[error("Quiz '{0}' not found")]
    QuizNotFound(String),

    /// The referenced attempt does not exist in the store
    #[error("Attempt {0} not found")]
    AttemptNotFound(uuid::Uuid),

    /// The quiz exists but is closed for new attempts
    #[error("Quiz '{0}' is inactive")]
    InactiveQuiz(String),

    /// The attempt already has a recorded submission
    #[error("Attempt {0} was already submitted")]
    AlreadySubmitted(uuid::Uuid),

    /// The taker already holds an open attempt for this quiz
    #[error("Taker '{taker_id}' already has an open attempt for quiz '{quiz_id}'")]
    AttemptPending { quiz_id: String, taker_id: String },

    /// Backend failure (connection, query, serialization of a row)
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Quiz configuration and answer-input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required identifier or text field is empty
    #[error("Empty field '{field}' in {context}")]
    EmptyField {
        field: &'static str,
        context: String,
    },

    /// Time limit must be a positive number of seconds
    #[error("Quiz '{quiz_id}' has a zero time limit")]
    ZeroTimeLimit { quiz_id: String },

    /// Passing score is a percentage and must lie in [0, 100]
    #[error("Quiz '{quiz_id}' has passing score {passing_score}, expected 0-100")]
    PassingScoreOutOfRange { quiz_id: String, passing_score: u8 },

    /// Multiple-choice questions need at least two options
    #[error("Question '{question_id}' has {count} options, expected at least 2")]
    TooFewOptions { question_id: String, count: usize },

    /// Option ids must be unique within a question
    #[error("Question '{question_id}' has duplicate option id '{option_id}'")]
    DuplicateOption {
        question_id: String,
        option_id: String,
    },

    /// The designated correct option must be one of the question's options
    #[error("Question '{question_id}' marks unknown option '{option_id}' as correct")]
    DanglingCorrectOption {
        question_id: String,
        option_id: String,
    },

    /// Question point weights must be positive
    #[error("Question '{question_id}' has zero points")]
    ZeroPoints { question_id: String },

    /// Question ids must be unique within a quiz
    #[error("Quiz '{quiz_id}' has duplicate question id '{question_id}'")]
    DuplicateQuestion { quiz_id: String, question_id: String },

    /// Order indexes must be unique within a quiz
    #[error("Quiz '{quiz_id}' has duplicate order index {order_index}")]
    DuplicateOrderIndex { quiz_id: String, order_index: u32 },

    /// An answer referenced a question that is not part of the quiz
    #[error("Question '{question_id}' does not belong to quiz '{quiz_id}'")]
    UnknownQuestion { quiz_id: String, question_id: String },

    /// An answer referenced an option that is not part of the question
    #[error("Option '{option_id}' does not belong to question '{question_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
