//! # Quizdom Core Library
//!
//! This library provides the core business logic for Quizdom, a timed
//! multiple-choice assessment engine. All operations are available to any
//! frontend; the bundled CLI is a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Attempt Engine**: A caller-clocked state machine that requires the
//!   caller to invoke `tick()` once per second; the countdown reaching
//!   zero forces submission with whatever answers exist at that instant
//! - **Scoring**: A pure grading function from questions and answers to a
//!   score, percentage and pass/fail verdict
//! - **Stores**: SQLite-backed and in-memory implementations of the
//!   narrow attempt-persistence boundary
//! - **Catalog**: TOML-based quiz bank with load-time validation
//!
//! ## Key Components
//!
//! - [`AttemptEngine`]: Attempt lifecycle state machine
//! - [`ScoreEngine`]: Deterministic grading
//! - [`AttemptStore`]: Trait the engine persists through
//! - [`QuizBank`]: Quiz configuration source

pub mod attempt;
pub mod catalog;
pub mod error;
pub mod events;
pub mod quiz;
pub mod scoring;
pub mod store;

pub use attempt::{AttemptEngine, AttemptState};
pub use catalog::QuizBank;
pub use error::{CoreError, StoreError, ValidationError};
pub use events::Event;
pub use quiz::{AnswerOption, Question, Quiz};
pub use scoring::{AnswerMap, ScoreEngine, ScoreReport};
pub use store::{AttemptRecord, AttemptStore, MemoryStore, SqliteStore};
