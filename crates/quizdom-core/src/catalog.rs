//! TOML-based quiz catalog.
//!
//! The attempt engine reads quizzes from a read-only bank; this module
//! loads one from a TOML file (`[[quizzes]]` tables with nested
//! questions and options) and validates every quiz at load time, so a
//! malformed bank fails fast instead of degrading scoring later.
//!
//! A compiled-in sample bank is available via [`QuizBank::builtin`] so
//! the CLI works without any configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quiz::{AnswerOption, Question, Quiz};

/// A read-only collection of quizzes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizBank {
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

impl QuizBank {
    /// Load and validate a bank from a TOML file.
    ///
    /// # Errors
    /// IO and parse errors, plus the first structural invariant violated
    /// by any quiz in the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let bank: QuizBank = toml::from_str(&raw)?;
        bank.validate()?;
        Ok(bank)
    }

    /// Write the bank back out as TOML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for quiz in &self.quizzes {
            quiz.validate()?;
        }
        Ok(())
    }

    pub fn quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quiz> {
        self.quizzes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// The compiled-in sample bank.
    pub fn builtin() -> Self {
        fn option(id: &str, text: &str) -> AnswerOption {
            AnswerOption {
                id: id.to_string(),
                text: text.to_string(),
            }
        }

        Self {
            quizzes: vec![
                Quiz {
                    id: "rust-basics".to_string(),
                    title: "Rust Basics".to_string(),
                    description: "Ownership, borrowing and the standard types.".to_string(),
                    time_limit_secs: 300,
                    passing_score: 70,
                    is_active: true,
                    questions: vec![
                        Question {
                            id: "ownership".to_string(),
                            text: "What happens to a `String` passed by value into a function?"
                                .to_string(),
                            options: vec![
                                option("moved", "It is moved; the caller can no longer use it"),
                                option("copied", "It is implicitly deep-copied"),
                                option("borrowed", "It is borrowed for the call"),
                            ],
                            correct_option_id: "moved".to_string(),
                            points: 20,
                            order_index: 0,
                        },
                        Question {
                            id: "option-type".to_string(),
                            text: "Which type models a value that may be absent?".to_string(),
                            options: vec![
                                option("null", "null"),
                                option("option", "Option<T>"),
                                option("result", "Result<T, E>"),
                            ],
                            correct_option_id: "option".to_string(),
                            points: 20,
                            order_index: 1,
                        },
                        Question {
                            id: "borrow-rules".to_string(),
                            text: "How many mutable references to a value may be live at once?"
                                .to_string(),
                            options: vec![
                                option("one", "Exactly one"),
                                option("two", "Up to two"),
                                option("any", "Any number"),
                            ],
                            correct_option_id: "one".to_string(),
                            points: 20,
                            order_index: 2,
                        },
                        Question {
                            id: "error-op".to_string(),
                            text: "Which operator propagates an error to the caller?".to_string(),
                            options: vec![
                                option("question", "?"),
                                option("bang", "!"),
                                option("tilde", "~"),
                            ],
                            correct_option_id: "question".to_string(),
                            points: 20,
                            order_index: 3,
                        },
                        Question {
                            id: "vec-grow".to_string(),
                            text: "Which method appends an element to a Vec?".to_string(),
                            options: vec![
                                option("push", "push"),
                                option("append-one", "append_one"),
                                option("add", "add"),
                            ],
                            correct_option_id: "push".to_string(),
                            points: 20,
                            order_index: 4,
                        },
                    ],
                },
                Quiz {
                    id: "lifetimes-lightning".to_string(),
                    title: "Lifetimes Lightning Round".to_string(),
                    description: "Two quick questions, thirty seconds.".to_string(),
                    time_limit_secs: 30,
                    passing_score: 50,
                    is_active: true,
                    questions: vec![
                        Question {
                            id: "elision".to_string(),
                            text: "What does lifetime elision do?".to_string(),
                            options: vec![
                                option(
                                    "infer",
                                    "Lets the compiler fill in common lifetime patterns",
                                ),
                                option("erase", "Erases lifetimes at runtime"),
                                option("extend", "Extends every lifetime to 'static"),
                            ],
                            correct_option_id: "infer".to_string(),
                            points: 10,
                            order_index: 0,
                        },
                        Question {
                            id: "static-lt".to_string(),
                            text: "Which lifetime outlives all others?".to_string(),
                            options: vec![
                                option("static", "'static"),
                                option("global", "'global"),
                                option("outer", "'outer"),
                            ],
                            correct_option_id: "static".to_string(),
                            points: 10,
                            order_index: 1,
                        },
                    ],
                },
            ],
        }
    }
}
