//! Attempt scoring.
//!
//! Grading is a pure function from a question set and an answer map to a
//! [`ScoreReport`]. It performs no I/O, never fails, and its result does
//! not depend on the order questions were presented or answered.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quiz::Question;

/// Question id -> selected option id. At most one answer per question;
/// unanswered questions are simply absent.
pub type AnswerMap = HashMap<String, String>;

/// Final grade of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Points earned over correctly answered questions.
    pub score: u32,
    /// Points available over all questions, answered or not.
    pub total_points: u32,
    /// `round(100 * score / total_points)`; 0 for an empty quiz.
    pub percentage: u8,
    /// Whether `percentage` reached the quiz passing score (inclusive).
    pub passed: bool,
}

/// Scoring engine.
pub struct ScoreEngine;

impl ScoreEngine {
    /// Grade an answer map against a question set.
    ///
    /// A question counts as correct iff the map holds exactly its
    /// `correct_option_id`; an absent or mismatching answer is incorrect.
    /// Unanswered questions still count toward `total_points`.
    pub fn grade(questions: &[Question], answers: &AnswerMap, passing_score: u8) -> ScoreReport {
        let total_points: u32 = questions.iter().map(|q| q.points).sum();
        let score: u32 = questions
            .iter()
            .filter(|q| answers.get(&q.id).map(String::as_str) == Some(q.correct_option_id.as_str()))
            .map(|q| q.points)
            .sum();

        let percentage = Self::percentage(score, total_points);
        ScoreReport {
            score,
            total_points,
            percentage,
            passed: percentage >= passing_score,
        }
    }

    /// Rounded percentage with the empty-quiz guard.
    fn percentage(score: u32, total_points: u32) -> u8 {
        if total_points == 0 {
            return 0;
        }
        let scaled = (u64::from(score) * 100 + u64::from(total_points) / 2) / u64::from(total_points);
        scaled as u8
    }
}
