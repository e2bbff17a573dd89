use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One selectable answer of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Ordered options; at least 2, ids unique within the question.
    pub options: Vec<AnswerOption>,
    pub correct_option_id: String,
    /// Point weight; positive.
    pub points: u32,
    /// Presentation order; unique within a quiz.
    pub order_index: u32,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.option(option_id).is_some()
    }
}

/// A named, timed, scored assessment composed of ordered questions.
///
/// Immutable configuration: the attempt engine never mutates a quiz, it
/// only reads it. Validate with [`Quiz::validate`] before handing a quiz
/// to the engine; malformed quizzes are rejected up front rather than
/// degrading scoring later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Total time budget for one attempt, in seconds.
    pub time_limit_secs: u64,
    /// Minimum percentage required to pass, in [0, 100].
    pub passing_score: u8,
    /// Inactive quizzes must not be attemptable.
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub questions: Vec<Question>,
}

fn default_active() -> bool {
    true
}

impl Quiz {
    /// Check every structural invariant of the quiz configuration.
    ///
    /// # Errors
    /// Returns the first violated invariant. A quiz that fails here must
    /// never reach the scoring path.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "id",
                context: "quiz".to_string(),
            });
        }
        if self.time_limit_secs == 0 {
            return Err(ValidationError::ZeroTimeLimit {
                quiz_id: self.id.clone(),
            });
        }
        if self.passing_score > 100 {
            return Err(ValidationError::PassingScoreOutOfRange {
                quiz_id: self.id.clone(),
                passing_score: self.passing_score,
            });
        }

        let mut question_ids = HashSet::new();
        let mut order_indexes = HashSet::new();
        for question in &self.questions {
            if question.id.is_empty() {
                return Err(ValidationError::EmptyField {
                    field: "id",
                    context: format!("question of quiz '{}'", self.id),
                });
            }
            if !question_ids.insert(question.id.as_str()) {
                return Err(ValidationError::DuplicateQuestion {
                    quiz_id: self.id.clone(),
                    question_id: question.id.clone(),
                });
            }
            if !order_indexes.insert(question.order_index) {
                return Err(ValidationError::DuplicateOrderIndex {
                    quiz_id: self.id.clone(),
                    order_index: question.order_index,
                });
            }
            if question.options.len() < 2 {
                return Err(ValidationError::TooFewOptions {
                    question_id: question.id.clone(),
                    count: question.options.len(),
                });
            }
            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(ValidationError::DuplicateOption {
                        question_id: question.id.clone(),
                        option_id: option.id.clone(),
                    });
                }
            }
            if !option_ids.contains(question.correct_option_id.as_str()) {
                return Err(ValidationError::DanglingCorrectOption {
                    question_id: question.id.clone(),
                    option_id: question.correct_option_id.clone(),
                });
            }
            if question.points == 0 {
                return Err(ValidationError::ZeroPoints {
                    question_id: question.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Questions in presentation order (ascending `order_index`).
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut ordered: Vec<&Question> = self.questions.iter().collect();
        ordered.sort_by_key(|q| q.order_index);
        ordered
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Sum of point weights over all questions, answered or not.
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str) -> AnswerOption {
        AnswerOption {
            id: id.to_string(),
            text: format!("Option {id}"),
        }
    }

    fn question(id: &str, order_index: u32) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            options: vec![option("a"), option("b"), option("c")],
            correct_option_id: "a".to_string(),
            points: 10,
            order_index,
        }
    }

    fn quiz() -> Quiz {
        Quiz {
            id: "q".to_string(),
            title: "Quiz".to_string(),
            description: String::new(),
            time_limit_secs: 300,
            passing_score: 70,
            is_active: true,
            questions: vec![question("q1", 0), question("q2", 1)],
        }
    }

    #[test]
    fn valid_quiz_passes_validation() {
        assert!(quiz().validate().is_ok());
    }

    #[test]
    fn zero_time_limit_rejected() {
        let mut q = quiz();
        q.time_limit_secs = 0;
        assert!(matches!(
            q.validate(),
            Err(ValidationError::ZeroTimeLimit { .. })
        ));
    }

    #[test]
    fn passing_score_over_100_rejected() {
        let mut q = quiz();
        q.passing_score = 101;
        assert!(matches!(
            q.validate(),
            Err(ValidationError::PassingScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn single_option_question_rejected() {
        let mut q = quiz();
        q.questions[0].options.truncate(1);
        assert!(matches!(
            q.validate(),
            Err(ValidationError::TooFewOptions { .. })
        ));
    }

    #[test]
    fn dangling_correct_option_rejected() {
        let mut q = quiz();
        q.questions[1].correct_option_id = "nope".to_string();
        assert!(matches!(
            q.validate(),
            Err(ValidationError::DanglingCorrectOption { .. })
        ));
    }

    #[test]
    fn duplicate_question_id_rejected() {
        let mut q = quiz();
        q.questions[1].id = "q1".to_string();
        assert!(matches!(
            q.validate(),
            Err(ValidationError::DuplicateQuestion { .. })
        ));
    }

    #[test]
    fn duplicate_order_index_rejected() {
        let mut q = quiz();
        q.questions[1].order_index = 0;
        assert!(matches!(
            q.validate(),
            Err(ValidationError::DuplicateOrderIndex { .. })
        ));
    }

    #[test]
    fn duplicate_option_id_rejected() {
        let mut q = quiz();
        q.questions[0].options[2] = option("a");
        assert!(matches!(
            q.validate(),
            Err(ValidationError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn zero_points_rejected() {
        let mut q = quiz();
        q.questions[0].points = 0;
        assert!(matches!(q.validate(), Err(ValidationError::ZeroPoints { .. })));
    }

    #[test]
    fn ordered_questions_sorts_by_order_index() {
        let mut q = quiz();
        q.questions.swap(0, 1);
        let ordered = q.ordered_questions();
        assert_eq!(ordered[0].id, "q1");
        assert_eq!(ordered[1].id, "q2");
    }

    #[test]
    fn total_points_sums_all_questions() {
        assert_eq!(quiz().total_points(), 20);
    }
}
