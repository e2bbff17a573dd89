//! End-to-end attempt flows against the SQLite store.
//!
//! These tests exercise the full start -> answer -> tick -> submit
//! lifecycle the way a frontend would drive it, including the
//! duplicate-instance double-scoring defense.

use quizdom_core::{
    AnswerMap, AttemptEngine, AttemptState, AttemptStore, QuizBank, ScoreReport, SqliteStore,
    StoreError,
};

fn sample_store() -> SqliteStore {
    let store = SqliteStore::open_memory().unwrap();
    for quiz in QuizBank::builtin().iter() {
        store.insert_quiz(quiz).unwrap();
    }
    store
}

fn sample_quiz() -> quizdom_core::Quiz {
    QuizBank::builtin().quiz("rust-basics").unwrap().clone()
}

fn answer_correctly(engine: &mut AttemptEngine, count: usize) {
    let quiz = engine.quiz().clone();
    for question in quiz.ordered_questions().into_iter().take(count) {
        engine
            .select_answer(&question.id, Some(&question.correct_option_id))
            .unwrap();
    }
}

#[test]
fn full_passing_attempt_is_recorded() {
    let store = sample_store();
    let mut engine = AttemptEngine::new(sample_quiz(), Some("alice".to_string())).unwrap();
    engine.start(&store).unwrap();

    answer_correctly(&mut engine, 4);
    // Some thinking time passes; nowhere near the five-minute budget.
    for _ in 0..30 {
        assert!(engine.tick(&store).unwrap().is_none());
    }

    let report = engine.submit(&store).unwrap();
    assert_eq!(report.score, 80);
    assert_eq!(report.total_points, 100);
    assert_eq!(report.percentage, 80);
    assert!(report.passed);

    let history = store.list_attempts("rust-basics", Some("alice")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].report().unwrap(), report);
    assert_eq!(history[0].answers.len(), 4);
}

#[test]
fn expiry_submits_whatever_answers_exist() {
    let store = sample_store();
    let quiz = QuizBank::builtin()
        .quiz("lifetimes-lightning")
        .unwrap()
        .clone();
    let mut engine = AttemptEngine::new(quiz, None).unwrap();
    engine.start(&store).unwrap();
    engine.select_answer("elision", Some("infer")).unwrap();

    let mut auto_submitted = false;
    for _ in 0..30 {
        if engine.tick(&store).unwrap().is_some() {
            auto_submitted = true;
        }
    }
    assert!(auto_submitted);
    assert_eq!(engine.state(), AttemptState::Submitted);

    let report = engine.result().unwrap();
    assert_eq!(report.score, 10);
    assert_eq!(report.total_points, 20);
    assert_eq!(report.percentage, 50);
    assert!(report.passed); // passing score is 50, boundary is inclusive

    let history = store.list_attempts("lifetimes-lightning", None).unwrap();
    assert!(history[0].is_completed());
}

#[test]
fn duplicated_instances_cannot_double_score_one_attempt() {
    let store = sample_store();
    let mut first = AttemptEngine::new(sample_quiz(), Some("bob".to_string())).unwrap();
    first.start(&store).unwrap();
    let attempt_id = first.attempt_id().unwrap();

    // A second window races the first to the store with a different
    // answer set.
    let winning = ScoreReport {
        score: 100,
        total_points: 100,
        percentage: 100,
        passed: true,
    };
    store
        .record_submission(attempt_id, &AnswerMap::new(), &winning)
        .unwrap();

    // The losing instance converges on the recorded result instead of
    // failing or re-scoring.
    answer_correctly(&mut first, 2);
    let report = first.submit(&store).unwrap();
    assert_eq!(report, winning);

    // And the store still holds exactly one submission.
    let history = store.list_attempts("rust-basics", Some("bob")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].report().unwrap(), winning);
}

#[test]
fn taker_cannot_open_two_attempts_but_can_retake_after_submitting() {
    let store = sample_store();
    let mut engine = AttemptEngine::new(sample_quiz(), Some("carol".to_string())).unwrap();
    engine.start(&store).unwrap();

    let mut second = AttemptEngine::new(sample_quiz(), Some("carol".to_string())).unwrap();
    match second.start(&store) {
        Err(quizdom_core::CoreError::Store(StoreError::AttemptPending { .. })) => {}
        other => panic!("expected AttemptPending, got {other:?}"),
    }
    assert_eq!(second.state(), AttemptState::NotStarted);

    engine.submit(&store).unwrap();
    second.start(&store).unwrap();
    answer_correctly(&mut second, 5);
    assert!(second.submit(&store).unwrap().passed);

    let history = store.list_attempts("rust-basics", Some("carol")).unwrap();
    assert_eq!(history.len(), 2);
    // Newest first.
    assert_eq!(history[0].id, second.attempt_id().unwrap());
}
