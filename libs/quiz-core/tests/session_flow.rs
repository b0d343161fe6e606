//! End-to-end session scenarios against the in-memory repository.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use quiz_core::{
    Card, InMemoryRepository, QuizEngine, SessionConfig, SubmitOutcome, TrainingMode, ALL_SETS,
};

fn card(id: &str, set_id: &str, question: &str, answer: &str) -> Card {
    Card {
        id: id.to_string(),
        set_id: set_id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        proficiency: 50,
    }
}

fn greeting_cards() -> Vec<Card> {
    vec![
        card("w1", "set1", "Hello", "Привіт"),
        card("w2", "set1", "World", "Світ"),
    ]
}

/// Education mode: answers past the end of the queue wrap instead of
/// finishing, and the reshuffled queue keeps the same cards.
#[tokio::test]
async fn education_session_wraps_after_last_card() {
    let repo = Arc::new(InMemoryRepository::with_cards(greeting_cards()));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    engine
        .start(SessionConfig::new(
            TrainingMode::Education,
            vec!["set1".to_string()],
        ))
        .await
        .unwrap();
    assert_eq!(engine.state().queue.len(), 2);

    // first card: answer with whichever translation it expects
    let first_answer = engine.current_card().unwrap().answer.clone();
    let outcome = engine.submit_answer(&first_answer).await.unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Graded {
            is_correct: true,
            record: None
        }
    ));
    assert_eq!(engine.state().correct_answers, 1);
    assert_eq!(engine.state().answers.len(), 1);
    assert!(engine.state().is_active);

    // second card: wrong answer; the queue wraps and reshuffles
    let outcome = engine.submit_answer("nonsense").await.unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Graded {
            is_correct: false,
            record: None
        }
    ));
    assert_eq!(engine.state().correct_answers, 1);
    assert_eq!(engine.state().answers.len(), 2);
    assert_eq!(engine.state().current_index, 0);
    assert!(engine.state().is_active);
    assert!(!engine.state().is_finished);
    assert!(engine.current_card().is_some());

    // infinite sessions keep going until an explicit stop, which records
    let record = engine.stop(false).await.unwrap().unwrap();
    assert_eq!(record.total_questions, 2);
    assert_eq!(record.correct_answers, 1);
    assert_eq!(record.accuracy, 50.0);
    assert_eq!(record.set_ids, vec!["set1"]);
    assert_eq!(repo.sessions().len(), 1);
}

/// Accuracy mode: answering every card correctly finishes the session in the
/// same transition and reconciles to 100%.
#[tokio::test]
async fn accuracy_session_finishes_at_full_marks() {
    let cards = vec![
        card("w1", "set1", "Hello", "Привіт"),
        card("w2", "set1", "World", "Світ"),
        card("w3", "set1", "Cat", "Кіт"),
    ];
    let repo = Arc::new(InMemoryRepository::with_cards(cards));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    engine
        .start(SessionConfig::new(
            TrainingMode::Accuracy,
            vec!["set1".to_string()],
        ))
        .await
        .unwrap();

    let mut record = None;
    for _ in 0..3 {
        let answer = engine.current_card().unwrap().answer.clone();
        match engine.submit_answer(&answer).await.unwrap() {
            SubmitOutcome::Graded { record: r, .. } => record = r,
            SubmitOutcome::Ignored => panic!("submission ignored mid-session"),
        }
    }

    assert!(engine.state().is_finished);
    assert!(!engine.state().is_active);
    assert_eq!(engine.state().correct_answers, 3);

    let record = record.expect("finite completion records a session");
    assert_eq!(record.total_questions, 3);
    assert_eq!(record.correct_answers, 3);
    assert_eq!(record.accuracy, 100.0);

    // further submissions are no-ops
    let outcome = engine.submit_answer("Привіт").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert_eq!(engine.state().answers.len(), 3);
    assert_eq!(repo.sessions().len(), 1);
}

/// Speed mode with a 1-second bound and no submissions: the timer forces
/// termination, scoring zero attempts at 0%.
#[tokio::test(start_paused = true)]
async fn speed_session_expires_with_no_answers() {
    let repo = Arc::new(InMemoryRepository::with_cards(greeting_cards()));
    let mut engine =
        QuizEngine::new(Arc::clone(&repo)).with_speed_duration(Duration::from_secs(1));

    engine
        .start(SessionConfig::new(
            TrainingMode::Speed,
            vec![ALL_SETS.to_string()],
        ))
        .await
        .unwrap();
    assert_eq!(engine.time_remaining(), Some(1));

    engine.timer().unwrap().expired().await;

    let record = engine.stop(true).await.unwrap().unwrap();
    assert_eq!(record.total_questions, 0);
    assert_eq!(record.correct_answers, 0);
    assert_eq!(record.accuracy, 0.0);
    assert!(!engine.state().is_active);
    assert!(engine.time_remaining().is_none());
}

/// The "all" scope covers every card exactly once and resolves to the
/// concrete set ids in the persisted record.
#[tokio::test]
async fn all_scope_covers_every_set() {
    let cards = vec![
        card("w1", "set1", "Hello", "Привіт"),
        card("w2", "set2", "World", "Світ"),
        card("w3", "set3", "Cat", "Кіт"),
    ];
    let repo = Arc::new(InMemoryRepository::with_cards(cards));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    engine
        .start(SessionConfig::new(
            TrainingMode::Education,
            vec![ALL_SETS.to_string()],
        ))
        .await
        .unwrap();
    assert_eq!(engine.state().queue.len(), 3);

    let mut ids: Vec<String> = engine.state().queue.iter().map(|c| c.id.clone()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["w1", "w2", "w3"]);

    engine.skip().await.unwrap();
    let record = engine.stop(false).await.unwrap().unwrap();
    let mut set_ids = record.set_ids.clone();
    set_ids.sort_unstable();
    assert_eq!(set_ids, vec!["set1", "set2", "set3"]);
}

/// A limit truncates the shuffled queue; finishing it records only the
/// attempted cards.
#[tokio::test]
async fn limited_session_scores_attempted_cards() {
    let cards = vec![
        card("w1", "set1", "Hello", "Привіт"),
        card("w2", "set1", "World", "Світ"),
        card("w3", "set1", "Cat", "Кіт"),
    ];
    let repo = Arc::new(InMemoryRepository::with_cards(cards));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    engine
        .start(
            SessionConfig::new(TrainingMode::Accuracy, vec!["set1".to_string()]).with_limit(2),
        )
        .await
        .unwrap();
    assert_eq!(engine.state().queue.len(), 2);

    engine.skip().await.unwrap();
    let answer = engine.current_card().unwrap().answer.clone();
    let outcome = engine.submit_answer(&answer).await.unwrap();

    let SubmitOutcome::Graded {
        record: Some(record),
        ..
    } = outcome
    else {
        panic!("expected the last answer to finish the session");
    };
    assert_eq!(record.total_questions, 2);
    assert_eq!(record.correct_answers, 1);
    assert_eq!(record.accuracy, 50.0);
}

/// Flashcard mode: mark-known submits the full answer, mark-unknown skips,
/// and both keep the infinite queue alive.
#[tokio::test]
async fn flashcard_session_known_and_unknown() {
    let repo = Arc::new(InMemoryRepository::with_cards(greeting_cards()));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    engine
        .start(SessionConfig::new(
            TrainingMode::Flashcards,
            vec!["set1".to_string()],
        ))
        .await
        .unwrap();

    let known = engine.mark_known().await.unwrap();
    assert!(matches!(
        known,
        SubmitOutcome::Graded {
            is_correct: true,
            ..
        }
    ));

    let unknown = engine.mark_unknown().await.unwrap();
    assert!(matches!(
        unknown,
        SubmitOutcome::Graded {
            is_correct: false,
            ..
        }
    ));

    assert!(engine.state().is_active);
    assert_eq!(engine.state().answers.len(), 2);
    assert_eq!(engine.state().correct_answers, 1);
}

/// Reset drops everything without recording a session.
#[tokio::test]
async fn reset_discards_session_without_recording() {
    let repo = Arc::new(InMemoryRepository::with_cards(greeting_cards()));
    let mut engine = QuizEngine::new(Arc::clone(&repo));

    engine
        .start(SessionConfig::new(
            TrainingMode::Education,
            vec!["set1".to_string()],
        ))
        .await
        .unwrap();
    engine.skip().await.unwrap();

    engine.reset();
    assert!(!engine.state().is_active);
    assert!(engine.state().answers.is_empty());
    assert!(repo.sessions().is_empty());
}
