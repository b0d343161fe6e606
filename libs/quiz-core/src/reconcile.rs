//! Session result reconciliation.
//!
//! Turns a terminated session's state into the aggregate record handed to
//! the repository, and defines the per-answer proficiency deltas.

use crate::session::SessionState;
use crate::types::{SessionResult, ALL_SETS};

/// Proficiency delta for a correct answer.
pub const PROFICIENCY_CORRECT: i32 = 10;
/// Proficiency delta for an incorrect answer.
pub const PROFICIENCY_INCORRECT: i32 = -5;
/// Proficiency delta for a skipped card.
pub const PROFICIENCY_SKIP: i32 = -3;

/// Compute the aggregate result for a terminated (or explicitly stopped)
/// session.
///
/// Totals come from the answer log rather than the queue, so an early stop
/// is scored against what was actually attempted. The [`ALL_SETS`] sentinel
/// is resolved to the distinct set ids present in the queue, keeping
/// historical records meaningful if the set roster later changes.
pub fn reconcile(state: &SessionState) -> SessionResult {
    let total_questions = state.answers.len();
    let correct_answers = state.answers.iter().filter(|a| a.is_correct).count();

    SessionResult {
        set_ids: resolve_set_ids(state),
        mode: state.mode,
        total_questions,
        correct_answers,
        accuracy: accuracy(correct_answers, total_questions),
    }
}

/// Percentage of correct answers, rounded to 1 decimal. Zero attempts score
/// 0% rather than failing on the division.
pub fn accuracy(correct: usize, total: usize) -> f64 {
    let ratio = correct as f64 / total.max(1) as f64;
    (ratio * 1000.0).round() / 10.0
}

fn resolve_set_ids(state: &SessionState) -> Vec<String> {
    if !state.set_ids.iter().any(|id| id == ALL_SETS) {
        return state.set_ids.clone();
    }
    let mut resolved: Vec<String> = Vec::new();
    for card in &state.queue {
        if !resolved.iter().any(|id| *id == card.set_id) {
            resolved.push(card.set_id.clone());
        }
    }
    resolved
}

/// The proficiency delta for a graded submission.
pub fn answer_delta(is_correct: bool) -> i32 {
    if is_correct {
        PROFICIENCY_CORRECT
    } else {
        PROFICIENCY_INCORRECT
    }
}
