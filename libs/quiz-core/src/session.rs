//! Session state machine.
//!
//! Action-tagged transitions consumed by a single pure transition function,
//! so every rule (advance, wraparound reshuffle, finish, no-op guards) can be
//! exercised without a runtime or a repository.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::queue;
use crate::types::{AnswerLogEntry, Card, TrainingMode};

/// State owned exclusively by the session machine. Recreated fresh on each
/// session start, discarded on reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_active: bool,
    pub is_finished: bool,
    pub mode: TrainingMode,
    pub set_ids: Vec<String>,
    pub queue: Vec<Card>,
    pub current_index: usize,
    pub correct_answers: usize,
    pub answers: Vec<AnswerLogEntry>,
}

impl SessionState {
    /// The card currently being presented, if any.
    pub fn current_card(&self) -> Option<&Card> {
        self.queue.get(self.current_index)
    }
}

/// Transition kinds accepted by [`reduce`].
#[derive(Debug, Clone)]
pub enum Action {
    /// Begin a session over an already-built queue. Queue non-emptiness is
    /// the queue builder's responsibility, not validated here.
    Start {
        mode: TrainingMode,
        set_ids: Vec<String>,
        queue: Vec<Card>,
    },
    /// Consume the current card with a graded submission.
    Answer {
        user_answer: String,
        is_correct: bool,
    },
    /// Consume the current card without an answer. Always logged incorrect.
    Skip,
    /// Discard all session state unconditionally.
    Reset,
}

/// Apply one transition, producing the next state.
///
/// `Answer`/`Skip` with no current card (session inactive, or a finite queue
/// already exhausted) are strict no-ops: nothing is appended and no counter
/// moves. The RNG only feeds the wraparound reshuffle of infinite modes.
pub fn reduce<R: Rng>(state: &SessionState, action: Action, rng: &mut R) -> SessionState {
    match action {
        Action::Start {
            mode,
            set_ids,
            queue,
        } => SessionState {
            is_active: true,
            is_finished: false,
            mode,
            set_ids,
            queue,
            current_index: 0,
            correct_answers: 0,
            answers: Vec::new(),
        },
        Action::Answer {
            user_answer,
            is_correct,
        } => consume_current(state, rng, |card| AnswerLogEntry {
            word_id: card.id.clone(),
            question: card.question.clone(),
            correct_answer: card.answer.clone(),
            user_answer,
            is_correct,
        }),
        Action::Skip => consume_current(state, rng, |card| AnswerLogEntry {
            word_id: card.id.clone(),
            question: card.question.clone(),
            correct_answer: card.answer.clone(),
            user_answer: String::new(),
            is_correct: false,
        }),
        Action::Reset => SessionState::default(),
    }
}

fn consume_current<R, F>(state: &SessionState, rng: &mut R, entry: F) -> SessionState
where
    R: Rng,
    F: FnOnce(&Card) -> AnswerLogEntry,
{
    if !state.is_active {
        return state.clone();
    }
    let Some(card) = state.current_card() else {
        return state.clone();
    };
    let entry = entry(card);

    let mut next = state.clone();
    next.correct_answers += usize::from(entry.is_correct);
    next.answers.push(entry);

    let next_index = state.current_index + 1;
    let exhausted = next_index >= state.queue.len();
    let infinite = state.mode.is_infinite();

    if exhausted && infinite {
        // Wrap: same card set, new order, index back to zero.
        queue::reshuffle_with_rng(&mut next.queue, rng);
        next.current_index = 0;
    } else if exhausted {
        next.current_index = next_index;
        next.is_active = false;
        next.is_finished = true;
    } else {
        next.current_index = next_index;
    }
    next
}
