//! Session queue building and reshuffling.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{QuizError, Result};
use crate::types::{Card, SessionConfig, ALL_SETS};

/// Select, shuffle, and truncate the working set of cards for a session.
///
/// The scope is resolved against the supplied cards: the [`ALL_SETS`]
/// sentinel (or an empty selection) takes everything, otherwise only cards
/// whose `set_id` is selected survive. Fails with [`QuizError::EmptyScope`]
/// when the selection is empty.
pub fn build_queue(cards: Vec<Card>, config: &SessionConfig) -> Result<Vec<Card>> {
    build_queue_with_rng(cards, config, &mut rand::thread_rng())
}

/// [`build_queue`] with an injected RNG for deterministic tests.
pub fn build_queue_with_rng<R: Rng>(
    cards: Vec<Card>,
    config: &SessionConfig,
    rng: &mut R,
) -> Result<Vec<Card>> {
    let set_ids = config.resolved_set_ids();
    let take_all = set_ids.iter().any(|id| id == ALL_SETS);

    let mut selected: Vec<Card> = cards
        .into_iter()
        .filter(|card| take_all || set_ids.iter().any(|id| *id == card.set_id))
        .collect();

    if selected.is_empty() {
        return Err(QuizError::EmptyScope);
    }

    selected.shuffle(rng);
    if let Some(limit) = config.limit {
        selected.truncate(limit);
    }
    Ok(selected)
}

/// Reshuffle an in-flight queue in place for infinite-mode wraparound.
///
/// Operates on the current queue contents rather than a fresh repository
/// read, so mid-session proficiency changes never alter the queue's card
/// set, only its order.
pub fn reshuffle(queue: &mut [Card]) {
    reshuffle_with_rng(queue, &mut rand::thread_rng());
}

/// [`reshuffle`] with an injected RNG for deterministic tests.
pub fn reshuffle_with_rng<R: Rng>(queue: &mut [Card], rng: &mut R) {
    queue.shuffle(rng);
}
