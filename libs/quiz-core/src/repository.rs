//! Card repository contract and an in-memory implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{QuizError, Result};
use crate::types::{Card, SessionRecord, SessionResult, ALL_SETS};

/// Most recent session records retained by the in-memory store.
const SESSION_HISTORY_LIMIT: usize = 100;

/// Abstract store of practice items and session history.
///
/// The engine treats this as a single shared external resource supporting
/// independent per-card mutation; no cross-card transaction is required and
/// last-write-wins on proficiency is acceptable for the single-session-per-
/// user usage model.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Cards in scope. The [`ALL_SETS`] sentinel (or an empty scope) selects
    /// everything.
    async fn list_cards(&self, set_ids: &[String]) -> Result<Vec<Card>>;

    /// Add `delta` to a card's proficiency, clamped to `[0, 100]`.
    /// Fails with [`QuizError::NotFound`] if the card no longer exists.
    async fn adjust_proficiency(&self, card_id: &str, delta: i32) -> Result<Card>;

    /// Persist a session result, assigning an id and timestamp.
    async fn record_session(&self, result: SessionResult) -> Result<SessionRecord>;
}

#[derive(Debug, Default)]
struct Store {
    cards: Vec<Card>,
    sessions: Vec<SessionRecord>,
}

/// Mutex-guarded in-memory repository, useful for the terminal trainer and
/// for tests. Persistence across runs is deliberately out of scope.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: Mutex<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            inner: Mutex::new(Store {
                cards,
                sessions: Vec::new(),
            }),
        }
    }

    pub fn insert_card(&self, card: Card) {
        let mut store = self.inner.lock().expect("repository lock");
        store.cards.push(card);
    }

    pub fn remove_card(&self, card_id: &str) {
        let mut store = self.inner.lock().expect("repository lock");
        store.cards.retain(|card| card.id != card_id);
    }

    pub fn card(&self, card_id: &str) -> Option<Card> {
        let store = self.inner.lock().expect("repository lock");
        store.cards.iter().find(|card| card.id == card_id).cloned()
    }

    /// Recorded sessions, most recent first.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        let store = self.inner.lock().expect("repository lock");
        store.sessions.clone()
    }
}

#[async_trait]
impl CardRepository for InMemoryRepository {
    async fn list_cards(&self, set_ids: &[String]) -> Result<Vec<Card>> {
        let store = self.inner.lock().expect("repository lock");
        let take_all = set_ids.is_empty() || set_ids.iter().any(|id| id == ALL_SETS);
        Ok(store
            .cards
            .iter()
            .filter(|card| take_all || set_ids.iter().any(|id| *id == card.set_id))
            .cloned()
            .collect())
    }

    async fn adjust_proficiency(&self, card_id: &str, delta: i32) -> Result<Card> {
        let mut store = self.inner.lock().expect("repository lock");
        let card = store
            .cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| QuizError::NotFound(card_id.to_string()))?;
        card.proficiency = (card.proficiency + delta).clamp(0, 100);
        Ok(card.clone())
    }

    async fn record_session(&self, result: SessionResult) -> Result<SessionRecord> {
        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            set_ids: result.set_ids,
            mode: result.mode,
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            accuracy: result.accuracy,
            created_at: Utc::now(),
        };
        let mut store = self.inner.lock().expect("repository lock");
        store.sessions.insert(0, record.clone());
        store.sessions.truncate(SESSION_HISTORY_LIMIT);
        Ok(record)
    }
}
