//! Core types for the quiz session engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scope sentinel selecting every set regardless of membership.
pub const ALL_SETS: &str = "all";

/// A practice item. Read-only from the engine's perspective; the engine holds
/// a working copy per session queue, the repository owns the master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub set_id: String,
    pub question: String,
    /// May encode multiple accepted variants separated by commas.
    pub answer: String,
    /// Learning progress in `[0, 100]`.
    pub proficiency: i32,
}

/// Training mode for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    Education,
    Accuracy,
    Speed,
    Flashcards,
}

impl Default for TrainingMode {
    fn default() -> Self {
        Self::Education
    }
}

impl TrainingMode {
    /// Infinite modes never finish on their own; the queue reshuffles and
    /// wraps instead of terminating.
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Education | Self::Flashcards)
    }

    /// Whether the mode runs against a wall-clock bound.
    pub fn is_timed(self) -> bool {
        matches!(self, Self::Speed)
    }

    /// Get the mode name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Accuracy => "accuracy",
            Self::Speed => "speed",
            Self::Flashcards => "flashcards",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "education" => Some(Self::Education),
            "accuracy" => Some(Self::Accuracy),
            "speed" => Some(Self::Speed),
            "flashcards" => Some(Self::Flashcards),
            _ => None,
        }
    }
}

/// Caller-supplied configuration for a session. Immutable for the session's
/// lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: TrainingMode,
    /// Set ids to practice. The sentinel [`ALL_SETS`] (or an empty list)
    /// selects every card.
    pub set_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SessionConfig {
    pub fn new(mode: TrainingMode, set_ids: Vec<String>) -> Self {
        Self {
            mode,
            set_ids,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Deduplicated set ids, with an empty selection resolved to the
    /// [`ALL_SETS`] sentinel.
    pub fn resolved_set_ids(&self) -> Vec<String> {
        let mut resolved: Vec<String> = Vec::new();
        for id in &self.set_ids {
            if !resolved.iter().any(|seen| seen == id) {
                resolved.push(id.clone());
            }
        }
        if resolved.is_empty() {
            resolved.push(ALL_SETS.to_string());
        }
        resolved
    }
}

/// One entry per submitted or skipped card, in submission order.
/// Append-only; never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLogEntry {
    pub word_id: String,
    pub question: String,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Aggregate outcome of a terminated session, handed to the repository for
/// persistence and then discarded by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub set_ids: Vec<String>,
    pub mode: TrainingMode,
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Percentage in `[0, 100]`, rounded to 1 decimal.
    pub accuracy: f64,
}

/// A persisted session result with its generated id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub set_ids: Vec<String>,
    pub mode: TrainingMode,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub accuracy: f64,
    pub created_at: DateTime<Utc>,
}
