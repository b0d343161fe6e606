//! Quiz session engine shared by the trainer application.
//!
//! Provides:
//! - Answer matching with comma-separated accepted variants and live
//!   prefix matching
//! - Session queue building (scope resolution, shuffle, limit, reshuffle)
//! - The session state machine (start/answer/skip/reset reducer)
//! - Countdown timer for speed-bounded sessions
//! - Result reconciliation and per-word proficiency deltas
//! - The card repository contract plus an in-memory implementation

pub mod engine;
pub mod error;
pub mod matching;
pub mod queue;
pub mod reconcile;
pub mod repository;
pub mod session;
pub mod timer;
pub mod types;

pub use engine::{QuizEngine, SubmitOutcome};
pub use error::{QuizError, Result};
pub use matching::{answer_variants, is_correct_answer, is_live_match, normalize};
pub use queue::{build_queue, reshuffle};
pub use reconcile::{accuracy, reconcile};
pub use repository::{CardRepository, InMemoryRepository};
pub use session::{Action, SessionState};
pub use timer::{SessionTimer, DEFAULT_SPEED_DURATION};
pub use types::{
    AnswerLogEntry, Card, SessionConfig, SessionRecord, SessionResult, TrainingMode, ALL_SETS,
};
