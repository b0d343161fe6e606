//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors surfaced by the session engine and its repository collaborator.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The resolved scope selected zero cards; the caller must pick a
    /// non-empty scope before starting a session.
    #[error("no cards available in the selected sets")]
    EmptyScope,

    /// Proficiency update target vanished. Non-fatal: logged and skipped.
    #[error("card {0} not found")]
    NotFound(String),

    /// Transport/storage failure on a repository call.
    #[error("repository error: {0}")]
    Repository(String),
}
