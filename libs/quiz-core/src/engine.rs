//! The quiz engine: wires the session state machine to the repository and
//! the countdown timer.
//!
//! All transitions happen on discrete external triggers (submit, skip,
//! start, stop, timer expiry). The per-card proficiency write is awaited
//! before a submission returns, so a reshuffled reappearance of the same
//! card can never race a pending update. Write failures are reported and
//! never unwind the in-memory session.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::matching;
use crate::queue;
use crate::reconcile;
use crate::repository::CardRepository;
use crate::session::{self, Action, SessionState};
use crate::timer::{SessionTimer, DEFAULT_SPEED_DURATION};
use crate::types::{Card, SessionConfig, SessionRecord};

/// Outcome of a submit or skip operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No current card (inactive session, exhausted queue, or expired
    /// timer): nothing was logged or counted.
    Ignored,
    /// The current card was consumed.
    Graded {
        is_correct: bool,
        /// Present when this submission finished a finite session.
        record: Option<SessionRecord>,
    },
}

/// Drives one training session at a time against an injected repository.
pub struct QuizEngine<R> {
    repo: Arc<R>,
    state: SessionState,
    timer: Option<SessionTimer>,
    speed_duration: Duration,
}

impl<R: CardRepository> QuizEngine<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            state: SessionState::default(),
            timer: None,
            speed_duration: DEFAULT_SPEED_DURATION,
        }
    }

    /// Override the speed-mode wall-clock bound.
    pub fn with_speed_duration(mut self, duration: Duration) -> Self {
        self.speed_duration = duration;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.state.current_card()
    }

    /// The running countdown, present only for an active speed session.
    pub fn timer(&self) -> Option<&SessionTimer> {
        self.timer.as_ref()
    }

    /// Seconds left on the countdown, if one is running.
    pub fn time_remaining(&self) -> Option<u64> {
        self.timer.as_ref().map(SessionTimer::remaining)
    }

    /// Begin a fresh session. Any previous session state and timer are
    /// discarded first.
    pub async fn start(&mut self, config: SessionConfig) -> Result<()> {
        self.cancel_timer();

        let set_ids = config.resolved_set_ids();
        let cards = self.repo.list_cards(&set_ids).await?;
        let queue = queue::build_queue(cards, &config)?;

        tracing::info!(
            mode = config.mode.as_str(),
            cards = queue.len(),
            "session started"
        );

        self.state = session::reduce(
            &self.state,
            Action::Start {
                mode: config.mode,
                set_ids,
                queue,
            },
            &mut rand::thread_rng(),
        );

        if config.mode.is_timed() {
            self.timer = Some(SessionTimer::start(self.speed_duration));
        }
        Ok(())
    }

    /// Whether in-progress input already uniquely satisfies an accepted
    /// variant, so the caller may auto-submit without an explicit action.
    pub fn is_live_match(&self, input: &str) -> bool {
        self.state
            .current_card()
            .is_some_and(|card| matching::is_live_match(input, &card.answer))
    }

    /// Grade and consume the current card.
    ///
    /// Re-validates the submission with the full matching rule regardless of
    /// any live-match shortcut the caller took.
    pub async fn submit_answer(&mut self, raw_answer: &str) -> Result<SubmitOutcome> {
        if self.timer_expired() {
            return Ok(SubmitOutcome::Ignored);
        }
        let Some(card) = self.state.current_card() else {
            return Ok(SubmitOutcome::Ignored);
        };
        let card_id = card.id.clone();
        let is_correct = matching::is_correct_answer(raw_answer, &card.answer);

        self.state = session::reduce(
            &self.state,
            Action::Answer {
                user_answer: raw_answer.trim().to_string(),
                is_correct,
            },
            &mut rand::thread_rng(),
        );

        self.apply_proficiency(&card_id, reconcile::answer_delta(is_correct))
            .await;
        let record = self.record_if_finished().await?;
        Ok(SubmitOutcome::Graded { is_correct, record })
    }

    /// Consume the current card without an answer. Logged as incorrect with
    /// an empty user answer; does not touch the correct counter.
    pub async fn skip(&mut self) -> Result<SubmitOutcome> {
        if self.timer_expired() {
            return Ok(SubmitOutcome::Ignored);
        }
        let Some(card) = self.state.current_card() else {
            return Ok(SubmitOutcome::Ignored);
        };
        let card_id = card.id.clone();

        self.state = session::reduce(&self.state, Action::Skip, &mut rand::thread_rng());

        self.apply_proficiency(&card_id, reconcile::PROFICIENCY_SKIP)
            .await;
        let record = self.record_if_finished().await?;
        Ok(SubmitOutcome::Graded {
            is_correct: false,
            record,
        })
    }

    /// Flashcard "I knew it": submits the card's own answer text.
    pub async fn mark_known(&mut self) -> Result<SubmitOutcome> {
        let Some(card) = self.state.current_card() else {
            return Ok(SubmitOutcome::Ignored);
        };
        let answer = card.answer.clone();
        self.submit_answer(&answer).await
    }

    /// Flashcard "I didn't know it": same as a skip.
    pub async fn mark_unknown(&mut self) -> Result<SubmitOutcome> {
        self.skip().await
    }

    /// Terminate the session, reconciling and persisting a result for any
    /// session that was still active.
    ///
    /// The result snapshot is captured and local state reset before the
    /// persistence call is awaited; a write failure is surfaced to the
    /// caller but the engine is already idle and restartable.
    pub async fn stop(&mut self, time_expired: bool) -> Result<Option<SessionRecord>> {
        self.cancel_timer();
        if !self.state.is_active {
            // Finished sessions were recorded when their last card was
            // consumed; idle sessions have nothing to record.
            self.state = SessionState::default();
            return Ok(None);
        }

        let result = reconcile::reconcile(&self.state);
        tracing::info!(
            mode = result.mode.as_str(),
            total = result.total_questions,
            correct = result.correct_answers,
            accuracy = result.accuracy,
            time_expired,
            "session stopped"
        );
        self.state = SessionState::default();

        let record = self.repo.record_session(result).await.inspect_err(|err| {
            tracing::error!(%err, "failed to persist session result");
        })?;
        Ok(Some(record))
    }

    /// Return to idle immediately, discarding all session state. Never
    /// awaits; in-flight writes complete on their own.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.state = SessionState::default();
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn timer_expired(&self) -> bool {
        self.timer.as_ref().is_some_and(SessionTimer::is_expired)
    }

    /// Fire-and-forget relative to the answer log: a failed update is
    /// reported and skipped, never rolled back into session state.
    async fn apply_proficiency(&self, card_id: &str, delta: i32) {
        if let Err(err) = self.repo.adjust_proficiency(card_id, delta).await {
            tracing::warn!(card_id, delta, %err, "proficiency update failed");
        }
    }

    async fn record_if_finished(&mut self) -> Result<Option<SessionRecord>> {
        if !self.state.is_finished {
            return Ok(None);
        }
        self.cancel_timer();
        let result = reconcile::reconcile(&self.state);
        tracing::info!(
            mode = result.mode.as_str(),
            total = result.total_questions,
            correct = result.correct_answers,
            accuracy = result.accuracy,
            "session finished"
        );
        let record = self.repo.record_session(result).await.inspect_err(|err| {
            tracing::error!(%err, "failed to persist session result");
        })?;
        Ok(Some(record))
    }
}
