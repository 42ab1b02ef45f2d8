//! Round state machine for the game screen.
//!
//! A `Game` is either running a countdown, waiting for the player to decide
//! whether to replay, or terminated. While running, the active puzzle is
//! loading, ready, or failed. Puzzle fetches happen outside this type: every
//! fetch is identified by a `FetchTicket`, and only the result carrying the
//! current ticket is applied.

use thiserror::Error;

use crate::model::{PlayerName, Puzzle, RoundSummary, Session};
use crate::time::Clock;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("the round is not running")]
    NotRunning,
    #[error("no puzzle is ready yet")]
    PuzzleNotReady,
    #[error("no failed fetch to retry")]
    NothingToRetry,
    #[error("no replay decision is pending")]
    NoDecisionPending,
}

/// Identifies one outstanding puzzle fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    AwaitingReplayDecision,
    Terminated,
}

/// Why the last fetch did not produce a puzzle. Shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    message: String,
}

impl FetchFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleSlot {
    Loading,
    Ready(Puzzle),
    Failed(FetchFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed.
    Ignored,
    Counting { seconds_remaining: u32 },
    /// The countdown reached zero on this tick.
    Expired(RoundSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { score: u32, next: FetchTicket },
    Incorrect,
}

#[derive(Debug, Clone)]
pub struct Game {
    clock: Clock,
    session: Session,
    phase: GamePhase,
    puzzle: PuzzleSlot,
    ticket: FetchTicket,
    last_summary: Option<RoundSummary>,
}

impl Game {
    /// Starts a running round for `player`. The returned ticket identifies the
    /// first puzzle fetch the caller must perform.
    #[must_use]
    pub fn start(player: PlayerName, clock: Clock) -> (Self, FetchTicket) {
        let session = Session::new(player, clock.now());
        let ticket = FetchTicket(1);
        let game = Self {
            clock,
            session,
            phase: GamePhase::Running,
            puzzle: PuzzleSlot::Loading,
            ticket,
            last_summary: None,
        };
        (game, ticket)
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn puzzle(&self) -> &PuzzleSlot {
        &self.puzzle
    }

    #[must_use]
    pub fn current_ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// Summary of the most recent expired round, kept until the next replay.
    #[must_use]
    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Ignored;
        }

        let seconds_remaining = self.session.tick();
        if seconds_remaining > 0 {
            return TickOutcome::Counting { seconds_remaining };
        }

        self.phase = GamePhase::AwaitingReplayDecision;
        let summary = self.session.summary(self.clock.now());
        self.last_summary = Some(summary.clone());
        TickOutcome::Expired(summary)
    }

    /// Checks `input` against the active puzzle.
    ///
    /// A correct answer scores a point and starts loading the next puzzle.
    /// A wrong answer changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotRunning` outside the running phase and
    /// `GameError::PuzzleNotReady` while the puzzle is loading or failed.
    pub fn submit_answer(&mut self, input: &str) -> Result<AnswerOutcome, GameError> {
        if self.phase != GamePhase::Running {
            return Err(GameError::NotRunning);
        }
        let PuzzleSlot::Ready(puzzle) = &self.puzzle else {
            return Err(GameError::PuzzleNotReady);
        };

        if !puzzle.is_correct(input) {
            return Ok(AnswerOutcome::Incorrect);
        }

        let score = self.session.record_correct();
        let next = self.issue_ticket();
        Ok(AnswerOutcome::Correct { score, next })
    }

    /// Applies a fetched puzzle. Returns `false` when the ticket is stale.
    pub fn puzzle_loaded(&mut self, ticket: FetchTicket, puzzle: Puzzle) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.puzzle = PuzzleSlot::Ready(puzzle);
        true
    }

    /// Records a failed fetch. Returns `false` when the ticket is stale.
    pub fn fetch_failed(&mut self, ticket: FetchTicket, failure: FetchFailure) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.puzzle = PuzzleSlot::Failed(failure);
        true
    }

    /// Starts a new fetch after a failure.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotRunning` outside the running phase and
    /// `GameError::NothingToRetry` unless the last fetch failed.
    pub fn retry_fetch(&mut self) -> Result<FetchTicket, GameError> {
        if self.phase != GamePhase::Running {
            return Err(GameError::NotRunning);
        }
        if !matches!(self.puzzle, PuzzleSlot::Failed(_)) {
            return Err(GameError::NothingToRetry);
        }
        Ok(self.issue_ticket())
    }

    /// Starts a fresh round: score 0, full countdown, new puzzle.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoDecisionPending` unless the round has expired.
    pub fn replay(&mut self) -> Result<FetchTicket, GameError> {
        if self.phase != GamePhase::AwaitingReplayDecision {
            return Err(GameError::NoDecisionPending);
        }
        self.session.restart(self.clock.now());
        self.phase = GamePhase::Running;
        self.last_summary = None;
        Ok(self.issue_ticket())
    }

    /// # Errors
    ///
    /// Returns `GameError::NoDecisionPending` unless the round has expired.
    pub fn decline_replay(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::AwaitingReplayDecision {
            return Err(GameError::NoDecisionPending);
        }
        self.phase = GamePhase::Terminated;
        Ok(())
    }

    /// Ends the game from any phase.
    pub fn log_out(&mut self) {
        self.phase = GamePhase::Terminated;
    }

    fn accepts(&self, ticket: FetchTicket) -> bool {
        ticket == self.ticket && self.phase != GamePhase::Terminated
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.ticket = FetchTicket(self.ticket.0 + 1);
        self.puzzle = PuzzleSlot::Loading;
        self.ticket
    }
}
