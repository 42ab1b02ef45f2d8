use chrono::{DateTime, Utc};

use crate::model::PlayerName;

/// Length of one round in seconds.
pub const ROUND_SECONDS: u32 = 60;

/// Mutable state of one game screen: who is playing, the score, and the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    player: PlayerName,
    score: u32,
    seconds_remaining: u32,
    started_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(player: PlayerName, started_at: DateTime<Utc>) -> Self {
        Self {
            player,
            score: 0,
            seconds_remaining: ROUND_SECONDS,
            started_at,
        }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn tick(&mut self) -> u32 {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining
    }

    pub(crate) fn record_correct(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    pub(crate) fn restart(&mut self, started_at: DateTime<Utc>) {
        self.score = 0;
        self.seconds_remaining = ROUND_SECONDS;
        self.started_at = started_at;
    }

    #[must_use]
    pub fn summary(&self, finished_at: DateTime<Utc>) -> RoundSummary {
        RoundSummary {
            player: self.player.clone(),
            score: self.score,
            started_at: self.started_at,
            finished_at,
        }
    }
}

/// Outcome of a round that ran out of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    player: PlayerName,
    score: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl RoundSummary {
    #[must_use]
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Wall-clock length of the round, clamped at zero.
    #[must_use]
    pub fn elapsed_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }
}
