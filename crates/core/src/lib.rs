#![forbid(unsafe_code)]

pub mod game;
pub mod model;
pub mod time;

pub use game::{
    AnswerOutcome, FetchFailure, FetchTicket, Game, GameError, GamePhase, PuzzleSlot, TickOutcome,
};
pub use time::Clock;
