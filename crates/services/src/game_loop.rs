use std::sync::Arc;

use tomato_core::model::{PlayerName, Puzzle};
use tomato_core::{FetchFailure, FetchTicket, Game};
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::PuzzleFetchError;
use crate::puzzle_source::PuzzleSource;

/// Result of one puzzle fetch, tagged with the ticket it was issued for.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<Puzzle, PuzzleFetchError>,
}

impl FetchCompletion {
    /// Posts the result into `game`. Returns `false` if the ticket was stale.
    pub fn apply(self, game: &mut Game) -> bool {
        let ticket = self.ticket;
        let applied = match self.result {
            Ok(puzzle) => game.puzzle_loaded(ticket, puzzle),
            Err(err) => game.fetch_failed(ticket, FetchFailure::new(err.user_message())),
        };
        if !applied {
            debug!(ticket = ticket.value(), "dropped stale puzzle fetch");
        }
        applied
    }
}

/// Orchestrates game start and puzzle fetching.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    source: Arc<dyn PuzzleSource>,
}

impl GameLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn PuzzleSource>) -> Self {
        Self { clock, source }
    }

    /// Start a running round. The caller must run `fetch` for the returned ticket.
    #[must_use]
    pub fn start_game(&self, player: PlayerName) -> (Game, FetchTicket) {
        info!(player = %player, "starting game");
        Game::start(player, self.clock)
    }

    /// Fetch a puzzle for `ticket`. Never fails: errors travel in the completion.
    pub async fn fetch(&self, ticket: FetchTicket) -> FetchCompletion {
        debug!(ticket = ticket.value(), "fetching puzzle");
        let result = self.source.fetch_puzzle().await;
        if let Err(err) = &result {
            warn!(ticket = ticket.value(), error = %err, "puzzle fetch failed");
        }
        FetchCompletion { ticket, result }
    }
}
