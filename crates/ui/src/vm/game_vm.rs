use std::rc::Rc;

use services::FetchCompletion;
use services::media::data_uri;
use tomato_core::model::PuzzleImage;
use tomato_core::{
    AnswerOutcome, FetchTicket, Game, GameError, GamePhase, PuzzleSlot, TickOutcome,
};

use crate::views::{ViewError, ViewState};
use crate::vm::{countdown_label, round_length_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameIntent {
    Submit(String),
    Tick,
    Retry,
    Replay,
    Decline,
    LogOut,
}

/// Encoded once per puzzle; clones share the data URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleVm {
    pub image_src: Rc<str>,
}

impl PuzzleVm {
    fn from_image(image: &PuzzleImage) -> Self {
        Self {
            image_src: data_uri(image.mime(), image.data()).into(),
        }
    }
}

pub struct GameVm {
    game: Game,
    notice: Option<ViewError>,
    shown: Option<(FetchTicket, PuzzleVm)>,
}

impl GameVm {
    #[must_use]
    pub fn new(game: Game) -> Self {
        Self {
            game,
            notice: None,
            shown: None,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    #[must_use]
    pub fn current_ticket(&self) -> FetchTicket {
        self.game.current_ticket()
    }

    #[must_use]
    pub fn notice(&self) -> Option<ViewError> {
        self.notice
    }

    #[must_use]
    pub fn welcome_label(&self) -> String {
        format!("WELCOME {}", self.game.session().player())
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        countdown_label(
            self.game.session().seconds_remaining(),
            self.phase() != GamePhase::Running,
        )
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.game.session().score())
    }

    #[must_use]
    pub fn final_score_label(&self) -> Option<String> {
        self.game
            .last_summary()
            .map(|summary| format!("Final score: {}", summary.score()))
    }

    #[must_use]
    pub fn round_length_label(&self) -> Option<String> {
        self.game
            .last_summary()
            .map(|summary| round_length_label(summary.elapsed_secs()))
    }

    #[must_use]
    pub fn puzzle_state(&self) -> ViewState<PuzzleVm> {
        if self.phase() != GamePhase::Running {
            return ViewState::Idle;
        }
        match self.game.puzzle() {
            PuzzleSlot::Loading => ViewState::Loading,
            PuzzleSlot::Ready(puzzle) => match &self.shown {
                Some((ticket, vm)) if *ticket == self.current_ticket() => {
                    ViewState::Ready(vm.clone())
                }
                _ => ViewState::Ready(PuzzleVm::from_image(puzzle.image())),
            },
            PuzzleSlot::Failed(_) => ViewState::Error(ViewError::FetchFailed),
        }
    }

    #[must_use]
    pub fn fetch_error_detail(&self) -> Option<&str> {
        match self.game.puzzle() {
            PuzzleSlot::Failed(failure) => Some(failure.message()),
            _ => None,
        }
    }

    /// Checks an answer and records a notice for the player when it is wrong
    /// or cannot be checked yet.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::PuzzleNotReady` while no puzzle is shown and
    /// `ViewError::Unknown` outside a running round.
    pub fn submit(&mut self, input: &str) -> Result<AnswerOutcome, ViewError> {
        let outcome = self.game.submit_answer(input).map_err(|err| match err {
            GameError::PuzzleNotReady => ViewError::PuzzleNotReady,
            _ => ViewError::Unknown,
        });
        self.notice = match &outcome {
            Ok(AnswerOutcome::Correct { .. }) => None,
            Ok(AnswerOutcome::Incorrect) => Some(ViewError::WrongAnswer),
            Err(err) => Some(*err),
        };
        outcome
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.game.tick()
    }

    pub fn apply(&mut self, completion: FetchCompletion) -> bool {
        let applied = completion.apply(&mut self.game);
        if let (true, PuzzleSlot::Ready(puzzle)) = (applied, self.game.puzzle()) {
            self.shown = Some((self.current_ticket(), PuzzleVm::from_image(puzzle.image())));
        }
        applied
    }

    pub fn retry(&mut self) -> Option<FetchTicket> {
        let ticket = self.game.retry_fetch().ok()?;
        self.notice = None;
        Some(ticket)
    }

    pub fn replay(&mut self) -> Option<FetchTicket> {
        let ticket = self.game.replay().ok()?;
        self.notice = None;
        Some(ticket)
    }

    pub fn decline(&mut self) -> bool {
        self.game.decline_replay().is_ok()
    }

    pub fn log_out(&mut self) {
        self.game.log_out();
    }
}
