mod player;
mod puzzle;
mod session;

pub use player::{PlayerName, PlayerNameError};
pub use puzzle::{Puzzle, PuzzleError, PuzzleImage, Solution};
pub use session::{ROUND_SECONDS, RoundSummary, Session};
