#![forbid(unsafe_code)]

pub mod app_services;
pub mod background;
pub mod error;
pub mod game_loop;
pub mod media;
pub mod puzzle_source;
mod response;

pub use tomato_core::Clock;

pub use app_services::AppServices;
pub use background::{BackgroundImage, DEFAULT_BACKGROUND_PATH};
pub use error::{AppServicesError, BackgroundError, PuzzleFetchError};
pub use game_loop::{FetchCompletion, GameLoopService};
pub use puzzle_source::{DEFAULT_API_URL, HttpPuzzleSource, PuzzleApiConfig, PuzzleSource};
