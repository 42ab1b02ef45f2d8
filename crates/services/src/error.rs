//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while fetching a puzzle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PuzzleFetchError {
    #[error("puzzle request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("puzzle response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("puzzle response is missing `{0}`")]
    MissingField(&'static str),
    #[error("puzzle solution is not a usable string or number")]
    InvalidSolution,
    #[error("puzzle image could not be decoded")]
    InvalidImage,
}

impl PuzzleFetchError {
    /// Short message suitable for showing next to a Retry button.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::HttpStatus(_) | Self::Http(_) => "Could not reach the puzzle server.",
            Self::Malformed(_) | Self::MissingField(_) | Self::InvalidSolution => {
                "The puzzle server sent an unexpected response."
            }
            Self::InvalidImage => "The puzzle image could not be loaded.",
        }
    }
}

/// Errors emitted while loading the static background image.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackgroundError {
    #[error("background image not found at {}", path.display())]
    Missing { path: PathBuf },
    #[error("background image at {} is empty", path.display())]
    Empty { path: PathBuf },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Background(#[from] BackgroundError),
    #[error(transparent)]
    PuzzleSource(#[from] PuzzleFetchError),
}
