use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Puzzle solution cannot be empty.")]
    EmptySolution,

    #[error("Puzzle image data cannot be empty.")]
    EmptyImage,
}

/// Image half of a puzzle: decoded bytes plus the MIME type the webview
/// needs to display them.
#[derive(Clone, PartialEq, Eq)]
pub struct PuzzleImage {
    mime: String,
    data: Vec<u8>,
}

impl PuzzleImage {
    /// # Errors
    ///
    /// Returns `PuzzleError::EmptyImage` when `data` is empty.
    pub fn from_bytes(mime: impl Into<String>, data: Vec<u8>) -> Result<Self, PuzzleError> {
        if data.is_empty() {
            return Err(PuzzleError::EmptyImage);
        }
        Ok(Self {
            mime: mime.into(),
            data,
        })
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for PuzzleImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleImage({}, {} bytes)", self.mime, self.data.len())
    }
}

/// Expected answer for a puzzle.
///
/// Matching ignores surrounding whitespace and letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution(String);

impl Solution {
    /// # Errors
    ///
    /// Returns `PuzzleError::EmptySolution` for empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self, PuzzleError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PuzzleError::EmptySolution);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        normalize(input) == normalize(&self.0)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// An image/answer pair served for one round. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    image: PuzzleImage,
    solution: Solution,
}

impl Puzzle {
    #[must_use]
    pub fn new(image: PuzzleImage, solution: Solution) -> Self {
        Self { image, solution }
    }

    #[must_use]
    pub fn image(&self) -> &PuzzleImage {
        &self.image
    }

    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[must_use]
    pub fn is_correct(&self, input: &str) -> bool {
        self.solution.matches(input)
    }
}
