use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlayerNameError {
    #[error("player name cannot be empty")]
    Empty,
}

/// Display name entered on the login screen.
///
/// Whitespace-only input is rejected, anything else is kept verbatim.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    /// Validates a raw name.
    ///
    /// # Errors
    ///
    /// Returns `PlayerNameError::Empty` if the name is empty or only whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, PlayerNameError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PlayerNameError::Empty);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerName({:?})", self.0)
    }
}
