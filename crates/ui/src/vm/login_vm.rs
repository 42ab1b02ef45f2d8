use tomato_core::model::PlayerName;

use crate::views::ViewError;

/// Validates the login form input. The accepted name is kept exactly as typed.
///
/// # Errors
///
/// Returns `ViewError::EmptyName` for empty or whitespace-only input.
pub fn submit_login(raw: &str) -> Result<PlayerName, ViewError> {
    PlayerName::new(raw).map_err(|_| ViewError::EmptyName)
}
