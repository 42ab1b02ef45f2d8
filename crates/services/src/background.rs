use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::BackgroundError;
use crate::media::{data_uri, mime_for_path};

pub const DEFAULT_BACKGROUND_PATH: &str = "assets/Game_screen.jpeg";

/// Static backdrop of the game screen, pre-encoded for the webview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundImage {
    data_uri: String,
}

impl BackgroundImage {
    /// Reads the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns `BackgroundError::Missing` if the file does not exist,
    /// `BackgroundError::Empty` if it has no content, and `BackgroundError::Io`
    /// for other read failures.
    pub fn load(path: &Path) -> Result<Self, BackgroundError> {
        let data = std::fs::read(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => BackgroundError::Missing {
                path: path.to_path_buf(),
            },
            _ => BackgroundError::Io(err),
        })?;
        if data.is_empty() {
            return Err(BackgroundError::Empty {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), bytes = data.len(), "loaded background image");
        Ok(Self::from_bytes(mime_for_path(path), &data))
    }

    #[must_use]
    pub fn from_bytes(mime: &str, data: &[u8]) -> Self {
        Self {
            data_uri: data_uri(mime, data),
        }
    }

    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}
