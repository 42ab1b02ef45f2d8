use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::Clock;
use crate::background::BackgroundImage;
use crate::error::AppServicesError;
use crate::game_loop::GameLoopService;
use crate::puzzle_source::{HttpPuzzleSource, PuzzleApiConfig, PuzzleSource};

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    game_loop: Arc<GameLoopService>,
    background: BackgroundImage,
}

impl AppServices {
    /// Build services backed by the HTTP puzzle API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the background image cannot be read or the
    /// HTTP client cannot be built.
    pub fn new_http(
        api: PuzzleApiConfig,
        background_path: &Path,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let background = BackgroundImage::load(background_path)?;
        info!(endpoint = %api.endpoint, timeout_secs = api.timeout.as_secs(), "using puzzle API");
        let source: Arc<dyn PuzzleSource> = Arc::new(HttpPuzzleSource::new(api)?);
        Ok(Self::with_source(source, background, clock))
    }

    #[must_use]
    pub fn with_source(
        source: Arc<dyn PuzzleSource>,
        background: BackgroundImage,
        clock: Clock,
    ) -> Self {
        Self {
            game_loop: Arc::new(GameLoopService::new(clock, source)),
            background,
        }
    }

    #[must_use]
    pub fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }

    #[must_use]
    pub fn background(&self) -> BackgroundImage {
        self.background.clone()
    }
}
