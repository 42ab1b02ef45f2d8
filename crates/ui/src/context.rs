use std::sync::Arc;

use dioxus::prelude::*;
use services::{BackgroundImage, GameLoopService};
use tomato_core::model::PlayerName;

pub trait UiApp: Send + Sync {
    fn game_loop(&self) -> Arc<GameLoopService>;
    fn background(&self) -> BackgroundImage;
}

#[derive(Clone)]
pub struct AppContext {
    game_loop: Arc<GameLoopService>,
    background: BackgroundImage,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            game_loop: app.game_loop(),
            background: app.background(),
        }
    }

    #[must_use]
    pub fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }

    #[must_use]
    pub fn background_uri(&self) -> &str {
        self.background.data_uri()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The accepted player name, if any. At most one game exists at a time and it
/// belongs to this player; logging out clears it.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerSlot(Signal<Option<PlayerName>>);

impl PlayerSlot {
    #[must_use]
    pub fn current(&self) -> Option<PlayerName> {
        self.0.peek().clone()
    }

    pub fn set(&mut self, player: PlayerName) {
        self.0.set(Some(player));
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

pub fn use_player_slot_provider(initial: Option<PlayerName>) -> PlayerSlot {
    use_context_provider(|| PlayerSlot(Signal::new(initial)))
}
