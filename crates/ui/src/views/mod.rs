mod game;
mod login;
mod state;

#[cfg(test)]
mod view_smoke;

pub use game::GameView;
pub use login::LoginView;
pub use state::{ViewError, ViewState};
