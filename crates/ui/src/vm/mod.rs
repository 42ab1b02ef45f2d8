mod game_vm;
mod login_vm;
mod time_fmt;

pub use game_vm::{GameIntent, GameVm, PuzzleVm};
pub use login_vm::submit_login;
pub use time_fmt::{countdown_label, round_length_label};
