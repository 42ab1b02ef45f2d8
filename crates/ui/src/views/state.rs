#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptyName,
    WrongAnswer,
    PuzzleNotReady,
    FetchFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyName => "Please enter your name.",
            Self::WrongAnswer => "Sorry, that's not the correct answer. Try again!",
            Self::PuzzleNotReady => "Hold on, the next puzzle is still loading.",
            Self::FetchFailed => "Could not load the next puzzle.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}
