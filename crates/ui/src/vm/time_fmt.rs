#[must_use]
pub fn countdown_label(seconds_remaining: u32, expired: bool) -> String {
    if expired {
        return "Time is up!".to_string();
    }
    match seconds_remaining {
        1 => "Time left: 1 second".to_string(),
        n => format!("Time left: {n} seconds"),
    }
}

#[must_use]
pub fn round_length_label(elapsed_secs: i64) -> String {
    let minutes = elapsed_secs / 60;
    let remainder = elapsed_secs % 60;
    format!("Round length: {minutes}:{remainder:02}")
}
