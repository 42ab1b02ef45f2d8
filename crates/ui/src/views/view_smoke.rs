use std::time::Duration;

use dioxus::prelude::{ReadableExt, WritableExt};
use services::PuzzleFetchError;
use tomato_core::GamePhase;
use tomato_core::model::{Puzzle, ROUND_SECONDS};

use super::test_harness::{ViewHarness, ViewKind, puzzle, setup_view_harness};
use crate::vm::{GameIntent, GameVm};

fn dispatch(harness: &ViewHarness, intent: GameIntent) {
    let dispatch = harness.game_handles.dispatch();
    harness.dom.in_runtime(|| dispatch.call(intent));
}

fn score(harness: &ViewHarness) -> Option<u32> {
    let vm = harness.game_handles.vm();
    harness
        .dom
        .in_runtime(|| vm.peek().as_ref().map(|vm| vm.game().session().score()))
}

fn seconds_left(harness: &ViewHarness) -> Option<u32> {
    let vm = harness.game_handles.vm();
    harness.dom.in_runtime(|| {
        vm.peek()
            .as_ref()
            .map(|vm| vm.game().session().seconds_remaining())
    })
}

fn login_name(harness: &ViewHarness) -> String {
    let name = harness.login_handles.name();
    harness.dom.in_runtime(|| name.peek().clone())
}

async fn log_in(harness: &mut ViewHarness, raw: &str) {
    let mut name = harness.login_handles.name();
    let submit = harness.login_handles.submit();
    harness.dom.in_runtime(|| name.set(raw.to_string()));
    harness.dom.in_runtime(|| submit.call(()));
    for _ in 0..3 {
        harness.drive_async().await;
    }
}

fn phase(harness: &ViewHarness) -> Option<GamePhase> {
    let vm = harness.game_handles.vm();
    harness.dom.in_runtime(|| vm.peek().as_ref().map(GameVm::phase))
}

async fn game_harness(replies: Vec<Result<Puzzle, PuzzleFetchError>>) -> ViewHarness {
    let mut harness = setup_view_harness(ViewKind::Game, Some("Ada"), replies);
    harness.rebuild();
    harness.drive_async().await;
    harness
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_empty_form() {
    let mut harness = setup_view_harness(ViewKind::Login, None, Vec::new());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Tomato Game"), "missing title in {html}");
    assert!(html.contains("Enter your name:"), "missing label in {html}");
    assert!(html.contains("Start Game"), "missing button in {html}");
    assert!(!html.contains("login-error"), "unexpected error in {html}");
    assert!(harness.player().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_rejects_blank_name() {
    let mut harness = setup_view_harness(ViewKind::Login, None, Vec::new());
    harness.rebuild();

    let mut name = harness.login_handles.name();
    let submit = harness.login_handles.submit();
    harness.dom.in_runtime(|| name.set("   ".to_string()));
    harness.dom.in_runtime(|| submit.call(()));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Please enter your name."), "missing error in {html}");
    assert!(harness.player().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_stores_player_name() {
    let mut harness = setup_view_harness(ViewKind::Login, None, Vec::new());
    harness.rebuild();

    let mut name = harness.login_handles.name();
    let submit = harness.login_handles.submit();
    harness.dom.in_runtime(|| name.set("Ada Lovelace".to_string()));
    harness.dom.in_runtime(|| submit.call(()));
    harness.drive_async().await;

    let player = harness.player().expect("player stored");
    assert_eq!(player.as_str(), "Ada Lovelace");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_smoke_renders_first_puzzle() {
    let harness = game_harness(vec![Ok(puzzle(b"first", "3"))]).await;
    let html = harness.render();

    assert!(html.contains("WELCOME Ada"), "missing welcome in {html}");
    assert!(html.contains("Time left: 60 seconds"), "missing timer in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(
        html.contains("data:image/png;base64,Zmlyc3Q="),
        "missing puzzle image in {html}"
    );
    assert!(html.contains("data:image/jpeg;base64,"), "missing background in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_correct_answer_scores_and_loads_next_puzzle() {
    let mut harness = game_harness(vec![
        Ok(puzzle(b"first", "3")),
        Ok(puzzle(b"second", "5")),
    ])
    .await;

    dispatch(&harness, GameIntent::Submit(" 3 ".to_string()));
    harness.drive_async().await;

    assert_eq!(score(&harness), Some(1));
    let html = harness.render();
    assert!(html.contains("Score: 1"), "missing score in {html}");
    assert!(html.contains("c2Vjb25k"), "missing second puzzle in {html}");
    assert!(!html.contains("Zmlyc3Q="), "first puzzle still shown in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_wrong_answer_shows_notice() {
    let mut harness = game_harness(vec![Ok(puzzle(b"first", "3"))]).await;

    dispatch(&harness, GameIntent::Submit("4".to_string()));
    harness.drive_async().await;

    assert_eq!(score(&harness), Some(0));
    let html = harness.render();
    assert!(html.contains("not the correct answer"), "missing notice in {html}");
    assert!(html.contains("Zmlyc3Q="), "puzzle should stay in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_expiry_offers_replay() {
    let mut harness = game_harness(vec![
        Ok(puzzle(b"first", "3")),
        Ok(puzzle(b"second", "5")),
    ])
    .await;

    for _ in 0..ROUND_SECONDS {
        dispatch(&harness, GameIntent::Tick);
    }
    harness.drive_async().await;

    assert_eq!(phase(&harness), Some(GamePhase::AwaitingReplayDecision));
    let html = harness.render();
    assert!(html.contains("Time is up!"), "missing expiry label in {html}");
    assert!(html.contains("Game Over"), "missing dialog in {html}");
    assert!(html.contains("Final score: 0"), "missing final score in {html}");
    assert!(!html.contains("game-puzzle"), "puzzle shown after expiry in {html}");

    dispatch(&harness, GameIntent::Replay);
    harness.drive_async().await;

    assert_eq!(phase(&harness), Some(GamePhase::Running));
    let html = harness.render();
    assert!(html.contains("Time left: 60 seconds"), "timer not reset in {html}");
    assert!(html.contains("Score: 0"), "score not reset in {html}");
    assert!(html.contains("c2Vjb25k"), "missing replay puzzle in {html}");
    assert!(!html.contains("Game Over"), "dialog still open in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_decline_logs_out() {
    let mut harness = game_harness(vec![Ok(puzzle(b"first", "3"))]).await;

    dispatch(&harness, GameIntent::Decline);
    assert_eq!(phase(&harness), Some(GamePhase::Running));
    assert!(harness.player().is_some());

    for _ in 0..ROUND_SECONDS {
        dispatch(&harness, GameIntent::Tick);
    }
    dispatch(&harness, GameIntent::Decline);
    harness.drive_async().await;

    assert_eq!(phase(&harness), Some(GamePhase::Terminated));
    assert!(harness.player().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_log_out_mid_round() {
    let mut harness = game_harness(vec![Ok(puzzle(b"first", "3"))]).await;

    dispatch(&harness, GameIntent::LogOut);
    harness.drive_async().await;

    assert_eq!(phase(&harness), Some(GamePhase::Terminated));
    assert!(harness.player().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_fetch_failure_offers_retry() {
    let mut harness = game_harness(vec![
        Err(PuzzleFetchError::InvalidImage),
        Ok(puzzle(b"second", "5")),
    ])
    .await;

    let html = harness.render();
    assert!(html.contains("Could not load the next puzzle."), "missing error in {html}");
    assert!(html.contains("game-retry"), "missing retry in {html}");

    dispatch(&harness, GameIntent::Retry);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("c2Vjb25k"), "missing retried puzzle in {html}");
    assert!(!html.contains("game-retry"), "retry still shown in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_without_player_renders_placeholder() {
    let mut harness = setup_view_harness(ViewKind::Game, None, Vec::new());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No player is logged in."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn game_view_ticks_once_per_second() {
    let mut harness = game_harness(vec![Ok(puzzle(b"first", "3"))]).await;
    assert_eq!(seconds_left(&harness), Some(60));

    tokio::time::advance(Duration::from_secs(1)).await;
    harness.drive_async().await;
    assert_eq!(seconds_left(&harness), Some(59));

    tokio::time::advance(Duration::from_secs(1)).await;
    harness.drive_async().await;
    assert_eq!(seconds_left(&harness), Some(58));
    let html = harness.render();
    assert!(html.contains("Time left: 58 seconds"), "missing countdown in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn replayed_round_waits_a_full_second_before_first_tick() {
    let mut harness = game_harness(vec![
        Ok(puzzle(b"first", "3")),
        Ok(puzzle(b"second", "5")),
    ])
    .await;

    for _ in 0..ROUND_SECONDS {
        dispatch(&harness, GameIntent::Tick);
    }
    tokio::time::advance(Duration::from_millis(900)).await;
    dispatch(&harness, GameIntent::Replay);
    harness.drive_async().await;
    assert_eq!(seconds_left(&harness), Some(60));

    // Past the point where a ticker started with the first round would fire.
    tokio::time::advance(Duration::from_millis(200)).await;
    harness.drive_async().await;
    assert_eq!(seconds_left(&harness), Some(60));

    tokio::time::advance(Duration::from_millis(900)).await;
    harness.drive_async().await;
    assert_eq!(seconds_left(&harness), Some(59));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn expired_round_stops_ticking() {
    let mut harness = game_harness(vec![Ok(puzzle(b"first", "3"))]).await;

    for _ in 0..ROUND_SECONDS {
        dispatch(&harness, GameIntent::Tick);
    }
    harness.drive_async().await;
    let before = harness.render();

    tokio::time::advance(Duration::from_secs(5)).await;
    harness.drive_async().await;

    assert_eq!(phase(&harness), Some(GamePhase::AwaitingReplayDecision));
    assert_eq!(seconds_left(&harness), Some(0));
    assert_eq!(harness.render(), before);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn login_leads_to_game_screen_with_exact_name() {
    let mut harness = setup_view_harness(
        ViewKind::Routed,
        None,
        vec![Ok(puzzle(b"first", "3"))],
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Enter your name:"), "expected login screen in {html}");

    log_in(&mut harness, "Ada Lovelace").await;

    let html = harness.render();
    assert!(html.contains("WELCOME Ada Lovelace"), "expected game screen in {html}");
    assert!(!html.contains("Enter your name:"), "login still shown in {html}");
    assert!(html.contains("Zmlyc3Q="), "missing puzzle in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn declining_replay_returns_to_empty_login() {
    let mut harness = setup_view_harness(
        ViewKind::Routed,
        None,
        vec![Ok(puzzle(b"first", "3"))],
    );
    harness.rebuild();
    log_in(&mut harness, "Ada").await;

    for _ in 0..ROUND_SECONDS {
        dispatch(&harness, GameIntent::Tick);
    }
    dispatch(&harness, GameIntent::Decline);
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Enter your name:"), "expected login screen in {html}");
    assert!(!html.contains("WELCOME"), "game still shown in {html}");
    assert_eq!(login_name(&harness), "");
    assert!(harness.player().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn log_out_returns_to_empty_login_and_allows_a_new_player() {
    let mut harness = setup_view_harness(
        ViewKind::Routed,
        None,
        vec![Ok(puzzle(b"first", "3")), Ok(puzzle(b"second", "5"))],
    );
    harness.rebuild();
    log_in(&mut harness, "Ada").await;

    dispatch(&harness, GameIntent::LogOut);
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Enter your name:"), "expected login screen in {html}");
    assert_eq!(login_name(&harness), "");

    log_in(&mut harness, "Grace").await;

    let html = harness.render();
    assert!(html.contains("WELCOME Grace"), "expected new game in {html}");
    let navigator = harness.game_handles.navigator();
    assert!(
        !harness.dom.in_runtime(|| navigator.can_go_back()),
        "screen swaps should not stack history"
    );
    assert!(html.contains("Score: 0"), "score not fresh in {html}");
    assert!(html.contains("c2Vjb25k"), "missing new puzzle in {html}");
}
