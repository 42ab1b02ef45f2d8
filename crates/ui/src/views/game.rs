use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus::core::Task;
use dioxus_router::use_navigator;
use tomato_core::{AnswerOutcome, FetchTicket, GamePhase, TickOutcome};
use tracing::info;

use crate::context::{AppContext, PlayerSlot};
use crate::routes::Route;
use crate::views::ViewState;
use crate::vm::{GameIntent, GameVm};

#[cfg(test)]
use std::cell::RefCell;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Applies one tick. Returns `false` once the round is no longer counting.
fn tick(vm: &mut Signal<Option<GameVm>>) -> bool {
    let outcome = vm.write().as_mut().map(GameVm::tick);
    match outcome {
        Some(TickOutcome::Counting { .. }) => true,
        Some(TickOutcome::Expired(summary)) => {
            info!(player = %summary.player(), score = summary.score(), "round finished");
            false
        }
        Some(TickOutcome::Ignored) | None => false,
    }
}

fn stop_ticker(ticker: &mut Signal<Option<Task>>) {
    if let Some(task) = ticker.write().take() {
        task.cancel();
    }
}

#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut player_slot = use_context::<PlayerSlot>();
    let game_loop = ctx.game_loop();
    let background_style = use_hook(|| {
        Rc::<str>::from(format!("background-image: url('{}');", ctx.background_uri()))
    });

    let game_loop_for_start = game_loop.clone();
    let mut vm = use_signal(move || {
        player_slot
            .current()
            .map(|player| GameVm::new(game_loop_for_start.start_game(player).0))
    });
    let mut answer = use_signal(String::new);

    // Fetches run as tasks owned by this screen; results go back through the ticket check.
    let request_puzzle = use_callback(move |ticket: FetchTicket| {
        let game_loop = game_loop.clone();
        spawn(async move {
            let completion = game_loop.fetch(ticket).await;
            if let Some(vm) = vm.write().as_mut() {
                vm.apply(completion);
            }
        });
    });

    // A ticker lives for one round. Replay starts a fresh one so the first
    // second of the new round is a full second.
    let mut ticker = use_signal(|| None::<Task>);
    let start_ticker = use_callback(move |()| {
        stop_ticker(&mut ticker);
        let task = spawn(async move {
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;
                if !tick(&mut vm) {
                    ticker.set(None);
                    break;
                }
            }
        });
        ticker.set(Some(task));
    });

    use_hook(move || {
        let ticket = vm.peek().as_ref().map(GameVm::current_ticket);
        match ticket {
            Some(ticket) => {
                start_ticker.call(());
                request_puzzle.call(ticket);
            }
            None => {
                let _ = navigator.replace(Route::Login {});
            }
        }
    });

    let dispatch = use_callback(move |intent: GameIntent| {
        let mut leave = false;
        match intent {
            GameIntent::Tick => {
                if !tick(&mut vm) {
                    stop_ticker(&mut ticker);
                }
            }
            GameIntent::Submit(input) => {
                let result = vm.write().as_mut().map(|vm| vm.submit(&input));
                if let Some(Ok(AnswerOutcome::Correct { next, .. })) = result {
                    answer.set(String::new());
                    request_puzzle.call(next);
                }
            }
            GameIntent::Retry => {
                if let Some(ticket) = vm.write().as_mut().and_then(GameVm::retry) {
                    request_puzzle.call(ticket);
                }
            }
            GameIntent::Replay => {
                if let Some(ticket) = vm.write().as_mut().and_then(GameVm::replay) {
                    answer.set(String::new());
                    start_ticker.call(());
                    request_puzzle.call(ticket);
                }
            }
            GameIntent::Decline => {
                leave = vm.write().as_mut().is_some_and(GameVm::decline);
            }
            GameIntent::LogOut => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.log_out();
                }
                leave = true;
            }
        }

        if leave {
            info!("player logged out");
            stop_ticker(&mut ticker);
            player_slot.clear();
            let _ = navigator.replace(Route::Login {});
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<GameTestHandles>() {
                handles.register(dispatch, vm, navigator);
            }
        }
    }

    let vm_guard = vm.read();
    let Some(game) = vm_guard.as_ref() else {
        return rsx! {
            div { class: "page game-page",
                p { "No player is logged in." }
            }
        };
    };

    let phase = game.phase();
    let welcome = game.welcome_label();
    let timer_label = game.timer_label();
    let score_label = game.score_label();
    let notice = game.notice();
    let puzzle_state = game.puzzle_state();
    let fetch_detail = game.fetch_error_detail().map(str::to_string);
    let final_score = game.final_score_label();
    let round_length = game.round_length_label();
    drop(vm_guard);

    rsx! {
        div { class: "page game-page", style: "{background_style}",
            header { class: "game-header",
                h2 { class: "game-welcome", "{welcome}" }
                span { class: "game-timer", id: "game-timer", "{timer_label}" }
                button {
                    class: "btn game-logout",
                    id: "game-logout",
                    r#type: "button",
                    onclick: move |_| dispatch.call(GameIntent::LogOut),
                    "Log Out"
                }
            }

            div { class: "game-board",
                match puzzle_state {
                    ViewState::Idle => rsx! {},
                    ViewState::Loading => rsx! {
                        p { class: "game-loading", "Loading puzzle..." }
                    },
                    ViewState::Ready(puzzle) => rsx! {
                        img { class: "game-puzzle", alt: "Puzzle", src: "{puzzle.image_src}" }
                    },
                    ViewState::Error(err) => rsx! {
                        div { class: "game-fetch-error", role: "alert",
                            p { "{err.message()}" }
                            if let Some(detail) = fetch_detail {
                                p { class: "game-fetch-error__detail", "{detail}" }
                            }
                            button {
                                class: "btn btn-secondary",
                                id: "game-retry",
                                r#type: "button",
                                onclick: move |_| dispatch.call(GameIntent::Retry),
                                "Retry"
                            }
                        }
                    },
                }

                if phase == GamePhase::AwaitingReplayDecision {
                    div {
                        class: "game-over",
                        role: "dialog",
                        aria_modal: "true",
                        aria_labelledby: "game-over-title",
                        h3 { class: "game-over__title", id: "game-over-title", "Game Over" }
                        p { "Time is up! Do you want to play again?" }
                        if let Some(final_score) = final_score {
                            p { class: "game-over__score", "{final_score}" }
                        }
                        if let Some(round_length) = round_length {
                            p { class: "game-over__length", "{round_length}" }
                        }
                        div { class: "game-over__actions",
                            button {
                                class: "btn btn-primary",
                                id: "game-replay",
                                r#type: "button",
                                onclick: move |_| dispatch.call(GameIntent::Replay),
                                "Play Again"
                            }
                            button {
                                class: "btn btn-secondary",
                                id: "game-decline",
                                r#type: "button",
                                onclick: move |_| dispatch.call(GameIntent::Decline),
                                "No, log out"
                            }
                        }
                    }
                }
            }

            footer { class: "game-footer",
                form {
                    class: "game-answer",
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        dispatch.call(GameIntent::Submit(answer.peek().clone()));
                    },
                    button {
                        class: "btn btn-primary",
                        id: "game-submit",
                        r#type: "submit",
                        disabled: phase != GamePhase::Running,
                        "Submit"
                    }
                    input {
                        class: "game-answer__input",
                        id: "game-answer",
                        r#type: "text",
                        autocomplete: "off",
                        value: "{answer}",
                        oninput: move |evt| answer.set(evt.value()),
                    }
                }
                span { class: "game-score", id: "game-score", "{score_label}" }
            }

            if let Some(notice) = notice {
                p { class: "game-notice", role: "status", "{notice.message()}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GameTestHandles {
    dispatch: Rc<RefCell<Option<Callback<GameIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<GameVm>>>>>,
    navigator: Rc<RefCell<Option<dioxus_router::Navigator>>>,
}

#[cfg(test)]
impl GameTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<GameIntent>,
        vm: Signal<Option<GameVm>>,
        navigator: dioxus_router::Navigator,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
        *self.navigator.borrow_mut() = Some(navigator);
    }

    pub(crate) fn dispatch(&self) -> Callback<GameIntent> {
        (*self.dispatch.borrow()).expect("game dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<GameVm>> {
        (*self.vm.borrow()).expect("game vm registered")
    }

    pub(crate) fn navigator(&self) -> dioxus_router::Navigator {
        (*self.navigator.borrow()).expect("game navigator registered")
    }
}
