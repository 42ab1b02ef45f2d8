use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::info;

use crate::context::PlayerSlot;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::submit_login;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn LoginView() -> Element {
    let navigator = use_navigator();
    let mut player_slot = use_context::<PlayerSlot>();
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let submit = use_callback(move |()| {
        let accepted = submit_login(&name.read());
        match accepted {
            Ok(player) => {
                info!(player = %player, "player logged in");
                error.set(None);
                player_slot.set(player);
                let _ = navigator.replace(Route::Game {});
            }
            Err(err) => error.set(Some(err)),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<LoginTestHandles>() {
                handles.register(submit, name);
            }
        }
    }

    rsx! {
        div { class: "page login-page",
            form {
                class: "login-card",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submit.call(());
                },
                h1 { class: "login-title", "Tomato Game" }
                label { class: "login-label", r#for: "login-name", "Enter your name:" }
                input {
                    class: "login-input",
                    id: "login-name",
                    r#type: "text",
                    autofocus: true,
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    id: "login-submit",
                    r#type: "submit",
                    "Start Game"
                }
                if let Some(err) = *error.read() {
                    p { class: "login-error", role: "alert", "{err.message()}" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LoginTestHandles {
    submit: Rc<RefCell<Option<Callback<()>>>>,
    name: Rc<RefCell<Option<Signal<String>>>>,
}

#[cfg(test)]
impl LoginTestHandles {
    pub(crate) fn register(&self, submit: Callback<()>, name: Signal<String>) {
        *self.submit.borrow_mut() = Some(submit);
        *self.name.borrow_mut() = Some(name);
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("login submit registered")
    }

    pub(crate) fn name(&self) -> Signal<String> {
        (*self.name.borrow()).expect("login name registered")
    }
}
