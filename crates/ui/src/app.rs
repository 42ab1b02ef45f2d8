use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::use_player_slot_provider;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    // The one place that owns who is playing; screens read and clear it.
    use_player_slot_provider(None);

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Tomato Game" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
