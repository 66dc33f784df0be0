use dioxus::prelude::*;

/// Inline panel for errors that stay until the user acts.
#[component]
pub fn ErrorMessage(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div { class: "panel",
            div { class: "alert", "{message}" }
            if let Some(on_retry) = on_retry {
                button { class: "btn", onclick: move |_| on_retry.call(()), "Retry" }
            }
        }
    }
}
