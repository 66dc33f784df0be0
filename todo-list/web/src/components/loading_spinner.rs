use dioxus::prelude::*;

/// A loading indicator with customizable message
#[component]
pub fn LoadingSpinner(message: Option<String>) -> Element {
    let message = message.unwrap_or_else(|| "Loading...".to_string());

    rsx! {
        div { class: "panel muted",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}
