use dioxus::prelude::*;

/// Transient notice; renders nothing without a message.
#[component]
pub fn Toast(message: Option<String>, on_dismiss: EventHandler<()>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };

    rsx! {
        div { class: "toast",
            span { "{message}" }
            button {
                class: "toast-close",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
