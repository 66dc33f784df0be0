use crate::state::use_session;
use crate::{AppServices, Route};
use dioxus::prelude::*;
use todo_list_core::{login, user_message};

/// Password form that logs in or creates the user behind the password.
#[component]
pub fn Login() -> Element {
    let services = use_context::<AppServices>();
    let session = use_session();
    let navigator = use_navigator();
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    // Runs again whenever the session changes, including after a successful submit.
    use_effect(move || {
        if session.user_id().is_some() {
            navigator.replace(Route::Todos {});
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        error.set(None);

        let api = services.api.clone();
        let mut session = session;
        spawn(async move {
            loading.set(true);
            match login::login(&api, &session.session(), &password()).await {
                Ok(_) => session.refresh(),
                Err(e) => error.set(Some(user_message(&e, "Login failed."))),
            }
            loading.set(false);
        });
    };

    if session.user_id().is_some() {
        return rsx! {};
    }

    rsx! {
        div { class: "container",
            div { class: "card",
                h1 { "Login" }
                p { class: "muted",
                    "Enter a password. If a user with this password exists it is used, otherwise a new one is created."
                }

                form { class: "stack", onsubmit: handle_submit,
                    label { class: "label",
                        "Password"
                        input {
                            r#type: "password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                            placeholder: "e.g. 1234",
                            disabled: loading(),
                            autofocus: true,
                        }
                    }

                    if let Some(message) = error() {
                        div { class: "alert", "{message}" }
                    }

                    button { class: "btn", r#type: "submit", disabled: loading(),
                        if loading() { "Logging in…" } else { "Login" }
                    }
                }
            }
        }
    }
}
