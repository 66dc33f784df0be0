use crate::Route;
use dioxus::prelude::*;

/// Catch-all for unknown paths: sends the user to the login view.
#[component]
pub fn Fallback(route: Vec<String>) -> Element {
    let navigator = use_navigator();

    use_effect(move || {
        tracing::debug!(path = ?route, "unknown path, redirecting to login");
        navigator.replace(Route::Login {});
    });

    rsx! {}
}
