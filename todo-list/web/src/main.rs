use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use todo_list_core::{AppConfig, HttpTodoApi};

mod components;
mod state;
mod views;

use views::{Fallback, Login, Todos};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::Login {})]
    #[route("/login")]
    Login {},
    #[route("/todos")]
    Todos {},
    #[route("/:..route")]
    Fallback { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

/// Services shared by every view.
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub api: HttpTodoApi,
}

impl AppServices {
    fn load() -> anyhow::Result<Self> {
        let config = AppConfig::load()?;
        let api = HttpTodoApi::new(config.api_base_url.clone())?;
        Ok(Self { config, api })
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.api.base_url() == other.api.base_url()
    }
}

#[component]
fn App() -> Element {
    let services = use_hook(|| {
        AppServices::load().map_err(|e| {
            tracing::error!(error = %e, "failed to load configuration");
            e.to_string()
        })
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        {match services {
            Ok(services) => rsx! { Shell { services } },
            Err(message) => rsx! {
                components::ErrorMessage { message: format!("Failed to start: {message}") }
            },
        }}
    }
}

/// Provides the services to the routed views.
#[component]
fn Shell(services: AppServices) -> Element {
    state::provide_session(services.config.session_key.clone());
    use_context_provider(|| services);

    rsx! {
        Router::<Route> {}
    }
}
