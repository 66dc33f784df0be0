use serde::Deserialize;

const DEFAULTS: &str = include_str!("../config/default.toml");

/// Client configuration.
///
/// Defaults are compiled in from `config/default.toml` and can be overridden
/// with `TODO_`-prefixed environment variables where an environment exists
/// (native builds and tests; the browser has none).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Base address of the todo backend, without a trailing path.
    pub api_base_url: String,
    /// Storage key the session's user id is kept under.
    pub session_key: String,
    /// How long a transient notification stays visible.
    pub notice_millis: u32,
}

impl AppConfig {
    /// Loads the embedded defaults layered under the process environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("TODO"))
            .build()?;

        settings.try_deserialize()
    }

    /// Loads only the embedded defaults.
    pub fn defaults() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
