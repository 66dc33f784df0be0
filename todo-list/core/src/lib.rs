//! Core domain models and client logic for the todo list app.
//!
//! Everything here is platform independent: the web crate supplies browser
//! storage and reactive state, and drives the flows defined in [`flow`] and
//! [`login`].
pub mod api;
pub mod board;
pub mod config;
pub mod flow;
pub mod login;
pub mod model;
pub mod session;
pub mod view;

pub use api::{ApiError, HttpTodoApi, ResponseBody, TodoApi};
pub use board::{BoardCell, Notice, TodoBoard};
pub use config::AppConfig;
pub use flow::FlowError;
pub use login::LoginError;
pub use model::{Todo, TodoId, User, UserId};
pub use session::{KeyValueStorage, MemoryStorage, Session, StorageError};
pub use view::{Filter, Sort};

/// Returns the message to show for an error, falling back to `fallback` when
/// the error carries no text.
pub fn user_message(err: &impl std::fmt::Display, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
