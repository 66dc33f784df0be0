mod fallback;
mod login;
mod todos;

pub use fallback::Fallback;
pub use login::Login;
pub use todos::Todos;
