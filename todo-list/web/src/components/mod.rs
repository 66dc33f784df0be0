mod error_message;
mod loading_spinner;
mod toast;

pub use error_message::ErrorMessage;
pub use loading_spinner::LoadingSpinner;
pub use toast::Toast;
