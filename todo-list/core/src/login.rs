use crate::api::{ApiError, TodoApi};
use crate::model::UserId;
use crate::session::{KeyValueStorage, Session};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Password must not be empty.")]
    EmptyPassword,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Logs in with `password` and persists the returned user id.
///
/// The server resolves the password to an existing user or creates a new one.
/// Blank passwords are rejected without a request.
#[tracing::instrument(skip_all)]
pub async fn login<A, S>(api: &A, session: &Session<S>, password: &str) -> Result<UserId, LoginError>
where
    A: TodoApi,
    S: KeyValueStorage,
{
    let password = password.trim();
    if password.is_empty() {
        return Err(LoginError::EmptyPassword);
    }

    let user = api.login(password).await?;
    session.set_user_id(user.id);
    tracing::info!(user_id = user.id, "logged in");
    Ok(user.id)
}

/// Ends the session. Idempotent.
pub fn logout<S: KeyValueStorage>(session: &Session<S>) {
    session.clear_user_id();
    tracing::info!("logged out");
}
