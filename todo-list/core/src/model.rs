use serde::{Deserialize, Serialize};

/// Server-assigned user identifier.
pub type UserId = i64;

/// Todo identifier. Positive values come from the server, negative values are
/// provisional ids handed out by the client while a create is in flight.
pub type TodoId = i64;

/// A user as returned by the login endpoint. Only the id is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
}

/// A single todo entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub ticked_off: bool,
}

impl Todo {
    pub fn new(id: TodoId, text: impl Into<String>, ticked_off: bool) -> Self {
        Self {
            id,
            text: text.into(),
            ticked_off,
        }
    }

    /// Whether this entry is still waiting for the server to assign an id.
    pub fn is_provisional(&self) -> bool {
        is_provisional(self.id)
    }
}

pub fn is_provisional(id: TodoId) -> bool {
    id < 0
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTodoRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTodoRequest {
    pub ticked_off: bool,
}
