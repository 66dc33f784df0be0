//! HTTP client for the todo backend.
//!
//! Every call states the status it expects; anything else becomes an
//! [`ApiError::Status`] that keeps the server's message and raw body. The
//! client never retries and never touches local state.

use async_trait::async_trait;
use crate::model::{CreateTodoRequest, LoginRequest, Todo, TodoId, UpdateTodoRequest, User, UserId};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by [`TodoApi`] calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a status other than the expected one.
    #[error("{message}")]
    Status {
        message: String,
        status: u16,
        body: Option<ResponseBody>,
    },
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// Raw body of the failed response, kept for diagnostics.
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// A response body parsed as leniently as possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parses `text` as JSON, falling back to the raw text. Empty bodies are `None`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(match serde_json::from_str(text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text.to_string()),
        })
    }

    /// The server-supplied `message` field of a JSON object body.
    ///
    /// Blank, `false` and `0` messages count as absent.
    pub fn message(&self) -> Option<String> {
        match self {
            ResponseBody::Json(Value::Object(map)) => match map.get("message")? {
                Value::Null | Value::Bool(false) => None,
                Value::String(s) if s.is_empty() => None,
                Value::Number(n) if n.as_f64() == Some(0.0) => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        }
    }
}

/// Checks a response against the expected status.
///
/// Returns the parsed body on success, or `None` for empty and 204 responses.
pub fn interpret_response(status: u16, expected: u16, text: &str) -> Result<Option<Value>, ApiError> {
    let success = (200..300).contains(&status);
    if status != expected || !success {
        let body = ResponseBody::parse(text);
        let message = body
            .as_ref()
            .and_then(ResponseBody::message)
            .unwrap_or_else(|| {
                if status != expected {
                    format!("Unexpected status {status} (expected {expected})")
                } else {
                    format!("HTTP error {status}")
                }
            });
        return Err(ApiError::Status {
            message,
            status,
            body,
        });
    }

    if status == StatusCode::NO_CONTENT.as_u16() {
        return Ok(None);
    }

    Ok(ResponseBody::parse(text).map(ResponseBody::into_value))
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    Ok(serde_json::from_value(value.unwrap_or(Value::Null))?)
}

/// The operations the app performs against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait TodoApi {
    /// Logs in with `password`, creating the user if none has it yet.
    async fn login(&self, password: &str) -> Result<User, ApiError>;
    async fn list_todos(&self, user_id: UserId) -> Result<Vec<Todo>, ApiError>;
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<Todo, ApiError>;
    async fn update_todo(&self, todo_id: TodoId, ticked_off: bool) -> Result<Todo, ApiError>;
    async fn delete_todo(&self, todo_id: TodoId) -> Result<(), ApiError>;
}

/// [`TodoApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<Option<Value>, ApiError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), path, "response received");

        interpret_response(status.as_u16(), expected.as_u16(), &text)
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpTodoApi {
    #[tracing::instrument(skip_all)]
    async fn login(&self, password: &str) -> Result<User, ApiError> {
        let body = LoginRequest { password };
        decode(
            self.send(Method::POST, "/users", Some(&body), StatusCode::CREATED)
                .await?,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn list_todos(&self, user_id: UserId) -> Result<Vec<Todo>, ApiError> {
        let path = format!("/users/{user_id}/todos");
        decode(
            self.send::<()>(Method::GET, &path, None, StatusCode::OK)
                .await?,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<Todo, ApiError> {
        let path = format!("/users/{user_id}/todos");
        let body = CreateTodoRequest { text };
        decode(
            self.send(Method::POST, &path, Some(&body), StatusCode::CREATED)
                .await?,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn update_todo(&self, todo_id: TodoId, ticked_off: bool) -> Result<Todo, ApiError> {
        let path = format!("/todos/{todo_id}");
        let body = UpdateTodoRequest { ticked_off };
        decode(
            self.send(Method::PUT, &path, Some(&body), StatusCode::OK)
                .await?,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn delete_todo(&self, todo_id: TodoId) -> Result<(), ApiError> {
        let path = format!("/todos/{todo_id}");
        self.send::<()>(Method::DELETE, &path, None, StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }
}
