use serde::Deserialize;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a call against the employee API.
///
/// Every variant is safe to show to a user; `server_message` carries the text
/// the backend put in its `{ "message": ... }` body, when there was one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The server answered 401. The stored session has already been cleared.
    #[error("unauthorized{}", detail(.message))]
    Unauthorized { message: Option<String> },

    #[error("server returned {status}{}", detail(.message))]
    Server { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The session token could not be written to local storage.
    #[error("session storage failed: {0}")]
    Storage(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl Error {
    /// The message the server sent along with the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Unauthorized { message } | Error::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { .. } => Some(401),
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }

    /// Text for an alert: the server's own message when present, otherwise a
    /// generic description of what went wrong.
    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }

        match self {
            Error::Unauthorized { .. } => "Your session has expired, please sign in again.".into(),
            Error::Server { status, .. } => format!("The server rejected the request ({status})."),
            Error::Network(_) => "Could not reach the server.".into(),
            Error::Decode(_) => "The server sent an unexpected response.".into(),
            Error::Config(reason) => format!("The client is misconfigured: {reason}"),
            Error::Storage(_) => "Could not save your session in this browser.".into(),
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract the `message` field from a raw response body, ignoring bodies
    /// that are not JSON objects.
    pub fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
    }
}
