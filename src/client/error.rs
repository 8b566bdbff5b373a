use thiserror::Error;

use crate::domain::query::QueryError;

/// Ways a list request can fail on the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a failure status.
    #[error("server responded with status {status}")]
    Server { status: u16, reason: Option<String> },

    /// The response body was not a recognizable envelope.
    #[error("cannot decode response: {0}")]
    Decode(String),

    /// The descriptor was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] QueryError),
}

impl TransportError {
    /// Text shown in the list's error state.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Network(_) => {
                "Cannot reach the server. Check your connection and try again.".to_string()
            }
            TransportError::Server {
                reason: Some(reason),
                ..
            } => reason.clone(),
            TransportError::Server { reason: None, .. } => {
                "Something went wrong while loading the list.".to_string()
            }
            TransportError::Decode(_) => "The server sent an unexpected response.".to_string(),
            TransportError::Validation(err) => err.to_string(),
        }
    }

    /// Whether re-issuing the same descriptor can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransportError::Validation(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Server {
                status: status.as_u16(),
                reason: None,
            }
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
