use thiserror::Error;

use crate::chat::ChatField;

/// Input rejected locally, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(ChatField),
}

/// Failures talking to the chat backend.
///
/// Every non-success status is the same kind of failure; the status code is
/// kept for display and for picking a page status, not for recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl RemoteError {
    /// True when the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Status { status: 404, .. })
    }
}

/// The single error signal of every chat operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors from the chat form controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a save is already in progress")]
    AlreadySubmitting,

    #[error("this form has already been saved")]
    AlreadySubmitted,

    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),
}
