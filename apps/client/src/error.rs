//! Client error types.

use langleague_core::{friendly_failure_message, ImportError, ReorderError};
use thiserror::Error;

/// Errors from talking to the backend or driving a client workflow.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Reorder error: {0}")]
    Reorder(#[from] ReorderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Text to show the user for this failure.
    ///
    /// HTTP statuses map to fixed messages; everything else falls back to the
    /// substring heuristic shared with the import wizard.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Network error: Could not reach the server. Please check your connection.".to_string()
            }
            Self::Backend { status: 400, message } if !message.is_empty() => message.clone(),
            Self::Backend { status: 400, .. } => "Invalid request to AI service".to_string(),
            Self::Backend {
                status: 401 | 403, ..
            } => "API authentication failed. Please contact administrator.".to_string(),
            Self::Backend { status: 429, .. } => {
                "Rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            Self::Backend { status, .. } if *status >= 500 => {
                "Service is temporarily unavailable. Please try again later.".to_string()
            }
            Self::EmptyResponse(_) | Self::Import(ImportError::EmptyResponse) => {
                "AI returned an empty response. Please try again.".to_string()
            }
            Self::Import(ImportError::EmptyArray) => {
                "No items were generated. Please try again with different text.".to_string()
            }
            other => friendly_failure_message(&other.to_string()),
        }
    }

    /// Whether a retry of an idempotent request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
