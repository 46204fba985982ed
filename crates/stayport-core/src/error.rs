//! Error types module
//!
//! One unified `AppError` covers the whole submission/review flow: local
//! validation, transport failures, server-rejected responses, upload
//! failures, and draft-storage degradation. The status normalizer and the
//! room-type codec never produce errors; malformed input degrades to a safe
//! default (pending status, blank row) instead.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The form failed local validation; no network call was issued.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No usable response was received (connect failure, timeout, DNS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived with a non-success application code or HTTP
    /// status. `message` is the server-supplied text when present.
    #[error("Server rejected request (code {code}): {message}")]
    Server { code: i64, message: String },

    /// An image upload failed. The submission aborts before any
    /// create/update call so the server never sees a half-written record.
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Draft persistence problem. The draft store downgrades these to
    /// warnings; they never block the primary submit flow.
    #[error("Draft storage error: {0}")]
    DraftStorage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error already carries a server-supplied message. When it
    /// does, the caller shows that message verbatim and must not stack a
    /// second generic notification on top.
    pub fn has_server_message(&self) -> bool {
        matches!(self, AppError::Server { message, .. } if !message.trim().is_empty())
    }

    /// The single user-facing line for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Server { code, .. } => format!("Request rejected by server (code {})", code),
            AppError::Transport(_) => {
                "Submission failed, check your network connection and retry".to_string()
            }
            AppError::InvalidInput(msg) | AppError::Upload(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}
