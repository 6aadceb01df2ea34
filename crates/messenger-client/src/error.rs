//! Messenger client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Attachment error: {0}")]
    Attachment(#[from] std::io::Error),
}
