//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Startup error: {0}")]
    Startup(#[from] anyhow::Error),

    #[error("Messenger error: {0}")]
    Chat(#[from] messenger_client::ChatError),

    #[error("Storage error: {0}")]
    Store(#[from] thread_store::StoreError),

    #[error("Command catalog error: {0}")]
    Catalog(String),

    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
