// ABOUTME: Application-wide error types.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] seltest_client::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Backend unreachable: {message}\n\nIs the backend running at {url}?\nTry 'seltest setup' to configure the API URL.")]
    BackendUnreachable { message: String, url: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
