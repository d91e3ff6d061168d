//! Client error types

use thiserror::Error;

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Errors surfaced by the App Store Connect client
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Invalid credentials
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// API error from the catalog service
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// App not found
    #[error("app not found matching {0}")]
    AppNotFound(String),

    /// No app info record is editable
    #[error("no editable app info found for app {0}")]
    AppInfoNotFound(String),

    /// Build not found
    #[error("build not found matching app {app} and version {version}")]
    BuildNotFound { app: String, version: String },

    /// Build exists but has not finished processing
    #[error("latest build {id} has a processing state of {state}. it would be dangerous to proceed")]
    BuildNotReady { id: String, state: String },

    /// A transfer operation was given a byte range outside the file
    #[error("transfer operation range {offset}+{length} exceeds file size {size}")]
    TransferRange { offset: u64, length: u64, size: u64 },

    /// IO error reading a local asset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JWT error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
