//! Error types for the citation form

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for form and chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Application errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API credential is not present in the environment
    #[error("{0} environment variable not found. Please set it.")]
    MissingCredential(String),

    /// The submission is incomplete (empty query, no uploads)
    #[error("{0}")]
    NeedsInput(String),

    /// Uploaded bytes could not be decoded
    #[error("Failed to decode file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Unsupported upload type
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Malformed multipart body
    #[error("Invalid form submission: {0}")]
    Multipart(String),

    /// Remote chat API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// A citation referenced a document that cannot be resolved
    #[error("Citation error: {0}")]
    Citation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file decode error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create a citation lookup error
    pub fn citation(message: impl Into<String>) -> Self {
        Self::Citation(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status and machine-readable type for this error
    pub fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::MissingCredential(_) => (StatusCode::SERVICE_UNAVAILABLE, "missing_credential"),
            Error::NeedsInput(_) => (StatusCode::BAD_REQUEST, "needs_input"),
            Error::FileParse { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
            Error::UnsupportedFileType(_) => (StatusCode::BAD_REQUEST, "unsupported_type"),
            Error::Multipart(_) => (StatusCode::BAD_REQUEST, "multipart_error"),
            Error::Llm(_) => (StatusCode::BAD_GATEWAY, "llm_error"),
            Error::Citation(_) => (StatusCode::BAD_GATEWAY, "citation_error"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Json(_) => (StatusCode::BAD_GATEWAY, "json_error"),
            Error::Http(_) => (StatusCode::BAD_GATEWAY, "http_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
