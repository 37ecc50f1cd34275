use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use thiserror::Error;
use tracing::error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Not found: {0}")]
    #[diagnostic(code(freelance_planner::not_found))]
    NotFound(String),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(freelance_planner::invalid_input))]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    #[diagnostic(code(freelance_planner::storage))]
    Storage(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(freelance_planner::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(freelance_planner::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(freelance_planner::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(freelance_planner::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(freelance_planner::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create not-found errors
pub fn not_found(what: &str, id: &str) -> Error {
    Error::NotFound(format!("{} with ID {} not found", what, id))
}

/// Helper to create validation errors
pub fn invalid_input(message: &str) -> Error {
    Error::InvalidInput(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

impl Error {
    /// HTTP status the error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            // Internal details stay in the logs
            error!("Request failed: {}", self);
            let body = serde_json::json!({ "error": "Internal server error" });
            return (status, Json(body)).into_response();
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
