use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Forbidden: {0}")]
    Forbidden(anyhow::Error),

    #[error("Too many requests: {0}")]
    TooManyRequests(String, Option<u64>),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// JSON body handed to HTTP callers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::TooManyRequests(_, _) => StatusCode::TOO_MANY_REQUESTS,
            AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code for clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::Forbidden(_) => "forbidden",
            AppError::TooManyRequests(_, _) => "too_many_requests",
            AppError::InternalError(_) => "internal_error",
            AppError::ConfigError(_) => "configuration_error",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let code = self.error_code();
        match self {
            AppError::ValidationError(err) => ErrorResponse {
                error: "Validation error".to_string(),
                code,
                details: Some(err.to_string()),
                retry_after: None,
            },
            AppError::BadRequest(err) | AppError::NotFound(err) | AppError::Forbidden(err) => {
                ErrorResponse {
                    error: err.to_string(),
                    code,
                    details: None,
                    retry_after: None,
                }
            }
            AppError::TooManyRequests(msg, retry) => ErrorResponse {
                error: msg.clone(),
                code,
                details: None,
                retry_after: *retry,
            },
            AppError::InternalError(err) => {
                // Log the full error but don't expose it to clients
                tracing::error!(error = %err, "Internal error");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code,
                    details: None,
                    retry_after: None,
                }
            }
            AppError::ConfigError(err) => ErrorResponse {
                error: "Configuration error".to_string(),
                code,
                details: Some(err.to_string()),
                retry_after: None,
            },
        }
    }
}
