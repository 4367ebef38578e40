// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// A request field failed its shape policy. Carries the field name
    /// only; the rejected value is never echoed back.
    #[error("Invalid {field}")]
    Validation { field: &'static str },

    /// Bad credentials. Deliberately carries no detail: unknown username
    /// and wrong password must be indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, garbled, tampered, or expired bearer token.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Registration disabled")]
    RegistrationDisabled,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Not found")]
    NotFound,

    #[error("Too many requests")]
    RateLimited { retry_after_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::RegistrationDisabled => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VAL_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::InvalidToken => "AUTH_002",
            AppError::RegistrationDisabled => "REG_001",
            AppError::NotFound => "NF_001",
            AppError::DuplicateUsername => "DUP_001",
            AppError::RateLimited { .. } => "RATE_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for callers. 500-class detail is
    /// logged server-side and never leaves the process.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation { field } => format!("Invalid {field}"),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::InvalidToken => "Invalid or expired token".to_string(),
            AppError::RegistrationDisabled => "Registration disabled".to_string(),
            AppError::NotFound => "Not found".to_string(),
            AppError::DuplicateUsername => "Username already taken".to_string(),
            AppError::RateLimited { .. } => {
                "Too many requests, please try again later".to_string()
            },
            AppError::Io(_) | AppError::Json(_) | AppError::Internal(_) => {
                "Server error".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = error_code, detail = %self, "request failed");
        }

        let mut body = serde_json::json!({
            "error": self.sanitized_message(),
            "code": error_code,
        });

        match &self {
            AppError::Validation { field } => {
                body["field"] = serde_json::Value::String((*field).to_string());
            },
            AppError::RateLimited { retry_after_secs } => {
                body["retryAfterSecs"] = serde_json::json!(retry_after_secs);
            },
            _ => {},
        }

        let mut response = (status, axum::Json(body)).into_response();
        if let AppError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert(axum::http::header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<crate::validation::ValidationError> for AppError {
    fn from(err: crate::validation::ValidationError) -> Self {
        AppError::Validation { field: err.field() }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
