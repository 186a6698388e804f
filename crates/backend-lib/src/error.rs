// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use careerflow_common::ErrorResponse;
use thiserror::Error;

use crate::auth::{AuthError, Denied};

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] Denied),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Unauthorized(_) => "AUTH_002",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message shown to clients. Denial reasons and internal details are never exposed.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::Unauthorized(_) => "Unauthorized".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // Misconfiguration is logged where it is detected; the client sees a plain failure.
            AuthError::InvalidCredentials | AuthError::MisconfiguredServer => {
                AppError::InvalidCredentials
            },
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("Token error: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.error_code(), "Internal server error");
        }

        let body = ErrorResponse {
            success: false,
            message: self.sanitized_message(),
            code: Some(self.error_code().to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}
