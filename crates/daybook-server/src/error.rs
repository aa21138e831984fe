//! API error type + axum integration.
//!
//! Every failure is converted to the uniform response envelope at the
//! HTTP boundary. Internal causes are logged server-side and never
//! echoed to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use daybook_auth::AuthError;
use daybook_core::error::DaybookError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input; every violation is itemized in `details`.
    #[error("Validation failed")]
    Validation { details: Vec<String> },

    /// Malformed input with a single free-form message.
    #[error("{0}")]
    BadRequest(String),

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Access token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::InvalidCredentials
            | ApiError::UserNotFound
            | ApiError::InvalidRefreshToken
            | ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Validation { details } => json!({
                "success": false,
                "error": "Validation failed",
                "details": details,
            }),
            other => json!({
                "success": false,
                "error": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WeakPassword(reason) => ApiError::Validation {
                details: vec![reason],
            },
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::EmailTaken => ApiError::EmailTaken,
            AuthError::UserNotFound => ApiError::UserNotFound,
            // Token failures reach this conversion only from the refresh
            // flow; access-token failures are handled by the middleware.
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => ApiError::InvalidRefreshToken,
            AuthError::Crypto(msg) => {
                tracing::error!(error = %msg, "cryptography failure");
                ApiError::Internal
            }
            AuthError::Core(e) => e.into(),
        }
    }
}

impl From<DaybookError> for ApiError {
    fn from(err: DaybookError) -> Self {
        match err {
            DaybookError::AlreadyExists { .. } => ApiError::EmailTaken,
            other => {
                tracing::error!(error = %other, "unexpected failure");
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(
            ApiError::Validation { details: vec![] }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::MissingToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_details_are_not_echoed() {
        let err: ApiError = DaybookError::Database("connection reset by peer".into()).into();
        assert_eq!(err.to_string(), "Internal server error");
    }
}
