//! Authentication error types.

use daybook_core::error::DaybookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The candidate password failed the strength policy; the message
    /// names the violated rule.
    #[error("{0}")]
    WeakPassword(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user with this email already exists")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),

    /// Failure bubbled up from a collaborator (e.g. the user repository).
    #[error(transparent)]
    Core(#[from] DaybookError),
}
