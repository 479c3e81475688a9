//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password left blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] wellnest_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Too many sign-in attempts for one email.
    #[error("too many sign-in attempts")]
    RateLimited,

    /// No bearer token on the request.
    #[error("missing bearer token")]
    MissingToken,

    /// Token failed signature/expiry checks or its user is gone.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Reset token unknown, used, or expired.
    #[error("invalid or expired reset token")]
    InvalidResetToken,

    /// Token signing failed.
    #[error("token encoding error: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),

    /// Repository/store error.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
