//! Unified error handling with Sentry integration.
//!
//! Every service error converts into [`AppError`]. GraphQL resolvers surface
//! it through [`ErrorExtensions`], which attaches an `extensions.code` of
//! `UNAUTHENTICATED`, `BAD_USER_INPUT`, or `INTERNAL_SERVER_ERROR`. Internal
//! errors are captured to Sentry and replaced with a generic message.

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, CartError, CatalogError, CheckoutError, OnboardingError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is signed in but may not touch this resource.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The two client-visible failure kinds, plus internal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    BadUserInput,
    Internal,
}

impl ErrorKind {
    /// Value of `extensions.code` in GraphQL responses.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::BadUserInput => "BAD_USER_INPUT",
            Self::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    const fn status(self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::BadUserInput => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingToken | AuthError::InvalidToken => ErrorKind::Unauthenticated,
                AuthError::TokenEncoding(_)
                | AuthError::Repository(_)
                | AuthError::PasswordHash => ErrorKind::Internal,
                _ => ErrorKind::BadUserInput,
            },
            Self::Checkout(CheckoutError::UserNotFound)
            | Self::Onboarding(OnboardingError::UserNotFound)
            | Self::Unauthorized(_) => ErrorKind::Unauthenticated,
            Self::Cart(_)
            | Self::Catalog(_)
            | Self::Checkout(_)
            | Self::Onboarding(_)
            | Self::NotFound(_)
            | Self::BadRequest(_) => ErrorKind::BadUserInput,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message shown to the client. Internal details are never exposed.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => "Email and password are required".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                // Identical for unknown email and wrong password
                AuthError::InvalidCredentials => "Invalid email or Password".to_string(),
                AuthError::UserAlreadyExists => "Email already in use".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::RateLimited => "Too many attempts, try again later".to_string(),
                AuthError::MissingToken => "Authorization header must be provided".to_string(),
                AuthError::InvalidToken => "Invalid/Expired token".to_string(),
                AuthError::InvalidResetToken => "Invalid or expired reset token".to_string(),
                AuthError::TokenEncoding(_)
                | AuthError::Repository(_)
                | AuthError::PasswordHash => "Internal server error".to_string(),
            },
            Self::Cart(err) => err.to_string(),
            Self::Catalog(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Onboarding(err) => err.to_string(),
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Capture internal errors to Sentry.
    fn report(&self) {
        if self.kind() == ErrorKind::Internal {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        self.report();
        let code = self.kind().code();
        async_graphql::Error::new(self.client_message()).extend_with(|_, ext| ext.set("code", code))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        (self.kind().status(), self.client_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Convert service results into GraphQL results with error codes attached.
pub trait GraphQLResultExt<T> {
    /// # Errors
    ///
    /// Returns the converted error with `extensions.code` set.
    fn graphql(self) -> async_graphql::Result<T>;
}

impl<T, E> GraphQLResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn graphql(self) -> async_graphql::Result<T> {
        self.map_err(|e| Into::<AppError>::into(e).extend())
    }
}

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Order not found".to_string());
        assert_eq!(err.to_string(), "Not found: Order not found");
        assert_eq!(err.client_message(), "Order not found");
    }

    #[test]
    fn test_login_failures_share_message() {
        let err = AppError::from(AuthError::InvalidCredentials);
        let message = err.client_message();
        assert!(message.to_lowercase().contains("invalid email or password"));
        assert!(!message.contains("password"));
        assert_eq!(err.kind(), ErrorKind::BadUserInput);
    }

    #[test]
    fn test_token_errors_are_unauthenticated() {
        for err in [AuthError::MissingToken, AuthError::InvalidToken] {
            assert_eq!(AppError::from(err).kind(), ErrorKind::Unauthenticated);
        }
        assert_eq!(
            AppError::Unauthorized("Not authorized to view this order".into()).kind(),
            ErrorKind::Unauthenticated
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Database(RepositoryError::Conflict("users.email idx 7".into()));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_graphql_extension_code() {
        let err = AppError::from(CartError::ItemNotFound).extend();
        assert_eq!(err.message, "Cart item not found");
        let code = err.extensions.unwrap().get("code").cloned();
        assert_eq!(code, Some(async_graphql::Value::String("BAD_USER_INPUT".into())));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::MissingToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
