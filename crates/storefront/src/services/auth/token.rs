//! Access tokens: HS256 JWTs carrying the user id and email.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use wellnest_core::UserId;

use super::AuthError;
use crate::models::User;

/// Token claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id as a decimal string.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// The user id carried in `sub`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if `sub` is not a user id.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Sign a token for `user` valid for `ttl`.
///
/// # Errors
///
/// Returns `AuthError::TokenEncoding` if signing fails.
pub fn issue(
    user: &User,
    secret: &SecretString,
    ttl: chrono::Duration,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(AuthError::TokenEncoding)
}

/// Verify signature and expiry.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for any malformed, forged, or expired token.
pub fn verify(token: &str, secret: &SecretString) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        AuthError::InvalidToken
    })
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>`; a bare token is taken as-is.
#[must_use]
pub fn from_authorization_header(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wellnest_core::Email;
    use wellnest_core::onboarding::Preferences;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(42),
            email: Email::parse("ada@example.com").unwrap(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            phone: None,
            birth_date: None,
            address: None,
            mailing_address: None,
            preferences: Preferences::default(),
            profile_completed: false,
            survey_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn secret() -> SecretString {
        SecretString::from("k9$Qm2!vXz7@pL4#tR8&wN1^bC5*eF3%")
    }

    #[test]
    fn test_issue_then_verify() {
        let token = issue(&user(), &secret(), chrono::Duration::days(30)).unwrap();
        let claims = verify(&token, &secret()).unwrap();
        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue(&user(), &secret(), chrono::Duration::seconds(-10)).unwrap();
        assert!(matches!(
            verify(&token, &secret()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(&user(), &secret(), chrono::Duration::days(1)).unwrap();
        let other = SecretString::from("a-completely-different-signing-key!!");
        assert!(verify(&token, &other).is_err());
        assert!(verify("not.a.jwt", &secret()).is_err());
    }

    #[test]
    fn test_authorization_header_parsing() {
        assert_eq!(from_authorization_header("Bearer abc"), Some("abc"));
        assert_eq!(from_authorization_header("abc"), Some("abc"));
        assert_eq!(from_authorization_header("Bearer "), None);
    }
}
