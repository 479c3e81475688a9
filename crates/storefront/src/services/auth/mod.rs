//! Authentication service.
//!
//! Provides password sign-up/sign-in, bearer token issuance and checks,
//! password reset, and per-email sign-in throttling.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::Claims;

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use rand::{Rng, distr::Alphanumeric};
use tracing::instrument;

use wellnest_core::Email;

use crate::config::StorefrontConfig;
use crate::db::{PasswordResetTable, RepositoryError, UserTable};
use crate::models::{PasswordReset, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Length of generated password reset tokens.
const RESET_TOKEN_LENGTH: usize = 32;

/// Reset tokens expire after one hour.
const RESET_TOKEN_TTL_MINUTES: i64 = 60;

/// Idle keys are dropped from the limiter once per this many checks.
const PRUNE_EVERY: u64 = 1024;

/// Sign-in attempt limiter keyed by lowercased email.
pub struct LoginLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    checks: AtomicU64,
}

impl LoginLimiter {
    /// Allow a burst of `per_minute` attempts, refilling evenly over a minute.
    #[must_use]
    pub fn per_minute(per_minute: NonZeroU32) -> Self {
        Self::with_quota(Quota::per_minute(per_minute))
    }

    fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
            checks: AtomicU64::new(0),
        }
    }

    /// Record an attempt for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RateLimited` once the burst is used up.
    pub fn check(&self, email: &Email) -> Result<(), AuthError> {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
        }

        self.limiter
            .check_key(&email.as_str().to_ascii_lowercase())
            .map_err(|_| AuthError::RateLimited)
    }

    /// Forget emails whose budget has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        tracing::debug!(tracked = self.limiter.len(), "Pruned login limiter");
    }

    /// Number of emails currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

impl std::fmt::Debug for LoginLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginLimiter").finish_non_exhaustive()
    }
}

/// A validated email and password hash, ready to insert.
#[derive(Debug)]
pub struct NewCredentials {
    email: Email,
    password_hash: String,
}

/// Authentication service.
///
/// Password hashing never needs a table, so callers can hash before taking
/// the store lock and pass the result to the insert step.
///
/// Borrows configuration and the limiter from application state; table
/// access is passed per call so the caller controls the lock.
pub struct AuthService<'a> {
    config: &'a StorefrontConfig,
    limiter: &'a LoginLimiter,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(config: &'a StorefrontConfig, limiter: &'a LoginLimiter) -> Self {
        Self { config, limiter }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// See [`Self::prepare_registration`] and [`Self::register`].
    pub fn register_with_password(
        &self,
        users: &mut UserTable,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let credentials = self.prepare_registration(email, password)?;
        self.register(users, credentials)
    }

    /// Validate sign-up fields and hash the password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    #[instrument(skip(self, password))]
    pub fn prepare_registration(
        &self,
        email: &str,
        password: &str,
    ) -> Result<NewCredentials, AuthError> {
        let email = parse_credentials(email, password)?;
        validate_password(password)?;

        Ok(NewCredentials {
            email,
            password_hash: hash_password(password)?,
        })
    }

    /// Insert a user for prepared credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub fn register(
        &self,
        users: &mut UserTable,
        credentials: NewCredentials,
    ) -> Result<User, AuthError> {
        let user = users
            .create(credentials.email, credentials.password_hash)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_login`] and [`Self::finish_login`].
    pub fn login_with_password(
        &self,
        users: &UserTable,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let email = self.begin_login(email, password)?;
        self.finish_login(users.find_by_email(&email).cloned(), password)
    }

    /// Parse sign-in fields and count the attempt.
    ///
    /// Every attempt with a well-formed email counts against the limiter,
    /// whether or not the account exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::RateLimited` after too many attempts.
    #[instrument(skip(self, password))]
    pub fn begin_login(&self, email: &str, password: &str) -> Result<Email, AuthError> {
        let email = parse_credentials(email, password)?;
        self.limiter.check(&email)?;
        Ok(email)
    }

    /// Check `password` against the account found for the email, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if there is no account or the
    /// password is wrong.
    pub fn finish_login(&self, user: Option<User>, password: &str) -> Result<User, AuthError> {
        let user = user.ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Issue an access token for `user`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenEncoding` if signing fails.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        token::issue(user, &self.config.jwt_secret, self.config.token_ttl)
    }

    /// Resolve the user behind an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingToken` if there is no header.
    /// Returns `AuthError::InvalidToken` if the token is bad or expired, or
    /// its user no longer exists.
    pub fn authenticate(
        &self,
        users: &UserTable,
        authorization: Option<&str>,
    ) -> Result<User, AuthError> {
        let header = authorization.ok_or(AuthError::MissingToken)?;
        let raw = token::from_authorization_header(header).ok_or(AuthError::InvalidToken)?;
        let claims = token::verify(raw, &self.config.jwt_secret)?;

        users
            .get(claims.user_id()?)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    // =========================================================================
    // Password Reset
    // =========================================================================

    /// Start a password reset.
    ///
    /// Returns the new token when the email belongs to an account. Callers
    /// must not reveal which case occurred.
    #[instrument(skip(self, users, resets))]
    pub fn request_password_reset(
        &self,
        users: &UserTable,
        resets: &mut PasswordResetTable,
        email: &str,
    ) -> Option<String> {
        let email = Email::parse(email.trim()).ok()?;
        let user = users.find_by_email(&email)?;

        let token = generate_reset_token();
        resets.insert(PasswordReset {
            token: token.clone(),
            user_id: user.id,
            expires_at: Utc::now() + chrono::Duration::minutes(RESET_TOKEN_TTL_MINUTES),
        });

        // Delivery is out of band; the token is only logged at debug level.
        tracing::debug!(user_id = %user.id, reset_token = %token, "Password reset requested");
        Some(token)
    }

    /// Complete a password reset. Tokens are single-use.
    ///
    /// # Errors
    ///
    /// See [`Self::hash_new_password`] and [`Self::apply_password_reset`].
    pub fn reset_password(
        &self,
        users: &mut UserTable,
        resets: &mut PasswordResetTable,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let hash = self.hash_new_password(new_password)?;
        self.apply_password_reset(users, resets, token, hash)
    }

    /// Validate and hash a replacement password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the new password is too short.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn hash_new_password(&self, new_password: &str) -> Result<String, AuthError> {
        validate_password(new_password)?;
        hash_password(new_password)
    }

    /// Spend a reset token and store the new hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidResetToken` if the token is unknown or expired.
    #[instrument(skip_all)]
    pub fn apply_password_reset(
        &self,
        users: &mut UserTable,
        resets: &mut PasswordResetTable,
        token: &str,
        password_hash: String,
    ) -> Result<(), AuthError> {
        let reset = resets
            .take_valid(token, Utc::now())
            .ok_or(AuthError::InvalidResetToken)?;

        users.set_password_hash(reset.user_id, password_hash)?;

        tracing::info!(user_id = %reset.user_id, "Password reset completed");
        Ok(())
    }
}

/// Reject blank fields, then parse the email.
fn parse_credentials(email: &str, password: &str) -> Result<Email, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(Email::parse(email)?)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

fn generate_reset_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::time::Duration;

    fn config() -> StorefrontConfig {
        StorefrontConfig::with_secret(SecretString::from("k9$Qm2!vXz7@pL4#tR8&wN1^bC5*eF3%"))
    }

    fn limiter() -> LoginLimiter {
        LoginLimiter::per_minute(NonZeroU32::new(5).unwrap())
    }

    fn fast_refill_limiter() -> LoginLimiter {
        LoginLimiter::with_quota(Quota::with_period(Duration::from_millis(1)).unwrap())
    }

    #[test]
    fn test_register_then_login() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();

        let user = auth
            .register_with_password(&mut users, "ada@example.com", "password123")
            .unwrap();
        assert_ne!(user.password_hash, "password123");

        let logged_in = auth
            .login_with_password(&users, "ADA@example.com", "password123")
            .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn test_register_validation() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();

        assert!(matches!(
            auth.register_with_password(&mut users, "", "password123"),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.register_with_password(&mut users, "plainaddress", "password123"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.register_with_password(&mut users, "ada@example.com", "short"),
            Err(AuthError::WeakPassword(_))
        ));

        auth.register_with_password(&mut users, "ada@example.com", "password123")
            .unwrap();
        assert!(matches!(
            auth.register_with_password(&mut users, "ada@example.com", "password123"),
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_login_failures_do_not_distinguish() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();
        auth.register_with_password(&mut users, "ada@example.com", "password123")
            .unwrap();

        assert!(matches!(
            auth.login_with_password(&users, "ada@example.com", "wrongpass1"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login_with_password(&users, "nobody@example.com", "password123"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login_with_password(&users, "ada@example.com", ""),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_login_rate_limited_per_email() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let users = UserTable::default();

        for _ in 0..5 {
            assert!(matches!(
                auth.login_with_password(&users, "target@example.com", "guess-guess"),
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert!(matches!(
            auth.login_with_password(&users, "Target@example.com", "guess-guess"),
            Err(AuthError::RateLimited)
        ));
        // Another email has its own budget
        assert!(matches!(
            auth.login_with_password(&users, "other@example.com", "guess-guess"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_prepared_registration_rechecks_email_on_insert() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();

        // Both hashes are computed before either insert.
        let first = auth
            .prepare_registration("ada@example.com", "password123")
            .unwrap();
        let second = auth
            .prepare_registration("Ada@Example.com", "password456")
            .unwrap();

        auth.register(&mut users, first).unwrap();
        assert!(matches!(
            auth.register(&mut users, second),
            Err(AuthError::UserAlreadyExists)
        ));
        assert!(
            auth.login_with_password(&users, "ada@example.com", "password123")
                .is_ok()
        );
    }

    #[test]
    fn test_reset_hash_is_prepared_before_token_is_spent() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();
        let mut resets = PasswordResetTable::default();
        auth.register_with_password(&mut users, "ada@example.com", "password123")
            .unwrap();
        let token = auth
            .request_password_reset(&users, &mut resets, "ada@example.com")
            .unwrap();

        assert!(matches!(
            auth.hash_new_password("short"),
            Err(AuthError::WeakPassword(_))
        ));

        let hash = auth.hash_new_password("new-password-1").unwrap();
        auth.apply_password_reset(&mut users, &mut resets, &token, hash)
            .unwrap();
        assert!(
            auth.login_with_password(&users, "ada@example.com", "new-password-1")
                .is_ok()
        );

        let hash = auth.hash_new_password("another-pass-2").unwrap();
        assert!(matches!(
            auth.apply_password_reset(&mut users, &mut resets, &token, hash),
            Err(AuthError::InvalidResetToken)
        ));
    }

    #[test]
    fn test_limiter_forgets_refilled_emails() {
        let limiter = fast_refill_limiter();

        for i in 0..100 {
            let email = Email::parse(&format!("user{i}@example.com")).unwrap();
            limiter.check(&email).unwrap();
        }
        assert_eq!(limiter.len(), 100);

        std::thread::sleep(Duration::from_millis(20));
        limiter.prune();
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_limiter_prunes_periodically() {
        let limiter = fast_refill_limiter();

        for i in 0..PRUNE_EVERY - 1 {
            let email = Email::parse(&format!("user{i}@example.com")).unwrap();
            limiter.check(&email).unwrap();
        }
        assert_eq!(limiter.len(), usize::try_from(PRUNE_EVERY - 1).unwrap());

        std::thread::sleep(Duration::from_millis(20));
        limiter
            .check(&Email::parse("last@example.com").unwrap())
            .unwrap();
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn test_authenticate_header() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();
        let user = auth
            .register_with_password(&mut users, "ada@example.com", "password123")
            .unwrap();
        let token = auth.issue_token(&user).unwrap();

        let found = auth
            .authenticate(&users, Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(found.id, user.id);

        assert!(matches!(
            auth.authenticate(&users, None),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            auth.authenticate(&users, Some("Bearer garbage")),
            Err(AuthError::InvalidToken)
        ));
        // Token for a user that is not in this store
        assert!(matches!(
            auth.authenticate(&UserTable::default(), Some(&token)),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_password_reset_flow() {
        let config = config();
        let limiter = limiter();
        let auth = AuthService::new(&config, &limiter);
        let mut users = UserTable::default();
        let mut resets = PasswordResetTable::default();
        auth.register_with_password(&mut users, "ada@example.com", "password123")
            .unwrap();

        assert!(
            auth.request_password_reset(&users, &mut resets, "nobody@example.com")
                .is_none()
        );
        let token = auth
            .request_password_reset(&users, &mut resets, "ada@example.com")
            .unwrap();
        assert_eq!(token.len(), RESET_TOKEN_LENGTH);

        auth.reset_password(&mut users, &mut resets, &token, "new-password-1")
            .unwrap();
        assert!(
            auth.login_with_password(&users, "ada@example.com", "new-password-1")
                .is_ok()
        );
        assert!(matches!(
            auth.reset_password(&mut users, &mut resets, &token, "another-pass-2"),
            Err(AuthError::InvalidResetToken)
        ));
    }
}
