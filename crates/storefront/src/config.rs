//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` / `STOREFRONT_PORT` - Listen port (default: 4000)
//! - `STOREFRONT_TOKEN_TTL_DAYS` - Access token lifetime, 1 to 365 (default: 30)
//! - `STOREFRONT_SURVEY_SUBMIT_DELAY_MS` - Artificial survey submit delay (default: 1000)
//! - `STOREFRONT_LOGIN_ATTEMPTS_PER_MINUTE` - Per-email sign-in burst (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Longest accepted access token lifetime.
const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// HS256 signing secret for access tokens
    pub jwt_secret: SecretString,
    /// How long an issued token stays valid
    pub token_ttl: chrono::Duration,
    /// Pause before a survey submission is acknowledged
    pub survey_submit_delay: Duration,
    /// Sign-in attempts allowed per email per minute
    pub login_attempts_per_minute: NonZeroU32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env::<IpAddr>("STOREFRONT_HOST", "0.0.0.0")?;
        let port = match get_optional_env("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?,
            None => parse_env::<u16>("STOREFRONT_PORT", "4000")?,
        };

        let jwt_secret = get_validated_secret("STOREFRONT_JWT_SECRET")?;
        validate_jwt_secret(&jwt_secret, "STOREFRONT_JWT_SECRET")?;

        let token_ttl_days = parse_env::<i64>("STOREFRONT_TOKEN_TTL_DAYS", "30")?;
        let survey_delay_ms = parse_env::<u64>("STOREFRONT_SURVEY_SUBMIT_DELAY_MS", "1000")?;
        let login_attempts =
            parse_env::<NonZeroU32>("STOREFRONT_LOGIN_ATTEMPTS_PER_MINUTE", "5")?;

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl: token_ttl(token_ttl_days)?,
            survey_submit_delay: Duration::from_millis(survey_delay_ms),
            login_attempts_per_minute: login_attempts,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env::<f32>("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env::<f32>("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Configuration with defaults and the given signing secret.
    ///
    /// Used by tests and embedders that do not read the environment. The
    /// survey delay is zero.
    #[must_use]
    pub fn with_secret(jwt_secret: SecretString) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            jwt_secret,
            token_ttl: chrono::Duration::days(30),
            survey_submit_delay: Duration::ZERO,
            login_attempts_per_minute: NonZeroU32::MIN.saturating_add(4),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Token lifetime from a day count in `1..=MAX_TOKEN_TTL_DAYS`.
fn token_ttl(days: i64) -> Result<chrono::Duration, ConfigError> {
    let invalid = || {
        ConfigError::InvalidEnvVar(
            "STOREFRONT_TOKEN_TTL_DAYS".to_string(),
            format!("must be between 1 and {MAX_TOKEN_TTL_DAYS} days, got {days}"),
        )
    };

    if !(1..=MAX_TOKEN_TTL_DAYS).contains(&days) {
        return Err(invalid());
    }
    chrono::Duration::try_days(days).ok_or_else(invalid)
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-jwt-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_legacy_default_rejected() {
        // The historic fallback signing key must never be accepted
        assert!(validate_secret_strength("your-secret-key", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_jwt_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_jwt_secret(&secret, "TEST_JWT").is_err());
    }

    #[test]
    fn test_validate_jwt_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        assert!(validate_jwt_secret(&secret, "TEST_JWT").is_ok());
    }

    #[test]
    fn test_with_secret_defaults() {
        let config = StorefrontConfig::with_secret(SecretString::from("x".repeat(32)));
        assert_eq!(config.login_attempts_per_minute.get(), 5);
        assert_eq!(config.token_ttl, chrono::Duration::days(30));
        assert_eq!(config.survey_submit_delay, Duration::ZERO);
    }

    #[test]
    fn test_token_ttl_bounds() {
        assert_eq!(token_ttl(30).unwrap(), chrono::Duration::days(30));
        assert_eq!(
            token_ttl(MAX_TOKEN_TTL_DAYS).unwrap(),
            chrono::Duration::days(MAX_TOKEN_TTL_DAYS)
        );

        for days in [0, -1, MAX_TOKEN_TTL_DAYS + 1, i64::MAX, i64::MIN] {
            match token_ttl(days) {
                Err(ConfigError::InvalidEnvVar(key, _)) => {
                    assert_eq!(key, "STOREFRONT_TOKEN_TTL_DAYS");
                }
                other => panic!("{days}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_socket_addr() {
        let mut config = StorefrontConfig::with_secret(SecretString::from("x".repeat(32)));
        config.port = 4000;

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StorefrontConfig::with_secret(SecretString::from("super_secret_signing_key"));
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("super_secret_signing_key"));
    }
}
