//! User and password-reset tables.

use chrono::{DateTime, Utc};

use wellnest_core::onboarding::Preferences;
use wellnest_core::{AddressId, Email, UserId};

use super::{RepositoryError, Sequence};
use crate::models::{PasswordReset, User};

/// Users keyed by id, unique by email (case-insensitive).
#[derive(Debug, Default)]
pub struct UserTable {
    rows: Vec<User>,
    ids: Sequence,
    address_ids: Sequence,
}

impl UserTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a user by their ID.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.rows.iter().find(|u| u.id == id)
    }

    /// Mutable access by ID.
    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.rows.iter_mut().find(|u| u.id == id)
    }

    /// Get a user by email, ignoring ASCII case.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<&User> {
        self.rows
            .iter()
            .find(|u| u.email.as_str().eq_ignore_ascii_case(email.as_str()))
    }

    /// Create a user with a password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub fn create(&mut self, email: Email, password_hash: String) -> Result<User, RepositoryError> {
        if self.find_by_email(&email).is_some() {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {email}"
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(self.ids.next()),
            email,
            password_hash,
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
        };
        self.rows.push(user.clone());
        Ok(user)
    }

    /// Replace the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub fn set_password_hash(&mut self, id: UserId, hash: String) -> Result<(), RepositoryError> {
        let user = self.get_mut(id).ok_or(RepositoryError::NotFound)?;
        user.password_hash = hash;
        user.updated_at = Utc::now();
        Ok(())
    }

    /// Allocate an address id.
    pub const fn next_address_id(&mut self) -> AddressId {
        AddressId::new(self.address_ids.next())
    }
}

/// Outstanding password reset tokens.
#[derive(Debug, Default)]
pub struct PasswordResetTable {
    rows: Vec<PasswordReset>,
}

impl PasswordResetTable {
    /// Store a token, replacing any earlier token for the same user.
    pub fn insert(&mut self, reset: PasswordReset) {
        self.rows.retain(|r| r.user_id != reset.user_id);
        self.rows.push(reset);
    }

    /// Remove and return a token if it exists and has not expired.
    ///
    /// Expired tokens are dropped as a side effect.
    pub fn take_valid(&mut self, token: &str, now: DateTime<Utc>) -> Option<PasswordReset> {
        self.rows.retain(|r| !r.is_expired(now));
        let index = self.rows.iter().position(|r| r.token == token)?;
        Some(self.rows.swap_remove(index))
    }
}
