//! User domain types.

use chrono::{DateTime, NaiveDate, Utc};

use wellnest_core::onboarding::{PostalAddress, Preferences};
use wellnest_core::{AddressId, Email, UserId};

/// A storefront customer.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Sign-in email, unique case-insensitively.
    pub email: Email,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Billing address from the profile wizard.
    pub address: Option<Address>,
    /// Shipping address; equal to `address` when the customer chose "same as billing".
    pub mailing_address: Option<Address>,
    pub preferences: Preferences,
    /// Set once `updateProfile` succeeds.
    pub profile_completed: bool,
    /// Set once `updateSurvey` succeeds.
    pub survey_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name, falling back to the email local part.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.local_part().to_owned(),
        }
    }
}

/// A stored postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    #[must_use]
    pub fn from_postal(id: AddressId, postal: PostalAddress) -> Self {
        Self {
            id,
            line1: postal.line1,
            line2: postal.line2,
            city: postal.city,
            state: postal.state,
            postal_code: postal.postal_code,
            country: postal.country,
        }
    }
}

/// A pending password reset.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl PasswordReset {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
