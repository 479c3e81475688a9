//! Profile and survey submission.
//!
//! Profile input goes through the same `ProfileForm` validation the wizard
//! runs client-side, so both sides report identical messages.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use wellnest_core::UserId;
use wellnest_core::onboarding::{PostalAddress, ProfileForm, SurveyAnswers};

use crate::db::{HealthProfileTable, UserTable};
use crate::models::{Address, HealthProfileRecord, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
    /// First failing field message, in wizard order.
    #[error("{0}")]
    InvalidProfile(&'static str),

    #[error("User not found")]
    UserNotFound,
}

/// Profile fields submitted at the end of the wizard.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub address: PostalAddress,
    /// `None` means same as billing.
    pub mailing_address: Option<PostalAddress>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub language: Option<String>,
}

impl ProfileUpdate {
    fn to_form(&self) -> ProfileForm {
        let defaults = ProfileForm::default();
        let mailing = self.mailing_address.as_ref();
        let mailing_field = |pick: fn(&PostalAddress) -> &str| {
            mailing.map(pick).unwrap_or_default().to_owned()
        };

        ProfileForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            date_of_birth: self.birth_date.clone(),
            address_line1: self.address.line1.clone(),
            address_line2: self.address.line2.clone().unwrap_or_default(),
            city: self.address.city.clone(),
            state: self.address.state.clone(),
            postal_code: self.address.postal_code.clone(),
            country: self.address.country.clone(),
            mailing_address_line1: mailing_field(|a| a.line1.as_str()),
            mailing_address_line2: mailing_field(|a| a.line2.as_deref().unwrap_or_default()),
            mailing_city: mailing_field(|a| a.city.as_str()),
            mailing_state: mailing_field(|a| a.state.as_str()),
            mailing_postal_code: mailing_field(|a| a.postal_code.as_str()),
            mailing_country: mailing_field(|a| a.country.as_str()),
            email_notifications: self
                .email_notifications
                .unwrap_or(defaults.email_notifications),
            sms_notifications: self.sms_notifications.unwrap_or(defaults.sms_notifications),
            language: self.language.clone().unwrap_or(defaults.language),
            same_as_billing: mailing.is_none(),
        }
    }
}

pub struct OnboardingService<'a> {
    users: &'a mut UserTable,
    health_profiles: &'a mut HealthProfileTable,
}

impl<'a> OnboardingService<'a> {
    #[must_use]
    pub const fn new(
        users: &'a mut UserTable,
        health_profiles: &'a mut HealthProfileTable,
    ) -> Self {
        Self {
            users,
            health_profiles,
        }
    }

    /// Validate and store the profile, then mark the profile step complete.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::InvalidProfile` with the first field error.
    #[instrument(skip(self, update), fields(user_id = %user_id))]
    pub fn update_profile(
        &mut self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, OnboardingError> {
        let submission = update.to_form().validate().map_err(|errors| {
            OnboardingError::InvalidProfile(
                errors
                    .first()
                    .map_or("Profile is incomplete", |e| e.message),
            )
        })?;

        let billing_id = self.users.next_address_id();
        let mailing_id = self.users.next_address_id();
        let user = self
            .users
            .get_mut(user_id)
            .ok_or(OnboardingError::UserNotFound)?;

        user.first_name = Some(submission.first_name);
        user.last_name = Some(submission.last_name);
        user.phone = Some(submission.phone);
        user.birth_date = Some(submission.date_of_birth);
        user.address = Some(Address::from_postal(billing_id, submission.billing));
        user.mailing_address = Some(Address::from_postal(mailing_id, submission.mailing));
        user.preferences = submission.preferences;
        user.profile_completed = true;
        user.updated_at = Utc::now();

        tracing::info!("Profile completed");
        Ok(user.clone())
    }

    /// Store survey answers as given and mark the survey complete.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::UserNotFound` if the user vanished.
    #[instrument(skip(self, answers), fields(user_id = %user_id, answer_count = answers.len()))]
    pub fn submit_survey(
        &mut self,
        user_id: UserId,
        answers: SurveyAnswers,
    ) -> Result<(User, HealthProfileRecord), OnboardingError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or(OnboardingError::UserNotFound)?;

        let record = self.health_profiles.upsert(user_id, answers);
        user.survey_completed = true;
        user.updated_at = Utc::now();

        tracing::info!(health_profile_id = %record.id, "Survey completed");
        Ok((user.clone(), record))
    }
}
