//! Four-step profile wizard.
//!
//! The wizard walks a fixed step sequence (personal details, billing
//! address, mailing address, preferences). Moving forward validates the
//! required fields of the active step; moving back never validates.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Country pre-filled on both address groups.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Language pre-filled on the preferences step.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One step of the wizard as shown in the progress header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed step sequence.
pub static PROFILE_STEPS: [WizardStep; 4] = [
    WizardStep {
        id: "personal",
        title: "Personal Information",
        description: "Basic details about you",
    },
    WizardStep {
        id: "address",
        title: "Address Information",
        description: "Where we can reach you",
    },
    WizardStep {
        id: "mailing",
        title: "Mailing Address",
        description: "Where we should send your packages",
    },
    WizardStep {
        id: "preferences",
        title: "Preferences",
        description: "Your preferences for our service",
    },
];

/// Step positions in [`PROFILE_STEPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileStep {
    Personal,
    Address,
    Mailing,
    Preferences,
}

impl ProfileStep {
    /// Step for a wizard index, clamped to the last step.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Personal,
            1 => Self::Address,
            2 => Self::Mailing,
            _ => Self::Preferences,
        }
    }

    /// Fields the step validates and touches when advancing fails.
    #[must_use]
    pub const fn validated_fields(self) -> &'static [ProfileField] {
        match self {
            Self::Personal => &[
                ProfileField::FirstName,
                ProfileField::LastName,
                ProfileField::Phone,
                ProfileField::DateOfBirth,
            ],
            Self::Address => &[
                ProfileField::AddressLine1,
                ProfileField::City,
                ProfileField::State,
                ProfileField::PostalCode,
                ProfileField::Country,
            ],
            Self::Mailing => &[
                ProfileField::MailingAddressLine1,
                ProfileField::MailingCity,
                ProfileField::MailingState,
                ProfileField::MailingPostalCode,
                ProfileField::MailingCountry,
            ],
            Self::Preferences => &[],
        }
    }
}

/// Every text field on the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    FirstName,
    LastName,
    Phone,
    DateOfBirth,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
    MailingAddressLine1,
    MailingAddressLine2,
    MailingCity,
    MailingState,
    MailingPostalCode,
    MailingCountry,
    Language,
}

impl ProfileField {
    /// Form field name as used by the client.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::DateOfBirth => "dateOfBirth",
            Self::AddressLine1 => "addressLine1",
            Self::AddressLine2 => "addressLine2",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::Country => "country",
            Self::MailingAddressLine1 => "mailingAddressLine1",
            Self::MailingAddressLine2 => "mailingAddressLine2",
            Self::MailingCity => "mailingCity",
            Self::MailingState => "mailingState",
            Self::MailingPostalCode => "mailingPostalCode",
            Self::MailingCountry => "mailingCountry",
            Self::Language => "language",
        }
    }

    /// Message shown when a required field is blank.
    #[must_use]
    pub const fn required_message(self) -> Option<&'static str> {
        match self {
            Self::FirstName => Some("First name is required"),
            Self::LastName => Some("Last name is required"),
            Self::Phone => Some("Phone number is required"),
            Self::DateOfBirth => Some("Date of birth is required"),
            Self::AddressLine1 | Self::MailingAddressLine1 => Some("Address line 1 is required"),
            Self::City | Self::MailingCity => Some("City is required"),
            Self::State | Self::MailingState => Some("State is required"),
            Self::PostalCode | Self::MailingPostalCode => Some("Postal code is required"),
            Self::Country | Self::MailingCountry => Some("Country is required"),
            Self::AddressLine2 | Self::MailingAddressLine2 | Self::Language => None,
        }
    }

    /// Whether the field belongs to the mailing address group.
    #[must_use]
    pub const fn is_mailing(self) -> bool {
        matches!(
            self,
            Self::MailingAddressLine1
                | Self::MailingAddressLine2
                | Self::MailingCity
                | Self::MailingState
                | Self::MailingPostalCode
                | Self::MailingCountry
        )
    }
}

impl std::str::FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [ProfileField; 17] = [
            ProfileField::FirstName,
            ProfileField::LastName,
            ProfileField::Phone,
            ProfileField::DateOfBirth,
            ProfileField::AddressLine1,
            ProfileField::AddressLine2,
            ProfileField::City,
            ProfileField::State,
            ProfileField::PostalCode,
            ProfileField::Country,
            ProfileField::MailingAddressLine1,
            ProfileField::MailingAddressLine2,
            ProfileField::MailingCity,
            ProfileField::MailingState,
            ProfileField::MailingPostalCode,
            ProfileField::MailingCountry,
            ProfileField::Language,
        ];
        ALL.into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown profile field: {s}"))
    }
}

/// A validation failure on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ProfileField,
    pub message: &'static str,
}

/// A postal address as captured by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Notification and language preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

/// Validated wizard output, produced once every step passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub billing: PostalAddress,
    /// Equal to `billing` when the customer ticked "same as billing".
    pub mailing: PostalAddress,
    pub preferences: Preferences,
}

/// Raw form values, one string per text field plus the preference flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub mailing_address_line1: String,
    pub mailing_address_line2: String,
    pub mailing_city: String,
    pub mailing_state: String,
    pub mailing_postal_code: String,
    pub mailing_country: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub language: String,
    pub same_as_billing: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            date_of_birth: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_owned(),
            mailing_address_line1: String::new(),
            mailing_address_line2: String::new(),
            mailing_city: String::new(),
            mailing_state: String::new(),
            mailing_postal_code: String::new(),
            mailing_country: DEFAULT_COUNTRY.to_owned(),
            email_notifications: true,
            sms_notifications: false,
            language: DEFAULT_LANGUAGE.to_owned(),
            same_as_billing: true,
        }
    }
}

impl ProfileForm {
    /// Current value of a text field.
    #[must_use]
    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Phone => &self.phone,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::AddressLine1 => &self.address_line1,
            ProfileField::AddressLine2 => &self.address_line2,
            ProfileField::City => &self.city,
            ProfileField::State => &self.state,
            ProfileField::PostalCode => &self.postal_code,
            ProfileField::Country => &self.country,
            ProfileField::MailingAddressLine1 => &self.mailing_address_line1,
            ProfileField::MailingAddressLine2 => &self.mailing_address_line2,
            ProfileField::MailingCity => &self.mailing_city,
            ProfileField::MailingState => &self.mailing_state,
            ProfileField::MailingPostalCode => &self.mailing_postal_code,
            ProfileField::MailingCountry => &self.mailing_country,
            ProfileField::Language => &self.language,
        }
    }

    fn slot(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Phone => &mut self.phone,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
            ProfileField::AddressLine1 => &mut self.address_line1,
            ProfileField::AddressLine2 => &mut self.address_line2,
            ProfileField::City => &mut self.city,
            ProfileField::State => &mut self.state,
            ProfileField::PostalCode => &mut self.postal_code,
            ProfileField::Country => &mut self.country,
            ProfileField::MailingAddressLine1 => &mut self.mailing_address_line1,
            ProfileField::MailingAddressLine2 => &mut self.mailing_address_line2,
            ProfileField::MailingCity => &mut self.mailing_city,
            ProfileField::MailingState => &mut self.mailing_state,
            ProfileField::MailingPostalCode => &mut self.mailing_postal_code,
            ProfileField::MailingCountry => &mut self.mailing_country,
            ProfileField::Language => &mut self.language,
        }
    }

    /// Overwrite a text field.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Copy the billing group into the mailing group.
    pub fn copy_billing_to_mailing(&mut self) {
        self.mailing_address_line1.clone_from(&self.address_line1);
        self.mailing_address_line2.clone_from(&self.address_line2);
        self.mailing_city.clone_from(&self.city);
        self.mailing_state.clone_from(&self.state);
        self.mailing_postal_code.clone_from(&self.postal_code);
        self.mailing_country.clone_from(&self.country);
    }

    /// Validation error for a single field, if any.
    ///
    /// Mailing fields are only required when `same_as_billing` is off.
    #[must_use]
    pub fn field_error(&self, field: ProfileField) -> Option<FieldError> {
        if field.is_mailing() && self.same_as_billing {
            return None;
        }

        let value = self.value(field).trim();
        if let Some(message) = field.required_message()
            && value.is_empty()
        {
            return Some(FieldError { field, message });
        }

        if field == ProfileField::DateOfBirth && parse_date(value).is_none() {
            return Some(FieldError {
                field,
                message: "Date of birth must be a valid date",
            });
        }

        None
    }

    /// Errors for the fields a step validates.
    #[must_use]
    pub fn step_errors(&self, step: ProfileStep) -> Vec<FieldError> {
        if step == ProfileStep::Mailing && self.same_as_billing {
            return Vec::new();
        }
        step.validated_fields()
            .iter()
            .filter_map(|&field| self.field_error(field))
            .collect()
    }

    /// Validate every step and build the submission.
    ///
    /// # Errors
    ///
    /// Returns every field error across all steps.
    pub fn validate(&self) -> Result<ProfileSubmission, Vec<FieldError>> {
        let errors: Vec<FieldError> = [
            ProfileStep::Personal,
            ProfileStep::Address,
            ProfileStep::Mailing,
            ProfileStep::Preferences,
        ]
        .into_iter()
        .flat_map(|step| self.step_errors(step))
        .collect();

        let date_of_birth = match parse_date(self.date_of_birth.trim()) {
            Some(date) if errors.is_empty() => date,
            _ => return Err(errors),
        };

        let billing = PostalAddress {
            line1: self.address_line1.trim().to_owned(),
            line2: non_empty(&self.address_line2),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
        };
        let mailing = if self.same_as_billing {
            billing.clone()
        } else {
            PostalAddress {
                line1: self.mailing_address_line1.trim().to_owned(),
                line2: non_empty(&self.mailing_address_line2),
                city: self.mailing_city.trim().to_owned(),
                state: self.mailing_state.trim().to_owned(),
                postal_code: self.mailing_postal_code.trim().to_owned(),
                country: self.mailing_country.trim().to_owned(),
            }
        };

        Ok(ProfileSubmission {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            date_of_birth,
            billing,
            mailing,
            preferences: Preferences {
                email_notifications: self.email_notifications,
                sms_notifications: self.sms_notifications,
                language: self.language.trim().to_owned(),
            },
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Result of pressing "Next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to the given step index.
    Advanced(usize),
    /// Stayed put; the listed fields are now touched and show their errors.
    Blocked(Vec<FieldError>),
    /// The final step passed; the form is ready to submit.
    Submit(Box<ProfileSubmission>),
}

/// Profile wizard state: current step, form values, touched fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileWizard {
    current_step: usize,
    form: ProfileForm,
    touched: BTreeSet<ProfileField>,
}

impl ProfileWizard {
    /// Start at the first step with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with names pre-filled from the signed-in user.
    #[must_use]
    pub fn with_names(first_name: Option<&str>, last_name: Option<&str>) -> Self {
        let mut wizard = Self::default();
        wizard.form.first_name = first_name.unwrap_or_default().to_owned();
        wizard.form.last_name = last_name.unwrap_or_default().to_owned();
        wizard
    }

    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.current_step
    }

    #[must_use]
    pub const fn step(&self) -> ProfileStep {
        ProfileStep::from_index(self.current_step)
    }

    #[must_use]
    pub fn step_info(&self) -> &'static WizardStep {
        let [.., last] = &PROFILE_STEPS;
        PROFILE_STEPS.get(self.current_step).unwrap_or(last)
    }

    #[must_use]
    pub const fn form(&self) -> &ProfileForm {
        &self.form
    }

    #[must_use]
    pub const fn same_as_billing(&self) -> bool {
        self.form.same_as_billing
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= PROFILE_STEPS.len()
    }

    /// Completion percentage for the progress bar.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Step counts are tiny
    pub fn progress_percent(&self) -> f64 {
        (self.current_step + 1) as f64 / PROFILE_STEPS.len() as f64 * 100.0
    }

    /// Overwrite a text field.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Set the notification preferences.
    pub const fn set_notifications(&mut self, email: bool, sms: bool) {
        self.form.email_notifications = email;
        self.form.sms_notifications = sms;
    }

    /// Mark a field as touched (blurred).
    pub fn touch(&mut self, field: ProfileField) {
        self.touched.insert(field);
    }

    #[must_use]
    pub fn is_touched(&self, field: ProfileField) -> bool {
        self.touched.contains(&field)
    }

    /// Error message to render next to a field: only once it is touched.
    #[must_use]
    pub fn visible_error(&self, field: ProfileField) -> Option<&'static str> {
        if !self.is_touched(field) {
            return None;
        }
        self.form.field_error(field).map(|e| e.message)
    }

    /// Toggle "mailing address same as billing".
    ///
    /// Turning it on copies the current billing values into the mailing group.
    pub fn set_same_as_billing(&mut self, checked: bool) {
        self.form.same_as_billing = checked;
        if checked {
            self.form.copy_billing_to_mailing();
        }
    }

    /// Whether the active step's required fields are all valid.
    #[must_use]
    pub fn is_step_valid(&self) -> bool {
        self.form.step_errors(self.step()).is_empty()
    }

    /// Try to move forward.
    ///
    /// On the final step a valid form yields [`StepOutcome::Submit`] and the
    /// index stays where it is.
    pub fn go_to_next(&mut self) -> StepOutcome {
        let step = self.step();
        let errors = self.form.step_errors(step);

        if !errors.is_empty() {
            for &field in step.validated_fields() {
                self.touched.insert(field);
            }
            return StepOutcome::Blocked(errors);
        }

        if !self.is_last_step() {
            self.current_step += 1;
            return StepOutcome::Advanced(self.current_step);
        }

        match self.form.validate() {
            Ok(submission) => StepOutcome::Submit(Box::new(submission)),
            Err(errors) => {
                for error in &errors {
                    self.touched.insert(error.field);
                }
                StepOutcome::Blocked(errors)
            }
        }
    }

    /// Move back one step. Never validates; stays at 0.
    pub const fn go_to_previous(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fill_personal(wizard: &mut ProfileWizard) {
        wizard.set_field(ProfileField::FirstName, "Ada");
        wizard.set_field(ProfileField::LastName, "Lovelace");
        wizard.set_field(ProfileField::Phone, "555-0100");
        wizard.set_field(ProfileField::DateOfBirth, "1990-12-10");
    }

    fn fill_billing(wizard: &mut ProfileWizard) {
        wizard.set_field(ProfileField::AddressLine1, "1 Main St");
        wizard.set_field(ProfileField::City, "Springfield");
        wizard.set_field(ProfileField::State, "IL");
        wizard.set_field(ProfileField::PostalCode, "62701");
    }

    #[test]
    fn test_starts_on_first_step() {
        let wizard = ProfileWizard::new();
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.step_info().id, "personal");
        assert!(wizard.same_as_billing());
        assert!((wizard.progress_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_required_field_blocks_and_touches() {
        for missing in ProfileStep::Personal.validated_fields() {
            let mut wizard = ProfileWizard::new();
            fill_personal(&mut wizard);
            wizard.set_field(*missing, "");

            let outcome = wizard.go_to_next();

            assert_eq!(wizard.current_step(), 0);
            let StepOutcome::Blocked(errors) = outcome else {
                panic!("expected blocked for {missing:?}");
            };
            assert!(errors.iter().any(|e| e.field == *missing));
            assert!(wizard.visible_error(*missing).is_some());
            for field in ProfileStep::Personal.validated_fields() {
                assert!(wizard.is_touched(*field));
            }
        }
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut wizard = ProfileWizard::new();
        assert_eq!(wizard.visible_error(ProfileField::FirstName), None);
        wizard.touch(ProfileField::FirstName);
        assert_eq!(
            wizard.visible_error(ProfileField::FirstName),
            Some("First name is required")
        );
    }

    #[test]
    fn test_invalid_date_blocks() {
        let mut wizard = ProfileWizard::new();
        fill_personal(&mut wizard);
        wizard.set_field(ProfileField::DateOfBirth, "not-a-date");
        assert!(matches!(wizard.go_to_next(), StepOutcome::Blocked(_)));
        assert_eq!(
            wizard.visible_error(ProfileField::DateOfBirth),
            Some("Date of birth must be a valid date")
        );
    }

    #[test]
    fn test_billing_step_requires_country() {
        let mut wizard = ProfileWizard::new();
        fill_personal(&mut wizard);
        assert_eq!(wizard.go_to_next(), StepOutcome::Advanced(1));

        fill_billing(&mut wizard);
        wizard.set_field(ProfileField::Country, "  ");
        assert!(matches!(wizard.go_to_next(), StepOutcome::Blocked(_)));
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(
            wizard.visible_error(ProfileField::Country),
            Some("Country is required")
        );
    }

    #[test]
    fn test_same_as_billing_never_blocks_mailing() {
        let mut wizard = ProfileWizard::new();
        fill_personal(&mut wizard);
        wizard.go_to_next();
        fill_billing(&mut wizard);
        wizard.go_to_next();
        assert_eq!(wizard.step(), ProfileStep::Mailing);

        wizard.set_field(ProfileField::MailingAddressLine1, "");
        wizard.set_field(ProfileField::MailingCity, "");
        wizard.set_field(ProfileField::MailingCountry, "");

        assert!(wizard.is_step_valid());
        assert_eq!(wizard.go_to_next(), StepOutcome::Advanced(3));
    }

    #[test]
    fn test_separate_mailing_address_is_required() {
        let mut wizard = ProfileWizard::new();
        fill_personal(&mut wizard);
        wizard.go_to_next();
        fill_billing(&mut wizard);
        wizard.go_to_next();

        wizard.set_same_as_billing(false);
        wizard.set_field(ProfileField::MailingAddressLine1, "");

        assert!(matches!(wizard.go_to_next(), StepOutcome::Blocked(_)));
        assert_eq!(wizard.step(), ProfileStep::Mailing);
        assert!(wizard.is_touched(ProfileField::MailingAddressLine1));
        assert!(!wizard.is_touched(ProfileField::MailingAddressLine2));
    }

    #[test]
    fn test_checking_same_as_billing_copies_fields() {
        let mut wizard = ProfileWizard::new();
        fill_billing(&mut wizard);
        wizard.set_same_as_billing(false);
        wizard.set_same_as_billing(true);

        let form = wizard.form();
        assert_eq!(form.mailing_address_line1, "1 Main St");
        assert_eq!(form.mailing_city, "Springfield");
        assert_eq!(form.mailing_state, "IL");
        assert_eq!(form.mailing_postal_code, "62701");
        assert_eq!(form.mailing_country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_previous_never_validates_and_saturates() {
        let mut wizard = ProfileWizard::new();
        wizard.go_to_previous();
        assert_eq!(wizard.current_step(), 0);

        fill_personal(&mut wizard);
        wizard.go_to_next();
        wizard.set_field(ProfileField::FirstName, "");
        wizard.go_to_previous();
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn test_full_walk_submits() {
        let mut wizard = ProfileWizard::with_names(Some("Ada"), None);
        fill_personal(&mut wizard);
        assert_eq!(wizard.go_to_next(), StepOutcome::Advanced(1));
        fill_billing(&mut wizard);
        assert_eq!(wizard.go_to_next(), StepOutcome::Advanced(2));
        assert_eq!(wizard.go_to_next(), StepOutcome::Advanced(3));
        wizard.set_notifications(false, true);

        let StepOutcome::Submit(submission) = wizard.go_to_next() else {
            panic!("expected submission");
        };
        assert_eq!(wizard.current_step(), 3);
        assert_eq!(submission.first_name, "Ada");
        assert_eq!(submission.mailing, submission.billing);
        assert_eq!(submission.billing.line2, None);
        assert!(!submission.preferences.email_notifications);
        assert!(submission.preferences.sms_notifications);
        assert_eq!(
            submission.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 12, 10).unwrap()
        );
    }

    #[test]
    fn test_field_names_roundtrip() {
        let field: ProfileField = "mailingPostalCode".parse().unwrap();
        assert_eq!(field, ProfileField::MailingPostalCode);
        assert!("shoeSize".parse::<ProfileField>().is_err());
    }
}
