//! Onboarding flows a new customer walks through after registering.
//!
//! - [`profile`] - four-step profile wizard (personal, billing, mailing, preferences)
//! - [`survey`] - seven-question health survey and the derived [`HealthProfile`]

pub mod profile;
pub mod survey;

pub use profile::{
    FieldError, PROFILE_STEPS, PostalAddress, Preferences, ProfileField, ProfileForm,
    ProfileStep, ProfileSubmission, ProfileWizard, StepOutcome, WizardStep,
};
pub use survey::{
    AnswerOption, AnswerValue, HealthProfile, QuestionKind, SURVEY_QUESTIONS, SliderRange,
    SurveyAnswers, SurveyError, SurveyQuestion, SurveyStep, SurveyWizard,
};
