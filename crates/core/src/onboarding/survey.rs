//! Health survey: static question catalog, answer aggregation, and the
//! typed health profile derived from the answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Question catalog
// =============================================================================

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    /// Exactly one option.
    MultipleChoice,
    /// Any subset of the options.
    Checkbox,
    /// A number between `min` and `max`.
    Slider,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultipleChoice => write!(f, "multiple-choice"),
            Self::Checkbox => write!(f, "checkbox"),
            Self::Slider => write!(f, "slider"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Numeric range for slider questions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurveyQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub kind: QuestionKind,
    pub options: &'static [AnswerOption],
    pub range: Option<SliderRange>,
}

const fn opt(value: &'static str, label: &'static str) -> AnswerOption {
    AnswerOption { value, label }
}

/// The seven survey questions, in display order.
pub static SURVEY_QUESTIONS: [SurveyQuestion; 7] = [
    SurveyQuestion {
        id: "age",
        text: "What is your age group?",
        kind: QuestionKind::MultipleChoice,
        options: &[
            opt("18-24", "18-24 years"),
            opt("25-34", "25-34 years"),
            opt("35-44", "35-44 years"),
            opt("45-54", "45-54 years"),
            opt("55-64", "55-64 years"),
            opt("65+", "65 years or older"),
        ],
        range: None,
    },
    SurveyQuestion {
        id: "activity",
        text: "How would you describe your physical activity level?",
        kind: QuestionKind::MultipleChoice,
        options: &[
            opt("sedentary", "Sedentary (little to no exercise)"),
            opt("light", "Lightly active (light exercise 1-3 days/week)"),
            opt(
                "moderate",
                "Moderately active (moderate exercise 3-5 days/week)",
            ),
            opt("active", "Very active (hard exercise 6-7 days/week)"),
            opt(
                "extreme",
                "Extremely active (very hard exercise, physical job, or training twice/day)",
            ),
        ],
        range: None,
    },
    SurveyQuestion {
        id: "health_goals",
        text: "What are your health goals? (Select all that apply)",
        kind: QuestionKind::Checkbox,
        options: &[
            opt("weight_loss", "Weight loss"),
            opt("muscle_gain", "Muscle gain"),
            opt("energy", "Increase energy"),
            opt("sleep", "Improve sleep"),
            opt("stress", "Reduce stress"),
            opt("immunity", "Boost immunity"),
            opt("general", "General wellness"),
        ],
        range: None,
    },
    SurveyQuestion {
        id: "sleep",
        text: "On average, how many hours of sleep do you get per night?",
        kind: QuestionKind::Slider,
        options: &[],
        range: Some(SliderRange {
            min: 3.0,
            max: 12.0,
            step: 0.5,
        }),
    },
    SurveyQuestion {
        id: "stress",
        text: "How would you rate your stress level on a typical day?",
        kind: QuestionKind::Slider,
        options: &[],
        range: Some(SliderRange {
            min: 1.0,
            max: 10.0,
            step: 1.0,
        }),
    },
    SurveyQuestion {
        id: "diet",
        text: "How would you describe your dietary preferences?",
        kind: QuestionKind::MultipleChoice,
        options: &[
            opt("omnivore", "Omnivore (eat everything)"),
            opt("pescatarian", "Pescatarian (vegetarian + fish)"),
            opt("vegetarian", "Vegetarian"),
            opt("vegan", "Vegan"),
            opt("keto", "Keto / Low-carb"),
            opt("paleo", "Paleo"),
            opt("gluten_free", "Gluten-free"),
            opt("other", "Other dietary restriction"),
        ],
        range: None,
    },
    SurveyQuestion {
        id: "allergies",
        text: "Do you have any allergies or sensitivities? (Select all that apply)",
        kind: QuestionKind::Checkbox,
        options: &[
            opt("none", "No known allergies"),
            opt("dairy", "Dairy"),
            opt("nuts", "Nuts"),
            opt("gluten", "Gluten"),
            opt("soy", "Soy"),
            opt("shellfish", "Shellfish"),
            opt("eggs", "Eggs"),
            opt("other", "Other"),
        ],
        range: None,
    },
];

/// Look up a question by id.
#[must_use]
pub fn question(id: &str) -> Option<&'static SurveyQuestion> {
    SURVEY_QUESTIONS.iter().find(|q| q.id == id)
}

// =============================================================================
// Answers
// =============================================================================

/// A single answer. The JSON shape is a string, a string array, or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(String),
    Choices(Vec<String>),
    Number(f64),
}

impl AnswerValue {
    #[must_use]
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// Answers keyed by question id.
///
/// Keys are not checked against the catalog; unknown ids are kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyAnswers(BTreeMap<String, AnswerValue>);

impl SurveyAnswers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        self.0.insert(question_id.into(), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    fn choice(&self, id: &str) -> Option<String> {
        self.get(id).and_then(AnswerValue::as_choice).map(str::to_owned)
    }

    fn choices(&self, id: &str) -> Vec<String> {
        self.get(id)
            .and_then(AnswerValue::as_choices)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    fn number(&self, id: &str) -> Option<f64> {
        self.get(id).and_then(AnswerValue::as_number)
    }
}

impl From<BTreeMap<String, AnswerValue>> for SurveyAnswers {
    fn from(map: BTreeMap<String, AnswerValue>) -> Self {
        Self(map)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurveyError {
    #[error("question {question} does not accept {attempted} answers")]
    WrongKind {
        question: &'static str,
        attempted: QuestionKind,
    },
}

// =============================================================================
// Wizard
// =============================================================================

/// Result of pressing "Next".
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyStep {
    Advanced(usize),
    /// Last question passed; the answers are ready to send.
    Submit(SurveyAnswers),
}

/// One-question-at-a-time survey state.
#[derive(Debug, Clone, Default)]
pub struct SurveyWizard {
    current: usize,
    answers: SurveyAnswers,
    completed: bool,
}

impl SurveyWizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &'static SurveyQuestion {
        let [.., last] = &SURVEY_QUESTIONS;
        SURVEY_QUESTIONS.get(self.current).unwrap_or(last)
    }

    #[must_use]
    pub const fn answers(&self) -> &SurveyAnswers {
        &self.answers
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= SURVEY_QUESTIONS.len()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Seven questions
    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / SURVEY_QUESTIONS.len() as f64 * 100.0
    }

    fn expect_kind(&self, kind: QuestionKind) -> Result<&'static SurveyQuestion, SurveyError> {
        let question = self.current_question();
        if question.kind == kind {
            Ok(question)
        } else {
            Err(SurveyError::WrongKind {
                question: question.id,
                attempted: kind,
            })
        }
    }

    /// Record the single selected option.
    ///
    /// # Errors
    ///
    /// Fails when the current question is not multiple choice.
    pub fn select_choice(&mut self, value: impl Into<String>) -> Result<(), SurveyError> {
        let question = self.expect_kind(QuestionKind::MultipleChoice)?;
        self.answers
            .insert(question.id, AnswerValue::Choice(value.into()));
        Ok(())
    }

    /// Check or uncheck one option of a checkbox question.
    ///
    /// # Errors
    ///
    /// Fails when the current question is not a checkbox question.
    pub fn toggle_choice(&mut self, value: &str, checked: bool) -> Result<(), SurveyError> {
        let question = self.expect_kind(QuestionKind::Checkbox)?;
        let mut selected = self.answers.choices(question.id);

        if checked {
            if !selected.iter().any(|v| v == value) {
                selected.push(value.to_owned());
            }
        } else {
            selected.retain(|v| v != value);
        }

        self.answers
            .insert(question.id, AnswerValue::Choices(selected));
        Ok(())
    }

    /// Record a slider position.
    ///
    /// # Errors
    ///
    /// Fails when the current question is not a slider.
    pub fn set_slider(&mut self, value: f64) -> Result<(), SurveyError> {
        let question = self.expect_kind(QuestionKind::Slider)?;
        self.answers.insert(question.id, AnswerValue::Number(value));
        Ok(())
    }

    /// Slider position for the current question; defaults to the range minimum.
    #[must_use]
    pub fn slider_value(&self) -> Option<f64> {
        let question = self.current_question();
        let range = question.range?;
        Some(self.answers.number(question.id).unwrap_or(range.min))
    }

    /// Whether the "Next" button is enabled.
    ///
    /// Only an unanswered multiple-choice question disables it.
    #[must_use]
    pub fn next_enabled(&self) -> bool {
        let question = self.current_question();
        question.kind != QuestionKind::MultipleChoice || self.answers.get(question.id).is_some()
    }

    /// Advance, or hand over the answers on the last question.
    ///
    /// Never validates; a skipped question simply has no answer.
    pub fn go_to_next(&mut self) -> SurveyStep {
        if self.is_last_question() {
            return SurveyStep::Submit(self.answers.clone());
        }
        self.current += 1;
        SurveyStep::Advanced(self.current)
    }

    pub const fn go_to_previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Record that the server accepted the answers.
    pub const fn mark_completed(&mut self) {
        self.completed = true;
    }
}

// =============================================================================
// Health profile
// =============================================================================

/// Typed summary of the survey answers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthProfile {
    pub age_group: Option<String>,
    pub activity_level: Option<String>,
    pub health_goals: Vec<String>,
    pub sleep_hours: Option<f64>,
    pub stress_level: Option<f64>,
    pub diet: Option<String>,
    /// Excludes the "none" option.
    pub allergies: Vec<String>,
}

impl HealthProfile {
    /// Derive the profile from raw answers. Answers of the wrong shape are ignored.
    #[must_use]
    pub fn from_answers(answers: &SurveyAnswers) -> Self {
        let mut allergies = answers.choices("allergies");
        allergies.retain(|a| a != "none");

        Self {
            age_group: answers.choice("age"),
            activity_level: answers.choice("activity"),
            health_goals: answers.choices("health_goals"),
            sleep_hours: answers.number("sleep"),
            stress_level: answers.number("stress"),
            diet: answers.choice("diet"),
            allergies,
        }
    }

    #[must_use]
    pub fn has_goal(&self, goal: &str) -> bool {
        self.health_goals.iter().any(|g| g == goal)
    }
}
