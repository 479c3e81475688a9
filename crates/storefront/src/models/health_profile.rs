//! Stored health profile.

use chrono::{DateTime, Utc};

use wellnest_core::onboarding::{HealthProfile, SurveyAnswers};
use wellnest_core::{HealthProfileId, UserId};

/// A user's survey answers and the profile derived from them.
#[derive(Debug, Clone)]
pub struct HealthProfileRecord {
    pub id: HealthProfileId,
    pub user_id: UserId,
    pub profile: HealthProfile,
    /// Raw answers as submitted, including unknown question ids.
    pub answers: SurveyAnswers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
