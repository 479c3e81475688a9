//! Health profile table.

use chrono::Utc;

use wellnest_core::onboarding::{HealthProfile, SurveyAnswers};
use wellnest_core::{HealthProfileId, UserId};

use super::Sequence;
use crate::models::HealthProfileRecord;

#[derive(Debug, Default)]
pub struct HealthProfileTable {
    rows: Vec<HealthProfileRecord>,
    ids: Sequence,
}

impl HealthProfileTable {
    #[must_use]
    pub fn for_user(&self, user_id: UserId) -> Option<&HealthProfileRecord> {
        self.rows.iter().find(|p| p.user_id == user_id)
    }

    /// Create or replace the user's profile from a fresh set of answers.
    pub fn upsert(&mut self, user_id: UserId, answers: SurveyAnswers) -> HealthProfileRecord {
        let profile = HealthProfile::from_answers(&answers);
        let now = Utc::now();

        if let Some(record) = self.rows.iter_mut().find(|p| p.user_id == user_id) {
            record.profile = profile;
            record.answers = answers;
            record.updated_at = now;
            return record.clone();
        }

        let record = HealthProfileRecord {
            id: HealthProfileId::new(self.ids.next()),
            user_id,
            profile,
            answers,
            created_at: now,
            updated_at: now,
        };
        self.rows.push(record.clone());
        record
    }
}
