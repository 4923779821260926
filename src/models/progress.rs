//! Progress updates reported by the learner for a concept.

use super::schedule::next_review_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressUpdate {
    #[serde(default)]
    pub concept_id: Option<i64>,
    #[serde(default)]
    pub mastery_level: f64,
    #[serde(default)]
    pub retention_rate: f64,
    /// Minutes
    #[serde(default)]
    pub time_spent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptProgress {
    pub concept_id: Option<i64>,
    pub mastery_level: f64,
    pub retention_rate: f64,
    pub time_spent: f64,
    pub last_updated: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub updated_concept: ConceptProgress,
    pub recommendations: Vec<String>,
}

impl ProgressUpdate {
    pub fn apply(&self, now: DateTime<Utc>) -> ProgressResponse {
        let updated_concept = ConceptProgress {
            concept_id: self.concept_id,
            mastery_level: self.mastery_level,
            retention_rate: self.retention_rate,
            time_spent: self.time_spent,
            last_updated: now,
            next_review: next_review_date(self.mastery_level, now),
        };
        let recommendations = progress_recommendations(self.mastery_level, self.retention_rate);

        ProgressResponse {
            updated_concept,
            recommendations,
        }
    }
}

pub fn progress_recommendations(mastery_level: f64, retention_rate: f64) -> Vec<String> {
    let mut recommendations = Vec::new();
    if mastery_level < 0.5 {
        recommendations.push("Low mastery. Go back over the basics.".to_string());
    }
    if retention_rate < 0.6 {
        recommendations.push("Low retention. Review more often.".to_string());
    }
    if mastery_level > 0.8 && retention_rate > 0.8 {
        recommendations.push("Excellent progress! You can move on to the next concept.".to_string());
    }
    recommendations
}

/// Feedback for a single card review.
///
/// Only `card_id` drives behaviour: the review completes the card's next
/// pending entry. The SM-2 style fields are accepted so clients sending them
/// keep working, but no adaptive formula consumes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardReview {
    pub card_id: i64,
    #[serde(default)]
    pub quality_response: Option<u8>,
    #[serde(default)]
    pub current_interval: Option<u32>,
    #[serde(default)]
    pub current_easiness: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub average_response_time: Option<f64>,
    #[serde(default)]
    pub response_time: Option<f64>,
}
