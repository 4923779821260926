//! Learning plan request and response types.

use super::concept::{ConceptInput, Difficulty};
use super::weekly::{Chronotype, WeeklySchedule};
use super::ReviewEntry;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    #[default]
    Mixed,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::Kinesthetic,
        LearningStyle::Mixed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::Kinesthetic => "Kinesthetic",
            LearningStyle::Mixed => "Mixed",
        }
    }
}

fn default_target_score() -> i64 {
    800
}

fn default_timeframe_months() -> u32 {
    3
}

fn default_daily_study_hours() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default = "default_target_score")]
    pub target_score: i64,
    #[serde(default = "default_timeframe_months")]
    pub timeframe_months: u32,
    #[serde(default = "default_daily_study_hours")]
    pub daily_study_hours: f64,
    #[serde(default)]
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub chronotype: Chronotype,
    #[serde(default)]
    pub concepts: Vec<ConceptInput>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            target_score: default_target_score(),
            timeframe_months: default_timeframe_months(),
            daily_study_hours: default_daily_study_hours(),
            learning_style: LearningStyle::default(),
            chronotype: Chronotype::default(),
            concepts: Vec::new(),
        }
    }
}

impl PlanRequest {
    /// Rejects inputs the builder cannot give a meaningful answer for.
    pub fn validate(&self) -> Result<()> {
        if !self.daily_study_hours.is_finite() || self.daily_study_hours < 0.0 {
            return Err(Error::Validation(format!(
                "daily_study_hours must be a non-negative number, got {}",
                self.daily_study_hours
            )));
        }
        Ok(())
    }

    /// Timeframe used for computation; zero months is treated as one.
    pub fn effective_timeframe(&self) -> u32 {
        self.timeframe_months.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryCriteria {
    pub theoretical_understanding: f64,
    pub practical_application: f64,
    pub long_term_retention: f64,
    pub transfer_ability: f64,
    pub teaching_capability: f64,
}

impl Default for MasteryCriteria {
    fn default() -> Self {
        Self {
            theoretical_understanding: 0.8,
            practical_application: 0.7,
            long_term_retention: 0.8,
            transfer_ability: 0.6,
            teaching_capability: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptPlan {
    pub name: String,
    pub priority: usize,
    pub difficulty: Difficulty,
    pub importance: f64,
    pub estimated_hours: u32,
    pub weekly_hours: u32,
    pub methods: Vec<String>,
    pub spaced_repetition: Vec<ReviewEntry>,
    pub exercises_count: u32,
    pub mastery_criteria: MasteryCriteria,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub month: u32,
    pub target_concepts: usize,
    pub target_score_increase: i64,
    pub key_objectives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub target_score: i64,
    pub timeframe_months: u32,
    pub daily_study_hours: f64,
    pub learning_style: LearningStyle,
    pub chronotype: Chronotype,
    pub created_at: DateTime<Utc>,
    pub concepts_plan: Vec<ConceptPlan>,
    pub weekly_schedule: WeeklySchedule,
    pub milestones: Vec<Milestone>,
    pub success_probability: f64,
    pub total_estimated_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub optimal_study_times: Vec<String>,
    pub method_effectiveness: f64,
    pub adjustment_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: Plan,
    pub recommendations: Recommendations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: PlanRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.target_score, 800);
        assert_eq!(request.timeframe_months, 3);
        assert_eq!(request.daily_study_hours, 2.0);
        assert_eq!(request.learning_style, LearningStyle::Mixed);
        assert_eq!(request.chronotype, Chronotype::Intermediate);
        assert!(request.concepts.is_empty());
    }

    #[test]
    fn test_request_from_client_payload() {
        let json = r#"{
            "target_score": 850,
            "timeframe_months": 6,
            "daily_study_hours": 2,
            "learning_style": "visual",
            "chronotype": "morning",
            "concepts": [
                {"name": "Listening Comprehension", "difficulty": "medium", "importance": "high"},
                {"name": "Grammar", "difficulty": "easy", "importance": 0.4}
            ]
        }"#;

        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.target_score, 850);
        assert_eq!(request.learning_style, LearningStyle::Visual);
        assert_eq!(request.chronotype, Chronotype::Morning);
        assert_eq!(request.concepts.len(), 2);
        assert_eq!(request.concepts[1].difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_validate_rejects_negative_hours() {
        let request = PlanRequest {
            daily_study_hours: -1.0,
            ..Default::default()
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));

        let request = PlanRequest {
            daily_study_hours: f64::INFINITY,
            ..Default::default()
        };
        assert!(request.validate().is_err());

        assert!(PlanRequest::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeframe_is_clamped() {
        let request = PlanRequest {
            timeframe_months: 0,
            ..Default::default()
        };
        assert_eq!(request.effective_timeframe(), 1);
    }
}
