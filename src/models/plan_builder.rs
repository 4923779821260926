//! Plan generation: lays concepts out over a timeframe.
//!
//! Hours and exercise counts per concept are drawn from the injected random
//! source; everything else follows fixed tables. Seed the source to get
//! reproducible plans.

use super::concept::{DEFAULT_IMPORTANCE, Difficulty};
use super::plan::{
    ConceptPlan, LearningStyle, MasteryCriteria, Milestone, Plan, PlanRequest, PlanResponse,
    Recommendations,
};
use super::schedule::review_schedule;
use super::weekly::{optimal_study_times, weekly_schedule};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Score the milestone increases are measured from.
pub const BASELINE_SCORE: i64 = 650;
const DAYS_PER_MONTH: f64 = 30.0;
const MIN_REQUIRED_DAILY_HOURS: f64 = 0.5;
const MAX_SUCCESS_PROBABILITY: f64 = 0.95;

pub fn methods_for_style(style: LearningStyle) -> Vec<String> {
    let methods: [&str; 4] = match style {
        LearningStyle::Visual => [
            "Dual Coding",
            "Method of Loci",
            "Concept Maps",
            "Visualizations",
        ],
        LearningStyle::Auditory => [
            "Feynman Technique",
            "Oral Repetition",
            "Educational Podcasts",
            "Discussions",
        ],
        LearningStyle::Kinesthetic => [
            "Active Learning",
            "Simulations",
            "Hands-on Exercises",
            "Role Play",
        ],
        LearningStyle::Mixed => [
            "Multimodal Approach",
            "Method Rotation",
            "Contextual Adaptation",
            "AI Personalization",
        ],
    };
    methods.iter().map(|m| m.to_string()).collect()
}

pub fn method_effectiveness(style: LearningStyle) -> f64 {
    match style {
        LearningStyle::Visual => 0.85,
        LearningStyle::Auditory => 0.80,
        LearningStyle::Kinesthetic => 0.75,
        LearningStyle::Mixed => 0.90,
    }
}

/// `min(0.95, 0.5 + 0.4 * daily / max(required_daily, 0.5))`
pub fn success_probability(daily_study_hours: f64, total_hours: u32, timeframe_months: u32) -> f64 {
    let days = timeframe_months.max(1) as f64 * DAYS_PER_MONTH;
    let required_daily_hours = total_hours as f64 / days;
    let time_ratio = daily_study_hours / required_daily_hours.max(MIN_REQUIRED_DAILY_HOURS);
    (0.5 + time_ratio * 0.4).min(MAX_SUCCESS_PROBABILITY)
}

/// One milestone per month with linearly interpolated targets.
pub fn milestones(concept_count: usize, target_score: i64, timeframe_months: u32) -> Vec<Milestone> {
    let timeframe = timeframe_months.max(1);
    // i128 keeps the interpolation exact for any i64 target
    let score_gap = target_score as i128 - BASELINE_SCORE as i128;

    (1..=timeframe)
        .map(|month| Milestone {
            month,
            target_concepts: concept_count * month as usize / timeframe as usize,
            target_score_increase: (score_gap * month as i128)
                .div_euclid(timeframe as i128)
                .clamp(i64::MIN as i128, i64::MAX as i128) as i64,
            key_objectives: vec![
                format!("Master {} new concepts", 3 * month),
                format!("Reach {}% average retention", 70 + month * 5),
                format!("Complete {} practice exercises", 20 * month),
            ],
        })
        .collect()
}

pub fn adjustment_suggestions(plan: &Plan) -> Vec<String> {
    let mut suggestions = Vec::new();

    if plan.success_probability < 0.7 {
        suggestions.push(
            "Consider increasing daily study time or extending the plan duration".to_string(),
        );
    }

    let available_hours = plan.timeframe_months as f64 * DAYS_PER_MONTH * plan.daily_study_hours;
    if plan.total_estimated_hours as f64 > available_hours {
        suggestions.push("The plan is ambitious. Prioritize the most important concepts".to_string());
    }

    if plan.concepts_plan.len() > 10 {
        suggestions.push("Many concepts to cover. Consider grouping them by theme".to_string());
    }

    suggestions
}

/// Builds learning plans, drawing filler values from `rng`.
pub struct PlanBuilder<R: Rng> {
    rng: R,
}

impl<R: Rng> PlanBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a plan and its recommendations for `request`, dated `now`.
    pub fn build(&mut self, request: &PlanRequest, now: DateTime<Utc>) -> PlanResponse {
        let timeframe = request.effective_timeframe();
        let methods = methods_for_style(request.learning_style);

        let concepts_plan: Vec<ConceptPlan> = request
            .concepts
            .iter()
            .enumerate()
            .map(|(i, concept)| {
                let name = concept
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Concept {}", i + 1));
                let spaced_repetition = review_schedule(&name, now);
                ConceptPlan {
                    priority: i + 1,
                    difficulty: concept.difficulty.unwrap_or(Difficulty::Medium),
                    importance: concept
                        .importance
                        .as_ref()
                        .map(|imp| imp.score())
                        .unwrap_or(DEFAULT_IMPORTANCE),
                    estimated_hours: self.rng.gen_range(10..=40),
                    weekly_hours: self.rng.gen_range(2..=8),
                    methods: methods.clone(),
                    spaced_repetition,
                    exercises_count: self.rng.gen_range(20..=50),
                    mastery_criteria: MasteryCriteria::default(),
                    name,
                }
            })
            .collect();

        let total_estimated_hours: u32 = concepts_plan.iter().map(|c| c.estimated_hours).sum();

        let plan = Plan {
            id: format!("plan_{}", now.format("%Y%m%d_%H%M%S")),
            target_score: request.target_score,
            timeframe_months: timeframe,
            daily_study_hours: request.daily_study_hours,
            learning_style: request.learning_style,
            chronotype: request.chronotype,
            created_at: now,
            success_probability: success_probability(
                request.daily_study_hours,
                total_estimated_hours,
                timeframe,
            ),
            milestones: milestones(concepts_plan.len(), request.target_score, timeframe),
            weekly_schedule: weekly_schedule(request.chronotype),
            total_estimated_hours,
            concepts_plan,
        };

        log::info!(
            "Generated {} with {} concepts, success probability {:.2}",
            plan.id,
            plan.concepts_plan.len(),
            plan.success_probability
        );

        let recommendations = Recommendations {
            optimal_study_times: optimal_study_times(request.chronotype),
            method_effectiveness: method_effectiveness(request.learning_style),
            adjustment_suggestions: adjustment_suggestions(&plan),
        };

        PlanResponse {
            plan,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::concept::{ConceptInput, Importance};
    use crate::models::weekly::Chronotype;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn three_concepts() -> Vec<ConceptInput> {
        vec![
            ConceptInput {
                name: Some("Listening Comprehension".to_string()),
                difficulty: Some(Difficulty::Medium),
                importance: Some(Importance::Label("high".to_string())),
            },
            ConceptInput {
                name: Some("Reading Comprehension".to_string()),
                difficulty: Some(Difficulty::Hard),
                importance: Some(Importance::Score(0.8)),
            },
            ConceptInput::named("Grammar"),
        ]
    }

    fn build(request: &PlanRequest, seed: u64) -> PlanResponse {
        PlanBuilder::new(StdRng::seed_from_u64(seed)).build(request, fixed_now())
    }

    #[test]
    fn test_six_month_plan() {
        let request = PlanRequest {
            timeframe_months: 6,
            daily_study_hours: 2.0,
            concepts: three_concepts(),
            ..Default::default()
        };

        let response = build(&request, 1);
        let plan = &response.plan;

        assert_eq!(plan.milestones.len(), 6);
        assert_eq!(plan.concepts_plan.len(), 3);
        for concept in &plan.concepts_plan {
            assert_eq!(concept.spaced_repetition.len(), 6);
            assert!((10..=40).contains(&concept.estimated_hours));
            assert!((2..=8).contains(&concept.weekly_hours));
            assert!((20..=50).contains(&concept.exercises_count));
        }
        assert_eq!(
            plan.total_estimated_hours,
            plan.concepts_plan.iter().map(|c| c.estimated_hours).sum::<u32>()
        );
    }

    #[test]
    fn test_concept_defaults_and_priority() {
        let request = PlanRequest {
            concepts: vec![ConceptInput::default(), ConceptInput::named("Grammar")],
            ..Default::default()
        };
        let plan = build(&request, 2).plan;

        assert_eq!(plan.concepts_plan[0].name, "Concept 1");
        assert_eq!(plan.concepts_plan[0].priority, 1);
        assert_eq!(plan.concepts_plan[0].difficulty, Difficulty::Medium);
        assert_eq!(plan.concepts_plan[0].importance, 0.5);
        assert_eq!(plan.concepts_plan[1].name, "Grammar");
        assert_eq!(plan.concepts_plan[1].priority, 2);
    }

    #[test]
    fn test_plan_id_and_methods() {
        let request = PlanRequest {
            learning_style: LearningStyle::Visual,
            concepts: three_concepts(),
            ..Default::default()
        };
        let response = build(&request, 3);

        assert_eq!(response.plan.id, "plan_20260314_092653");
        assert_eq!(response.plan.concepts_plan[0].methods[0], "Dual Coding");
        assert_eq!(response.recommendations.method_effectiveness, 0.85);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let request = PlanRequest {
            concepts: three_concepts(),
            ..Default::default()
        };
        let a = serde_json::to_value(build(&request, 99)).unwrap();
        let b = serde_json::to_value(build(&request, 99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_success_probability_bounds() {
        for daily in [0.0, 0.25, 1.0, 2.0, 8.0, 24.0] {
            for total in [0, 10, 100, 400, 2000] {
                for months in [1, 3, 6, 12] {
                    let p = success_probability(daily, total, months);
                    assert!((0.0..=0.95).contains(&p), "{} {} {} -> {}", daily, total, months, p);
                }
            }
        }
        // Required hours below the floor use the 0.5h floor.
        assert!((success_probability(0.1, 0, 3) - 0.58).abs() < 1e-9);
        assert_eq!(success_probability(10.0, 30, 1), 0.95);
    }

    #[test]
    fn test_zero_timeframe() {
        let request = PlanRequest {
            timeframe_months: 0,
            concepts: three_concepts(),
            ..Default::default()
        };
        let plan = build(&request, 4).plan;

        assert_eq!(plan.timeframe_months, 1);
        assert_eq!(plan.milestones.len(), plan.timeframe_months as usize);
        assert!(plan.success_probability.is_finite());
    }

    #[test]
    fn test_extreme_target_score() {
        let request = PlanRequest {
            target_score: 9_223_372_036_854_775_000,
            timeframe_months: 6,
            ..Default::default()
        };
        let plan = build(&request, 5).plan;

        assert_eq!(plan.milestones.len(), 6);
        let gap = request.target_score as i128 - BASELINE_SCORE as i128;
        assert_eq!(plan.milestones[0].target_score_increase as i128, gap.div_euclid(6));
        assert_eq!(plan.milestones[5].target_score_increase as i128, gap);

        let low = milestones(1, i64::MIN, 3);
        assert_eq!(low[2].target_score_increase, i64::MIN);
        assert!(low[0].target_score_increase < 0);
    }

    #[test]
    fn test_milestone_interpolation() {
        let list = milestones(3, 850, 6);
        let concepts: Vec<usize> = list.iter().map(|m| m.target_concepts).collect();
        let scores: Vec<i64> = list.iter().map(|m| m.target_score_increase).collect();

        assert_eq!(concepts, vec![0, 1, 1, 2, 2, 3]);
        assert_eq!(scores, vec![33, 66, 100, 133, 166, 200]);
        assert_eq!(list[1].key_objectives[0], "Master 6 new concepts");
        assert_eq!(list[1].key_objectives[1], "Reach 80% average retention");
        assert_eq!(list[1].key_objectives[2], "Complete 40 practice exercises");
    }

    #[test]
    fn test_milestone_below_baseline_floors() {
        let list = milestones(0, 600, 3);
        let scores: Vec<i64> = list.iter().map(|m| m.target_score_increase).collect();
        assert_eq!(scores, vec![-17, -34, -50]);
    }

    #[test]
    fn test_empty_concepts() {
        let response = build(&PlanRequest::default(), 5);
        assert!(response.plan.concepts_plan.is_empty());
        assert_eq!(response.plan.total_estimated_hours, 0);
        assert_eq!(response.plan.milestones.len(), 3);
        assert_eq!(response.plan.success_probability, 0.95);
        assert!(response.recommendations.adjustment_suggestions.is_empty());
    }

    #[test]
    fn test_adjustment_suggestions() {
        let concepts = (0..12).map(|i| ConceptInput::named(&format!("c{}", i))).collect();
        let request = PlanRequest {
            timeframe_months: 1,
            daily_study_hours: 0.0,
            chronotype: Chronotype::Evening,
            concepts,
            ..Default::default()
        };
        let response = build(&request, 6);
        let suggestions = &response.recommendations.adjustment_suggestions;

        assert_eq!(response.plan.success_probability, 0.5);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(
            response.recommendations.optimal_study_times,
            vec!["11:00-13:00", "17:00-19:00"]
        );
    }
}
