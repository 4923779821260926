pub mod concept;
pub mod document;
pub mod exercise;
pub mod plan;
pub mod plan_builder;
pub mod progress;
pub mod review_entry;
pub mod review_session;
pub mod schedule;
pub mod weekly;

pub use concept::{Category, Concept, ConceptInput, Difficulty, Importance};
pub use document::{Document, StoredConcept, StoredExercise};
pub use exercise::{ConceptExercises, Exercise, ExerciseKind};
pub use plan::{
    ConceptPlan, LearningStyle, MasteryCriteria, Milestone, Plan, PlanRequest, PlanResponse,
    Recommendations,
};
pub use plan_builder::PlanBuilder;
pub use progress::{CardReview, ConceptProgress, ProgressResponse, ProgressUpdate};
pub use review_entry::ReviewEntry;
pub use review_session::ReviewSession;
pub use weekly::{Activity, Chronotype, WeeklySchedule};
