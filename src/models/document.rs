//! Stored documents and the rows derived from them.
use super::{Concept, Exercise};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub filename: String,
    pub mime_type: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConcept {
    pub id: i64,
    pub document_id: i64,
    #[serde(flatten)]
    pub concept: Concept,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredExercise {
    pub id: i64,
    pub concept_id: i64,
    pub concept: String,
    #[serde(flatten)]
    pub exercise: Exercise,
}
