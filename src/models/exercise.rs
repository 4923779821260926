//! Practice exercises generated for a concept
use super::Difficulty;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Flashcard,
    Quiz,
}

impl ExerciseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Flashcard => "flashcard",
            ExerciseKind::Quiz => "quiz",
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flashcard" => Ok(ExerciseKind::Flashcard),
            "quiz" => Ok(ExerciseKind::Quiz),
            other => Err(format!("unknown exercise type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    pub question: String,
    pub answer: Option<String>,
    /// Minutes
    pub estimated_time: u32,
    pub difficulty: Difficulty,
}

/// Exercises grouped under the concept they practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptExercises {
    pub concept: String,
    pub exercises: Vec<Exercise>,
}
