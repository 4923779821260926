//! Document analysis for Study Planner
//!
//! This module provides:
//! - Text extraction from uploaded files
//! - Keyword-frequency concept extraction
//! - Exercise generation per concept
//! - A review schedule for every extracted concept

pub mod concepts;
pub mod exercises;
pub mod extract;

use crate::error::{Error, Result};
use crate::models::schedule::review_schedule;
use crate::models::{Concept, ConceptExercises, ReviewEntry};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use concepts::extract_concepts;
pub use exercises::build_exercises;
pub use extract::extract_text;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub extracted_text_preview: String,
    pub concepts: Vec<Concept>,
    pub word_count: usize,
    pub exercises: Vec<ConceptExercises>,
    pub total_exercises: usize,
    /// Minutes
    pub total_study_time: u32,
    pub spaced_repetition: BTreeMap<String, Vec<ReviewEntry>>,
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

pub struct Analyzer<R: Rng> {
    rng: R,
    max_concepts: usize,
    preview_chars: usize,
}

impl<R: Rng> Analyzer<R> {
    pub fn new(rng: R, max_concepts: usize, preview_chars: usize) -> Self {
        Self {
            rng,
            max_concepts,
            preview_chars,
        }
    }

    /// Runs concept extraction, exercise generation and scheduling over `text`.
    pub fn analyze(&mut self, text: &str, now: DateTime<Utc>) -> Result<DocumentAnalysis> {
        if text.trim().is_empty() {
            return Err(Error::NoText);
        }

        let concepts = extract_concepts(text, self.max_concepts, &mut self.rng);
        let exercises = build_exercises(&concepts, &mut self.rng);

        let spaced_repetition = concepts
            .iter()
            .map(|c| (c.name.clone(), review_schedule(&c.name, now)))
            .collect();

        let total_exercises = exercises.iter().map(|e| e.exercises.len()).sum();
        let total_study_time = exercises
            .iter()
            .flat_map(|e| e.exercises.iter())
            .map(|ex| ex.estimated_time)
            .sum();

        log::info!(
            "Analyzed document: {} concepts, {} exercises",
            concepts.len(),
            total_exercises
        );

        Ok(DocumentAnalysis {
            extracted_text_preview: preview(text, self.preview_chars),
            word_count: text.split_whitespace().count(),
            concepts,
            exercises,
            total_exercises,
            total_study_time,
            spaced_repetition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn analyzer() -> Analyzer<StdRng> {
        Analyzer::new(StdRng::seed_from_u64(21), 20, 500)
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("éèàù", 2), "éè...");
    }

    #[test]
    fn test_analyze_text() {
        let text = "Vocabulary: words to learn. Vocabulary lists help. Grammar drills help too.";
        let analysis = analyzer().analyze(text, Utc::now()).unwrap();

        assert_eq!(analysis.concepts[0].name, "vocabulary");
        assert_eq!(analysis.word_count, 11);
        assert_eq!(analysis.exercises.len(), analysis.concepts.len());
        assert_eq!(analysis.total_exercises, analysis.concepts.len() * 2);
        assert_eq!(analysis.spaced_repetition.len(), analysis.concepts.len());
        assert!(
            analysis
                .spaced_repetition
                .values()
                .all(|schedule| schedule.len() == 6)
        );
        let expected_time: u32 = analysis
            .exercises
            .iter()
            .flat_map(|e| e.exercises.iter())
            .map(|e| e.estimated_time)
            .sum();
        assert_eq!(analysis.total_study_time, expected_time);
        assert_eq!(analysis.extracted_text_preview, text);
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            analyzer().analyze("   \n", Utc::now()),
            Err(Error::NoText)
        ));
    }
}
