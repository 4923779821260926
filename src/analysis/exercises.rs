//! Exercise generation for extracted concepts.

use crate::models::{Concept, ConceptExercises, Exercise, ExerciseKind};
use rand::Rng;

/// One flashcard and one quiz per concept, with random durations in minutes.
pub fn build_exercises<R: Rng>(concepts: &[Concept], rng: &mut R) -> Vec<ConceptExercises> {
    concepts
        .iter()
        .map(|concept| ConceptExercises {
            concept: concept.name.clone(),
            exercises: vec![
                Exercise {
                    kind: ExerciseKind::Flashcard,
                    question: format!("Define: {}", concept.name),
                    answer: None,
                    estimated_time: rng.gen_range(1..=3),
                    difficulty: concept.difficulty,
                },
                Exercise {
                    kind: ExerciseKind::Quiz,
                    question: format!("Choose the best use of: {}", concept.name),
                    answer: None,
                    estimated_time: rng.gen_range(2..=4),
                    difficulty: concept.difficulty,
                },
            ],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Difficulty};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_two_exercises_per_concept() {
        let concepts = vec![Concept {
            name: "grammar".to_string(),
            difficulty: Difficulty::Hard,
            importance: 0.7,
            category: Category::Vocabulary,
            description: None,
        }];
        let mut rng = StdRng::seed_from_u64(5);
        let exercises = build_exercises(&concepts, &mut rng);

        assert_eq!(exercises.len(), 1);
        let list = &exercises[0].exercises;
        assert_eq!(list[0].kind, ExerciseKind::Flashcard);
        assert_eq!(list[0].question, "Define: grammar");
        assert!((1..=3).contains(&list[0].estimated_time));
        assert_eq!(list[1].kind, ExerciseKind::Quiz);
        assert!((2..=4).contains(&list[1].estimated_time));
        assert!(list.iter().all(|e| e.difficulty == Difficulty::Hard));
    }
}
