//! Keyword-frequency concept extraction.
//!
//! Words of four or more letters are counted after dropping stop words.
//! A word written right before a colon reads like a term being defined and
//! gets a bonus. The most frequent words become concepts; difficulty and
//! importance are filler values drawn from the caller's random source.

use crate::models::{Category, Concept, Difficulty};
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const DEFINITION_BONUS: usize = 3;

const STOP_WORDS: &[&str] = &[
    // French
    "mais", "sont", "dans", "avec", "sans", "cette", "elle", "elles", "nous", "vous", "dont",
    "quoi", "pour", "leur", "leurs", "plus", "tout", "tous", "comme", "être", "avoir", "fait",
    "aussi", "très", "ainsi", "entre", "chez", "vers", "donc",
    // English
    "that", "this", "with", "from", "have", "were", "which", "their", "there", "they", "been",
    "what", "when", "your", "will", "would", "about", "into", "than", "then", "them", "these",
    "those", "also", "some", "such", "only", "over", "more", "most", "other", "each", "where",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zà-öø-ÿ]{4,}\b").expect("hardcoded regex"));

/// A candidate word directly followed by a colon, as in "term: meaning".
static DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-zà-öø-ÿ]{4,})\s*:").expect("hardcoded regex"));

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Ranks candidate keywords by frequency. Ties keep first-occurrence order.
pub fn rank_keywords(text: &str, max_concepts: usize) -> Vec<(String, usize)> {
    let text = text.to_lowercase();

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in WORD.find_iter(&text).map(|m| m.as_str()) {
        if is_stop_word(word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.to_string(), counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    for caps in DEFINITION.captures_iter(&text) {
        let word = &caps[1];
        if let Some(&i) = index.get(word) {
            counts[i].1 += DEFINITION_BONUS;
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(max_concepts);
    counts
}

/// Extracts up to `max_concepts` concepts from `text`.
pub fn extract_concepts<R: Rng>(text: &str, max_concepts: usize, rng: &mut R) -> Vec<Concept> {
    rank_keywords(text, max_concepts)
        .into_iter()
        .map(|(name, _)| Concept {
            difficulty: *Difficulty::ALL.choose(rng).unwrap_or(&Difficulty::Medium),
            importance: (rng.gen_range(0.5..=0.95) * 100.0_f64).round() / 100.0,
            category: Category::for_name(&name),
            description: None,
            name,
        })
        .collect()
}
