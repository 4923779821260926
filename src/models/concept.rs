//! Concept is a discrete topic extracted from a document or supplied directly
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vocabulary,
    Skill,
}

impl Category {
    /// Single words are vocabulary, multi-word phrases are skills.
    pub fn for_name(name: &str) -> Self {
        if name.contains(' ') {
            Category::Skill
        } else {
            Category::Vocabulary
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vocabulary => "vocabulary",
            Category::Skill => "skill",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vocabulary" => Ok(Category::Vocabulary),
            "skill" => Ok(Category::Skill),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    pub difficulty: Difficulty,
    /// 0.0 - 1.0
    pub importance: f64,
    pub category: Category,
    pub description: Option<String>,
}

/// Importance as submitted by clients: either a score or a coarse label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Importance {
    Score(f64),
    Label(String),
}

impl Importance {
    pub fn score(&self) -> f64 {
        match self {
            Importance::Score(s) => s.clamp(0.0, 1.0),
            Importance::Label(label) => match label.to_ascii_lowercase().as_str() {
                "high" => 0.9,
                "medium" => 0.6,
                "low" => 0.3,
                _ => DEFAULT_IMPORTANCE,
            },
        }
    }
}

pub const DEFAULT_IMPORTANCE: f64 = 0.5;

/// A concept as listed in a plan request. Missing fields fall back to
/// medium difficulty and 0.5 importance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConceptInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub importance: Option<Importance>,
}

impl ConceptInput {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Parses `name[, difficulty[, importance]]`. Blank lines yield `None`;
    /// unrecognised difficulty or importance values are left unset.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split(',').map(str::trim);
        let name = parts.next().filter(|n| !n.is_empty())?;
        let difficulty = parts.next().and_then(|d| d.parse().ok());
        let importance = parts.next().filter(|i| !i.is_empty()).map(|i| match i.parse::<f64>() {
            Ok(score) => Importance::Score(score),
            Err(_) => Importance::Label(i.to_string()),
        });

        Some(Self {
            name: Some(name.to_string()),
            difficulty,
            importance,
        })
    }
}
