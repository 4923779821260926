//! Application settings loaded from a TOML file.
//!
//! The file location comes from `STUDY_PLANNER_CONFIG`, falling back to
//! `study_planner.toml` in the working directory. A missing file is not an
//! error: every field has a default.

use crate::error::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "STUDY_PLANNER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "study_planner.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_path: PathBuf,
    /// Seed for the random filler fields. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
    pub max_concepts: usize,
    pub preview_chars: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("db.sqlite3"),
            rng_seed: None,
            max_concepts: 20,
            preview_chars: 500,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the configured location.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
