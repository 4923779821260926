pub mod analysis;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::Settings;
pub use error::{Error, Result};
pub use models::{Concept, PlanBuilder, PlanRequest, PlanResponse, ReviewEntry, ReviewSession};
