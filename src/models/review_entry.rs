use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled review of a concept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub review_number: u32,
    pub interval_days: u32,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_required: Option<f64>,
}
