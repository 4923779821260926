//! JSON import/export module for learning plans.
//! Saves generated plans to JSON files and loads plan requests from them.

use crate::error::Result;
use crate::models::{PlanRequest, PlanResponse};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Exports a generated plan with its recommendations to a JSON file.
/// Returns an error if file creation or writing fails.
pub fn export_plan_to_path(plan: &PlanResponse, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(plan)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    log::info!("Plan '{}' exported to '{}'", plan.plan.id, path.display());
    Ok(())
}

/// Imports a plan request from a JSON file and validates it.
/// Missing fields take their defaults.
pub fn import_plan_request(path: &Path) -> Result<PlanRequest> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let request: PlanRequest = serde_json::from_str(&contents)?;
    request.validate()?;

    log::info!(
        "Plan request with {} concepts imported from '{}'",
        request.concepts.len(),
        path.display()
    );
    Ok(request)
}

/// Loads a previously exported plan.
pub fn import_plan(path: &Path) -> Result<PlanResponse> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{ConceptInput, LearningStyle, PlanBuilder};
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;

    fn create_test_plan() -> PlanResponse {
        let request = PlanRequest {
            timeframe_months: 2,
            concepts: vec![ConceptInput::named("Grammar"), ConceptInput::named("Listening")],
            ..Default::default()
        };
        PlanBuilder::new(StdRng::seed_from_u64(8)).build(&request, Utc::now())
    }

    #[test]
    fn test_export_plan_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");

        let plan = create_test_plan();
        let result = export_plan_to_path(&plan, &path);
        assert!(result.is_ok());
        assert!(fs::metadata(&path).is_ok(), "File should exist");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["plan"]["milestones"].as_array().unwrap().len(), 2);
        assert!(value["recommendations"]["optimal_study_times"].is_array());

        let entry = &value["plan"]["concepts_plan"][0]["spaced_repetition"][0];
        let scheduled = entry["scheduled_date"].as_str().expect("ISO-8601 string");
        let parsed = chrono::DateTime::parse_from_rfc3339(scheduled).unwrap();
        assert_eq!(
            parsed.with_timezone(&Utc),
            plan.plan.concepts_plan[0].spaced_repetition[0].scheduled_date
        );
        assert_eq!(entry["review_number"], 1);
        assert_eq!(entry["completed"], false);
    }

    #[test]
    fn test_export_and_import_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let original = create_test_plan();

        export_plan_to_path(&original, &path).unwrap();
        let imported = import_plan(&path).unwrap();

        assert_eq!(imported.plan.id, original.plan.id);
        assert_eq!(
            imported.plan.total_estimated_hours,
            original.plan.total_estimated_hours
        );
        assert_eq!(imported.plan.concepts_plan[1].name, "Listening");
    }

    #[test]
    fn test_import_plan_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        let json_content = r#"{
  "target_score": 900,
  "learning_style": "kinesthetic",
  "concepts": [
    {"name": "Vocabulary", "importance": "medium"}
  ]
}"#;
        fs::write(&path, json_content).unwrap();

        let request = import_plan_request(&path).unwrap();
        assert_eq!(request.target_score, 900);
        assert_eq!(request.timeframe_months, 3);
        assert_eq!(request.learning_style, LearningStyle::Kinesthetic);
        assert_eq!(request.concepts[0].name.as_deref(), Some("Vocabulary"));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_plan_request(Path::new("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_plan_request(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_import_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("negative.json");
        fs::write(&path, r#"{"daily_study_hours": -3}"#).unwrap();

        assert!(matches!(import_plan_request(&path), Err(Error::Validation(_))));
    }
}
