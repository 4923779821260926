mod app;

use app::StudyApp;
use study_planner::Settings;
use study_planner::analysis::Analyzer;
use study_planner::database::db::{get_current_date, init_database, list_documents, save_analysis};

const SAMPLE_TEXT: &str = "Grammar: the rules that govern sentence structure. \
Vocabulary: the words a learner knows. Reading comprehension builds on grammar \
and vocabulary. Listening practice improves comprehension of spoken grammar.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .init();

    let conn = init_database(&settings.database_path)?;

    if list_documents(&conn).unwrap_or_default().is_empty() {
        let now = get_current_date(&conn)?;
        let analysis = Analyzer::new(settings.rng(), settings.max_concepts, settings.preview_chars)
            .analyze(SAMPLE_TEXT, now)?;
        save_analysis("sample.txt", Some("text/plain"), SAMPLE_TEXT, &analysis, &conn)?;

        log::info!("Sample data created!");
    }

    let documents = list_documents(&conn)?;
    log::info!("Loaded {} documents from database", documents.len());
    for document in &documents {
        log::debug!("  - {} (id {})", document.filename, document.id);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Study Planner",
        options,
        Box::new(|_cc| Ok(Box::new(StudyApp::new(settings, conn)))),
    )?;
    Ok(())
}
