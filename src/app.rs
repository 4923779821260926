//! Main application UI and state management.
//! Handles document analysis, plan generation, progress updates and review sessions.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use rand::rngs::StdRng;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};
use study_planner::Settings;
use study_planner::analysis::{Analyzer, extract_text};
use study_planner::database::db::{self, DueReview};
use study_planner::export::json::{export_plan_to_path, import_plan_request};
use study_planner::models::schedule::next_interval;
use study_planner::models::{
    Chronotype, ConceptInput, Document, LearningStyle, PlanBuilder, PlanRequest, PlanResponse,
    ProgressResponse, ProgressUpdate, ReviewSession, StoredConcept, StoredExercise,
};

/// Application screen states
#[derive(Default, Clone, Copy, PartialEq)]
enum AppScreen {
    #[default]
    Documents,
    Plan,
    Reviews,
    ReviewSession,
}

/// Main application state
pub struct StudyApp {
    settings: Settings,
    rng: StdRng,
    conn: Arc<Mutex<Connection>>,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    current_screen: AppScreen,
    current_date_display: String,

    documents: Vec<Document>,
    selected_document: Option<usize>,
    document_concepts: Vec<StoredConcept>,
    document_exercises: Vec<StoredExercise>,
    pasted_title: String,
    pasted_text: String,

    plan_request: PlanRequest,
    concepts_text: String,
    plan: Option<PlanResponse>,

    progress_update: ProgressUpdate,
    progress_result: Option<ProgressResponse>,

    due_reviews: Vec<DueReview>,
    review_session: Option<ReviewSession>,

    show_message_dialog: bool,
    message: String,
}

/// Formats a timestamp as a local YYYY-MM-DD string
fn format_date(time: DateTime<Utc>) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d").to_string()
}

impl eframe::App for StudyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.current_screen != AppScreen::ReviewSession {
            self.render_top_bar(ctx);
        }

        match self.current_screen {
            AppScreen::Documents => self.render_documents_screen(ctx),
            AppScreen::Plan => self.render_plan_screen(ctx),
            AppScreen::Reviews => self.render_reviews_screen(ctx),
            AppScreen::ReviewSession => self.render_session_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_message_dialog {
            egui::Window::new("Study Planner")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(self.message.as_str());
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_message_dialog = false;
                    }
                });
        }
    }
}

impl StudyApp {
    /// Creates a new application instance with documents loaded from database
    pub fn new(settings: Settings, conn: Connection) -> Self {
        let rng = settings.rng();
        let mut app = Self {
            settings,
            rng,
            conn: Arc::new(Mutex::new(conn)),
            show_confirmation_dialog: false,
            allowed_to_close: false,
            current_screen: AppScreen::Documents,
            current_date_display: String::new(),
            documents: Vec::new(),
            selected_document: None,
            document_concepts: Vec::new(),
            document_exercises: Vec::new(),
            pasted_title: String::new(),
            pasted_text: String::new(),
            plan_request: PlanRequest::default(),
            concepts_text: String::new(),
            plan: None,
            progress_update: ProgressUpdate::default(),
            progress_result: None,
            due_reviews: Vec::new(),
            review_session: None,
            show_message_dialog: false,
            message: String::new(),
        };
        app.refresh();
        if !app.documents.is_empty() {
            app.select_document(0);
        }
        app
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn show_message(&mut self, message: String) {
        self.message = message;
        self.show_message_dialog = true;
    }

    /// Reloads the date, documents and due reviews from the database
    fn refresh(&mut self) {
        let loaded = {
            let conn = self.lock_conn();
            db::get_current_date(&conn).and_then(|date| {
                Ok((date, db::list_documents(&conn)?, db::get_reviews_due(&conn)?))
            })
        };

        match loaded {
            Ok((date, documents, due)) => {
                self.current_date_display = format_date(date);
                self.documents = documents;
                self.due_reviews = due;
            }
            Err(e) => {
                log::error!("Failed to load data: {}", e);
                self.show_message(format!("Failed to load data: {}", e));
            }
        }
    }

    fn select_document(&mut self, index: usize) {
        let Some(document_id) = self.documents.get(index).map(|d| d.id) else {
            return;
        };
        self.selected_document = Some(index);

        let loaded = {
            let conn = self.lock_conn();
            db::get_concepts_for_document(document_id, &conn).and_then(|concepts| {
                Ok((concepts, db::get_exercises_for_document(document_id, &conn)?))
            })
        };
        match loaded {
            Ok((concepts, exercises)) => {
                self.document_concepts = concepts;
                self.document_exercises = exercises;
            }
            Err(e) => self.show_message(format!("Failed to load document: {}", e)),
        }
    }

    /// Renders the navigation bar with the simulated date
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_screen, AppScreen::Documents, "Documents");
                ui.selectable_value(&mut self.current_screen, AppScreen::Plan, "Plan");
                ui.selectable_value(
                    &mut self.current_screen,
                    AppScreen::Reviews,
                    format!("Reviews ({})", self.due_reviews.len()),
                );

                ui.separator();
                ui.label(self.current_date_display.as_str());

                if ui.button("Next Day").clicked() {
                    let result = db::advance_day(&self.lock_conn());
                    match result {
                        Ok(_) => self.refresh(),
                        Err(e) => self.show_message(format!("Failed to advance day: {}", e)),
                    }
                }
            });
        });
    }

    /// Renders document upload and the concepts/exercises of the selected document
    fn render_documents_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Analyze Document");
            ui.horizontal(|ui| {
                if ui.button("Open File...").clicked() {
                    self.handle_open_document();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut self.pasted_title);
            });
            ui.add(
                egui::TextEdit::multiline(&mut self.pasted_text)
                    .hint_text("Paste study material here")
                    .desired_rows(4),
            );
            if ui.button("Analyze Text").clicked() {
                let title = if self.pasted_title.trim().is_empty() {
                    "pasted.txt".to_string()
                } else {
                    self.pasted_title.trim().to_string()
                };
                let text = self.pasted_text.clone();
                if self.analyze_and_store(&title, Some("text/plain"), &text) {
                    self.pasted_title.clear();
                    self.pasted_text.clear();
                }
            }

            ui.separator();

            ui.heading(format!("Documents ({})", self.documents.len()));

            let mut action_select: Option<usize> = None;

            egui::ScrollArea::vertical()
                .id_source("documents_list")
                .max_height(120.0)
                .show(ui, |ui| {
                    for (i, document) in self.documents.iter().enumerate() {
                        let is_selected = self.selected_document == Some(i);
                        if ui
                            .selectable_label(
                                is_selected,
                                format!(
                                    "{}. {} ({})",
                                    i + 1,
                                    document.filename,
                                    format_date(document.created_at)
                                ),
                            )
                            .clicked()
                        {
                            action_select = Some(i);
                        }
                    }
                });

            if let Some(i) = action_select {
                self.select_document(i);
            }

            ui.separator();

            if self.selected_document.is_none() {
                ui.label("Select a document to see its concepts");
                return;
            }

            ui.heading(format!("Concepts ({})", self.document_concepts.len()));
            egui::ScrollArea::vertical()
                .id_source("concepts_list")
                .max_height(180.0)
                .show(ui, |ui| {
                    for stored in &self.document_concepts {
                        let concept = &stored.concept;
                        ui.label(format!(
                            "{} - {}, importance {:.2}, {}",
                            concept.name,
                            concept.difficulty,
                            concept.importance,
                            concept.category.as_str()
                        ));
                    }
                });

            ui.separator();

            let total_minutes: u32 = self
                .document_exercises
                .iter()
                .map(|e| e.exercise.estimated_time)
                .sum();
            ui.heading(format!(
                "Exercises ({}, about {} min)",
                self.document_exercises.len(),
                total_minutes
            ));
            egui::ScrollArea::vertical()
                .id_source("exercises_list")
                .max_height(180.0)
                .show(ui, |ui| {
                    for stored in &self.document_exercises {
                        ui.group(|ui| {
                            ui.label(format!(
                                "[{}] {}",
                                stored.exercise.kind.as_str(),
                                stored.exercise.question
                            ));
                            ui.label(format!(
                                "   {} min, {}",
                                stored.exercise.estimated_time, stored.exercise.difficulty
                            ));
                        });
                    }
                });
        });
    }

    /// Renders the plan form, the generated plan and the progress calculator
    fn render_plan_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().id_source("plan_screen").show(ui, |ui| {
                ui.heading("Learning Plan");

                ui.add(
                    egui::Slider::new(&mut self.plan_request.target_score, 10..=990)
                        .text("Target score"),
                );
                ui.add(
                    egui::Slider::new(&mut self.plan_request.timeframe_months, 1..=24)
                        .text("Timeframe (months)"),
                );
                ui.add(
                    egui::Slider::new(&mut self.plan_request.daily_study_hours, 0.0..=12.0)
                        .step_by(0.5)
                        .text("Daily study hours"),
                );

                egui::ComboBox::from_label("Learning style")
                    .selected_text(self.plan_request.learning_style.label())
                    .show_ui(ui, |ui| {
                        for style in LearningStyle::ALL {
                            ui.selectable_value(
                                &mut self.plan_request.learning_style,
                                style,
                                style.label(),
                            );
                        }
                    });

                egui::ComboBox::from_label("Chronotype")
                    .selected_text(self.plan_request.chronotype.label())
                    .show_ui(ui, |ui| {
                        for chronotype in Chronotype::ALL {
                            ui.selectable_value(
                                &mut self.plan_request.chronotype,
                                chronotype,
                                chronotype.label(),
                            );
                        }
                    });

                ui.label("Concepts, one per line (name, difficulty, importance):");
                ui.add(
                    egui::TextEdit::multiline(&mut self.concepts_text)
                        .hint_text("Reading Comprehension, hard, high")
                        .desired_rows(4),
                );

                ui.horizontal(|ui| {
                    if ui.button("Use Document Concepts").clicked() {
                        self.concepts_text = self
                            .document_concepts
                            .iter()
                            .map(|c| {
                                format!(
                                    "{}, {}, {:.2}",
                                    c.concept.name, c.concept.difficulty, c.concept.importance
                                )
                            })
                            .collect::<Vec<_>>()
                            .join("\n");
                    }
                    if ui.button("Import Request...").clicked() {
                        self.handle_import_request();
                    }
                    if ui.button("Generate Plan").clicked() {
                        self.generate_plan();
                    }
                    if self.plan.is_some() && ui.button("Export Plan...").clicked() {
                        self.handle_export_plan();
                    }
                });

                if let Some(response) = &self.plan {
                    ui.separator();
                    render_plan(ui, response);
                }

                ui.separator();
                self.render_progress_section(ui);
            });
        });
    }

    fn render_progress_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Update Progress");
        ui.add(
            egui::Slider::new(&mut self.progress_update.mastery_level, 0.0..=1.0)
                .text("Mastery level"),
        );
        ui.add(
            egui::Slider::new(&mut self.progress_update.retention_rate, 0.0..=1.0)
                .text("Retention rate"),
        );
        ui.add(
            egui::Slider::new(&mut self.progress_update.time_spent, 0.0..=240.0)
                .text("Time spent (min)"),
        );
        ui.label(format!(
            "Next review in {} days",
            next_interval(self.progress_update.mastery_level)
        ));

        if ui.button("Update").clicked() {
            let now = db::get_current_date(&self.lock_conn()).unwrap_or_else(|_| Utc::now());
            self.progress_result = Some(self.progress_update.apply(now));
        }

        if let Some(result) = &self.progress_result {
            ui.label(format!(
                "Next review: {}",
                format_date(result.updated_concept.next_review)
            ));
            for recommendation in &result.recommendations {
                ui.label(format!("- {}", recommendation));
            }
        }
    }

    /// Renders the list of reviews due at the simulated date
    fn render_reviews_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Due Reviews ({})", self.due_reviews.len()));

            if self.due_reviews.is_empty() {
                ui.label("Nothing to review today. Use 'Next Day' to move forward.");
                return;
            }

            if ui.button("Start Review").clicked() {
                self.review_session = Some(ReviewSession::new(
                    self.due_reviews.clone(),
                    Arc::clone(&self.conn),
                ));
                self.current_screen = AppScreen::ReviewSession;
            }

            ui.separator();

            egui::ScrollArea::vertical()
                .id_source("due_reviews")
                .show(ui, |ui| {
                    for due in &self.due_reviews {
                        ui.label(format!(
                            "{} - review #{} (+{}d), scheduled {}",
                            due.concept_name,
                            due.entry.review_number,
                            due.entry.interval_days,
                            format_date(due.entry.scheduled_date)
                        ));
                    }
                });
        });
    }

    /// Renders the review session screen
    fn render_session_screen(&mut self, ctx: &egui::Context) {
        let mut action_back = false;
        let mut error: Option<String> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &mut self.review_session else {
                action_back = true;
                return;
            };

            ui.heading("Review Session");
            ui.label(session.phase_message());
            ui.label(format!(
                "Progress: {} / {} done ({} remaining)",
                session.completed_count(),
                session.total_count(),
                session.remaining_count()
            ));

            ui.add_space(20.0);

            if session.is_completed() {
                ui.heading("All done!");
                ui.label("Every review due today is completed.");
                ui.add_space(20.0);
                if ui.button("Back").clicked() {
                    action_back = true;
                }
                return;
            }

            let Some(review) = session.current_review() else {
                return;
            };
            let show_details = session.show_details;
            let name = review.concept_name.clone();
            let entry = review.entry.clone();

            ui.group(|ui| {
                ui.set_min_height(160.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(name.as_str());
                    ui.label(format!("Review #{}", entry.review_number));
                    ui.add_space(10.0);
                    if show_details {
                        ui.label(format!("Interval: {} days", entry.interval_days));
                        if let Some(confidence) = entry.confidence_required {
                            ui.label(format!(
                                "Required confidence: {:.0}%",
                                confidence * 100.0
                            ));
                        }
                    } else {
                        ui.label("(Click 'Show Details' to reveal)");
                    }
                });
            });

            ui.add_space(20.0);

            let mut action_toggle = false;
            let mut action_complete: Option<u8> = None;
            let mut action_skip = false;

            ui.horizontal(|ui| {
                if ui.button("Show Details").clicked() {
                    action_toggle = true;
                }
                for (label, quality) in [("Hard", 3), ("Good", 4), ("Easy", 5)] {
                    if ui.button(label).clicked() {
                        action_complete = Some(quality);
                    }
                }
                if ui.button("Skip").clicked() {
                    action_skip = true;
                }
            });

            ui.add_space(20.0);
            if ui.button("Back").clicked() {
                action_back = true;
            }

            if action_toggle {
                session.toggle_details();
            }
            if let Some(quality) = action_complete {
                if let Err(e) = session.complete_current(quality) {
                    error = Some(format!("Failed to save review: {}", e));
                }
            }
            if action_skip {
                session.skip_current();
            }
        });

        if let Some(message) = error {
            self.show_message(message);
        }
        if action_back {
            self.review_session = None;
            self.current_screen = AppScreen::Reviews;
            self.refresh();
        }
    }

    /// Runs analysis over `text` and stores the result. Returns true on success.
    fn analyze_and_store(&mut self, filename: &str, mime_type: Option<&str>, text: &str) -> bool {
        let now = db::get_current_date(&self.lock_conn()).unwrap_or_else(|_| Utc::now());
        let analysis = Analyzer::new(
            &mut self.rng,
            self.settings.max_concepts,
            self.settings.preview_chars,
        )
        .analyze(text, now);

        let analysis = match analysis {
            Ok(analysis) => analysis,
            Err(e) => {
                self.show_message(format!("Analysis failed: {}", e));
                return false;
            }
        };

        let saved = db::save_analysis(filename, mime_type, text, &analysis, &self.lock_conn());
        match saved {
            Ok(_) => {
                self.refresh();
                self.select_document(0);
                self.show_message(format!(
                    "Found {} concepts and {} exercises ({} min) in '{}'",
                    analysis.concepts.len(),
                    analysis.total_exercises,
                    analysis.total_study_time,
                    filename
                ));
                true
            }
            Err(e) => {
                self.show_message(format!("Failed to store document: {}", e));
                false
            }
        }
    }

    /// Handles picking a document file and analyzing it
    fn handle_open_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Documents", &["txt", "md", "png", "jpg", "jpeg", "pdf"])
            .pick_file()
        else {
            return;
        };

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let text = std::fs::read(&path)
            .map_err(study_planner::Error::from)
            .and_then(|bytes| extract_text(&bytes, None, &filename));

        match text {
            Ok(text) => {
                self.analyze_and_store(&filename, None, &text);
            }
            Err(e) => self.show_message(format!("Could not read '{}': {}", filename, e)),
        }
    }

    fn collect_concepts(&self) -> Vec<ConceptInput> {
        self.concepts_text
            .lines()
            .filter_map(ConceptInput::parse_line)
            .collect()
    }

    fn generate_plan(&mut self) {
        self.plan_request.concepts = self.collect_concepts();
        if let Err(e) = self.plan_request.validate() {
            self.show_message(e.to_string());
            return;
        }

        let now = Utc::now();
        let response = PlanBuilder::new(&mut self.rng).build(&self.plan_request, now);
        self.plan = Some(response);
    }

    /// Handles plan export to JSON file
    fn handle_export_plan(&mut self) {
        let Some(response) = &self.plan else {
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", response.plan.id))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            let message = match export_plan_to_path(response, &path) {
                Ok(_) => format!("Plan '{}' exported successfully!", response.plan.id),
                Err(e) => format!("Export failed: {}", e),
            };
            self.show_message(message);
        }
    }

    /// Handles plan request import from JSON file
    fn handle_import_request(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        match import_plan_request(&path) {
            Ok(request) => {
                self.concepts_text = request
                    .concepts
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        let name = c
                            .name
                            .clone()
                            .unwrap_or_else(|| format!("Concept {}", i + 1));
                        let difficulty = c.difficulty.unwrap_or_default();
                        match &c.importance {
                            Some(importance) => {
                                format!("{}, {}, {:.2}", name, difficulty, importance.score())
                            }
                            None => format!("{}, {}", name, difficulty),
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                self.plan_request = request;
                self.generate_plan();
            }
            Err(e) => self.show_message(format!(
                "Import failed: {}\n\nExpected a plan request such as:\n{{\n  \"timeframe_months\": 3,\n  \"concepts\": [{{\"name\": \"Grammar\"}}]\n}}",
                e
            )),
        }
    }
}

/// Renders a generated plan: summary, concepts, milestones, week and advice
fn render_plan(ui: &mut egui::Ui, response: &PlanResponse) {
    let plan = &response.plan;

    ui.heading(format!("Plan {}", plan.id));
    ui.label(format!(
        "Success probability: {:.0}%  |  Total: {} h  |  Method effectiveness: {:.0}%",
        plan.success_probability * 100.0,
        plan.total_estimated_hours,
        response.recommendations.method_effectiveness * 100.0
    ));

    egui::CollapsingHeader::new(format!("Concepts ({})", plan.concepts_plan.len()))
        .default_open(true)
        .show(ui, |ui| {
            for concept in &plan.concepts_plan {
                ui.group(|ui| {
                    ui.label(format!(
                        "{}. {} ({}, importance {:.2})",
                        concept.priority, concept.name, concept.difficulty, concept.importance
                    ));
                    ui.label(format!(
                        "   {} h total, {} h/week, {} exercises",
                        concept.estimated_hours, concept.weekly_hours, concept.exercises_count
                    ));
                    ui.label(format!("   Methods: {}", concept.methods.join(", ")));
                    let reviews: Vec<String> = concept
                        .spaced_repetition
                        .iter()
                        .map(|e| format_date(e.scheduled_date))
                        .collect();
                    ui.label(format!("   Reviews: {}", reviews.join(", ")));
                });
            }
        });

    egui::CollapsingHeader::new(format!("Milestones ({})", plan.milestones.len())).show(
        ui,
        |ui| {
            for milestone in &plan.milestones {
                ui.label(format!(
                    "Month {}: {} concepts, {:+} points",
                    milestone.month, milestone.target_concepts, milestone.target_score_increase
                ));
                for objective in &milestone.key_objectives {
                    ui.label(format!("   - {}", objective));
                }
            }
        },
    );

    egui::CollapsingHeader::new("Weekly Schedule").show(ui, |ui| {
        for (day, blocks) in plan.weekly_schedule.days() {
            let slots: Vec<String> = blocks
                .iter()
                .map(|(activity, window)| format!("{} {}", activity.label(), window))
                .collect();
            ui.label(format!("{}: {}", day, slots.join(", ")));
        }
    });

    egui::CollapsingHeader::new("Recommendations").show(ui, |ui| {
        ui.label(format!(
            "Best study times: {}",
            response.recommendations.optimal_study_times.join(", ")
        ));
        for suggestion in &response.recommendations.adjustment_suggestions {
            ui.label(format!("- {}", suggestion));
        }
    });
}
