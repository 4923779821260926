//! Database operations for the study planner
//!
//! Handles SQLite initialization, storage of analyzed documents with their
//! concepts and exercises, and review schedule tracking against a simulated
//! current date.

use crate::analysis::DocumentAnalysis;
use crate::models::schedule::review_schedule;
use crate::models::{
    CardReview, Concept, Document, Exercise, ReviewEntry, StoredConcept, StoredExercise,
};
use chrono::{DateTime, Duration, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::path::Path;
use std::str::FromStr;

/// A pending review together with the concept it belongs to.
#[derive(Debug, Clone)]
pub struct DueReview {
    pub entry_id: i64,
    pub concept_id: i64,
    pub concept_name: String,
    pub entry: ReviewEntry,
}

fn to_timestamp(date: DateTime<Utc>) -> i64 {
    date.timestamp()
}

fn from_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Reads a text column into a type parsed with `FromStr`.
fn parse_column<T: FromStr<Err = String>>(row: &Row, idx: usize) -> Result<T> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Opens (or creates) the database at `path` and ensures the schema exists.
pub fn init_database<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates tables for documents, concepts, exercises, review entries and
/// app state. Sets the current date to now if not already initialized.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            mime_type TEXT,
            text TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS concepts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            document_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            importance REAL NOT NULL,
            difficulty TEXT NOT NULL,
            description TEXT,
            FOREIGN KEY (document_id) REFERENCES documents(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_concepts_name ON concepts(name);

        CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            concept_id INTEGER NOT NULL,
            type TEXT NOT NULL,
            question TEXT NOT NULL,
            answer TEXT,
            estimated_time INTEGER NOT NULL,
            difficulty TEXT NOT NULL,
            FOREIGN KEY (concept_id) REFERENCES concepts(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS review_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            concept_id INTEGER NOT NULL,
            review_number INTEGER NOT NULL,
            interval_days INTEGER NOT NULL,
            scheduled_date INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            confidence_required REAL,
            FOREIGN KEY (concept_id) REFERENCES concepts(id) ON DELETE CASCADE,
            UNIQUE(concept_id, review_number)
        );

        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![to_timestamp(Utc::now()).to_string()],
    )?;

    Ok(())
}

/// Retrieves current simulated date from database
pub fn get_current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let timestamp: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    Ok(from_timestamp(timestamp.parse::<i64>().unwrap_or(0)))
}

/// Advances current date by 24 hours, so future reviews come due
pub fn advance_day(conn: &Connection) -> Result<DateTime<Utc>> {
    let next_day = get_current_date(conn)? + Duration::days(1);

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![to_timestamp(next_day).to_string()],
    )?;

    log::debug!("Advanced simulated date to {}", next_day);
    Ok(next_day)
}

fn insert_review_entries(concept_id: i64, entries: &[ReviewEntry], conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO review_entries
            (concept_id, review_number, interval_days, scheduled_date, completed, confidence_required)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for entry in entries {
        stmt.execute(params![
            concept_id,
            entry.review_number,
            entry.interval_days,
            to_timestamp(entry.scheduled_date),
            entry.completed,
            entry.confidence_required
        ])?;
    }
    Ok(())
}

/// Stores a document with its concepts, exercises and review schedules.
///
/// Everything is written in one transaction. Returns the document ID.
pub fn save_analysis(
    filename: &str,
    mime_type: Option<&str>,
    text: &str,
    analysis: &DocumentAnalysis,
    conn: &Connection,
) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;
    let now = get_current_date(&tx)?;

    tx.execute(
        "INSERT INTO documents (filename, mime_type, text, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![filename, mime_type, text, to_timestamp(now)],
    )?;
    let document_id = tx.last_insert_rowid();

    for concept in &analysis.concepts {
        tx.execute(
            "INSERT INTO concepts (document_id, name, category, importance, difficulty, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                document_id,
                concept.name,
                concept.category.as_str(),
                concept.importance,
                concept.difficulty.as_str(),
                concept.description
            ],
        )?;
        let concept_id = tx.last_insert_rowid();

        let exercises = analysis
            .exercises
            .iter()
            .filter(|group| group.concept == concept.name)
            .flat_map(|group| group.exercises.iter());
        for exercise in exercises {
            tx.execute(
                "INSERT INTO exercises (concept_id, type, question, answer, estimated_time, difficulty)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    concept_id,
                    exercise.kind.as_str(),
                    exercise.question,
                    exercise.answer,
                    exercise.estimated_time,
                    exercise.difficulty.as_str()
                ],
            )?;
        }

        // Schedules are anchored to the simulated date so they line up with
        // the due-review query.
        let schedule = review_schedule(&concept.name, now);
        insert_review_entries(concept_id, &schedule, &tx)?;
    }

    tx.commit()?;
    log::info!(
        "Stored document '{}' (id {}) with {} concepts",
        filename,
        document_id,
        analysis.concepts.len()
    );
    Ok(document_id)
}

/// Retrieves all documents, newest first
pub fn list_documents(conn: &Connection) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(
        "SELECT id, filename, mime_type, text, created_at FROM documents ORDER BY id DESC",
    )?;
    let documents = stmt
        .query_map([], |row| {
            Ok(Document {
                id: row.get(0)?,
                filename: row.get(1)?,
                mime_type: row.get(2)?,
                text: row.get(3)?,
                created_at: from_timestamp(row.get(4)?),
            })
        })?
        .collect::<Result<Vec<Document>>>()?;
    Ok(documents)
}

/// Retrieves the concepts extracted from a document
pub fn get_concepts_for_document(document_id: i64, conn: &Connection) -> Result<Vec<StoredConcept>> {
    let mut stmt = conn.prepare(
        "SELECT id, document_id, name, category, importance, difficulty, description
         FROM concepts WHERE document_id = ?1 ORDER BY id",
    )?;
    let concepts = stmt
        .query_map(params![document_id], |row| {
            Ok(StoredConcept {
                id: row.get(0)?,
                document_id: row.get(1)?,
                concept: Concept {
                    name: row.get(2)?,
                    category: parse_column(row, 3)?,
                    importance: row.get(4)?,
                    difficulty: parse_column(row, 5)?,
                    description: row.get(6)?,
                },
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(concepts)
}

/// Retrieves the exercises of every concept in a document
pub fn get_exercises_for_document(
    document_id: i64,
    conn: &Connection,
) -> Result<Vec<StoredExercise>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, c.id, c.name, e.type, e.question, e.answer, e.estimated_time, e.difficulty
         FROM exercises e
         JOIN concepts c ON e.concept_id = c.id
         WHERE c.document_id = ?1
         ORDER BY e.id",
    )?;
    let exercises = stmt
        .query_map(params![document_id], |row| {
            Ok(StoredExercise {
                id: row.get(0)?,
                concept_id: row.get(1)?,
                concept: row.get(2)?,
                exercise: Exercise {
                    kind: parse_column(row, 3)?,
                    question: row.get(4)?,
                    answer: row.get(5)?,
                    estimated_time: row.get(6)?,
                    difficulty: parse_column(row, 7)?,
                },
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(exercises)
}

fn due_review_from_row(row: &Row) -> Result<DueReview> {
    Ok(DueReview {
        entry_id: row.get(0)?,
        concept_id: row.get(1)?,
        concept_name: row.get(2)?,
        entry: ReviewEntry {
            review_number: row.get(3)?,
            interval_days: row.get(4)?,
            scheduled_date: from_timestamp(row.get(5)?),
            completed: row.get(6)?,
            confidence_required: row.get(7)?,
        },
    })
}

const DUE_REVIEW_COLUMNS: &str = "r.id, r.concept_id, c.name, r.review_number, r.interval_days,
    r.scheduled_date, r.completed, r.confidence_required";

/// Retrieves reviews due at the current date that are not completed yet
///
/// Ordered by scheduled date (oldest first).
pub fn get_reviews_due(conn: &Connection) -> Result<Vec<DueReview>> {
    let current_timestamp = to_timestamp(get_current_date(conn)?);

    let mut stmt = conn.prepare(&format!(
        "SELECT {}
         FROM review_entries r
         JOIN concepts c ON r.concept_id = c.id
         WHERE r.completed = 0 AND r.scheduled_date <= ?1
         ORDER BY r.scheduled_date ASC, r.id ASC",
        DUE_REVIEW_COLUMNS
    ))?;

    let reviews = stmt
        .query_map(params![current_timestamp], due_review_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(reviews)
}

/// Retrieves the full review schedule of a concept
pub fn get_review_schedule(concept_id: i64, conn: &Connection) -> Result<Vec<DueReview>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}
         FROM review_entries r
         JOIN concepts c ON r.concept_id = c.id
         WHERE r.concept_id = ?1
         ORDER BY r.review_number ASC",
        DUE_REVIEW_COLUMNS
    ))?;

    let reviews = stmt
        .query_map(params![concept_id], due_review_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(reviews)
}

/// Marks a review entry as completed
pub fn complete_review(entry_id: i64, conn: &Connection) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE review_entries SET completed = 1 WHERE id = ?1 AND completed = 0",
        params![entry_id],
    )?;
    Ok(updated > 0)
}

/// Applies card review feedback: completes the concept's next pending entry.
///
/// Returns the completed entry, or `None` when the schedule is finished or
/// the concept is unknown.
pub fn review_card(review: &CardReview, conn: &Connection) -> Result<Option<DueReview>> {
    log::debug!(
        "Review for card {}: quality {:?}, easiness {:?}, success rate {:?}",
        review.card_id,
        review.quality_response,
        review.current_easiness,
        review.success_rate
    );

    let next = conn
        .query_row(
            &format!(
                "SELECT {}
                 FROM review_entries r
                 JOIN concepts c ON r.concept_id = c.id
                 WHERE r.concept_id = ?1 AND r.completed = 0
                 ORDER BY r.review_number ASC
                 LIMIT 1",
                DUE_REVIEW_COLUMNS
            ),
            params![review.card_id],
            due_review_from_row,
        )
        .optional()?;

    match next {
        Some(mut due) => {
            complete_review(due.entry_id, conn)?;
            due.entry.completed = true;
            Ok(Some(due))
        }
        None => Ok(None),
    }
}
