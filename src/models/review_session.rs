//! Review session over the entries that are due today.
//! Skipped reviews come back in the next round until each one is completed.

use crate::database::db::{self, DueReview};
use crate::models::CardReview;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Manages a review session with multiple rounds.
pub struct ReviewSession {
    pub reviews: Vec<(DueReview, bool)>,
    pub current_round: Vec<usize>,
    pub current_index: usize,
    pub show_details: bool,
    pub conn: Arc<Mutex<Connection>>,
    pub round_number: usize,
}

impl ReviewSession {
    pub fn new(reviews: Vec<DueReview>, conn: Arc<Mutex<Connection>>) -> Self {
        let indices: Vec<usize> = (0..reviews.len()).collect();

        Self {
            reviews: reviews.into_iter().map(|r| (r, false)).collect(),
            current_round: indices,
            current_index: 0,
            show_details: false,
            conn,
            round_number: 1,
        }
    }

    pub fn current_review(&self) -> Option<&DueReview> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.reviews.get(idx).map(|(review, _)| review))
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    fn advance(&mut self) {
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
            self.show_details = false;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the reviews that were skipped.
    fn start_next_round(&mut self) {
        let skipped: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| self.reviews.get(idx).is_some_and(|(_, done)| !done))
            .collect();

        if !skipped.is_empty() {
            self.current_round = skipped;
            self.current_index = 0;
            self.show_details = false;
            self.round_number += 1;
        }
    }

    /// Records feedback for the current review and moves on.
    ///
    /// The feedback goes through `db::review_card`, which completes the
    /// concept's earliest pending entry; that entry is the one marked done here.
    pub fn complete_current(&mut self, quality: u8) -> rusqlite::Result<()> {
        if let Some(review) = self.current_review() {
            let feedback = CardReview {
                card_id: review.concept_id,
                quality_response: Some(quality),
                current_interval: Some(review.entry.interval_days),
                review_count: Some(review.entry.review_number.saturating_sub(1)),
                ..Default::default()
            };

            let completed = {
                let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
                db::review_card(&feedback, &conn)?
            };

            if let Some(completed) = completed {
                if let Some((review, done)) = self
                    .reviews
                    .iter_mut()
                    .find(|(r, _)| r.entry_id == completed.entry_id)
                {
                    review.entry.completed = true;
                    *done = true;
                }
            }
        }
        self.advance();
        Ok(())
    }

    /// Leaves the current review for the next round.
    pub fn skip_current(&mut self) {
        self.advance();
    }

    pub fn completed_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| self.reviews.get(idx).is_some_and(|(_, done)| *done))
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.completed_count()
    }

    pub fn is_completed(&self) -> bool {
        self.current_round.is_empty() || self.completed_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} reviews", self.round_number, self.total_count())
        } else {
            format!(
                "Round {}: {} skipped reviews",
                self.round_number,
                self.total_count()
            )
        }
    }
}
