//! Fixed-table spaced repetition scheduler.
//!
//! Every concept gets the same review ladder:
//! - Reviews happen 1, 3, 7, 14, 30 and 60 days after the schedule is created
//! - The first review requires 70% confidence, each later one 5 points more
//! - Nothing depends on the concept itself, so scheduling cannot fail
//!
//! `next_interval` is a separate step lookup from a 0-1 mastery level to the
//! number of days until the next review. There is no easiness factor.

use super::ReviewEntry;
use chrono::{DateTime, Duration, Utc};

/// Days between schedule creation and each review, in order.
pub const REVIEW_INTERVALS: [u32; 6] = [1, 3, 7, 14, 30, 60];

const BASE_CONFIDENCE: f64 = 0.7;
const CONFIDENCE_STEP: f64 = 0.05;

/// Mastery thresholds, highest first, with the interval each one unlocks.
const MASTERY_STEPS: [(f64, u32); 4] = [(0.9, 30), (0.7, 14), (0.5, 7), (0.3, 3)];
const MIN_INTERVAL: u32 = 1;

/// Confidence required to pass the given 1-based review.
pub fn confidence_required(review_number: u32) -> f64 {
    BASE_CONFIDENCE + CONFIDENCE_STEP * review_number.saturating_sub(1) as f64
}

/// Builds the review schedule for a concept, starting from `now`.
pub fn review_schedule(concept_name: &str, now: DateTime<Utc>) -> Vec<ReviewEntry> {
    log::debug!("Scheduling reviews for '{}'", concept_name);

    REVIEW_INTERVALS
        .iter()
        .enumerate()
        .map(|(i, &interval)| {
            let review_number = i as u32 + 1;
            ReviewEntry {
                review_number,
                interval_days: interval,
                scheduled_date: now + Duration::days(interval as i64),
                completed: false,
                confidence_required: Some(confidence_required(review_number)),
            }
        })
        .collect()
}

/// Maps a mastery level (0.0 - 1.0) to the days until the next review.
pub fn next_interval(mastery_level: f64) -> u32 {
    MASTERY_STEPS
        .iter()
        .find(|(threshold, _)| mastery_level >= *threshold)
        .map(|&(_, days)| days)
        .unwrap_or(MIN_INTERVAL)
}

/// Date of the next review for the given mastery level.
pub fn next_review_date(mastery_level: f64, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(next_interval(mastery_level) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_has_six_entries() {
        let now = Utc::now();
        let schedule = review_schedule("grammar", now);

        let intervals: Vec<u32> = schedule.iter().map(|e| e.interval_days).collect();
        assert_eq!(intervals, vec![1, 3, 7, 14, 30, 60]);

        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.review_number, i as u32 + 1);
            assert!(!entry.completed);
            assert_eq!(
                entry.scheduled_date,
                now + Duration::days(entry.interval_days as i64)
            );
        }
    }

    #[test]
    fn test_confidence_increases_by_five_points() {
        let schedule = review_schedule("anything", Utc::now());
        let confidences: Vec<f64> = schedule
            .iter()
            .map(|e| e.confidence_required.unwrap())
            .collect();

        assert!((confidences[0] - 0.70).abs() < 1e-9);
        for pair in confidences.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!((pair[1] - pair[0] - 0.05).abs() < 1e-9);
        }
        assert!((confidences[5] - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_ignores_concept_content() {
        let now = Utc::now();
        assert_eq!(review_schedule("", now), review_schedule("Reading Comprehension", now));
    }

    #[test]
    fn test_next_interval_thresholds() {
        assert_eq!(next_interval(0.95), 30);
        assert_eq!(next_interval(0.9), 30);
        assert_eq!(next_interval(0.89), 14);
        assert_eq!(next_interval(0.7), 14);
        assert_eq!(next_interval(0.5), 7);
        assert_eq!(next_interval(0.4), 3);
        assert_eq!(next_interval(0.3), 3);
        assert_eq!(next_interval(0.29), 1);
        assert_eq!(next_interval(0.0), 1);
    }

    #[test]
    fn test_next_interval_monotonic() {
        let levels = [0.0, 0.1, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
        for pair in levels.windows(2) {
            assert!(next_interval(pair[0]) <= next_interval(pair[1]));
        }
    }

    #[test]
    fn test_next_interval_out_of_range() {
        assert_eq!(next_interval(-0.5), 1);
        assert_eq!(next_interval(1.5), 30);
        assert_eq!(next_interval(f64::NAN), 1);
    }

    #[test]
    fn test_next_review_date() {
        let now = Utc::now();
        assert_eq!(next_review_date(0.95, now), now + Duration::days(30));
    }
}
