//! KPI computation over the full record set

use chrono::NaiveDate;
use std::fmt;

use crate::feedback::FeedbackRecord;

/// Aggregate statistics for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Number of loaded records
    pub total_count: usize,

    /// Number of records with a parsable rating
    pub rated_count: usize,

    /// Mean rating rounded to one decimal, `None` when nothing is rated
    pub average_rating: Option<f64>,

    /// Earliest feedback date
    pub earliest: Option<NaiveDate>,

    /// Latest feedback date
    pub latest: Option<NaiveDate>,
}

impl Statistics {
    /// Average rating formatted for display (`n/a` when absent)
    pub fn average_display(&self) -> AverageRating {
        AverageRating(self.average_rating)
    }
}

/// Display wrapper for an optional average rating
pub struct AverageRating(Option<f64>);

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(avg) => write!(f, "{:.1}", avg),
            None => write!(f, "n/a"),
        }
    }
}

/// Compute statistics over every record, not just the sample.
pub fn compute_stats(records: &[FeedbackRecord]) -> Statistics {
    let ratings: Vec<i64> = records.iter().filter_map(|r| r.rating).collect();

    let average_rating = if ratings.is_empty() {
        None
    } else {
        let sum: f64 = ratings.iter().map(|&r| r as f64).sum();
        Some(round_one_decimal(sum / ratings.len() as f64))
    };

    let dates = records.iter().filter_map(|r| r.date);
    let earliest = dates.clone().min();
    let latest = dates.max();

    Statistics {
        total_count: records.len(),
        rated_count: ratings.len(),
        average_rating,
        earliest,
        latest,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
