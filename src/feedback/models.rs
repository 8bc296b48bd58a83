//! Data models for feedback records

use chrono::NaiveDate;

/// One row of customer feedback
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    /// Source identifier, when the CSV has an id column
    pub id: Option<String>,

    /// Date the feedback was submitted
    pub date: Option<NaiveDate>,

    /// Rating as written in the file (usually 1-5, not enforced)
    pub rating: Option<i64>,

    /// Feedback text, never empty after trimming
    pub text: String,
}

impl FeedbackRecord {
    /// Create a record with only text set
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            date: None,
            rating: None,
            text: text.into(),
        }
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether the rating falls inside the usual 1-5 scale
    pub fn rating_in_range(&self) -> bool {
        self.rating.map(|r| (1..=5).contains(&r)).unwrap_or(true)
    }
}
