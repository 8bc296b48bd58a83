//! Deterministic sampling of records for the prompt

use clap::ValueEnum;
use std::cmp::Reverse;

use crate::feedback::FeedbackRecord;

/// Default number of records sent to the model
pub const DEFAULT_SAMPLE_SIZE: usize = 200;

/// How the sample is chosen from the full record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SampleStrategy {
    /// First N records in file order
    #[default]
    Prefix,
    /// Most recent N records by date; undated records go last
    Newest,
}

/// Pick at most `size` records. The input is never reordered in place.
pub fn sample(
    records: &[FeedbackRecord],
    size: usize,
    strategy: SampleStrategy,
) -> Vec<&FeedbackRecord> {
    match strategy {
        SampleStrategy::Prefix => records.iter().take(size).collect(),
        SampleStrategy::Newest => {
            let mut ordered: Vec<&FeedbackRecord> = records.iter().collect();
            // Stable sort keeps file order among equal dates.
            ordered.sort_by_key(|r| (r.date.is_none(), Reverse(r.date)));
            ordered.truncate(size);
            ordered
        }
    }
}
