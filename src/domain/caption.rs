use chrono::{DateTime, Utc};

use super::repository::RepositoryRecord;

const PHRASE_COUNT: usize = 4;

/// Whole 365-day years between the last update and `now`, never negative.
fn years_dormant(record: &RepositoryRecord, now: DateTime<Utc>) -> i64 {
    (now - record.updated_at).num_days().max(0) / 365
}

/// Picks a caption for an exhibit.
///
/// Deterministic: the caller supplies `choice` (a seed, a counter, an index),
/// reduced modulo the phrase count.
pub fn poetic_caption(record: &RepositoryRecord, now: DateTime<Utc>, choice: usize) -> String {
    match choice % PHRASE_COUNT {
        0 => format!(
            "Abandoned {} years ago, this masterpiece awaits resurrection.",
            years_dormant(record, now)
        ),
        1 => "Countless commits lie dormant in eternal slumber.".to_string(),
        2 => format!(
            "Once loved by {} souls, now forgotten by time.",
            record.popularity
        ),
        _ => "The developer's ambition exceeded their dedication.".to_string(),
    }
}
