//! Abandonment classification.
//!
//! A repository is abandoned when it is not a fork and its last activity
//! precedes `now` minus the staleness threshold, measured in calendar months.

use chrono::{DateTime, Months, Utc};

use super::entity::RepositoryRecord;

/// Computes the instant that separates stale repositories from active ones.
///
/// Subtracts calendar months: 2024-03-15 minus one month is 2024-02-15.
/// When the target month is shorter, the day is clamped to its last day
/// (2024-03-31 minus one month is 2024-02-29). This differs from rolling the
/// overflow into the next month, which would give 2024-03-02. A threshold
/// reaching past the representable range yields the earliest representable
/// instant, so no record qualifies.
pub fn staleness_cutoff(now: DateTime<Utc>, threshold_months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(threshold_months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// True iff `record` is a non-fork last updated strictly before the cutoff.
pub fn is_abandoned(record: &RepositoryRecord, threshold_months: u32, now: DateTime<Utc>) -> bool {
    !record.is_fork && record.updated_at < staleness_cutoff(now, threshold_months)
}
