use serde::{Deserialize, Serialize};

use super::repository::RepositoryRecord;

/// Aggregate figures for a displayed exhibition.
///
/// Derived data: always recomputed from the records, never stored on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitionStatistics {
    pub count: usize,
    pub total_popularity: u64,
    pub total_open_issues: u64,
}

impl ExhibitionStatistics {
    pub fn derive(records: &[RepositoryRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, record| Self {
            count: acc.count + 1,
            total_popularity: acc.total_popularity.saturating_add(record.popularity),
            total_open_issues: acc.total_open_issues.saturating_add(record.open_issue_count),
        })
    }
}
