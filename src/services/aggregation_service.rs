// src/services/aggregation_service.rs
//
// Ranked Aggregator - Orchestration Layer
//
// Pipeline: fetch (one account, or several in order) → abandonment filter →
// owner tagging (several accounts only) → merge → stable sort by popularity →
// truncate.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::{
    is_abandoned, validate_query, AbandonmentQuery, ExhibitionStatistics, QueryMode,
    RepositoryRecord,
};
use crate::error::{AppError, AppResult, FetchError};
use crate::events::{EventBus, SourceFetchFailed};
use crate::repositories::RepositorySource;
use crate::services::throttle::{FetchQueue, ThrottlePolicy};

/// Ranked records plus the accounts that could not be listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    /// Sorted by popularity, descending
    pub records: Vec<RepositoryRecord>,
    /// Isolated per-account failures, in fetch order
    pub failures: Vec<FetchError>,
}

impl AggregationResult {
    pub fn failure_for(&self, identifier: &str) -> Option<&FetchError> {
        self.failures.iter().find(|f| f.identifier == identifier)
    }

    pub fn statistics(&self) -> ExhibitionStatistics {
        ExhibitionStatistics::derive(&self.records)
    }
}

pub struct RankedAggregator {
    source: Arc<dyn RepositorySource>,
    throttle: Arc<dyn ThrottlePolicy>,
    event_bus: Arc<EventBus>,
    page_size: u32,
}

impl RankedAggregator {
    pub fn new(
        source: Arc<dyn RepositorySource>,
        throttle: Arc<dyn ThrottlePolicy>,
        event_bus: Arc<EventBus>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            throttle,
            event_bus,
            page_size,
        }
    }

    /// Runs one aggregation.
    ///
    /// With a single identifier any fetch failure fails the whole call.
    /// With several, failures are recorded in the result and the remaining
    /// accounts are still fetched.
    pub async fn aggregate(&self, query: &AbandonmentQuery) -> AppResult<AggregationResult> {
        validate_query(query)?;

        let (merged, failures) = match query.mode() {
            QueryMode::Single => (self.fetch_single(query).await?, Vec::new()),
            QueryMode::Collection => self.fetch_collection(query).await,
        };

        Ok(AggregationResult {
            records: rank(merged, query.result_bound),
            failures,
        })
    }

    async fn fetch_single(&self, query: &AbandonmentQuery) -> AppResult<Vec<RepositoryRecord>> {
        let identifier = &query.identifiers[0];

        let listing = self
            .source
            .list_repositories(identifier, self.page_size)
            .await
            .map_err(|e| AppError::Fetch(FetchError::new(identifier.as_str(), e.cause)))?;

        log::debug!("'{}' listed {} repositories", identifier, listing.len());

        Ok(listing
            .into_iter()
            .filter(|r| is_abandoned(r, query.threshold_months, query.now))
            .collect())
    }

    async fn fetch_collection(
        &self,
        query: &AbandonmentQuery,
    ) -> (Vec<RepositoryRecord>, Vec<FetchError>) {
        let mut merged = Vec::new();
        let mut failures = Vec::new();
        let mut queue = FetchQueue::new(&query.identifiers, self.throttle.as_ref());

        while let Some(identifier) = queue.next().await {
            match self.source.list_repositories(&identifier, self.page_size).await {
                Ok(listing) => {
                    queue.record(true);
                    let before = merged.len();
                    merged.extend(
                        listing
                            .iter()
                            .filter(|r| is_abandoned(r, query.threshold_months, query.now))
                            .map(|r| r.with_owner(&identifier)),
                    );
                    log::debug!(
                        "'{}' listed {} repositories, {} abandoned ({} accounts left)",
                        identifier,
                        listing.len(),
                        merged.len() - before,
                        queue.remaining()
                    );
                }
                Err(err) => {
                    queue.record(false);
                    log::warn!("Skipping '{}': {}", identifier, err.cause);
                    self.event_bus
                        .emit(SourceFetchFailed::new(identifier.clone(), err.cause.clone()));
                    failures.push(FetchError::new(identifier, err.cause));
                }
            }
        }

        (merged, failures)
    }
}

/// Stable descending sort by popularity, then truncation.
///
/// Equal popularity keeps merge order: account order first, listing order
/// within an account.
fn rank(mut records: Vec<RepositoryRecord>, bound: Option<usize>) -> Vec<RepositoryRecord> {
    records.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    if let Some(bound) = bound {
        records.truncate(bound);
    }
    records
}
