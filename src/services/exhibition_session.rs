// src/services/exhibition_session.rs
//
// Exhibition Session - caller-held "current exhibition"
//
// CRITICAL RULES:
// - Every query gets a fresh, strictly increasing sequence number
// - Only the latest query may replace the current exhibition
// - Late results from superseded queries are discarded, never applied
// - The state lock is never held across an await or an event emission

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{
    find_collection, validate_query, AbandonmentQuery, DomainError, ExhibitionStatistics,
    RepositoryRecord,
};
use crate::error::{AppError, AppResult, FetchError};
use crate::events::{EventBus, ExhibitionCurated, ExhibitionRequested, StaleExhibitionDiscarded};
use crate::services::aggregation_service::{AggregationResult, RankedAggregator};

/// Source of "now" for staleness cutoffs.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// What the session is currently displaying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selection {
    /// A single account searched by name
    Account(String),
    /// A curated collection, by key
    Collection(String),
}

/// The result currently on display, with its derived statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Exhibition {
    pub query_seq: u64,
    pub threshold_months: u32,
    pub curated_at: Option<DateTime<Utc>>,
    pub records: Vec<RepositoryRecord>,
    pub failures: Vec<FetchError>,
    pub statistics: ExhibitionStatistics,
}

impl Exhibition {
    fn from_result(query_seq: u64, query: &AbandonmentQuery, result: AggregationResult) -> Self {
        let statistics = result.statistics();
        Self {
            query_seq,
            threshold_months: query.threshold_months,
            curated_at: Some(query.now),
            records: result.records,
            failures: result.failures,
            statistics,
        }
    }

    fn empty(query_seq: u64, query: &AbandonmentQuery) -> Self {
        Self {
            query_seq,
            threshold_months: query.threshold_months,
            curated_at: Some(query.now),
            ..Self::default()
        }
    }
}

/// How a finished query affected the session.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The query was still the latest; its exhibition is now current
    Applied(Exhibition),
    /// A newer query was issued meanwhile; this result was dropped
    Superseded { query_seq: u64, latest_seq: u64 },
}

/// Point-in-time copy of the session for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub threshold_months: u32,
    pub selection: Option<Selection>,
    pub exhibition: Exhibition,
    pub error: Option<String>,
    pub loading: bool,
}

struct SessionState {
    threshold_months: u32,
    selection: Option<Selection>,
    exhibition: Exhibition,
    error: Option<String>,
    latest_seq: u64,
    in_flight: Option<u64>,
}

pub struct ExhibitionSession {
    aggregator: Arc<RankedAggregator>,
    event_bus: Arc<EventBus>,
    clock: Clock,
    collection_result_bound: usize,
    state: Mutex<SessionState>,
}

impl ExhibitionSession {
    pub fn new(
        aggregator: Arc<RankedAggregator>,
        event_bus: Arc<EventBus>,
        threshold_months: u32,
        collection_result_bound: usize,
    ) -> Self {
        Self {
            aggregator,
            event_bus,
            clock: Arc::new(Utc::now),
            collection_result_bound,
            state: Mutex::new(SessionState {
                threshold_months,
                selection: None,
                exhibition: Exhibition::default(),
                error: None,
                latest_seq: 0,
                in_flight: None,
            }),
        }
    }

    /// Replace the wall clock, e.g. with a fixed instant.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Search a single account. Supersedes anything in flight.
    pub async fn explore_account(&self, account: &str) -> AppResult<QueryOutcome> {
        self.run(Selection::Account(account.trim().to_string())).await
    }

    /// Browse a curated collection. Supersedes anything in flight.
    pub async fn open_collection(&self, key: &str) -> AppResult<QueryOutcome> {
        if find_collection(key).is_none() {
            return Err(AppError::UnknownCollection(key.to_string()));
        }
        self.run(Selection::Collection(key.to_string())).await
    }

    /// Store a new threshold and, if something is on display, re-derive it
    /// against the same selection.
    pub async fn change_threshold(&self, threshold_months: u32) -> AppResult<Option<QueryOutcome>> {
        if threshold_months == 0 {
            return Err(DomainError::InvariantViolation(
                "Staleness threshold must be at least one month".to_string(),
            )
            .into());
        }

        let active = {
            let mut state = self.lock();
            state.threshold_months = threshold_months;
            state.selection.clone()
        };

        match active {
            Some(selection) => self.run(selection).await.map(Some),
            None => Ok(None),
        }
    }

    /// Back to the collection list: clears the display and abandons any
    /// in-flight query.
    pub fn close_selection(&self) {
        let mut state = self.lock();
        state.latest_seq += 1;
        state.selection = None;
        state.exhibition = Exhibition::default();
        state.error = None;
        state.in_flight = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            threshold_months: state.threshold_months,
            selection: state.selection.clone(),
            exhibition: state.exhibition.clone(),
            error: state.error.clone(),
            loading: state.in_flight.is_some(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    pub fn threshold_months(&self) -> u32 {
        self.lock().threshold_months
    }

    // ========================================================================
    // INTERNAL: query lifecycle
    // ========================================================================

    async fn run(&self, selection: Selection) -> AppResult<QueryOutcome> {
        let (query_seq, query) = self.begin(selection)?;

        log::info!(
            "Query #{}: {:?}, threshold {} months",
            query_seq,
            query.identifiers,
            query.threshold_months
        );
        self.event_bus.emit(ExhibitionRequested::new(
            query_seq,
            query.identifiers.clone(),
            query.threshold_months,
        ));

        let result = self.aggregator.aggregate(&query).await;
        self.complete(query_seq, &query, result)
    }

    /// Builds the query and claims the next sequence number.
    /// An invalid query leaves the session untouched.
    fn begin(&self, selection: Selection) -> AppResult<(u64, AbandonmentQuery)> {
        let mut state = self.lock();
        let now = (self.clock)();

        let query = match &selection {
            Selection::Account(account) => {
                AbandonmentQuery::single(account.clone(), state.threshold_months, now)
            }
            Selection::Collection(key) => {
                let collection =
                    find_collection(key).ok_or_else(|| AppError::UnknownCollection(key.clone()))?;
                AbandonmentQuery::collection(
                    collection.accounts.iter().copied(),
                    state.threshold_months,
                    self.collection_result_bound,
                    now,
                )
            }
        };
        validate_query(&query)?;

        state.latest_seq += 1;
        state.selection = Some(selection);
        state.error = None;
        state.in_flight = Some(state.latest_seq);

        Ok((state.latest_seq, query))
    }

    fn complete(
        &self,
        query_seq: u64,
        query: &AbandonmentQuery,
        result: AppResult<AggregationResult>,
    ) -> AppResult<QueryOutcome> {
        let mut state = self.lock();

        if query_seq != state.latest_seq {
            let latest_seq = state.latest_seq;
            drop(state);

            log::warn!(
                "Discarding result of query #{} (latest is #{})",
                query_seq,
                latest_seq
            );
            self.event_bus
                .emit(StaleExhibitionDiscarded::new(query_seq, latest_seq));
            return Ok(QueryOutcome::Superseded {
                query_seq,
                latest_seq,
            });
        }

        state.in_flight = None;
        match result {
            Ok(result) => {
                let exhibition = Exhibition::from_result(query_seq, query, result);
                state.exhibition = exhibition.clone();
                state.error = None;
                drop(state);

                log::info!(
                    "Query #{} curated {} exhibits ({} accounts failed)",
                    query_seq,
                    exhibition.statistics.count,
                    exhibition.failures.len()
                );
                self.event_bus.emit(ExhibitionCurated::new(
                    query_seq,
                    exhibition.statistics.count,
                    exhibition.failures.len(),
                ));
                Ok(QueryOutcome::Applied(exhibition))
            }
            Err(err) => {
                state.exhibition = Exhibition::empty(query_seq, query);
                state.error = Some(err.to_string());
                drop(state);

                log::warn!("Query #{} failed: {}", query_seq, err);
                Err(err)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
