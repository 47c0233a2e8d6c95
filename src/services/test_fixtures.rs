// src/services/test_fixtures.rs
//
// Deterministic sources and records for service tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::domain::RepositoryRecord;
use crate::error::{FetchCause, FetchError};
use crate::events::EventBus;
use crate::repositories::RepositorySource;
use crate::services::aggregation_service::RankedAggregator;
use crate::services::throttle::FixedDelay;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn repo(id: u64, popularity: u64, updated_at: DateTime<Utc>) -> RepositoryRecord {
    RepositoryRecord {
        id,
        name: format!("repo-{}", id),
        description: Some(format!("Project number {}", id)),
        is_fork: false,
        created_at: at(2010, 1, 1),
        updated_at,
        popularity,
        open_issue_count: id % 5,
        external_url: format!("https://github.com/someone/repo-{}", id),
        owner_identifier: None,
    }
}

pub fn fork(id: u64, popularity: u64, updated_at: DateTime<Utc>) -> RepositoryRecord {
    RepositoryRecord {
        is_fork: true,
        ..repo(id, popularity, updated_at)
    }
}

/// Serves canned listings and records every call in order.
/// Unknown accounts answer with a 404.
#[derive(Default)]
pub struct StubSource {
    listings: HashMap<String, Result<Vec<RepositoryRecord>, FetchCause>>,
    calls: Mutex<Vec<(String, u32)>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, account: &str, records: Vec<RepositoryRecord>) -> Self {
        self.listings.insert(account.to_string(), Ok(records));
        self
    }

    pub fn with_failure(mut self, account: &str, cause: FetchCause) -> Self {
        self.listings.insert(account.to_string(), Err(cause));
        self
    }

    pub fn called_accounts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(account, _)| account.clone())
            .collect()
    }

    pub fn page_sizes(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(_, size)| *size).collect()
    }

    /// Highest number of listings that were ever in progress at once
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositorySource for StubSource {
    async fn list_repositories(
        &self,
        account: &str,
        page_size: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((account.to_string(), page_size));

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        match self.listings.get(account) {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(cause)) => Err(FetchError::new(account, cause.clone())),
            None => Err(FetchError::new(account, FetchCause::Status(404))),
        }
    }
}

/// Blocks a listing until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// A StubSource whose gated accounts wait on their `Gate`.
pub struct GatedSource {
    inner: StubSource,
    gates: HashMap<String, Arc<Gate>>,
}

impl GatedSource {
    pub fn new(inner: StubSource) -> Self {
        Self {
            inner,
            gates: HashMap::new(),
        }
    }

    pub fn gate(&mut self, account: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.insert(account.to_string(), Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl RepositorySource for GatedSource {
    async fn list_repositories(
        &self,
        account: &str,
        page_size: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError> {
        if let Some(gate) = self.gates.get(account) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.inner.list_repositories(account, page_size).await
    }
}

/// Aggregator with no inter-fetch delay and a private event bus.
pub fn aggregator(source: Arc<dyn RepositorySource>) -> RankedAggregator {
    aggregator_with_bus(source, Arc::new(EventBus::new()))
}

pub fn aggregator_with_bus(
    source: Arc<dyn RepositorySource>,
    event_bus: Arc<EventBus>,
) -> RankedAggregator {
    RankedAggregator::new(
        source,
        Arc::new(FixedDelay::new(Duration::ZERO)),
        event_bus,
        100,
    )
}
