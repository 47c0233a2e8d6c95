// events/types.rs
//
// Exhibition lifecycle events.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FetchCause;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// QUERY LIFECYCLE
// ============================================================================

/// Emitted when a session issues a new aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitionRequested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query_seq: u64,
    pub identifiers: Vec<String>,
    pub threshold_months: u32,
}

impl ExhibitionRequested {
    pub fn new(query_seq: u64, identifiers: Vec<String>, threshold_months: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query_seq,
            identifiers,
            threshold_months,
        }
    }
}

impl DomainEvent for ExhibitionRequested {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ExhibitionRequested" }
}

/// Emitted when a fresh exhibition replaces the displayed one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitionCurated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query_seq: u64,
    pub exhibit_count: usize,
    pub failure_count: usize,
}

impl ExhibitionCurated {
    pub fn new(query_seq: u64, exhibit_count: usize, failure_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query_seq,
            exhibit_count,
            failure_count,
        }
    }
}

impl DomainEvent for ExhibitionCurated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ExhibitionCurated" }
}

/// Emitted when a completed query lost the race to a newer one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleExhibitionDiscarded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query_seq: u64,
    pub latest_seq: u64,
}

impl StaleExhibitionDiscarded {
    pub fn new(query_seq: u64, latest_seq: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query_seq,
            latest_seq,
        }
    }
}

impl DomainEvent for StaleExhibitionDiscarded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "StaleExhibitionDiscarded" }
}

// ============================================================================
// SOURCE EVENTS
// ============================================================================

/// Emitted for each account whose listing failed during a collection aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFetchFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub identifier: String,
    pub cause: FetchCause,
}

impl SourceFetchFailed {
    pub fn new(identifier: String, cause: FetchCause) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            identifier,
            cause,
        }
    }
}

impl DomainEvent for SourceFetchFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SourceFetchFailed" }
}
