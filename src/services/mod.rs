// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod aggregation_service;
pub mod exhibition_session;
pub mod throttle;

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
mod aggregation_service_tests;


// Re-export all services and their types
pub use aggregation_service::{
    AggregationResult,
    RankedAggregator,
};

pub use exhibition_session::{
    Clock,
    Exhibition,
    ExhibitionSession,
    QueryOutcome,
    Selection,
    SessionSnapshot,
};

pub use throttle::{
    AdaptiveBackoff,
    FetchQueue,
    FixedDelay,
    ThrottlePolicy,
};
