// src/lib.rs
// RepoMuseum - curated exhibitions of abandoned repositories
//
// Architecture:
// - Domain-centric: classification, ranking inputs and statistics are pure
// - Sources are injected: the code forge sits behind `RepositorySource`
// - Explicit: every query is a value, every failure is a value
// - Observable: lifecycle facts go through the event bus and `log`

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    find_collection,
    is_abandoned,
    poetic_caption,
    staleness_cutoff,
    validate_query,
    // Query
    AbandonmentQuery,
    // Collections
    CuratedCollection,
    // Statistics
    ExhibitionStatistics,
    QueryMode,
    // Records
    RepositoryRecord,
    CURATED_COLLECTIONS,
};

// ============================================================================
// PUBLIC API - Error Types & Configuration
// ============================================================================

pub use config::{ConfigError, MuseumConfig, ThrottleMode};
pub use error::{AppError, AppResult, FetchCause, FetchError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    ExhibitionCurated,
    ExhibitionRequested,
    SourceFetchFailed,
    StaleExhibitionDiscarded,
};

// ============================================================================
// PUBLIC API - Sources & Services
// ============================================================================

pub use repositories::RepositorySource;

pub use services::{
    AdaptiveBackoff,
    AggregationResult,
    Exhibition,
    ExhibitionSession,
    FixedDelay,
    QueryOutcome,
    RankedAggregator,
    Selection,
    SessionSnapshot,
    ThrottlePolicy,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::GitHubClient;
