// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod caption;
pub mod collection;
pub mod query;
pub mod repository;
pub mod statistics;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Repository records (as received from a source) and abandonment classification
pub use repository::{is_abandoned, staleness_cutoff, RepositoryRecord};

// Query
pub use query::{validate_query, AbandonmentQuery, QueryMode};

// Statistics (Derived Data)
pub use statistics::ExhibitionStatistics;

// Curated collections
pub use collection::{find_collection, CuratedCollection, CURATED_COLLECTIONS};

// Captions
pub use caption::poetic_caption;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
