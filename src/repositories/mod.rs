// src/repositories/mod.rs
//
// Repository source layer
//
// CRITICAL RULES:
// - Sources are DUMB adapters over an external listing
// - NO filtering, NO sorting, NO retries
// - One page per call
// - Failures are reported per account, never swallowed

pub mod repository_source;

pub use repository_source::RepositorySource;

#[cfg(test)]
pub use repository_source::MockRepositorySource;
