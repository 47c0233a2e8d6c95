use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// How an aggregation treats its identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// One account; a fetch failure fails the whole query
    Single,
    /// Several accounts; failures are isolated per account
    Collection,
}

/// Parameters for one abandonment aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbandonmentQuery {
    /// Accounts to fetch, in fetch order
    pub identifiers: Vec<String>,

    pub threshold_months: u32,

    /// Maximum number of records returned; `None` keeps every match
    pub result_bound: Option<usize>,

    /// Injected clock reading
    pub now: DateTime<Utc>,
}

impl AbandonmentQuery {
    /// Query over a single account: untruncated, untagged.
    pub fn single(identifier: impl Into<String>, threshold_months: u32, now: DateTime<Utc>) -> Self {
        Self {
            identifiers: vec![identifier.into()],
            threshold_months,
            result_bound: None,
            now,
        }
    }

    /// Query over several accounts, keeping the top `result_bound` records.
    pub fn collection<I, S>(
        identifiers: I,
        threshold_months: u32,
        result_bound: usize,
        now: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            threshold_months,
            result_bound: Some(result_bound),
            now,
        }
    }

    pub fn mode(&self) -> QueryMode {
        if self.identifiers.len() > 1 {
            QueryMode::Collection
        } else {
            QueryMode::Single
        }
    }

    /// Same identifiers and bound, different threshold.
    pub fn with_threshold(&self, threshold_months: u32) -> Self {
        Self {
            threshold_months,
            ..self.clone()
        }
    }
}

/// Validates AbandonmentQuery invariants
pub fn validate_query(query: &AbandonmentQuery) -> DomainResult<()> {
    if query.identifiers.is_empty() {
        return Err(DomainError::InvariantViolation(
            "At least one account identifier is required".to_string(),
        ));
    }
    if let Some(blank) = query.identifiers.iter().position(|id| id.trim().is_empty()) {
        return Err(DomainError::InvariantViolation(format!(
            "Account identifier at position {} is blank",
            blank
        )));
    }
    if query.threshold_months == 0 {
        return Err(DomainError::InvariantViolation(
            "Staleness threshold must be at least one month".to_string(),
        ));
    }
    if query.result_bound == Some(0) {
        return Err(DomainError::InvariantViolation(
            "Result bound must be positive".to_string(),
        ));
    }
    Ok(())
}
