// src/error/types.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a listing could not be obtained from the code forge.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchCause {
    #[error("network failure: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed listing: {0}")]
    Malformed(String),
}

/// A listing failure for one account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Failed to fetch repositories for '{identifier}': {cause}")]
pub struct FetchError {
    pub identifier: String,
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(identifier: impl Into<String>, cause: FetchCause) -> Self {
        Self {
            identifier: identifier.into(),
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvariantViolation(reason) => AppError::InvalidQuery { reason },
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
