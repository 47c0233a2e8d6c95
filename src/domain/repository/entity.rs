use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository listing entry, immutable as received from a source.
///
/// `owner_identifier` is only populated when a record is merged from several
/// accounts; a single-account listing leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Source-assigned identifier, unique within one listing
    pub id: u64,

    pub name: String,

    pub description: Option<String>,

    pub is_fork: bool,

    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,

    /// Star count, the ranking key
    pub popularity: u64,

    pub open_issue_count: u64,

    pub external_url: String,

    pub owner_identifier: Option<String>,
}

impl RepositoryRecord {
    /// Returns a copy of this record attributed to `owner`.
    ///
    /// The source record is left untouched.
    pub fn with_owner(&self, owner: &str) -> Self {
        Self {
            owner_identifier: Some(owner.to_string()),
            ..self.clone()
        }
    }
}

impl std::fmt::Display for RepositoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.owner_identifier {
            Some(owner) => write!(f, "{}/{}", owner, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
