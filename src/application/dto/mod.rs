// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are presentation-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain values only (never TO)

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{poetic_caption, CuratedCollection, ExhibitionStatistics, RepositoryRecord};
use crate::error::FetchError;
use crate::services::{Exhibition, Selection, SessionSnapshot};

const MISSING_DESCRIPTION: &str = "No artist's statement provided";

// ============================================================================
// EXHIBIT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitDto {
    pub id: u64,
    pub name: String,
    pub owner: Option<String>,
    pub description: String,
    pub caption: String,
    pub created_year: i32,
    /// Last update, as YYYY-MM-DD
    pub last_touched: String,
    pub admirers: u64,
    pub unresolved_regrets: u64,
    pub url: String,
}

impl ExhibitDto {
    /// `caption_choice` picks the caption phrase (see `poetic_caption`)
    pub fn from_record(record: &RepositoryRecord, now: DateTime<Utc>, caption_choice: usize) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            owner: record.owner_identifier.clone(),
            description: record
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
            caption: poetic_caption(record, now, caption_choice),
            created_year: record.created_at.year(),
            last_touched: record.updated_at.format("%Y-%m-%d").to_string(),
            admirers: record.popularity,
            unresolved_regrets: record.open_issue_count,
            url: record.external_url.clone(),
        }
    }
}

// ============================================================================
// STATISTICS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsDto {
    pub abandoned_dreams: usize,
    pub lost_stars: u64,
    pub unfinished_business: u64,
}

impl From<ExhibitionStatistics> for StatisticsDto {
    fn from(stats: ExhibitionStatistics) -> Self {
        Self {
            abandoned_dreams: stats.count,
            lost_stars: stats.total_popularity,
            unfinished_business: stats.total_open_issues,
        }
    }
}

// ============================================================================
// EXHIBITION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDto {
    pub account: String,
    pub reason: String,
}

impl From<&FetchError> for FailureDto {
    fn from(err: &FetchError) -> Self {
        Self {
            account: err.identifier.clone(),
            reason: err.cause.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitionDto {
    pub query_seq: u64,
    pub threshold_months: u32,
    pub exhibits: Vec<ExhibitDto>,
    pub statistics: StatisticsDto,
    pub failures: Vec<FailureDto>,
}

impl ExhibitionDto {
    /// Captions rotate from `caption_seed` through the exhibits in rank order
    pub fn from_exhibition(exhibition: &Exhibition, caption_seed: usize) -> Self {
        let now = exhibition.curated_at.unwrap_or_else(Utc::now);
        Self {
            query_seq: exhibition.query_seq,
            threshold_months: exhibition.threshold_months,
            exhibits: exhibition
                .records
                .iter()
                .enumerate()
                .map(|(i, r)| ExhibitDto::from_record(r, now, caption_seed.wrapping_add(i)))
                .collect(),
            statistics: exhibition.statistics.into(),
            failures: exhibition.failures.iter().map(FailureDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub threshold_months: u32,
    /// "account" or "collection"
    pub selection_kind: Option<String>,
    /// Account name or collection title
    pub selection_label: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub exhibition: ExhibitionDto,
}

impl SessionDto {
    pub fn from_snapshot(snapshot: &SessionSnapshot, caption_seed: usize) -> Self {
        let (selection_kind, selection_label) = match &snapshot.selection {
            Some(Selection::Account(account)) => (Some("account"), Some(account.clone())),
            Some(Selection::Collection(key)) => (
                Some("collection"),
                Some(
                    crate::domain::find_collection(key)
                        .map(|c| c.title.to_string())
                        .unwrap_or_else(|| key.clone()),
                ),
            ),
            None => (None, None),
        };

        Self {
            threshold_months: snapshot.threshold_months,
            selection_kind: selection_kind.map(str::to_string),
            selection_label,
            loading: snapshot.loading,
            error: snapshot.error.clone(),
            exhibition: ExhibitionDto::from_exhibition(&snapshot.exhibition, caption_seed),
        }
    }
}

// ============================================================================
// COLLECTION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDto {
    pub key: String,
    pub title: String,
    pub description: String,
    pub accounts: Vec<String>,
}

impl From<&CuratedCollection> for CollectionDto {
    fn from(collection: &CuratedCollection) -> Self {
        Self {
            key: collection.key.to_string(),
            title: collection.title.to_string(),
            description: collection.description.to_string(),
            accounts: collection.accounts.iter().map(|a| a.to_string()).collect(),
        }
    }
}
