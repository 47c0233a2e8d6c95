// src/integrations/github/client.rs
//
// GitHub REST Integration
//
// ARCHITECTURE:
// - Lists one page of an account's public repositories
// - Maps the wire payload → RepositoryRecord (no filtering, no sorting)
// - Unauthenticated: subject to the public rate limits
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Every failure is reported against the requested account
// - No retries and no follow-up pagination

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::config::MuseumConfig;
use crate::domain::RepositoryRecord;
use crate::error::{AppError, AppResult, FetchCause, FetchError};
use crate::repositories::RepositorySource;

/// Repository entry as returned by `GET /users/{account}/repos`
#[derive(Debug, Deserialize)]
struct RepoPayload {
    id: u64,
    name: String,
    description: Option<String>,
    fork: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    stargazers_count: u64,
    open_issues_count: u64,
    html_url: String,
}

impl From<RepoPayload> for RepositoryRecord {
    fn from(payload: RepoPayload) -> Self {
        RepositoryRecord {
            id: payload.id,
            name: payload.name,
            description: payload.description,
            is_fork: payload.fork,
            created_at: payload.created_at,
            updated_at: payload.updated_at,
            popularity: payload.stargazers_count,
            open_issue_count: payload.open_issues_count,
            external_url: payload.html_url,
            owner_identifier: None,
        }
    }
}

/// Parses a listing body into records, preserving listing order.
///
/// Anything other than a JSON array of repository objects is malformed,
/// including the `{"message": ...}` objects the API sends alongside errors.
pub fn parse_listing(account: &str, body: &str) -> Result<Vec<RepositoryRecord>, FetchError> {
    let payloads: Vec<RepoPayload> = serde_json::from_str(body)
        .map_err(|e| FetchError::new(account, FetchCause::Malformed(e.to_string())))?;

    Ok(payloads.into_iter().map(RepositoryRecord::from).collect())
}

/// GitHub API Client
pub struct GitHubClient {
    base_url: Url,
    http_client: Client,
}

impl GitHubClient {
    /// Create a client from configuration
    pub fn new(config: &MuseumConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            AppError::Other(format!("Invalid API base URL '{}': {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Other(format!(
                "API base URL '{}' cannot carry a path",
                config.api_base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// `{base}/users/{account}/repos?per_page={page_size}`
    fn listing_url(&self, account: &str, page_size: u32) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", account, "repos"]);
        }
        url.query_pairs_mut()
            .append_pair("per_page", &page_size.to_string());
        url
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn list_repositories(
        &self,
        account: &str,
        page_size: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError> {
        let url = self.listing_url(account, page_size);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| FetchError::new(account, FetchCause::Network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(account, FetchCause::Status(status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(account, FetchCause::Network(e.to_string())))?;

        parse_listing(account, &body)
    }
}
