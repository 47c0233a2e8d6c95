// src/repositories/repository_source.rs

use async_trait::async_trait;

use crate::domain::RepositoryRecord;
use crate::error::FetchError;

/// Lists the repositories owned by one account.
///
/// Implementations fetch a single page of at most `page_size` records and
/// return them in listing order. Every failure is attributed to `account`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn list_repositories(
        &self,
        account: &str,
        page_size: u32,
    ) -> Result<Vec<RepositoryRecord>, FetchError>;
}
