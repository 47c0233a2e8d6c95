// src/services/aggregation_service_tests.rs

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::domain::{AbandonmentQuery, ExhibitionStatistics};
    use crate::error::{AppError, FetchCause};
    use crate::events::{EventBus, SourceFetchFailed};
    use crate::repositories::{MockRepositorySource, RepositorySource};
    use crate::services::aggregation_service::RankedAggregator;
    use crate::services::test_fixtures::*;
    use crate::services::throttle::FixedDelay;

    fn names(records: &[crate::domain::RepositoryRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    // ========================================================================
    // COLLECTION MODE
    // ========================================================================

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let alice_repo = repo(1, 50, at(2023, 1, 1));
        let source = Arc::new(
            StubSource::new()
                .with_listing("alice", vec![alice_repo.clone(), fork(2, 900, at(2019, 1, 1))])
                .with_failure("bob", FetchCause::Network("connection reset".to_string())),
        );
        let aggregator = aggregator(source);

        let query = AbandonmentQuery::collection(["alice", "bob"], 6, 12, at(2024, 6, 1));
        let result = aggregator.aggregate(&query).await.unwrap();

        assert_eq!(result.records, vec![alice_repo.with_owner("alice")]);
        assert_eq!(result.failures.len(), 1);
        let failure = result.failure_for("bob").unwrap();
        assert!(matches!(failure.cause, FetchCause::Network(_)));
        assert!(result.failure_for("alice").is_none());

        assert_eq!(
            result.statistics(),
            ExhibitionStatistics {
                count: 1,
                total_popularity: 50,
                total_open_issues: alice_repo.open_issue_count,
            }
        );
    }

    #[tokio::test]
    async fn test_every_source_failing_yields_empty_result() {
        let source = Arc::new(
            StubSource::new()
                .with_failure("a", FetchCause::Status(403))
                .with_failure("b", FetchCause::Malformed("not a list".to_string())),
        );
        let result = aggregator(source)
            .aggregate(&AbandonmentQuery::collection(["a", "b"], 6, 12, at(2024, 6, 1)))
            .await
            .unwrap();

        assert!(result.records.is_empty());
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].identifier, "a");
        assert_eq!(result.failures[1].identifier, "b");
    }

    #[tokio::test]
    async fn test_collection_result_is_bounded_and_ranked() {
        let old = at(2020, 1, 1);
        let source = Arc::new(
            StubSource::new()
                .with_listing("a", (1..=6).map(|i| repo(i, i * 10, old)).collect())
                .with_listing("b", (7..=12).map(|i| repo(i, i * 10, old)).collect())
                .with_listing("c", (13..=18).map(|i| repo(i, i * 10, old)).collect()),
        );
        let result = aggregator(source)
            .aggregate(&AbandonmentQuery::collection(["a", "b", "c"], 6, 12, at(2024, 6, 1)))
            .await
            .unwrap();

        assert_eq!(result.records.len(), 12);
        assert_eq!(result.records[0].popularity, 180);
        assert_eq!(result.records[11].popularity, 70);
        assert!(result
            .records
            .windows(2)
            .all(|w| w[0].popularity >= w[1].popularity));
        assert_eq!(result.records[0].owner_identifier.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_equal_popularity_keeps_account_order() {
        let old = at(2020, 1, 1);
        let source = Arc::new(
            StubSource::new()
                .with_listing("a", vec![repo(1, 10, old)])
                .with_listing("b", vec![repo(2, 10, old)]),
        );
        let aggregator = aggregator(source);
        let now = at(2024, 6, 1);

        let ab = aggregator
            .aggregate(&AbandonmentQuery::collection(["a", "b"], 6, 12, now))
            .await
            .unwrap();
        let ba = aggregator
            .aggregate(&AbandonmentQuery::collection(["b", "a"], 6, 12, now))
            .await
            .unwrap();

        assert_eq!(names(&ab.records), vec!["repo-1", "repo-2"]);
        assert_eq!(names(&ba.records), vec!["repo-2", "repo-1"]);
    }

    #[tokio::test]
    async fn test_equal_popularity_keeps_listing_order() {
        let old = at(2020, 1, 1);
        let now = at(2024, 6, 1);

        let forward = Arc::new(StubSource::new().with_listing(
            "a",
            vec![repo(1, 5, old), repo(2, 9, old), repo(3, 5, old)],
        ));
        let backward = Arc::new(StubSource::new().with_listing(
            "a",
            vec![repo(3, 5, old), repo(2, 9, old), repo(1, 5, old)],
        ));

        let query = AbandonmentQuery::single("a", 6, now);
        let f = aggregator(forward).aggregate(&query).await.unwrap();
        let b = aggregator(backward).aggregate(&query).await.unwrap();

        assert_eq!(names(&f.records), vec!["repo-2", "repo-1", "repo-3"]);
        assert_eq!(names(&b.records), vec!["repo-2", "repo-3", "repo-1"]);
    }

    #[tokio::test]
    async fn test_fetches_sequentially_in_given_order() {
        let source = Arc::new(
            StubSource::new()
                .with_listing("torvalds", vec![])
                .with_listing("antirez", vec![])
                .with_listing("tj", vec![]),
        );
        let shared: Arc<dyn RepositorySource> = source.clone();
        let aggregator = aggregator(shared);

        aggregator
            .aggregate(&AbandonmentQuery::collection(
                ["torvalds", "ghost", "antirez", "tj"],
                6,
                12,
                at(2024, 6, 1),
            ))
            .await
            .unwrap();

        assert_eq!(
            source.called_accounts(),
            vec!["torvalds", "ghost", "antirez", "tj"]
        );
        assert_eq!(source.max_concurrent(), 1);
        assert!(source.page_sizes().iter().all(|&size| size == 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_collection_waits_between_fetches() {
        let source = Arc::new(
            StubSource::new()
                .with_listing("a", vec![])
                .with_listing("b", vec![])
                .with_listing("c", vec![]),
        );
        let aggregator = RankedAggregator::new(
            source,
            Arc::new(FixedDelay::new(Duration::from_millis(200))),
            Arc::new(EventBus::new()),
            100,
        );

        let start = tokio::time::Instant::now();
        aggregator
            .aggregate(&AbandonmentQuery::collection(["a", "b", "c"], 6, 12, at(2024, 6, 1)))
            .await
            .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(400), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(600), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn test_isolated_failures_are_published() {
        let source = Arc::new(
            StubSource::new()
                .with_listing("alice", vec![])
                .with_failure("bob", FetchCause::Status(502)),
        );
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        bus.subscribe::<SourceFetchFailed, _>(move |event| {
            assert_eq!(event.identifier, "bob");
            assert_eq!(event.cause, FetchCause::Status(502));
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        aggregator_with_bus(source, bus)
            .aggregate(&AbandonmentQuery::collection(["alice", "bob"], 6, 12, at(2024, 6, 1)))
            .await
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    // ========================================================================
    // SINGLE MODE
    // ========================================================================

    #[tokio::test]
    async fn test_single_failure_is_terminal() {
        let source = Arc::new(StubSource::new().with_failure("ghost", FetchCause::Status(404)));
        let err = aggregator(source)
            .aggregate(&AbandonmentQuery::single("ghost", 6, at(2024, 6, 1)))
            .await
            .unwrap_err();

        match err {
            AppError::Fetch(fetch) => {
                assert_eq!(fetch.identifier, "ghost");
                assert_eq!(fetch.cause, FetchCause::Status(404));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_mode_is_untruncated_and_untagged() {
        let old = at(2020, 1, 1);
        let source = Arc::new(
            StubSource::new().with_listing("tj", (1..=20).map(|i| repo(i, i, old)).collect()),
        );
        let result = aggregator(source)
            .aggregate(&AbandonmentQuery::single("tj", 6, at(2024, 6, 1)))
            .await
            .unwrap();

        assert_eq!(result.records.len(), 20);
        assert!(result.records.iter().all(|r| r.owner_identifier.is_none()));
        assert!(result.failures.is_empty());
        assert_eq!(result.records[0].popularity, 20);
    }

    #[tokio::test]
    async fn test_single_mode_applies_filter() {
        let now = at(2024, 3, 15);
        let source = Arc::new(StubSource::new().with_listing(
            "tj",
            vec![
                repo(1, 1, at(2024, 2, 14)),
                repo(2, 2, at(2024, 2, 16)),
                fork(3, 3, at(2001, 1, 1)),
            ],
        ));
        let result = aggregator(source)
            .aggregate(&AbandonmentQuery::single("tj", 1, now))
            .await
            .unwrap();

        assert_eq!(names(&result.records), vec!["repo-1"]);
    }

    #[tokio::test]
    async fn test_single_mode_honours_explicit_bound() {
        let old = at(2020, 1, 1);
        let source = Arc::new(
            StubSource::new().with_listing("tj", (1..=5).map(|i| repo(i, i, old)).collect()),
        );
        let mut query = AbandonmentQuery::single("tj", 6, at(2024, 6, 1));
        query.result_bound = Some(2);

        let result = aggregator(source).aggregate(&query).await.unwrap();
        assert_eq!(names(&result.records), vec!["repo-5", "repo-4"]);
    }

    #[tokio::test]
    async fn test_passes_configured_page_size() {
        let mut mock = MockRepositorySource::new();
        mock.expect_list_repositories()
            .times(1)
            .returning(|account, page_size| {
                assert_eq!(account, "tj");
                assert_eq!(page_size, 30);
                Ok(Vec::new())
            });

        let aggregator = RankedAggregator::new(
            Arc::new(mock),
            Arc::new(FixedDelay::default()),
            Arc::new(EventBus::new()),
            30,
        );
        let result = aggregator
            .aggregate(&AbandonmentQuery::single("tj", 6, at(2024, 6, 1)))
            .await
            .unwrap();

        assert!(result.records.is_empty());
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    #[tokio::test]
    async fn test_invalid_query_never_reaches_source() {
        let mut mock = MockRepositorySource::new();
        mock.expect_list_repositories().times(0);
        let aggregator = aggregator(Arc::new(mock));
        let now = at(2024, 6, 1);

        for query in [
            AbandonmentQuery::single("tj", 0, now),
            AbandonmentQuery::collection(["tj", "remy"], 6, 0, now),
            AbandonmentQuery::collection(Vec::<String>::new(), 6, 12, now),
        ] {
            let err = aggregator.aggregate(&query).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidQuery { .. }), "{:?}", err);
        }
    }
}
