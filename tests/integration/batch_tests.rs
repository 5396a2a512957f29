//! Batch pipeline integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::{RunReportAssertions, assert_rolling_window};
    use crate::common::fixtures::{immediate_retry, limiter, unlimited};
    use crate::common::{PageFixtures, ScriptedExtractor};
    use about_extract::{
        BatchConfig, BatchOrchestrator, CompanyInfo, ExtractError, MemoryStorage, ObjectStorage,
        WorkItem,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn orchestrator(
        storage: &MemoryStorage,
        extractor: &Arc<ScriptedExtractor>,
        limiter: Arc<about_extract::RateLimiter>,
        workers: usize,
    ) -> BatchOrchestrator {
        BatchOrchestrator::new(
            Arc::new(storage.clone()),
            extractor.clone(),
            limiter,
            immediate_retry(2),
            BatchConfig::new().with_max_workers(workers),
        )
    }

    // ==================== Outcomes ====================

    /// One pre-existing output, one valid page, one page without data
    #[tokio::test]
    async fn test_mixed_outcomes() {
        let storage = MemoryStorage::new();
        storage.insert("scraped-content/done.md", PageFixtures::impressum("Alt GmbH"));
        storage.insert("scraped-content/done.about.json", "{}");
        storage.insert("scraped-content/new.md", PageFixtures::impressum("Neu GmbH"));
        storage.insert("scraped-content/empty.md", PageFixtures::empty_page());

        let extractor = Arc::new(ScriptedExtractor::new());
        let report = orchestrator(&storage, &extractor, unlimited(), 3)
            .run_from_source("scraped-content/", false, Some(50))
            .await
            .unwrap();

        report.assert_counts(1, 1, 1);
        assert_eq!(report.summary.total_files, 3);
        assert_eq!(extractor.call_count(), 2);
        assert_eq!(report.statistics.errors[0].key, "scraped-content/empty.md");
        crate::assert_approx_eq!(report.summary.success_rate, 1.0 / 3.0);

        let uploaded = storage
            .get("scraped-content/new.about.json")
            .await
            .unwrap()
            .unwrap();
        let record: CompanyInfo = serde_json::from_slice(&uploaded).unwrap();
        assert_eq!(record.company_name, "Neu GmbH");
        assert!(!storage.exists("scraped-content/empty.about.json").await.unwrap());
    }

    /// A second run over the same keys skips everything
    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let (storage, items) = PageFixtures::storage_with_pages("p/", 6);
        let extractor = Arc::new(ScriptedExtractor::new());
        let orchestrator = orchestrator(&storage, &extractor, unlimited(), 3);

        let first = orchestrator.run(items.clone()).await;
        first.assert_counts(6, 0, 0);

        let second = orchestrator.run(items).await;
        second.assert_counts(0, 6, 0);
        assert_eq!(extractor.call_count(), 6);
    }

    /// All outputs present: nothing reaches the extractor
    #[tokio::test]
    async fn test_all_preexisting_outputs_are_skipped() {
        let (storage, items) = PageFixtures::storage_with_pages("p/", 8);
        for item in &items {
            storage.insert(item.key().replace(".md", ".about.json"), "{}");
        }

        let extractor = Arc::new(ScriptedExtractor::new());
        let report = orchestrator(&storage, &extractor, unlimited(), 4)
            .run(items)
            .await;

        report.assert_counts(0, 8, 0);
        assert_eq!(extractor.call_count(), 0);
    }

    /// Rejected pages fail without retries; the run carries on
    #[tokio::test]
    async fn test_failures_do_not_abort_run() {
        let storage = MemoryStorage::new();
        storage.insert("p/a.md", PageFixtures::rejected_page());
        storage.insert("p/b.md", PageFixtures::impressum("B GmbH"));
        storage.insert("p/c.md", PageFixtures::rejected_page());

        let extractor = Arc::new(ScriptedExtractor::new());
        let report = orchestrator(&storage, &extractor, unlimited(), 1)
            .run(vec![
                WorkItem::from("p/a.md"),
                WorkItem::from("p/b.md"),
                WorkItem::from("p/c.md"),
            ])
            .await;

        report.assert_counts(1, 0, 2);
        assert_eq!(extractor.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_work_list() {
        let storage = MemoryStorage::new();
        let extractor = Arc::new(ScriptedExtractor::new());

        let report = orchestrator(&storage, &extractor, unlimited(), 2)
            .run_from_source("scraped-content/", false, None)
            .await
            .unwrap();

        report.assert_counts(0, 0, 0);
        assert_eq!(report.summary.success_rate, 0.0);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_list_limit_applies_before_filtering() {
        let storage = MemoryStorage::new();
        storage.insert("p/a.html", "<html></html>");
        storage.insert("p/b.md", PageFixtures::impressum("B GmbH"));
        storage.insert("p/c.md", PageFixtures::impressum("C GmbH"));

        let extractor = Arc::new(ScriptedExtractor::new());
        let report = orchestrator(&storage, &extractor, unlimited(), 2)
            .run_from_source("p/", false, Some(2))
            .await
            .unwrap();

        report.assert_counts(1, 0, 0);
    }

    // ==================== Rate limiting ====================

    /// 50 items, 5 workers, 10 calls per 60 s
    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_holds_across_workers() {
        let (storage, items) = PageFixtures::storage_with_pages("p/", 50);
        let extractor = Arc::new(ScriptedExtractor::new().with_latency(Duration::from_millis(500)));

        let report = orchestrator(&storage, &extractor, limiter(10, 60), 5)
            .run(items)
            .await;

        report.assert_counts(50, 0, 0);

        let times = extractor.call_times();
        assert_eq!(times.len(), 50);
        assert_rolling_window(&times, 10, Duration::from_secs(60));

        // Five full windows are needed for fifty calls
        assert!(times[49] - times[0] >= Duration::from_secs(240));
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_spacing_between_calls() {
        let (storage, items) = PageFixtures::storage_with_pages("p/", 6);
        let extractor = Arc::new(ScriptedExtractor::new());
        let spaced = Arc::new(about_extract::RateLimiter::new(
            about_extract::RateLimitConfig::new(
                100,
                Duration::from_secs(60),
                Duration::from_secs(3),
            ),
        ));

        let report = orchestrator(&storage, &extractor, spaced, 3)
            .run(items)
            .await;
        report.assert_counts(6, 0, 0);

        for pair in extractor.call_times().windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(3));
        }
    }

    // ==================== Shutdown ====================

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_dispatch() {
        let (storage, items) = PageFixtures::storage_with_pages("p/", 10);
        let extractor = Arc::new(ScriptedExtractor::new());

        let shutdown = tokio::time::sleep(Duration::from_secs(90));
        let report = orchestrator(&storage, &extractor, limiter(1, 60), 2)
            .run_until(items, shutdown)
            .await;

        assert!(!report.is_complete());
        assert!(report.dispatched >= 2 && report.dispatched < 10);
        assert_eq!(report.dispatched + report.not_dispatched, 10);

        // Every dispatched item finished and was recorded
        report.assert_consistent();
        assert_eq!(report.summary.total_files as usize, report.dispatched);
        assert_eq!(storage.len(), 10 + report.summary.successful as usize);
    }

    // ==================== Fatal errors ====================

    #[tokio::test]
    async fn test_listing_failure_aborts_before_dispatch() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let root = temp_dir.path().join("objects");
        let storage = about_extract::LocalStorage::new(&root).await.unwrap();
        std::fs::remove_dir_all(&root).unwrap();

        let extractor = Arc::new(ScriptedExtractor::new());
        let orchestrator = BatchOrchestrator::new(
            Arc::new(storage),
            extractor.clone(),
            unlimited(),
            immediate_retry(0),
            BatchConfig::default(),
        );

        let result = orchestrator
            .run_from_source("scraped-content/", false, None)
            .await;

        assert!(matches!(result, Err(ExtractError::Listing(_))));
        assert_eq!(extractor.call_count(), 0);
    }
}
