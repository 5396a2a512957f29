//! Pipeline tests against the local file system backend

#[cfg(test)]
mod tests {
    use crate::common::assertions::RunReportAssertions;
    use crate::common::fixtures::{immediate_retry, unlimited};
    use crate::common::{PageFixtures, ScriptedExtractor};
    use about_extract::monitoring::stats::PersistedStats;
    use about_extract::config::{StorageBackend, StorageConfig};
    use about_extract::{
        BatchConfig, BatchOrchestrator, CompanyInfo, LocalStorage, ObjectStorage, StorageClient,
    };
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn seeded_storage(temp_dir: &TempDir) -> LocalStorage {
        let storage = LocalStorage::new(temp_dir.path()).await.unwrap();
        let pages = [
            ("scraped-content/alpha.md", PageFixtures::impressum("Alpha GmbH")),
            ("scraped-content/beta.md", PageFixtures::empty_page()),
            ("scraped-content/gamma.md", PageFixtures::rejected_page()),
            ("scraped-content/nested/delta.md", PageFixtures::impressum("Delta AG")),
        ];
        for (key, page) in pages {
            storage
                .put(key, page.into_bytes(), "text/markdown")
                .await
                .unwrap();
        }
        storage
    }

    fn orchestrator(storage: LocalStorage, extractor: &Arc<ScriptedExtractor>) -> BatchOrchestrator {
        BatchOrchestrator::new(
            Arc::new(storage),
            extractor.clone(),
            unlimited(),
            immediate_retry(1),
            BatchConfig::new().with_max_workers(2),
        )
    }

    #[tokio::test]
    async fn test_local_pipeline_writes_records_next_to_sources() {
        let temp_dir = TempDir::new().unwrap();
        let storage = seeded_storage(&temp_dir).await;
        let extractor = Arc::new(ScriptedExtractor::new());

        let report = orchestrator(storage.clone(), &extractor)
            .run_from_source("scraped-content/", false, None)
            .await
            .unwrap();

        report.assert_counts(1, 0, 2);

        let record_path = temp_dir.path().join("scraped-content/alpha.about.json");
        let record: CompanyInfo =
            serde_json::from_str(&std::fs::read_to_string(record_path).unwrap()).unwrap();
        assert_eq!(record.company_name, "Alpha GmbH");

        // Nested pages are outside a non-recursive listing
        assert!(
            !storage
                .exists("scraped-content/nested/delta.about.json")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_local_pipeline_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let storage = seeded_storage(&temp_dir).await;
        let extractor = Arc::new(ScriptedExtractor::new());

        let report = orchestrator(storage.clone(), &extractor)
            .run_from_source("scraped-content/", true, None)
            .await
            .unwrap();

        report.assert_counts(2, 0, 2);
        assert!(
            storage
                .exists("scraped-content/nested/delta.about.json")
                .await
                .unwrap()
        );

        // Outputs from the first run are skipped and never listed as sources
        let rerun = orchestrator(storage, &extractor)
            .run_from_source("scraped-content/", true, None)
            .await
            .unwrap();
        rerun.assert_counts(0, 2, 2);
    }

    #[tokio::test]
    async fn test_persisted_stats_document() {
        let temp_dir = TempDir::new().unwrap();
        let storage = seeded_storage(&temp_dir).await;
        let extractor = Arc::new(ScriptedExtractor::new());

        let report = orchestrator(storage, &extractor)
            .run_from_source("scraped-content/", false, None)
            .await
            .unwrap();

        let stats_path = temp_dir.path().join("logs").join("extraction_stats.json");
        report.persist(&stats_path).await.unwrap();

        let content = std::fs::read_to_string(&stats_path).unwrap();
        let document: PersistedStats = serde_json::from_str(&content).unwrap();
        assert_eq!(document.summary.total_files, 3);
        assert_eq!(document.summary.successful, 1);
        assert_eq!(document.summary.errors, 2);
        assert_eq!(document.error_details.len(), 2);

        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
        let first = &raw["error_details"][0];
        assert!(first["file"].as_str().unwrap().starts_with("scraped-content/"));
        assert!(first["error"].is_string());
        assert!(first["timestamp"].is_string());

        let rendered = report.render(1).to_string();
        assert!(rendered.contains("EXTRACTION STATISTICS"));
        assert!(rendered.contains("... and 1 more errors"));
    }

    #[tokio::test]
    async fn test_storage_client_local_backend() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = StorageConfig::default();
        config.backend = StorageBackend::Local;
        config.local_path = temp_dir.path().to_path_buf();

        let client = StorageClient::new(&config).await.unwrap();
        assert_eq!(client.backend(), StorageBackend::Local);

        client
            .put("a/b.md", b"hello".to_vec(), "text/markdown")
            .await
            .unwrap();
        assert_eq!(client.get("a/b.md").await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(client.list("a/", false, None).await.unwrap(), vec!["a/b.md"]);
    }
}
