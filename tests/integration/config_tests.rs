//! Configuration layering tests

#[cfg(test)]
mod tests {
    use about_extract::config::{RateLimitStrategy, StorageBackend};
    use about_extract::{BatchOrchestrator, Config, ExtractError, MemoryStorage};
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    const CONFIG_YAML: &str = r#"
storage:
  backend: local
  local_path: /tmp/about-extract
  source_prefix: pages/
  list_limit: 0
extraction:
  model: gpt-4o
  max_workers: 8
  retry_count: 4
rate_limit:
  max_requests: 30
  window_secs: 60
  delay_between_requests_secs: 0.5
stats_path: out/stats.json
"#;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG_YAML.as_bytes()).unwrap();

        let config = Config::from_file(file.path())
            .await
            .unwrap()
            .with_overrides(lookup(&[
                ("EXTRACTION_MAX_WORKERS", "3"),
                ("RATE_LIMIT_STRATEGY", "fixed_window"),
            ]))
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage.source_prefix, "pages/");
        assert_eq!(config.storage.limit(), None);
        assert_eq!(config.extraction.model, "gpt-4o");
        assert_eq!(config.extraction.max_workers, 3);
        assert_eq!(config.rate_limit.max_requests, 30);
        assert_eq!(config.rate_limit.strategy, RateLimitStrategy::FixedWindow);
        assert_eq!(config.stats_path.to_str(), Some("out/stats.json"));

        // Untouched sections keep their defaults
        assert_eq!(config.storage.bucket, "scraped-content");
        assert_eq!(config.extraction.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_orchestrator_from_config() {
        let config = Config::from_yaml(CONFIG_YAML).unwrap();
        let orchestrator = BatchOrchestrator::from_config(
            &config,
            Arc::new(MemoryStorage::new()),
            Arc::new(crate::common::ScriptedExtractor::new()),
        );

        assert_eq!(orchestrator.config().max_workers, 8);
        assert_eq!(orchestrator.limiter().limit(), 30);
        assert_eq!(config.retry_config().max_attempts(), 5);
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let result = Config::default().with_overrides(lookup(&[("EXTRACTION_MAX_WORKERS", "many")]));
        assert!(matches!(result, Err(ExtractError::Config(_))));

        let config = Config::default()
            .with_overrides(lookup(&[("EXTRACTION_MAX_WORKERS", "0")]))
            .unwrap();
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_yaml_round_trip_keeps_settings() {
        let config = Config::from_yaml(CONFIG_YAML).unwrap();
        let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();

        assert_eq!(reparsed.storage.local_path, config.storage.local_path);
        assert_eq!(reparsed.rate_limit.min_spacing(), Duration::from_millis(500));
        assert_eq!(reparsed.extraction.retry_count, 4);
    }
}
