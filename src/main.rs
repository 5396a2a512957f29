//! about-extract - batch company-detail extraction from scraped pages

#![allow(missing_docs)]

use about_extract::config::{Config, StorageBackend};
use about_extract::utils::logging::init_logging;
use about_extract::{
    BatchOrchestrator, ChatExtractor, DEFAULT_REPORT_ERRORS, RateLimitStrategy, StorageClient,
};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Extract company details from scraped pages in an object store
#[derive(Debug, Parser)]
#[command(name = "about-extract", version, about)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "ABOUT_EXTRACT_CONFIG")]
    config: Option<PathBuf>,

    /// Key prefix of source documents
    #[arg(long)]
    prefix: Option<String>,

    /// Maximum number of listed objects, 0 for no limit
    #[arg(long)]
    limit: Option<usize>,

    /// List below the prefix recursively
    #[arg(long)]
    recursive: bool,

    /// Storage backend: memory, local or s3
    #[arg(long)]
    backend: Option<StorageBackend>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Extraction calls allowed per minute
    #[arg(long)]
    rpm: Option<u32>,

    /// Rate limiting strategy: sliding_window or fixed_window
    #[arg(long)]
    strategy: Option<RateLimitStrategy>,

    /// Where to write the run statistics
    #[arg(long)]
    stats_path: Option<PathBuf>,

    /// Error details shown in the final report
    #[arg(long, default_value_t = DEFAULT_REPORT_ERRORS)]
    max_errors: usize,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Flags override file and environment settings
    fn apply(&self, config: &mut Config) {
        if let Some(prefix) = &self.prefix {
            config.storage.source_prefix = prefix.clone();
        }
        if let Some(limit) = self.limit {
            config.storage.list_limit = limit;
        }
        if self.recursive {
            config.storage.recursive = true;
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        if let Some(workers) = self.workers {
            config.extraction.max_workers = workers;
        }
        if let Some(rpm) = self.rpm {
            config.rate_limit.max_requests = rpm;
            config.rate_limit.window_secs = 60;
        }
        if let Some(strategy) = self.strategy {
            config.rate_limit.strategy = strategy;
        }
        if let Some(path) = &self.stats_path {
            config.stats_path = path.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::load(args.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_logging(&config.logging)?;

    info!("Starting about-extract {}", about_extract::VERSION);
    info!(
        "Workers: {}, rate limit: {} req/{}s ({:?}), min spacing: {}s",
        config.extraction.max_workers,
        config.rate_limit.max_requests,
        config.rate_limit.window_secs,
        config.rate_limit.strategy,
        config.rate_limit.delay_between_requests_secs
    );
    info!(
        "Retries: {}, initial delay: {}s, backoff factor: {}",
        config.extraction.retry_count,
        config.extraction.retry_delay_secs,
        config.extraction.backoff_factor
    );

    let storage = StorageClient::new(&config.storage)
        .await
        .context("Failed to initialize object storage")?;
    let extractor =
        ChatExtractor::new(&config.extraction).context("Failed to create extractor")?;
    info!("Extraction model: {}", extractor.model());

    let orchestrator =
        BatchOrchestrator::from_config(&config, Arc::new(storage), Arc::new(extractor));

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight items");
        } else {
            std::future::pending::<()>().await;
        }
    };

    let report = orchestrator
        .run_from_source_until(
            &config.storage.source_prefix,
            config.storage.recursive,
            config.storage.limit(),
            shutdown,
        )
        .await
        .context("Failed to list source documents")?;

    println!("{}", report.render(args.max_errors));

    if let Err(e) = report.persist(&config.stats_path).await {
        error!("Failed to save statistics: {}", e);
    }

    if !report.is_complete() {
        warn!(
            "Run interrupted: {} items were not processed",
            report.not_dispatched
        );
    }

    Ok(())
}
