//! mcr-rss command line
//!
//! Reads a file of repository identifiers and writes one RSS feed per repository.
//! Exits non-zero only if the list file is missing or the run cannot start;
//! per-repository failures are logged and the exit code stays zero.

use clap::Parser;
use mcr_rss::{BatchProcessor, Config, LogConfig, init_tracing};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "mcr-rss")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate RSS feeds for MCR repos.", long_about = None)]
struct Cli {
    /// Filename containing list of repositories
    filename: PathBuf,

    /// Directory to write feed files to
    #[arg(short, long, env = "MCR_RSS_OUTPUT_DIR", default_value = mcr_rss::config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Catalog API root
    #[arg(long, env = "MCR_CATALOG_BASE_URL", default_value = mcr_rss::config::DEFAULT_CATALOG_BASE_URL)]
    catalog_base_url: String,

    /// Root of the artifact pages used for feed links
    #[arg(long, env = "MCR_ARTIFACT_BASE_URL", default_value = mcr_rss::config::DEFAULT_ARTIFACT_BASE_URL)]
    artifact_base_url: String,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            catalog_base_url: self.catalog_base_url.clone(),
            artifact_base_url: self.artifact_base_url.clone(),
            output_dir: self.output_dir.clone(),
            request_timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig {
        verbose: cli.verbose,
        json: cli.json,
    };
    init_tracing(&log_config);

    if !cli.filename.is_file() {
        error!("File not found: {}", cli.filename.display());
        return ExitCode::FAILURE;
    }

    let config = cli.config();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let processor = match BatchProcessor::new(&config) {
        Ok(processor) => processor,
        Err(e) => {
            error!(error = %e, "Failed to initialize");
            return ExitCode::FAILURE;
        }
    };

    match processor.process_all(&cli.filename, &config.output_dir).await {
        Ok(report) => {
            if report.is_clean() {
                info!(written = report.written.len(), "All feeds generated");
            } else {
                warn!(
                    written = report.written.len(),
                    failed = report.failed.len(),
                    "Some feeds could not be generated"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Feed generation aborted");
            ExitCode::FAILURE
        }
    }
}
