//! Claims Reaction Report - Binary
//!
//! Reads a claims snapshot, prints monthly averages of the claim reaction
//! day gaps, and exits.
//!
//! # Usage
//!
//! ```bash
//! # Run against the built-in seed data
//! cargo run --bin claims-report
//!
//! # Run against PostgreSQL, printing JSON
//! REPORT_DATA_SOURCE=postgres REPORT_DATABASE_URL=postgres://... REPORT_OUTPUT=json cargo run --bin claims-report
//! ```
//!
//! # Environment Variables
//!
//! * `REPORT_DATA_SOURCE` - `seed` or `postgres` (default: seed)
//! * `REPORT_DATABASE_URL` - PostgreSQL connection string
//! * `REPORT_CONNECT_TIMEOUT_SECS` - seconds to wait for a connection (default: 30)
//! * `REPORT_OUTPUT` - `table` or `json` (default: table)
//! * `REPORT_INCLUDE_CLAIMS` - print per-claim rows too (default: false)
//! * `REPORT_MISSING_INCIDENT` - `skip` or `reject` (default: skip)
//! * `REPORT_RESERVE_CATEGORIES` / `REPORT_PAYMENT_CATEGORIES` - comma separated tags
//! * `REPORT_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `REPORT_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use anyhow::Context;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::ReportSink;
use interface_report::config::{LogFormat, ReportConfig};
use interface_report::sink::ConsoleSink;
use interface_report::{open_snapshot, run_report};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ReportConfig::from_env().context("Failed to load report configuration")?;
    config.validate()?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        data_source = ?config.data_source,
        missing_incident = %config.missing_incident,
        "Starting claims reaction report"
    );

    let mut sink = ConsoleSink::stdout(config.output, config.include_claims);

    let snapshot = match open_snapshot(&config).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "Could not open snapshot source");
            sink.on_error(&format!("{:#}", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let outcome = run_report(&config, snapshot, &mut sink).await;

    tracing::info!(success = outcome.is_success(), "Claims reaction report finished");
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initializes the tracing subscriber, logging to stderr so stdout carries only the report.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
