//! Claims Reaction Report - Command-line Interface Layer
//!
//! Wires configuration, logging, the snapshot adapter and the console sink
//! around the domain report service.

pub mod config;
pub mod seed;
pub mod sink;

use anyhow::Context;
use chrono::Local;
use std::sync::Arc;
use tracing::info;

use core_kernel::RunContext;
use domain_claims::{ClaimsReportService, ClaimsSnapshotPort, ReportOutcome, ReportSink};
use infra_db::{create_pool, DatabaseConfig, PostgresClaimsSnapshotRepository};

use crate::config::{DataSource, ReportConfig};

/// Opens the snapshot source named by the configuration
///
/// # Errors
///
/// Returns an error if the database pool cannot be created
pub async fn open_snapshot(config: &ReportConfig) -> anyhow::Result<Arc<dyn ClaimsSnapshotPort>> {
    match config.data_source {
        DataSource::Seed => {
            info!("Using built-in seed data");
            Ok(Arc::new(seed::demo_snapshot(Local::now().naive_local())))
        }
        DataSource::Postgres => {
            let pool = create_pool(
                DatabaseConfig::new(config.database_url.as_str())
                    .max_connections(config.max_connections)
                    .acquire_timeout(config.connect_timeout()),
            )
            .await
            .context("Failed to open the claims database")?;
            Ok(Arc::new(PostgresClaimsSnapshotRepository::new(pool)))
        }
    }
}

/// Runs the report once against `snapshot`, writing to `sink`
pub async fn run_report(
    config: &ReportConfig,
    snapshot: Arc<dyn ClaimsSnapshotPort>,
    sink: &mut dyn ReportSink,
) -> ReportOutcome {
    let run = RunContext::new(uuid::Uuid::new_v4().to_string())
        .label("data_source", format!("{:?}", config.data_source).to_lowercase());

    ClaimsReportService::new(snapshot, config.aggregator())
        .with_run_context(run)
        .execute(sink)
        .await
}
