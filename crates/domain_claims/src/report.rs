//! Claims reaction report: the aggregation pipeline and its execution wrapper

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use core_kernel::RunContext;
use crate::aggregation::{aggregate_monthly, MissingIncidentPolicy, MonthlyReactionAverages};
use crate::claim::Claim;
use crate::error::ReportError;
use crate::ports::{ClaimsSnapshotPort, ReportSink};
use crate::reserve::{ReserveIndex, ReserveTransaction, TransactionCategories};
use crate::timeline::{ClaimReactionRow, ClaimTimeline};

/// Pure pipeline from snapshot records to the reaction report
///
/// Holds no state between runs; the same input always yields the same report.
#[derive(Debug, Clone, Default)]
pub struct ClaimTimelineAggregator {
    categories: TransactionCategories,
    missing_incident: MissingIncidentPolicy,
}

impl ClaimTimelineAggregator {
    pub fn new(categories: TransactionCategories, missing_incident: MissingIncidentPolicy) -> Self {
        Self {
            categories,
            missing_incident,
        }
    }

    pub fn categories(&self) -> &TransactionCategories {
        &self.categories
    }

    pub fn missing_incident(&self) -> MissingIncidentPolicy {
        self.missing_incident
    }

    /// Projects every claim onto its timeline, indexing the transactions once
    pub fn timelines(&self, claims: &[Claim], transactions: &[ReserveTransaction]) -> Vec<ClaimTimeline> {
        let index = ReserveIndex::build(transactions, &self.categories);
        debug!(
            transactions = transactions.len(),
            indexed_claims = index.len(),
            "Indexed reserve transactions by claim"
        );

        claims
            .iter()
            .map(|claim| ClaimTimeline::project(claim, &index))
            .collect()
    }

    /// Per-claim detail rows with their day gaps
    pub fn reaction_rows(&self, claims: &[Claim], transactions: &[ReserveTransaction]) -> Vec<ClaimReactionRow> {
        self.timelines(claims, transactions)
            .into_iter()
            .map(ClaimReactionRow::from)
            .collect()
    }

    /// Runs projection, day gaps and monthly aggregation
    pub fn run(
        &self,
        claims: &[Claim],
        transactions: &[ReserveTransaction],
    ) -> Result<ClaimsReactionReport, ReportError> {
        let rows = self.reaction_rows(claims, transactions);
        let aggregation = aggregate_monthly(&rows, self.missing_incident)?;

        let summary = ReportSummary {
            claims_read: claims.len(),
            reserve_transactions_read: transactions.len(),
            months: aggregation.rows.len(),
            skipped_claims: aggregation.skipped_claims,
        };

        Ok(ClaimsReactionReport {
            claims: rows,
            monthly: aggregation.rows,
            summary,
        })
    }
}

/// Counters describing a finished report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub claims_read: usize,
    pub reserve_transactions_read: usize,
    pub months: usize,
    /// Claims left out of the monthly rows for lack of an incident date
    pub skipped_claims: Vec<String>,
}

/// Output of one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimsReactionReport {
    pub claims: Vec<ClaimReactionRow>,
    pub monthly: Vec<MonthlyReactionAverages>,
    pub summary: ReportSummary,
}

/// How a report run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Success { months: usize },
    Failed { message: String },
}

impl ReportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ReportOutcome::Success { .. })
    }
}

/// Reads the snapshot, runs the aggregator, and reports to a sink
///
/// Failures never escape [`ClaimsReportService::execute`]: they are logged,
/// passed to the sink as text, and returned as [`ReportOutcome::Failed`].
pub struct ClaimsReportService {
    snapshot: Arc<dyn ClaimsSnapshotPort>,
    aggregator: ClaimTimelineAggregator,
    run: RunContext,
}

impl ClaimsReportService {
    pub fn new(snapshot: Arc<dyn ClaimsSnapshotPort>, aggregator: ClaimTimelineAggregator) -> Self {
        Self {
            snapshot,
            aggregator,
            run: RunContext::default(),
        }
    }

    pub fn with_run_context(mut self, run: RunContext) -> Self {
        self.run = run;
        self
    }

    /// Reads the snapshot in two bulk fetches and builds the report
    pub async fn build_report(&self) -> Result<ClaimsReactionReport, ReportError> {
        let claims = self.snapshot.fetch_claims().await?;
        let transactions = self.snapshot.fetch_reserve_transactions().await?;

        info!(
            adapter = %self.snapshot.adapter_type(),
            claims = claims.len(),
            reserve_transactions = transactions.len(),
            "Loaded claims snapshot"
        );

        self.aggregator.run(&claims, &transactions)
    }

    /// Runs the report once and hands the result or the error message to `sink`
    pub async fn execute(&self, sink: &mut dyn ReportSink) -> ReportOutcome {
        let run = self.run.run_id();
        let labels = self.run.labels_display();

        match self.build_report().await {
            Ok(report) => {
                info!(
                    run,
                    %labels,
                    months = report.summary.months,
                    skipped = report.summary.skipped_claims.len(),
                    "Claims reaction report completed"
                );
                sink.on_report(&report);
                ReportOutcome::Success {
                    months: report.summary.months,
                }
            }
            Err(e) => {
                error!(
                    run,
                    %labels,
                    snapshot_failure = e.is_snapshot_failure(),
                    error = %e,
                    "Claims reaction report failed"
                );
                let message = e.to_string();
                sink.on_error(&message);
                ReportOutcome::Failed { message }
            }
        }
    }
}
