//! Console display sink

use std::fmt::Write as _;
use std::io::Write;
use tracing::warn;

use domain_claims::{ClaimReactionRow, ClaimsReactionReport, ReportSink};

use crate::config::OutputFormat;

/// Writes the report, or the error that replaced it, to a writer
pub struct ConsoleSink<W: Write> {
    out: W,
    format: OutputFormat,
    include_claims: bool,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout(format: OutputFormat, include_claims: bool) -> Self {
        Self::new(std::io::stdout(), format, include_claims)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, format: OutputFormat, include_claims: bool) -> Self {
        Self {
            out,
            format,
            include_claims,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write report output");
        }
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn on_report(&mut self, report: &ClaimsReactionReport) {
        let text = match self.format {
            OutputFormat::Table => render_table(report, self.include_claims),
            OutputFormat::Json => match serde_json::to_string_pretty(report) {
                Ok(mut json) => {
                    json.push('\n');
                    json
                }
                Err(e) => format!("Error occurred while rendering the report:\n{}\n", e),
            },
        };
        self.emit(&text);
    }

    fn on_error(&mut self, message: &str) {
        let text = match self.format {
            OutputFormat::Table => format!("Error occurred while executing the query:\n{}\n", message),
            OutputFormat::Json => format!("{}\n", serde_json::json!({ "error": message })),
        };
        self.emit(&text);
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn gap_cell(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn date_cell(value: Option<chrono::NaiveDateTime>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.format("%Y-%m-%d").to_string())
}

/// Renders the report as fixed-width text tables
pub fn render_table(report: &ClaimsReactionReport, include_claims: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Query executed successfully");

    if include_claims {
        render_claims(&mut out, &report.claims);
    }

    let _ = writeln!(
        out,
        "{:<10} {:<19} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Month", "Anchor", "Claims", "Inc>Rec", "Rec>Init", "Init>Res", "Init>Pay", "Init>Fin"
    );
    for row in &report.monthly {
        let _ = writeln!(
            out,
            "{:<10} {:<19} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10}",
            format!("{:04}-{:02}", row.year, row.month),
            row.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            row.claim_count,
            cell(row.incident_to_received_days_avg),
            cell(row.received_to_initiated_days_avg),
            cell(row.initiated_to_first_reserve_days_avg),
            cell(row.initiated_to_first_payment_days_avg),
            cell(row.initiated_to_finalized_days_avg),
        );
    }

    let skipped = &report.summary.skipped_claims;
    if !skipped.is_empty() {
        let _ = writeln!(
            out,
            "Skipped {} claim(s) without an incident date: {}",
            skipped.len(),
            skipped.join(", ")
        );
    }
    out
}

fn render_claims(out: &mut String, rows: &[ClaimReactionRow]) {
    let _ = writeln!(
        out,
        "{:<12} {:<6} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:>7} {:>8} {:>8} {:>8} {:>8}",
        "Claim", "Cat", "Policy", "Incident", "Received", "Initiated", "Finalized", "1stRes", "1stPay",
        "Inc>Rec", "Rec>Init", "Init>Res", "Init>Pay", "Init>Fin"
    );
    for row in rows {
        let t = &row.timeline;
        let g = &row.gaps;
        let _ = writeln!(
            out,
            "{:<12} {:<6} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:>7} {:>8} {:>8} {:>8} {:>8}",
            t.claim_identifier,
            t.category.label(),
            t.policy_identifier,
            date_cell(t.incident_date),
            date_cell(t.report_received_date),
            date_cell(t.initiated_date),
            date_cell(t.finalized_date),
            date_cell(t.first_reserve_date),
            date_cell(t.first_payment_date),
            gap_cell(g.incident_to_received_days),
            gap_cell(g.received_to_initiated_days),
            gap_cell(g.initiated_to_first_reserve_days),
            gap_cell(g.initiated_to_first_payment_days),
            gap_cell(g.initiated_to_finalized_days),
        );
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use domain_claims::ClaimTimelineAggregator;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn demo_report() -> ClaimsReactionReport {
        let snapshot = crate::seed::demo_snapshot(now());
        ClaimTimelineAggregator::default()
            .run(snapshot.claims(), snapshot.reserve_transactions())
            .unwrap()
    }

    #[test]
    fn test_table_lists_month_and_averages() {
        let text = render_table(&demo_report(), false);

        assert!(text.starts_with("Query executed successfully\n"));
        assert!(text.contains("2024-05"));
        assert!(text.contains("2024-05-03 01:01:01"));
        assert!(text.contains("22.00"));
        assert!(!text.contains("CI001"));
    }

    #[test]
    fn test_table_with_claim_details() {
        let text = render_table(&demo_report(), true);

        assert!(text.contains("CI001"));
        assert!(text.contains("Type1"));
        assert!(text.contains("POL001"));
    }

    #[test]
    fn test_error_is_written_as_text() {
        let mut sink = ConsoleSink::new(Vec::new(), OutputFormat::Table, false);
        sink.on_error("could not be translated");

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "Error occurred while executing the query:\ncould not be translated\n");
    }

    #[test]
    fn test_json_output_parses_back() {
        let mut sink = ConsoleSink::new(Vec::new(), OutputFormat::Json, false);
        sink.on_report(&demo_report());

        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(value["monthly"][0]["year"], 2024);
        assert_eq!(value["monthly"][0]["initiated_to_finalized_days_avg"], 22.0);
        assert_eq!(value["summary"]["claims_read"], 1);
    }
}
