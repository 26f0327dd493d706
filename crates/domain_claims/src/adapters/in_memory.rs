//! In-memory claims snapshot and collecting sink

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use core_kernel::{AdapterType, DomainPort, PortError, UnderwritingPeriodId};

use crate::claim::Claim;
use crate::ports::{ClaimsSnapshotPort, ReportSink};
use crate::report::ClaimsReactionReport;
use crate::reserve::ReserveTransaction;
use crate::underwriting::UnderwritingPeriod;

/// A static snapshot of claims and reserve transactions held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimsSnapshot {
    claims: Vec<Claim>,
    reserve_transactions: Vec<ReserveTransaction>,
}

impl InMemoryClaimsSnapshot {
    pub fn new(claims: Vec<Claim>, reserve_transactions: Vec<ReserveTransaction>) -> Self {
        Self {
            claims,
            reserve_transactions,
        }
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    pub fn with_transaction(mut self, transaction: ReserveTransaction) -> Self {
        self.reserve_transactions.push(transaction);
        self
    }

    /// Distinct underwriting periods referenced by the claims
    pub fn underwriting_periods(&self) -> Vec<&UnderwritingPeriod> {
        let mut seen: HashMap<UnderwritingPeriodId, &UnderwritingPeriod> = HashMap::new();
        for period in self.claims.iter().filter_map(|c| c.underwriting_period.as_ref()) {
            seen.entry(period.id).or_insert(period);
        }
        let mut periods: Vec<_> = seen.into_values().collect();
        periods.sort_by_key(|p| p.id);
        periods
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn reserve_transactions(&self) -> &[ReserveTransaction] {
        &self.reserve_transactions
    }
}

impl DomainPort for InMemoryClaimsSnapshot {}

#[async_trait]
impl ClaimsSnapshotPort for InMemoryClaimsSnapshot {
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError> {
        debug!(count = self.claims.len(), "Reading claims from memory");
        Ok(self.claims.clone())
    }

    async fn fetch_reserve_transactions(&self) -> Result<Vec<ReserveTransaction>, PortError> {
        debug!(count = self.reserve_transactions.len(), "Reading reserve transactions from memory");
        Ok(self.reserve_transactions.clone())
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::InMemory
    }
}

/// Sink that keeps whatever it receives, for callers that post-process the report
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub reports: Vec<ClaimsReactionReport>,
    pub errors: Vec<String>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_report(&self) -> Option<&ClaimsReactionReport> {
        self.reports.last()
    }
}

impl ReportSink for CollectingSink {
    fn on_report(&mut self, report: &ClaimsReactionReport) {
        self.reports.push(report.clone());
    }

    fn on_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::Policy;

    #[tokio::test]
    async fn test_snapshot_returns_everything_it_holds() {
        let snapshot = InMemoryClaimsSnapshot::default()
            .with_claim(Claim::new("CL001", "CI001"))
            .with_claim(Claim::new("CL002", "CI002"));

        assert_eq!(snapshot.fetch_claims().await.unwrap().len(), 2);
        assert!(snapshot.fetch_reserve_transactions().await.unwrap().is_empty());
        assert_eq!(snapshot.adapter_type(), AdapterType::InMemory);
    }

    #[test]
    fn test_shared_underwriting_period_listed_once() {
        let period = UnderwritingPeriod::new().with_policy(Policy::new("POL001"));
        let mut a = Claim::new("CL001", "CI001");
        a.underwriting_period = Some(period.clone());
        let mut b = Claim::new("CL002", "CI002");
        b.underwriting_period = Some(period);

        let snapshot = InMemoryClaimsSnapshot::new(vec![a, b, Claim::new("CL003", "CI003")], vec![]);

        assert_eq!(snapshot.underwriting_periods().len(), 1);
    }
}
