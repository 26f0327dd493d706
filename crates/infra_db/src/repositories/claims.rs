//! Claims snapshot repository implementation
//!
//! Reads the three record sets the reaction report needs, each with a single
//! statement. The underwriting period and policy chain is flattened with LEFT
//! JOINs so a missing link arrives as NULL columns instead of a failed lookup.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{AdapterType, DomainPort, PortError};
use domain_claims::{Claim, ClaimsSnapshotPort, Policy, ReserveTransaction, UnderwritingPeriod};

use crate::error::DatabaseError;

const SELECT_CLAIMS: &str = r#"
    SELECT
        c.claim_record_id,
        c.claim_id,
        c.claim_identifier,
        c.incident_date,
        c.report_received,
        c.initiated_date,
        c.finalized_date,
        u.underwriting_period_id,
        u.policy_number_1,
        u.policy_number_2,
        u.policy_number_3,
        p.policy_id,
        p.policy_identifier
    FROM claims c
    LEFT JOIN underwriting_periods u ON u.underwriting_period_id = c.underwriting_period_id
    LEFT JOIN policies p ON p.policy_id = u.policy_id
    ORDER BY c.claim_identifier, c.claim_record_id
"#;

const SELECT_RESERVES: &str = r#"
    SELECT
        reserve_id,
        claim_id,
        reserve_type,
        transaction_date
    FROM reserves
    ORDER BY claim_id, transaction_date
"#;

/// Repository reading the claims snapshot from PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresClaimsSnapshotRepository {
    pool: PgPool,
}

impl PostgresClaimsSnapshotRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All claims with their underwriting period and policy joined in
    pub async fn load_claims(&self) -> Result<Vec<Claim>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimSnapshotRow>(SELECT_CLAIMS)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::classify)?;

        Ok(rows.into_iter().map(Claim::from).collect())
    }

    /// All reserve transactions
    pub async fn load_reserve_transactions(&self) -> Result<Vec<ReserveTransaction>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReserveTransactionRow>(SELECT_RESERVES)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::classify)?;

        Ok(rows.into_iter().map(ReserveTransaction::from).collect())
    }
}

impl DomainPort for PostgresClaimsSnapshotRepository {}

#[async_trait]
impl ClaimsSnapshotPort for PostgresClaimsSnapshotRepository {
    #[instrument(skip(self))]
    async fn fetch_claims(&self) -> Result<Vec<Claim>, PortError> {
        let claims = self.load_claims().await?;
        debug!(count = claims.len(), "Fetched claims");
        Ok(claims)
    }

    #[instrument(skip(self))]
    async fn fetch_reserve_transactions(&self) -> Result<Vec<ReserveTransaction>, PortError> {
        let transactions = self.load_reserve_transactions().await?;
        debug!(count = transactions.len(), "Fetched reserve transactions");
        Ok(transactions)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Database
    }
}

/// Claim row with the underwriting period and policy columns flattened in
#[derive(Debug, Clone, FromRow)]
pub struct ClaimSnapshotRow {
    pub claim_record_id: Uuid,
    pub claim_id: String,
    pub claim_identifier: String,
    pub incident_date: Option<NaiveDateTime>,
    pub report_received: Option<NaiveDateTime>,
    pub initiated_date: Option<NaiveDateTime>,
    pub finalized_date: Option<NaiveDateTime>,
    pub underwriting_period_id: Option<Uuid>,
    pub policy_number_1: Option<String>,
    pub policy_number_2: Option<String>,
    pub policy_number_3: Option<String>,
    pub policy_id: Option<Uuid>,
    pub policy_identifier: Option<String>,
}

impl From<ClaimSnapshotRow> for Claim {
    fn from(row: ClaimSnapshotRow) -> Self {
        let policy = row.policy_id.map(|id| Policy {
            id: id.into(),
            policy_identifier: row.policy_identifier,
        });

        let underwriting_period = row.underwriting_period_id.map(|id| UnderwritingPeriod {
            id: id.into(),
            policy_number_1: row.policy_number_1,
            policy_number_2: row.policy_number_2,
            policy_number_3: row.policy_number_3,
            policy,
        });

        Claim {
            id: row.claim_record_id.into(),
            claim_id: row.claim_id,
            claim_identifier: row.claim_identifier,
            incident_date: row.incident_date,
            report_received: row.report_received,
            initiated_date: row.initiated_date,
            finalized_date: row.finalized_date,
            underwriting_period,
        }
    }
}

/// Reserve transaction row
#[derive(Debug, Clone, FromRow)]
pub struct ReserveTransactionRow {
    pub reserve_id: Uuid,
    pub claim_id: String,
    pub reserve_type: String,
    pub transaction_date: NaiveDateTime,
}

impl From<ReserveTransactionRow> for ReserveTransaction {
    fn from(row: ReserveTransactionRow) -> Self {
        ReserveTransaction {
            id: row.reserve_id.into(),
            claim_id: row.claim_id,
            reserve_type: row.reserve_type,
            transaction_date: row.transaction_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_claims::ClaimCategory;

    fn bare_row() -> ClaimSnapshotRow {
        ClaimSnapshotRow {
            claim_record_id: Uuid::new_v4(),
            claim_id: "CL001".to_string(),
            claim_identifier: "CI001".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 1, 5).and_then(|d| d.and_hms_opt(8, 0, 0)),
            report_received: None,
            initiated_date: None,
            finalized_date: None,
            underwriting_period_id: None,
            policy_number_1: None,
            policy_number_2: None,
            policy_number_3: None,
            policy_id: None,
            policy_identifier: None,
        }
    }

    #[test]
    fn test_row_without_period_maps_to_claim_without_chain() {
        let claim = Claim::from(bare_row());

        assert!(claim.underwriting_period.is_none());
        assert_eq!(claim.policy_identifier(), "");
        assert_eq!(claim.category(), ClaimCategory::Unclassified);
    }

    #[test]
    fn test_row_with_full_chain() {
        let mut row = bare_row();
        row.underwriting_period_id = Some(Uuid::new_v4());
        row.policy_number_2 = Some("PN002".to_string());
        row.policy_id = Some(Uuid::new_v4());
        row.policy_identifier = Some("POL001".to_string());

        let claim = Claim::from(row);

        assert_eq!(claim.category(), ClaimCategory::Type2);
        assert_eq!(claim.policy_identifier(), "POL001");
    }

    #[test]
    fn test_period_without_policy_keeps_numbers() {
        let mut row = bare_row();
        row.underwriting_period_id = Some(Uuid::new_v4());
        row.policy_number_3 = Some("PN003".to_string());

        let claim = Claim::from(row);

        assert_eq!(claim.category(), ClaimCategory::Type3);
        assert_eq!(claim.policy_identifier(), "");
    }

    #[test]
    fn test_queries_do_not_correlate_per_claim() {
        assert!(!SELECT_CLAIMS.contains("$1"));
        assert!(!SELECT_RESERVES.contains("WHERE"));
    }
}
