//! Database Test Utilities
//!
//! PostgreSQL test containers bootstrapped with the snapshot schema, plus a
//! helper to write an in-memory snapshot into the tables.

use domain_claims::adapters::InMemoryClaimsSnapshot;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::collections::HashSet;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use uuid::Uuid;

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "claims_test";

type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the snapshot schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails to apply
    pub async fn new() -> TestResult<Self> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432.tcp()).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            host,
            port,
            ..Default::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        sqlx::raw_sql(infra_db::SNAPSHOT_SCHEMA).execute(&pool).await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Writes every record of an in-memory snapshot into the tables
    pub async fn insert_snapshot(&self, snapshot: &InMemoryClaimsSnapshot) -> TestResult<()> {
        let mut tx = self.pool.begin().await?;
        let mut policies: HashSet<Uuid> = HashSet::new();

        for period in snapshot.underwriting_periods() {
            if let Some(policy) = &period.policy {
                if policies.insert(*policy.id.as_uuid()) {
                    sqlx::query("INSERT INTO policies (policy_id, policy_identifier) VALUES ($1, $2)")
                        .bind(policy.id.as_uuid())
                        .bind(&policy.policy_identifier)
                        .execute(&mut *tx)
                        .await?;
                }
            }

            sqlx::query(
                "INSERT INTO underwriting_periods \
                 (underwriting_period_id, policy_number_1, policy_number_2, policy_number_3, policy_id) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(period.id.as_uuid())
            .bind(&period.policy_number_1)
            .bind(&period.policy_number_2)
            .bind(&period.policy_number_3)
            .bind(period.policy.as_ref().map(|p| *p.id.as_uuid()))
            .execute(&mut *tx)
            .await?;
        }

        for claim in snapshot.claims() {
            sqlx::query(
                "INSERT INTO claims \
                 (claim_record_id, claim_id, claim_identifier, incident_date, report_received, \
                  initiated_date, finalized_date, underwriting_period_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(claim.id.as_uuid())
            .bind(&claim.claim_id)
            .bind(&claim.claim_identifier)
            .bind(claim.incident_date)
            .bind(claim.report_received)
            .bind(claim.initiated_date)
            .bind(claim.finalized_date)
            .bind(claim.underwriting_period.as_ref().map(|p| *p.id.as_uuid()))
            .execute(&mut *tx)
            .await?;
        }

        for reserve in snapshot.reserve_transactions() {
            sqlx::query(
                "INSERT INTO reserves (reserve_id, claim_id, reserve_type, transaction_date) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(reserve.id.as_uuid())
            .bind(&reserve.claim_id)
            .bind(&reserve.reserve_type)
            .bind(reserve.transaction_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
