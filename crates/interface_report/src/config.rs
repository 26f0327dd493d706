//! Report configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::CoreError;
use domain_claims::{ClaimTimelineAggregator, MissingIncidentPolicy, TransactionCategories};

/// Where the claims snapshot is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Built-in demo records, dated relative to the current time
    Seed,
    /// PostgreSQL tables at `database_url`
    Postgres,
}

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Table,
    Json,
}

/// How log lines are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Snapshot source
    pub data_source: DataSource,
    /// Database URL, used with the postgres source
    pub database_url: String,
    /// Pool size for the postgres source
    pub max_connections: u32,
    /// Seconds to wait for a database connection before the run fails
    pub connect_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Report output format
    pub output: OutputFormat,
    /// Print per-claim detail rows before the monthly averages
    pub include_claims: bool,
    /// Handling of claims without an incident date
    pub missing_incident: MissingIncidentPolicy,
    /// Tags marking reserve transactions
    pub reserve_categories: Vec<String>,
    /// Tags marking payment transactions
    pub payment_categories: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let categories = TransactionCategories::default();
        Self {
            data_source: DataSource::Seed,
            database_url: "postgres://localhost/claims".to_string(),
            max_connections: 2,
            connect_timeout_secs: 30,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            output: OutputFormat::Table,
            include_claims: false,
            missing_incident: MissingIncidentPolicy::Skip,
            reserve_categories: categories.reserve,
            payment_categories: categories.payment,
        }
    }
}

impl ReportConfig {
    /// Loads configuration from `REPORT_*` environment variables
    ///
    /// Category lists are comma separated, e.g. `REPORT_PAYMENT_CATEGORIES=ABC,EFG`.
    /// Entries are trimmed and blank entries dropped, so an empty variable
    /// yields an empty list that [`ReportConfig::validate`] rejects.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut loaded: Self = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("REPORT")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("reserve_categories")
                    .with_list_parse_key("payment_categories"),
            )
            .build()?
            .try_deserialize()?;

        loaded.reserve_categories = clean_tags(loaded.reserve_categories);
        loaded.payment_categories = clean_tags(loaded.payment_categories);
        Ok(loaded)
    }

    /// Checks values the type system cannot
    pub fn validate(&self) -> Result<(), CoreError> {
        if all_blank(&self.reserve_categories) {
            return Err(CoreError::EmptyCategorySet("reserve"));
        }
        if all_blank(&self.payment_categories) {
            return Err(CoreError::EmptyCategorySet("payment"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CoreError::configuration("connect_timeout_secs must be positive"));
        }
        if self.data_source == DataSource::Postgres && self.database_url.trim().is_empty() {
            return Err(CoreError::configuration("database_url is required for the postgres source"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Aggregator configured with this report's categories and policy
    pub fn aggregator(&self) -> ClaimTimelineAggregator {
        ClaimTimelineAggregator::new(
            TransactionCategories::new(
                self.reserve_categories.iter().cloned(),
                self.payment_categories.iter().cloned(),
            ),
            self.missing_incident,
        )
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn all_blank(tags: &[String]) -> bool {
    tags.iter().all(|tag| tag.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_categories() {
        let config = ReportConfig::default();

        assert_eq!(config.data_source, DataSource::Seed);
        assert_eq!(config.reserve_categories, vec!["XYZ"]);
        assert_eq!(config.payment_categories, vec!["ABC", "EFG"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_source_falls_back_to_defaults() {
        let config: ReportConfig = config::Config::builder()
            .set_override("output", "json")
            .unwrap()
            .set_override("missing_incident", "reject")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.missing_incident, MissingIncidentPolicy::Reject);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_categories_rejected() {
        let config = ReportConfig {
            payment_categories: vec![],
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, CoreError::EmptyCategorySet("payment")));
    }

    #[test]
    fn test_blank_category_entries_count_as_empty() {
        let config = ReportConfig {
            reserve_categories: vec!["".into(), "  ".into()],
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(CoreError::EmptyCategorySet("reserve"))));
    }

    #[test]
    fn test_env_category_lists_are_cleaned() {
        std::env::set_var("REPORT_PAYMENT_CATEGORIES", "");
        std::env::set_var("REPORT_RESERVE_CATEGORIES", " XYZ , QRS,");
        let loaded = ReportConfig::from_env();
        std::env::remove_var("REPORT_PAYMENT_CATEGORIES");
        std::env::remove_var("REPORT_RESERVE_CATEGORIES");

        let config = loaded.unwrap();
        assert!(config.payment_categories.is_empty());
        assert_eq!(config.reserve_categories, vec!["XYZ", "QRS"]);
        assert!(matches!(config.validate(), Err(CoreError::EmptyCategorySet("payment"))));
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let config = ReportConfig {
            connect_timeout_secs: 0,
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_aggregator_carries_settings() {
        let config = ReportConfig {
            reserve_categories: vec!["R".into()],
            missing_incident: MissingIncidentPolicy::Reject,
            ..Default::default()
        };

        let aggregator = config.aggregator();
        assert!(aggregator.categories().is_reserve("R"));
        assert!(!aggregator.categories().is_reserve("XYZ"));
        assert_eq!(aggregator.missing_incident(), MissingIncidentPolicy::Reject);
    }
}
