//! Configuration for financial analysis

use crate::data::{Metric, RecordStore};
use crate::error::{FinanceError, Result};
use crate::service::DEFAULT_REPORT_TITLE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an alternative dataset file
pub const DATASET_ENV: &str = "FINANCE_DATASET";

/// Configuration for financial analysis runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceConfig {
    /// JSON dataset to load instead of the embedded canonical records
    pub dataset_path: Option<PathBuf>,

    /// Metric used when a request names none
    pub default_metric: String,

    /// Title for reports that do not name one
    pub report_title: String,

    /// Log each stage's raw output at info level
    pub verbose: bool,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            default_metric: Metric::Revenue.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            verbose: false,
        }
    }
}

impl FinanceConfig {
    /// Create a new configuration builder
    pub fn builder() -> FinanceConfigBuilder {
        FinanceConfigBuilder::default()
    }

    /// Take the dataset path from `FINANCE_DATASET` if it is set
    pub fn with_env(mut self) -> Self {
        match std::env::var(DATASET_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                self.dataset_path = Some(PathBuf::from(path));
            }
            _ => {}
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_metric.parse::<Metric>().is_err() {
            return Err(FinanceError::ConfigError(format!(
                "default_metric '{}' is not one of: {}",
                self.default_metric,
                Metric::ALL.map(Metric::as_str).join(", ")
            )));
        }

        if self.report_title.trim().is_empty() {
            return Err(FinanceError::ConfigError(
                "report_title must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Load the configured dataset, or the canonical one
    pub fn load_store(&self) -> Result<RecordStore> {
        match &self.dataset_path {
            Some(path) => RecordStore::from_json_file(path),
            None => Ok(RecordStore::canonical()),
        }
    }
}

/// Builder for FinanceConfig
#[derive(Debug, Default)]
pub struct FinanceConfigBuilder {
    dataset_path: Option<PathBuf>,
    default_metric: Option<String>,
    report_title: Option<String>,
    verbose: Option<bool>,
}

impl FinanceConfigBuilder {
    /// Set the dataset file
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Set the default metric
    pub fn default_metric(mut self, metric: impl Into<String>) -> Self {
        self.default_metric = Some(metric.into());
        self
    }

    /// Set the default report title
    pub fn report_title(mut self, title: impl Into<String>) -> Self {
        self.report_title = Some(title.into());
        self
    }

    /// Enable verbose stage logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<FinanceConfig> {
        let defaults = FinanceConfig::default();

        let config = FinanceConfig {
            dataset_path: self.dataset_path.or(defaults.dataset_path),
            default_metric: self.default_metric.unwrap_or(defaults.default_metric),
            report_title: self.report_title.unwrap_or(defaults.report_title),
            verbose: self.verbose.unwrap_or(defaults.verbose),
        };

        config.validate()?;
        Ok(config)
    }
}
