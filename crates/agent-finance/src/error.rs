//! Error types for financial analysis operations

use crate::service::Status;
use thiserror::Error;

/// Financial analysis specific errors
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Lookup target (company, quarter or record id) is absent
    #[error("No data found for {kind}: {key}")]
    NotFound {
        /// What was looked up ("company", "quarter", "record")
        kind: &'static str,
        /// The key that missed
        key: String,
    },

    /// Query succeeded but no values survived metric filtering
    #[error("No valid data for metric: {metric}")]
    NoData {
        /// The requested metric name
        metric: String,
    },

    /// Caller supplied no record ids
    #[error("No records provided")]
    EmptyInput,

    /// None of the supplied record ids resolved
    #[error("No valid records found")]
    NoValidRecords,

    /// Chart type outside line/bar/pie
    #[error("Unsupported chart type: {0} (expected line, bar or pie)")]
    UnsupportedChartType(String),

    /// A record failed validation while loading the store
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord {
        /// Offending record id
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two records share an id
    #[error("Duplicate record id: {0}")]
    DuplicateRecord(String),

    /// Operation parameters could not be decoded
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Dataset file could not be read
    #[error("Dataset error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unexpected fault inside an operation
    #[error("{0}")]
    Upstream(String),
}

impl FinanceError {
    /// Envelope status this error maps to
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound { .. } => Status::NotFound,
            _ => Status::Failed,
        }
    }

    /// Shorthand for a company miss
    pub fn company_not_found(company: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "company",
            key: company.into(),
        }
    }
}

/// Result type alias for financial analysis operations
pub type Result<T> = std::result::Result<T, FinanceError>;

/// Convert FinanceError to agent_core::Error
impl From<FinanceError> for agent_core::Error {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::InvalidParameters(msg) => agent_core::Error::InvalidParameters(msg),
            other => agent_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}

/// Convert agent_core::Error to FinanceError
impl From<agent_core::Error> for FinanceError {
    fn from(err: agent_core::Error) -> Self {
        FinanceError::Upstream(err.to_string())
    }
}
