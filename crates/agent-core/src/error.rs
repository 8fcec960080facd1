//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Pipeline or worker initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Worker processing failed
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    /// A tool name is not present in the registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// A worker called a tool outside its stage allow-list
    #[error("Tool '{tool}' is not permitted for this stage (allowed: {})", allowed.join(", "))]
    ToolNotPermitted {
        /// The rejected tool name
        tool: String,
        /// The stage allow-list
        allowed: Vec<String>,
    },

    /// Tool parameters could not be decoded
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
