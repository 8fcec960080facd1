//! Tool trait definition

use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that workers can execute
///
/// Tools are the only way a worker reaches the analytical data service.
/// Each tool provides a name, a description and a JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry; stage allow-lists refer to it
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a company lookup tool:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "company_name": { "type": "string" }
    ///     },
    ///     "required": ["company_name"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}
