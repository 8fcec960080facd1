//! Worker and tool-invoker trait definitions

use crate::{Result, Task};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// The reasoning capability behind a pipeline stage
///
/// A worker receives a [`Task`] (goal, persona, request, prior context and
/// allow-list) together with a tool surface restricted to that allow-list,
/// and returns free-form text. The text may embed structured payloads such
/// as chart or report JSON.
///
/// Implementations are pluggable: an LLM-backed worker, a deterministic
/// rule-based worker or a test double all satisfy the same contract.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Carry out a task and return the stage output
    async fn invoke(&self, task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String>;
}

/// The tool surface visible to a worker
///
/// Implementations must refuse any operation outside
/// [`allowed_operations`](ToolInvoker::allowed_operations).
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Names of the operations this invoker accepts
    fn allowed_operations(&self) -> Vec<String>;

    /// Invoke a named operation with JSON parameters
    async fn invoke_tool(&self, operation: &str, params: Value) -> Result<Value>;
}
