//! Allow-list restricted view of a tool registry

use crate::ToolRegistry;
use agent_core::{Error, Result, ToolInvoker};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// A capability boundary around a [`ToolRegistry`]
///
/// A scope only forwards calls whose operation name is in its allow-list.
/// Anything else is rejected with [`Error::ToolNotPermitted`] before the
/// registry is consulted, so a worker can never reach a tool assigned to
/// another stage.
#[derive(Clone)]
pub struct ToolScope {
    label: String,
    registry: Arc<ToolRegistry>,
    allowed: Vec<String>,
}

impl ToolScope {
    /// Create a scope over `registry` admitting only `allowed`
    ///
    /// Fails with [`Error::ToolNotFound`] if an allow-list entry is not
    /// registered.
    pub fn new(
        label: impl Into<String>,
        registry: Arc<ToolRegistry>,
        allowed: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for name in allowed {
            let name = name.into();
            if !registry.contains(&name) {
                return Err(Error::ToolNotFound(name));
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }

        Ok(Self {
            label: label.into(),
            registry,
            allowed: names,
        })
    }

    /// Label of the stage this scope belongs to
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if an operation is permitted
    pub fn permits(&self, operation: &str) -> bool {
        self.allowed.iter().any(|name| name == operation)
    }

    /// The allow-list, in declaration order
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

#[async_trait]
impl ToolInvoker for ToolScope {
    fn allowed_operations(&self) -> Vec<String> {
        self.allowed.clone()
    }

    async fn invoke_tool(&self, operation: &str, params: Value) -> Result<Value> {
        if !self.permits(operation) {
            warn!(scope = %self.label, tool = operation, "Rejected tool call outside allow-list");
            return Err(Error::ToolNotPermitted {
                tool: operation.to_string(),
                allowed: self.allowed.clone(),
            });
        }

        let tool = self
            .registry
            .get(operation)
            .ok_or_else(|| Error::ToolNotFound(operation.to_string()))?;

        debug!(scope = %self.label, tool = operation, "Executing tool");
        tool.execute(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::EchoTool;
    use serde_json::json;

    fn registry() -> Arc<ToolRegistry> {
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(EchoTool("list_companies")));
        registry.register(Arc::new(EchoTool("get_company_data")));
        registry.register(Arc::new(EchoTool("generate_report")));
        registry
    }

    #[tokio::test]
    async fn test_allowed_call_reaches_tool() {
        let scope = ToolScope::new("plan", registry(), ["list_companies"]).unwrap();
        let out = scope.invoke_tool("list_companies", json!({})).await.unwrap();
        assert_eq!(out["tool"], "list_companies");
    }

    #[tokio::test]
    async fn test_disallowed_call_is_rejected() {
        let scope = ToolScope::new("plan", registry(), ["list_companies"]).unwrap();
        let err = scope
            .invoke_tool("generate_report", json!({}))
            .await
            .unwrap_err();

        match err {
            Error::ToolNotPermitted { tool, allowed } => {
                assert_eq!(tool, "generate_report");
                assert_eq!(allowed, vec!["list_companies"]);
            }
            other => panic!("Expected ToolNotPermitted, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_allow_list_entry() {
        let result = ToolScope::new("plan", registry(), ["no_such_tool"]);
        assert!(matches!(result, Err(Error::ToolNotFound(name)) if name == "no_such_tool"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let scope = ToolScope::new(
            "analyze",
            registry(),
            ["get_company_data", "list_companies", "get_company_data"],
        )
        .unwrap();
        assert_eq!(scope.allowed(), ["get_company_data", "list_companies"]);
        assert_eq!(scope.label(), "analyze");
    }
}
