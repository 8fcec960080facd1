//! Service operations exposed as workspace tools

pub mod operation;
pub mod service_tool;

pub use operation::Operation;
pub use service_tool::ServiceTool;

use crate::service::ToolService;
use agent_tools::ToolRegistry;
use std::sync::Arc;

/// Register one tool per service operation
pub fn register_tools(registry: &ToolRegistry, service: &Arc<ToolService>) {
    for operation in Operation::ALL {
        registry.register(Arc::new(ServiceTool::new(operation, Arc::clone(service))));
    }
}

/// A registry holding every service operation
pub fn service_registry(service: &Arc<ToolService>) -> Arc<ToolRegistry> {
    let registry = ToolRegistry::new();
    register_tools(&registry, service);
    Arc::new(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordStore;

    #[test]
    fn test_registry_holds_every_operation() {
        let service = Arc::new(ToolService::new(RecordStore::canonical()));
        let registry = service_registry(&service);

        assert_eq!(registry.len(), Operation::ALL.len());
        for operation in Operation::ALL {
            assert!(registry.contains(operation.name()));
        }
    }
}
