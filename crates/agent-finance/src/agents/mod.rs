//! Deterministic rule-based workers for the four analysis stages
//!
//! These workers stand in for a language-model backend. They read the
//! request and the prior-stage context, call only the tools their stage
//! permits, and write the same kind of output a model-backed worker would:
//! prose with embedded JSON payloads.

pub mod analyst;
pub mod plan;
pub mod visualizer;
pub mod writer;

pub use analyst::AnalystWorker;
pub use plan::{AnalysisPlan, ChartRequest, PlanWorker};
pub use visualizer::VisualizerWorker;
pub use writer::WriterWorker;

use crate::service::Envelope;
use crate::tools::Operation;
use agent_core::{Error, Result, ToolInvoker};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Invoke an operation and decode a successful envelope's payload
///
/// A `failed` or `not_found` envelope is an error.
pub(crate) async fn call<T: DeserializeOwned>(
    tools: &dyn ToolInvoker,
    operation: Operation,
    params: Value,
) -> Result<T> {
    let value = tools.invoke_tool(operation.name(), params).await?;
    Envelope::try_from(value)
        .and_then(|envelope| envelope.payload_as())
        .map_err(|e| Error::ProcessingFailed(format!("{operation}: {e}")))
}

/// Render a number without a trailing `.0` for whole values
pub(crate) fn fmt_num(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(316.0), "316");
        assert_eq!(fmt_num(105.333), "105.33");
        assert_eq!(fmt_num(44.7), "44.70");
    }
}
