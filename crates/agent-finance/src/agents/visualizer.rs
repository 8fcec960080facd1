//! Visualization worker: one chart payload per planned chart

use super::{AnalysisPlan, call};
use crate::chart::ChartPayload;
use crate::tools::Operation;
use agent_core::{Error, Result, Task, ToolInvoker, Worker};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Visualizer: calls `generate_chart_json` for every chart in the plan and
/// returns the results, unmodified, as a fenced JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualizerWorker;

#[async_trait]
impl Worker for VisualizerWorker {
    async fn invoke(&self, task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String> {
        let plan = AnalysisPlan::from_context(&task.context)?;

        let mut charts: Vec<ChartPayload> = Vec::with_capacity(plan.charts.len());
        for request in &plan.charts {
            let mut chart: ChartPayload = call(
                tools.as_ref(),
                Operation::GenerateChartJson,
                json!({
                    "chart_type": request.chart_type,
                    "company_names": request.companies,
                    "metric": request.metric,
                    "title": request.title,
                }),
            )
            .await?;
            chart.companies.clear();
            debug!(chart_id = %chart.chart_id, "Chart generated");
            charts.push(chart);
        }

        let json = serde_json::to_string_pretty(&charts)
            .map_err(|e| Error::ProcessingFailed(format!("Failed to serialize charts: {e}")))?;
        Ok(format!("```json\n{json}\n```"))
    }
}
