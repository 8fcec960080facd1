//! Report worker: executive report built on `generate_report`

use super::{AnalysisPlan, call, fmt_num};
use crate::analytics::MetricResult;
use crate::chart::{ChartPayload, metric_label, parse_chart_payloads};
use crate::service::Report;
use crate::tools::Operation;
use agent_core::{Error, PipelineContext, Result, Task, ToolInvoker, Worker};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Stage name whose output carries the chart payloads
pub const VISUALIZE_STAGE: &str = "visualize";

/// Writer: compiles the report summary and writes an executive report
/// referencing the charts by id
///
/// Calls `generate_report` and `analyze_metrics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterWorker;

#[async_trait]
impl Worker for WriterWorker {
    async fn invoke(&self, task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String> {
        let plan = AnalysisPlan::from_context(&task.context)?;
        let tools = tools.as_ref();

        let report: Report = call(
            tools,
            Operation::GenerateReport,
            json!({ "record_ids": plan.record_ids, "report_title": plan.report_title }),
        )
        .await?;

        let mut overall = Vec::with_capacity(plan.metrics.len());
        for metric in &plan.metrics {
            let result: MetricResult = call(
                tools,
                Operation::AnalyzeMetrics,
                json!({ "record_ids": plan.record_ids, "metric": metric }),
            )
            .await?;
            overall.push(result);
        }

        let charts = charts_in(&task.context);
        compose(&report, &overall, &charts)
    }
}

fn charts_in(context: &PipelineContext) -> Vec<ChartPayload> {
    let Some(output) = context.output_of(VISUALIZE_STAGE) else {
        return Vec::new();
    };
    parse_chart_payloads(output).unwrap_or_else(|e| {
        warn!(error = %e, "Visualization output did not parse as charts");
        Vec::new()
    })
}

fn compose(report: &Report, overall: &[MetricResult], charts: &[ChartPayload]) -> Result<String> {
    let summary = &report.summary;
    let mut out = format!("# {}\n\n_Generated at {}_\n\n", report.title, report.generated_at);

    out.push_str("## Executive Summary\n\n");
    if let Some(top) = summary
        .by_company
        .iter()
        .max_by(|a, b| a.total_revenue.total_cmp(&b.total_revenue))
    {
        out.push_str(&format!(
            "1. {} leads on revenue with {} across {} quarter(s).\n",
            top.company,
            fmt_num(top.total_revenue),
            top.quarter_count
        ));
    }
    if let Some(fastest) = summary
        .by_company
        .iter()
        .max_by(|a, b| a.avg_growth.total_cmp(&b.avg_growth))
    {
        out.push_str(&format!(
            "2. {} grows fastest, averaging {}% year over year.\n",
            fastest.company,
            fmt_num(fastest.avg_growth)
        ));
    }
    out.push_str(&format!(
        "3. Combined revenue is {} and combined profit {} over {}, with average growth of {}%.\n\n",
        fmt_num(summary.total_revenue),
        fmt_num(summary.total_profit),
        summary.quarters.join(", "),
        fmt_num(summary.avg_growth)
    ));

    out.push_str("## Detailed Analysis\n\n");
    out.push_str("| Company | Quarters | Total revenue | Avg growth % |\n|---|---|---|---|\n");
    for company in &summary.by_company {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            company.company,
            company.quarter_count,
            fmt_num(company.total_revenue),
            fmt_num(company.avg_growth)
        ));
    }
    out.push('\n');
    for result in overall {
        out.push_str(&format!(
            "- {} across all selected records: average {}, range {} to {}, trend {}\n",
            metric_label(&result.metric),
            fmt_num(result.average),
            fmt_num(result.min),
            fmt_num(result.max),
            result.trend
        ));
    }

    out.push_str("\n## Visual Insights\n\n");
    if charts.is_empty() {
        out.push_str("No charts were produced for this request.\n");
    }
    for chart in charts {
        out.push_str(&format!(
            "- `{}`: {} chart of {}\n",
            chart.chart_id,
            chart.chart_type,
            metric_label(&chart.metric).to_lowercase()
        ));
    }

    out.push_str("\n## Recommendations\n\n");
    for company in &summary.by_company {
        let advice = if company.avg_growth >= summary.avg_growth {
            "sustain investment behind its above-average growth"
        } else {
            "review growth levers; it trails the group average"
        };
        out.push_str(&format!("- {}: {advice}.\n", company.company));
    }

    out.push_str(&format!(
        "\n## Conclusion\n\n{} companies were reviewed over {} record(s).\n\n",
        summary.company_count, summary.total_records
    ));

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| Error::ProcessingFailed(format!("Failed to serialize report: {e}")))?;
    out.push_str(&format!("```json\n{json}\n```\n"));
    Ok(out)
}
