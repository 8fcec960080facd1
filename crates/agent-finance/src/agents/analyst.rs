//! Analysis worker: per-company figures, metric statistics and comparisons

use super::{AnalysisPlan, call, fmt_num};
use crate::analytics::{ComparisonResult, MetricResult};
use crate::chart::metric_label;
use crate::service::CompanyData;
use crate::tools::Operation;
use agent_core::{Result, Task, ToolInvoker, Worker};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Analyst: fetches each planned company's data, analyzes every planned
/// metric per company and compares every company pair
///
/// Calls `get_company_data`, `analyze_metrics` and `compare_companies`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalystWorker;

#[async_trait]
impl Worker for AnalystWorker {
    async fn invoke(&self, task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String> {
        let plan = AnalysisPlan::from_context(&task.context)?;
        let tools = tools.as_ref();

        let mut out = String::from("## Financial Analysis\n");

        let mut per_company: Vec<(String, Vec<MetricResult>)> = Vec::new();
        for company in &plan.companies {
            let data: CompanyData = call(
                tools,
                Operation::GetCompanyData,
                json!({ "company_name": company }),
            )
            .await?;
            let company_ids: Vec<String> = data.records.iter().map(|r| r.id.clone()).collect();
            let ids = plan.record_ids_in(&company_ids);

            out.push_str(&format!("\n### {company}\n\n"));
            if ids.is_empty() {
                debug!(company = %company, "No records in the planned quarters");
                out.push_str(&format!(
                    "No records for {company} in {}; skipped.\n",
                    plan.quarters.join(", ")
                ));
                per_company.push((company.clone(), Vec::new()));
                continue;
            }

            out.push_str("| Quarter | Revenue | Profit | Growth YoY % | Employees | Attrition % | Deal value |\n");
            out.push_str("|---|---|---|---|---|---|---|\n");
            for record in data.records.iter().filter(|r| ids.contains(&r.id)) {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    record.quarter,
                    fmt_num(record.revenue),
                    fmt_num(record.profit),
                    fmt_num(record.growth_yoy),
                    record.employee_count,
                    fmt_num(record.attrition_rate),
                    fmt_num(record.deal_value),
                ));
            }
            out.push('\n');

            let mut results = Vec::with_capacity(plan.metrics.len());
            for metric in &plan.metrics {
                let result: MetricResult = call(
                    tools,
                    Operation::AnalyzeMetrics,
                    json!({ "record_ids": ids, "metric": metric }),
                )
                .await?;
                out.push_str(&format!(
                    "- {}: average {}, min {}, max {}, trend {} over {} quarter(s)\n",
                    metric_label(metric),
                    fmt_num(result.average),
                    fmt_num(result.min),
                    fmt_num(result.max),
                    result.trend,
                    result.count,
                ));
                results.push(result);
            }
            per_company.push((company.clone(), results));
        }

        if plan.companies.len() > 1 {
            out.push_str("\n### Comparisons\n\n");
            for (i, first) in plan.companies.iter().enumerate() {
                for second in &plan.companies[i + 1..] {
                    for metric in &plan.metrics {
                        let result: ComparisonResult = call(
                            tools,
                            Operation::CompareCompanies,
                            json!({ "company1": first, "company2": second, "metric": metric }),
                        )
                        .await?;
                        out.push_str(&comparison_line(&result));
                    }
                }
            }
        }

        out.push_str("\n### Key insights\n\n");
        for (position, metric) in plan.metrics.iter().enumerate() {
            let best = per_company
                .iter()
                .filter_map(|(company, results)| results.get(position).map(|r| (company, r)))
                .max_by(|a, b| a.1.average.total_cmp(&b.1.average));
            if let Some((company, result)) = best {
                out.push_str(&format!(
                    "- Highest average {}: {company} ({}, trend {})\n",
                    metric_label(metric).to_lowercase(),
                    fmt_num(result.average),
                    result.trend,
                ));
            }
        }

        debug!(companies = plan.companies.len(), metrics = plan.metrics.len(), "Analysis written");
        Ok(out)
    }
}

fn comparison_line(result: &ComparisonResult) -> String {
    format!(
        "- {}: {} {} vs {} {} (difference {}); leader: {}\n",
        metric_label(&result.metric),
        result.company1,
        fmt_num(result.company1_avg),
        result.company2,
        fmt_num(result.company2_avg),
        fmt_num(result.difference),
        result.leader,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_line() {
        let result = ComparisonResult {
            company1: "Wand AI".to_string(),
            company2: "Nityo Infotech".to_string(),
            metric: "growth_yoy".to_string(),
            company1_avg: 44.7,
            company2_avg: 12.17,
            difference: 32.53,
            leader: "Wand AI".to_string(),
        };
        assert_eq!(
            comparison_line(&result),
            "- Growth Yoy: Wand AI 44.70 vs Nityo Infotech 12.17 (difference 32.53); leader: Wand AI\n"
        );
    }
}
