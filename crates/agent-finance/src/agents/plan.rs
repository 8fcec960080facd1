//! Planning worker: turns a request into an [`AnalysisPlan`]

use super::call;
use crate::chart::{ChartType, metric_label};
use crate::data::Metric;
use crate::service::{CompanyList, DEFAULT_REPORT_TITLE, RecordIndex};
use crate::tools::Operation;
use agent_core::{Error, PipelineContext, Result, Task, ToolInvoker, Worker};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static QUARTER_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bQ([1-4])(?:\s*(?:-|to|through)\s*Q([1-4]))?\b")
        .expect("quarter mention pattern")
});

static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("json block pattern"));

/// Stage name whose output carries the plan
pub const PLAN_STAGE: &str = "plan";

/// One chart the visualizer should produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub chart_type: ChartType,
    pub metric: String,
    pub companies: Vec<String>,
    pub title: String,
}

/// Machine-readable plan shared by the later stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPlan {
    pub companies: Vec<String>,
    pub quarters: Vec<String>,
    pub metrics: Vec<String>,
    /// Records of the planned companies in the planned quarters
    pub record_ids: Vec<String>,
    pub charts: Vec<ChartRequest>,
    pub report_title: String,
}

impl AnalysisPlan {
    /// Read the plan from the plan stage's output in `context`
    pub fn from_context(context: &PipelineContext) -> Result<Self> {
        let output = context.output_of(PLAN_STAGE).ok_or_else(|| {
            Error::ProcessingFailed("No plan stage output in context".to_string())
        })?;

        let block = JSON_BLOCK
            .captures_iter(output)
            .filter_map(|captures| captures.get(1))
            .last()
            .ok_or_else(|| Error::ProcessingFailed("Plan output has no JSON block".to_string()))?;

        serde_json::from_str(block.as_str())
            .map_err(|e| Error::ProcessingFailed(format!("Malformed plan: {e}")))
    }

    /// The subset of `company_ids` that the plan covers, in the given order
    pub fn record_ids_in(&self, company_ids: &[String]) -> Vec<String> {
        company_ids
            .iter()
            .filter(|id| self.record_ids.contains(id))
            .cloned()
            .collect()
    }
}

/// Planner: picks companies, quarters, metrics and charts from the request
///
/// Calls `list_companies` and `get_all_record_ids`.
#[derive(Debug, Clone)]
pub struct PlanWorker {
    default_metric: String,
    report_title: String,
}

impl Default for PlanWorker {
    fn default() -> Self {
        Self {
            default_metric: Metric::Revenue.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

impl PlanWorker {
    pub fn new(default_metric: impl Into<String>, report_title: impl Into<String>) -> Self {
        Self {
            default_metric: default_metric.into(),
            report_title: report_title.into(),
        }
    }

    fn plan(&self, request: &str, companies: &CompanyList, index: &RecordIndex) -> AnalysisPlan {
        let lowered = request.to_lowercase();

        let mut selected: Vec<String> = companies
            .companies
            .iter()
            .filter(|company| mentions_company(&lowered, company))
            .cloned()
            .collect();
        if selected.is_empty() {
            selected.clone_from(&companies.companies);
        }

        let candidate_ids: Vec<&String> = index
            .by_company
            .iter()
            .filter(|group| selected.contains(&group.company))
            .flat_map(|group| group.record_ids.iter())
            .collect();

        // "Q2" or a range such as "Q1-Q3"
        let mentioned: Vec<String> = QUARTER_MENTION
            .captures_iter(request)
            .flat_map(|captures| {
                let start = captures[1].parse::<u8>().unwrap_or(1);
                let end = captures
                    .get(2)
                    .and_then(|m| m.as_str().parse::<u8>().ok())
                    .unwrap_or(start);
                (start.min(end)..=start.max(end)).map(|n| format!("Q{n}_"))
            })
            .collect();
        let mut record_ids: Vec<String> = candidate_ids
            .iter()
            .filter(|id| mentioned.iter().any(|prefix| id.contains(&format!("_{prefix}"))))
            .map(|id| (*id).clone())
            .collect();
        if record_ids.is_empty() {
            record_ids = candidate_ids.into_iter().cloned().collect();
        }

        let mut quarters: Vec<String> = record_ids
            .iter()
            .map(String::as_str)
            .filter_map(quarter_of)
            .collect();
        quarters.sort();
        quarters.dedup();

        let metrics = self.metrics_for(&lowered);
        let charts = chart_requests(&lowered, &selected, &metrics, &quarters);
        let report_title = if selected.len() == companies.companies.len() {
            self.report_title.clone()
        } else {
            format!("{}: {}", self.report_title, selected.join(" vs "))
        };

        AnalysisPlan {
            companies: selected,
            quarters,
            metrics,
            record_ids,
            charts,
            report_title,
        }
    }

    fn metrics_for(&self, lowered: &str) -> Vec<String> {
        let metrics: Vec<String> = Metric::ALL
            .into_iter()
            .filter(|metric| {
                metric_keywords(*metric)
                    .iter()
                    .any(|keyword| lowered.contains(keyword))
            })
            .map(|metric| metric.to_string())
            .collect();

        if metrics.is_empty() {
            vec![self.default_metric.clone()]
        } else {
            metrics
        }
    }
}

fn mentions_company(lowered_request: &str, company: &str) -> bool {
    let name = company.to_lowercase();
    if lowered_request.contains(&name) {
        return true;
    }
    name.split_whitespace()
        .next()
        .is_some_and(|first| lowered_request.split(|c: char| !c.is_alphanumeric()).any(|w| w == first))
}

fn metric_keywords(metric: Metric) -> &'static [&'static str] {
    match metric {
        Metric::Revenue => &["revenue", "sales", "top line"],
        Metric::Profit => &["profit", "margin", "earnings"],
        Metric::GrowthYoy => &["growth", "yoy"],
        Metric::EmployeeCount => &["employee", "headcount", "workforce"],
        Metric::AttritionRate => &["attrition", "churn"],
        Metric::DealValue => &["deal", "bookings"],
    }
}

/// `WAND_Q1_2025` -> `Q1_2025`
fn quarter_of(id: &str) -> Option<String> {
    id.split_once('_').map(|(_, quarter)| quarter.to_string())
}

fn chart_requests(
    lowered: &str,
    companies: &[String],
    metrics: &[String],
    quarters: &[String],
) -> Vec<ChartRequest> {
    let period = match (quarters.first(), quarters.last()) {
        (Some(first), Some(last)) if first != last => {
            format!(" {}-{}", first.replace('_', " "), last.replace('_', " "))
        }
        (Some(only), _) => format!(" {}", only.replace('_', " ")),
        _ => String::new(),
    };

    let mut charts: Vec<ChartRequest> = metrics
        .iter()
        .enumerate()
        .map(|(position, metric)| {
            let is_rate = matches!(metric.as_str(), "growth_yoy" | "attrition_rate");
            let (chart_type, title) = if position == 0 || is_rate {
                (ChartType::Line, format!("{} Trends{period}", metric_label(metric)))
            } else {
                (ChartType::Bar, format!("{} Comparison{period}", metric_label(metric)))
            };
            ChartRequest {
                chart_type,
                metric: metric.clone(),
                companies: companies.to_vec(),
                title,
            }
        })
        .collect();

    let wants_share = ["share", "pie", "distribution", "split"]
        .iter()
        .any(|keyword| lowered.contains(keyword));
    if wants_share && companies.len() > 1 {
        if let Some(metric) = metrics.first() {
            charts.push(ChartRequest {
                chart_type: ChartType::Pie,
                metric: metric.clone(),
                companies: companies.to_vec(),
                title: format!("{} Share{period}", metric_label(metric)),
            });
        }
    }

    charts
}

fn render(plan: &AnalysisPlan) -> Result<String> {
    let mut out = String::from("## Execution Plan\n\n");
    out.push_str(&format!("**Companies:** {}\n", plan.companies.join(", ")));
    out.push_str(&format!("**Quarters:** {}\n", plan.quarters.join(", ")));
    out.push_str(&format!("**Metrics:** {}\n", plan.metrics.join(", ")));
    out.push_str(&format!("**Record ids:** {}\n\n", plan.record_ids.join(", ")));

    out.push_str("### Data queries\n");
    for company in &plan.companies {
        out.push_str(&format!("- get_company_data(company_name=\"{company}\")\n"));
    }
    for metric in &plan.metrics {
        out.push_str(&format!(
            "- analyze_metrics(record_ids=<per company>, metric=\"{metric}\")\n"
        ));
    }
    if plan.companies.len() > 1 {
        out.push_str("- compare_companies for each company pair on every metric\n");
    }

    out.push_str("\n### Visualizations\n");
    for chart in &plan.charts {
        out.push_str(&format!(
            "- generate_chart_json(chart_type=\"{}\", company_names={:?}, metric=\"{}\", title=\"{}\")\n",
            chart.chart_type, chart.companies, chart.metric, chart.title
        ));
    }

    out.push_str(&format!(
        "\n### Report outline: {}\n\
         1. Executive Summary\n\
         2. Detailed Analysis\n\
         3. Visual Insights\n\
         4. Recommendations\n\
         5. Conclusion\n\n",
        plan.report_title
    ));

    let json = serde_json::to_string_pretty(plan)
        .map_err(|e| Error::ProcessingFailed(format!("Failed to serialize plan: {e}")))?;
    out.push_str(&format!("```json\n{json}\n```\n"));
    Ok(out)
}

#[async_trait]
impl Worker for PlanWorker {
    async fn invoke(&self, task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String> {
        let companies: CompanyList = call(tools.as_ref(), Operation::ListCompanies, json!({})).await?;
        let index: RecordIndex = call(tools.as_ref(), Operation::GetAllRecordIds, json!({})).await?;

        let plan = self.plan(&task.request, &companies, &index);
        debug!(
            companies = plan.companies.len(),
            records = plan.record_ids.len(),
            charts = plan.charts.len(),
            "Analysis planned"
        );
        render(&plan)
    }
}
