//! Stage goal templates and expected outputs

/// Rendered with `request`
pub const PLAN_GOAL: &str = r"Analyze this business request and create a detailed execution plan:

USER REQUEST: {{ request }}

Your plan must:
1. Identify which companies need to be analyzed
2. Determine which quarters are relevant
3. Specify which metrics should be analyzed (revenue, profit, growth_yoy, attrition_rate, employee_count, deal_value)
4. List the record ids and tool calls required
5. Define the visualization requirements
6. Outline the final report structure

Be specific about record ids and tool parameters.";

pub const PLAN_EXPECTED: &str = "A structured execution plan listing companies, quarters, metrics, \
record ids, chart specifications and a report outline, followed by the plan as a fenced JSON block.";

pub const ANALYZE_GOAL: &str = r"Based on the planning output, perform a financial analysis of: {{ request }}

1. Use get_company_data to fetch quarterly data for the planned companies
2. Use analyze_metrics to calculate statistics and trends for the planned metrics
3. Use compare_companies when more than one company is involved
4. Identify significant insights and anomalies

Provide quantitative findings with specific numbers, always naming the company and quarter.";

pub const ANALYZE_EXPECTED: &str = "Per-company figures, calculated metrics (averages, extremes, \
trends), comparisons between companies and key insights with specific numbers.";

pub const VISUALIZE_GOAL: &str = r"Create the charts planned for: {{ request }}

Call generate_chart_json once for each planned chart and return the tool results as a JSON array of
chart objects, each with chart_type, metric, plotly_json and chart_id. Do not write descriptions.";

pub const VISUALIZE_EXPECTED: &str = "Only a fenced JSON array of chart objects \
{chart_type, metric, plotly_json, chart_id}.";

pub const REPORT_GOAL: &str = r"Create an executive report answering: {{ request }}

1. Review the execution plan, analysis results and chart configurations
2. Use generate_report to compile the summary
3. Structure the report with an executive summary, detailed analysis, visual insights
   (referencing charts by chart_id), recommendations and a conclusion";

pub const REPORT_EXPECTED: &str = "A professional financial report with an executive summary, \
detailed findings, chart references, comparisons, recommendations and a conclusion.";
