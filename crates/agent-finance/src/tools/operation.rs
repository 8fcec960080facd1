//! Names, descriptions and input schemas of the service operations

use crate::error::FinanceError;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// One named Tool Service operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCompanies,
    GetCompanyData,
    GetQuarterData,
    AnalyzeMetrics,
    CompareCompanies,
    GenerateChartJson,
    GenerateReport,
    GetAllRecordIds,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::ListCompanies,
        Operation::GetCompanyData,
        Operation::GetQuarterData,
        Operation::AnalyzeMetrics,
        Operation::CompareCompanies,
        Operation::GenerateChartJson,
        Operation::GenerateReport,
        Operation::GetAllRecordIds,
    ];

    /// Tool name used in registries and allow-lists
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListCompanies => "list_companies",
            Operation::GetCompanyData => "get_company_data",
            Operation::GetQuarterData => "get_quarter_data",
            Operation::AnalyzeMetrics => "analyze_metrics",
            Operation::CompareCompanies => "compare_companies",
            Operation::GenerateChartJson => "generate_chart_json",
            Operation::GenerateReport => "generate_report",
            Operation::GetAllRecordIds => "get_all_record_ids",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::ListCompanies => {
                "Get the list of all companies with financial data."
            }
            Operation::GetCompanyData => {
                "Get all quarterly financial records for one company. \
                 Company names match case-insensitively."
            }
            Operation::GetQuarterData => {
                "Get the financial records of every company for one quarter (e.g. Q1_2025)."
            }
            Operation::AnalyzeMetrics => {
                "Compute average, max, min and trend of a metric (revenue, profit, growth_yoy, \
                 employee_count, attrition_rate, deal_value) across record ids."
            }
            Operation::CompareCompanies => {
                "Compare the average of a metric between two companies and name the leader."
            }
            Operation::GenerateChartJson => {
                "Generate a line, bar or pie chart of a metric for a list of companies. \
                 Returns the figure as a JSON string in plotly_json plus a chart_id."
            }
            Operation::GenerateReport => {
                "Generate a structured multi-company financial summary from record ids."
            }
            Operation::GetAllRecordIds => {
                "Get every valid record id (format COMPANY_Q<N>_<YEAR>), flat and grouped by company."
            }
        }
    }

    /// JSON schema of the operation's parameters
    pub fn input_schema(self) -> Value {
        match self {
            Operation::ListCompanies | Operation::GetAllRecordIds => json!({
                "type": "object",
                "properties": {}
            }),
            Operation::GetCompanyData => json!({
                "type": "object",
                "properties": {
                    "company_name": {
                        "type": "string",
                        "description": "Company name, e.g. 'Wand AI'"
                    }
                },
                "required": ["company_name"]
            }),
            Operation::GetQuarterData => json!({
                "type": "object",
                "properties": {
                    "quarter": {
                        "type": "string",
                        "description": "Quarter identifier, e.g. 'Q1_2025'"
                    }
                },
                "required": ["quarter"]
            }),
            Operation::AnalyzeMetrics => json!({
                "type": "object",
                "properties": {
                    "record_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Record ids, e.g. ['WAND_Q1_2025', 'WAND_Q2_2025']"
                    },
                    "metric": {
                        "type": "string",
                        "description": "Metric to analyze"
                    }
                },
                "required": ["record_ids", "metric"]
            }),
            Operation::CompareCompanies => json!({
                "type": "object",
                "properties": {
                    "company1": { "type": "string" },
                    "company2": { "type": "string" },
                    "metric": {
                        "type": "string",
                        "default": "revenue"
                    }
                },
                "required": ["company1", "company2"]
            }),
            Operation::GenerateChartJson => json!({
                "type": "object",
                "properties": {
                    "chart_type": {
                        "type": "string",
                        "enum": ["line", "bar", "pie"]
                    },
                    "company_names": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "metric": { "type": "string" },
                    "title": { "type": "string" }
                },
                "required": ["chart_type", "company_names", "metric", "title"]
            }),
            Operation::GenerateReport => json!({
                "type": "object",
                "properties": {
                    "record_ids": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "report_title": {
                        "type": "string",
                        "default": "Financial Analysis Report"
                    }
                },
                "required": ["record_ids"]
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| FinanceError::InvalidParameters(format!("unknown operation: {s}")))
    }
}
