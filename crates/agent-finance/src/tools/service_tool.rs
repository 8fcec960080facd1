//! Tool adapter exposing one service operation to workers

use super::Operation;
use crate::error::FinanceError;
use crate::service::ToolService;
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// A [`ToolService`] operation packaged as a [`Tool`]
///
/// The tool returns the operation's envelope as JSON. Only parameters that
/// fail to decode produce an `Err`.
pub struct ServiceTool {
    operation: Operation,
    service: Arc<ToolService>,
}

#[derive(Debug, Deserialize)]
struct CompanyParams {
    company_name: String,
}

#[derive(Debug, Deserialize)]
struct QuarterParams {
    quarter: String,
}

#[derive(Debug, Deserialize)]
struct MetricsParams {
    record_ids: Vec<String>,
    metric: String,
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    company1: String,
    company2: String,
    #[serde(default = "default_metric")]
    metric: String,
}

#[derive(Debug, Deserialize)]
struct ChartParams {
    chart_type: String,
    company_names: Vec<String>,
    metric: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ReportParams {
    record_ids: Vec<String>,
    #[serde(default)]
    report_title: Option<String>,
}

fn default_metric() -> String {
    "revenue".to_string()
}

impl ServiceTool {
    pub fn new(operation: Operation, service: Arc<ToolService>) -> Self {
        Self { operation, service }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    fn call(&self, params: Value) -> Result<Value, FinanceError> {
        let service = &self.service;
        let envelope = match self.operation {
            Operation::ListCompanies => service.list_companies(),
            Operation::GetAllRecordIds => service.get_all_record_ids(),
            Operation::GetCompanyData => {
                let p: CompanyParams = decode(params)?;
                service.get_company_data(&p.company_name)
            }
            Operation::GetQuarterData => {
                let p: QuarterParams = decode(params)?;
                service.get_quarter_data(&p.quarter)
            }
            Operation::AnalyzeMetrics => {
                let p: MetricsParams = decode(params)?;
                service.analyze_metrics(&p.record_ids, &p.metric)
            }
            Operation::CompareCompanies => {
                let p: CompareParams = decode(params)?;
                service.compare_companies(&p.company1, &p.company2, &p.metric)
            }
            Operation::GenerateChartJson => {
                let p: ChartParams = decode(params)?;
                service.generate_chart_json(&p.chart_type, &p.company_names, &p.metric, &p.title)
            }
            Operation::GenerateReport => {
                let p: ReportParams = decode(params)?;
                service.generate_report(&p.record_ids, p.report_title.as_deref())
            }
        };
        Ok(envelope.into_value())
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> Result<T, FinanceError> {
    serde_json::from_value(params).map_err(|e| FinanceError::InvalidParameters(e.to_string()))
}

#[async_trait]
impl Tool for ServiceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        Ok(self.call(params)?)
    }

    fn name(&self) -> &str {
        self.operation.name()
    }

    fn description(&self) -> &str {
        self.operation.description()
    }

    fn input_schema(&self) -> Value {
        self.operation.input_schema()
    }
}
