//! Payload shapes of the service operations

use crate::data::FinancialRecord;
use crate::report::ReportSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyList {
    pub companies: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    pub company: String,
    pub records: Vec<FinancialRecord>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterData {
    pub quarter: String,
    pub records: Vec<FinancialRecord>,
    /// Company of each record, in record order
    pub companies: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecordIds {
    pub company: String,
    pub record_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIndex {
    /// Every id in store order
    pub all_record_ids: Vec<String>,
    /// Ids grouped by company, companies in first-seen order
    pub by_company: Vec<CompanyRecordIds>,
    /// Company name to its ids joined by ", ", a hint for callers building id lists
    #[serde(default)]
    pub format_info: BTreeMap<String, String>,
    pub total_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub summary: ReportSummary,
    pub record_ids: Vec<String>,
    /// UTC, `%Y-%m-%dT%H:%M:%S`
    pub generated_at: String,
}
