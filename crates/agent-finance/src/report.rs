//! Report Summarizer: multi-company roll-up of a record set

use crate::analytics::{mean, round2};
use crate::data::{FinancialRecord, RecordStore};
use crate::error::{FinanceError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Totals for one company within a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyBreakdown {
    pub company: String,
    pub quarter_count: usize,
    pub total_revenue: f64,
    pub avg_growth: f64,
}

/// Structured summary of a set of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_records: usize,
    /// Distinct companies in first-seen order
    pub companies: Vec<String>,
    pub company_count: usize,
    /// Distinct quarters, sorted ascending
    pub quarters: Vec<String>,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub avg_growth: f64,
    /// One entry per company, same order as `companies`
    pub by_company: Vec<CompanyBreakdown>,
}

/// Summarize the records named by `ids`
///
/// Unresolved ids are ignored. Fails with [`FinanceError::EmptyInput`] for an
/// empty id list and [`FinanceError::NoValidRecords`] when nothing resolves.
pub fn generate_report_summary<S: AsRef<str>>(
    store: &RecordStore,
    ids: &[S],
) -> Result<ReportSummary> {
    if ids.is_empty() {
        return Err(FinanceError::EmptyInput);
    }

    let records: Vec<&FinancialRecord> = ids
        .iter()
        .filter_map(|id| store.record_by_id(id.as_ref()))
        .collect();
    if records.is_empty() {
        return Err(FinanceError::NoValidRecords);
    }

    let mut groups: Vec<(&str, Vec<&FinancialRecord>)> = Vec::new();
    for &record in &records {
        match groups.iter_mut().find(|(company, _)| *company == record.company) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.company.as_str(), vec![record])),
        }
    }

    let quarters: BTreeSet<&str> = records.iter().map(|r| r.quarter.as_str()).collect();

    let by_company: Vec<CompanyBreakdown> = groups
        .iter()
        .map(|(company, members)| CompanyBreakdown {
            company: company.to_string(),
            quarter_count: members.len(),
            total_revenue: members.iter().map(|r| r.revenue).sum(),
            avg_growth: average_growth(members),
        })
        .collect();

    Ok(ReportSummary {
        total_records: records.len(),
        companies: by_company.iter().map(|c| c.company.clone()).collect(),
        company_count: by_company.len(),
        quarters: quarters.into_iter().map(str::to_string).collect(),
        total_revenue: records.iter().map(|r| r.revenue).sum(),
        total_profit: records.iter().map(|r| r.profit).sum(),
        avg_growth: average_growth(&records),
        by_company,
    })
}

fn average_growth(records: &[&FinancialRecord]) -> f64 {
    let growth: Vec<f64> = records.iter().map(|r| r.growth_yoy).collect();
    mean(&growth).map_or(0.0, round2)
}
