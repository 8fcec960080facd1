//! Pairwise company comparison on one metric

use super::{mean, round2};
use crate::data::{FinancialRecord, RecordStore};
use crate::error::{FinanceError, Result};
use serde::{Deserialize, Serialize};

/// Average of one metric for two companies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub company1: String,
    pub company2: String,
    pub metric: String,
    pub company1_avg: f64,
    pub company2_avg: f64,
    /// `company1_avg - company2_avg`
    pub difference: f64,
    /// `company1` only when its average is strictly greater
    pub leader: String,
}

/// Compare two companies' average of `metric`
///
/// Both companies must have records. Records lacking the metric are left out
/// of the average; a company with no such record averages 0. An exact tie
/// goes to `company2`. Reported averages are rounded to 2 decimals but the
/// leader is decided on the unrounded values.
pub fn compare_companies(
    store: &RecordStore,
    company1: &str,
    company2: &str,
    metric: &str,
) -> Result<ComparisonResult> {
    let first = store.records_by_company(company1);
    if first.is_empty() {
        return Err(FinanceError::company_not_found(company1));
    }
    let second = store.records_by_company(company2);
    if second.is_empty() {
        return Err(FinanceError::company_not_found(company2));
    }

    let avg1 = metric_average(&first, metric);
    let avg2 = metric_average(&second, metric);

    let leader = if avg1 > avg2 { company1 } else { company2 };

    Ok(ComparisonResult {
        company1: company1.to_string(),
        company2: company2.to_string(),
        metric: metric.to_string(),
        company1_avg: round2(avg1),
        company2_avg: round2(avg2),
        difference: round2(avg1 - avg2),
        leader: leader.to_string(),
    })
}

fn metric_average(records: &[&FinancialRecord], metric: &str) -> f64 {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.metric(metric))
        .collect();
    mean(&values).unwrap_or(0.0)
}
