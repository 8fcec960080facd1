//! Financial record and metric types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One company-quarter financial snapshot
///
/// `id` is always `<COMPANY_CODE>_<QUARTER>`, e.g. `WAND_Q1_2025`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: String,
    pub company: String,
    pub quarter: String,
    /// Revenue (INR crores)
    pub revenue: f64,
    /// Net profit (INR crores)
    pub profit: f64,
    /// Year-over-year growth, percent
    pub growth_yoy: f64,
    pub employee_count: u32,
    /// Attrition, percent
    pub attrition_rate: f64,
    /// Value of deals closed in the quarter (INR crores)
    pub deal_value: f64,
    pub sector: String,
}

impl FinancialRecord {
    /// Create a record; the id is derived from `company_code` and `quarter`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        company_code: &str,
        company: impl Into<String>,
        quarter: impl Into<String>,
        revenue: f64,
        profit: f64,
        growth_yoy: f64,
        employee_count: u32,
        attrition_rate: f64,
        deal_value: f64,
        sector: impl Into<String>,
    ) -> Self {
        let quarter = quarter.into();
        Self {
            id: format!("{company_code}_{quarter}"),
            company: company.into(),
            quarter,
            revenue,
            profit,
            growth_yoy,
            employee_count,
            attrition_rate,
            deal_value,
            sector: sector.into(),
        }
    }

    /// Value of a numeric metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::Profit => self.profit,
            Metric::GrowthYoy => self.growth_yoy,
            Metric::EmployeeCount => f64::from(self.employee_count),
            Metric::AttritionRate => self.attrition_rate,
            Metric::DealValue => self.deal_value,
        }
    }

    /// Value of a metric given by name
    ///
    /// Returns `None` when the record has no numeric field of that name.
    pub fn metric(&self, name: &str) -> Option<f64> {
        name.parse::<Metric>().ok().map(|metric| self.value(metric))
    }
}

/// Numeric fields of a [`FinancialRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    Profit,
    GrowthYoy,
    EmployeeCount,
    AttritionRate,
    DealValue,
}

impl Metric {
    /// Every metric, in field order
    pub const ALL: [Metric; 6] = [
        Metric::Revenue,
        Metric::Profit,
        Metric::GrowthYoy,
        Metric::EmployeeCount,
        Metric::AttritionRate,
        Metric::DealValue,
    ];

    /// Field name as it appears on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Profit => "profit",
            Metric::GrowthYoy => "growth_yoy",
            Metric::EmployeeCount => "employee_count",
            Metric::AttritionRate => "attrition_rate",
            Metric::DealValue => "deal_value",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| format!("unknown metric: {s}"))
    }
}
