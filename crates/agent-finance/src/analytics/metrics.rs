//! Metric statistics and trend classification

use super::{mean, round2};
use crate::data::{Metric, RecordStore};
use crate::error::{FinanceError, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Direction of a value sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Upward,
    Downward,
    Mixed,
    Stable,
}

impl Trend {
    /// Classify a sequence in the order given
    ///
    /// Fewer than two values is `Stable`. Otherwise the sequence is `Upward`
    /// if no step decreases, else `Downward` if no step increases, else
    /// `Mixed`. The upward test runs first, so a constant sequence is
    /// `Upward`.
    pub fn classify(values: &[f64]) -> Self {
        if values.len() < 2 {
            return Self::Stable;
        }

        let non_decreasing = values.windows(2).all(|pair| pair[0] <= pair[1]);
        let non_increasing = values.windows(2).all(|pair| pair[0] >= pair[1]);

        if non_decreasing {
            Self::Upward
        } else if non_increasing {
            Self::Downward
        } else {
            Self::Mixed
        }
    }
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Upward => "upward",
            Trend::Downward => "downward",
            Trend::Mixed => "mixed",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record's contribution to a metric result
///
/// On the wire the value sits under the metric's own name:
/// `{"id": .., "company": .., "quarter": .., "revenue": 92.0}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub id: String,
    pub company: String,
    pub quarter: String,
    pub metric: Metric,
    pub value: f64,
}

impl Serialize for MetricSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("company", &self.company)?;
        map.serialize_entry("quarter", &self.quarter)?;
        map.serialize_entry(self.metric.as_str(), &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetricSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            id: String,
            company: String,
            quarter: String,
            #[serde(flatten)]
            values: BTreeMap<String, f64>,
        }

        let wire = Wire::deserialize(deserializer)?;
        let (metric, value) = wire
            .values
            .iter()
            .find_map(|(name, value)| name.parse::<Metric>().ok().map(|m| (m, *value)))
            .ok_or_else(|| serde::de::Error::custom("snapshot has no metric value"))?;

        Ok(Self {
            id: wire.id,
            company: wire.company,
            quarter: wire.quarter,
            metric,
            value,
        })
    }
}

/// Statistics of one metric over a set of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric: String,
    pub count: usize,
    /// Mean, rounded to 2 decimals
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub trend: Trend,
    /// Contributing records in input order
    pub records: Vec<MetricSnapshot>,
}

/// Compute statistics of `metric` over the records named by `ids`
///
/// Ids that do not resolve, and records without a numeric field called
/// `metric`, are skipped. Fails with [`FinanceError::NoData`] when nothing
/// survives.
pub fn calculate_metrics<S: AsRef<str>>(
    store: &RecordStore,
    ids: &[S],
    metric: &str,
) -> Result<MetricResult> {
    let field = metric.parse::<Metric>().ok();
    let records: Vec<MetricSnapshot> = ids
        .iter()
        .filter_map(|id| store.record_by_id(id.as_ref()))
        .filter_map(|record| {
            field.map(|field| MetricSnapshot {
                id: record.id.clone(),
                company: record.company.clone(),
                quarter: record.quarter.clone(),
                metric: field,
                value: record.value(field),
            })
        })
        .collect();

    let values: Vec<f64> = records.iter().map(|snapshot| snapshot.value).collect();
    let average = mean(&values).ok_or_else(|| FinanceError::NoData {
        metric: metric.to_string(),
    })?;

    Ok(MetricResult {
        metric: metric.to_string(),
        count: values.len(),
        average: round2(average),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        trend: Trend::classify(&values),
        records,
    })
}
