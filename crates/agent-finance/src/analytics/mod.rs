//! Aggregation Engine: single-metric statistics, trends and comparisons

pub mod comparison;
pub mod metrics;

pub use comparison::{ComparisonResult, compare_companies};
pub use metrics::{MetricResult, MetricSnapshot, Trend, calculate_metrics};

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `None` for an empty slice
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
