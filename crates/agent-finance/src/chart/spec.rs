//! Chart-spec generation from the record store

use super::ChartType;
use super::figure::{Figure, Layout, Trace};
use crate::data::{FinancialRecord, RecordStore};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Chart description for a metric over a company selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub metric: String,
    /// Companies that produced a series or slice, in request order
    pub companies: Vec<String>,
    pub figure: Figure,
    /// `<chart_type>_<metric>_<n>_companies`
    pub chart_id: String,
}

impl ChartSpec {
    /// Number of series (line/bar) or slices (pie)
    pub fn series_len(&self) -> usize {
        self.figure.series_len()
    }
}

/// Build a chart of `metric` for `companies`
///
/// Companies without records are skipped. Line and bar charts get one series
/// per company with points in store order; pie charts get one slice per
/// company holding the metric summed over its records. A record lacking the
/// metric contributes 0.
pub fn generate_chart_spec<S: AsRef<str>>(
    store: &RecordStore,
    chart_type: &str,
    companies: &[S],
    metric: &str,
    title: &str,
) -> Result<ChartSpec> {
    let chart_type: ChartType = chart_type.parse()?;

    let selected: Vec<(&str, Vec<&FinancialRecord>)> = companies
        .iter()
        .map(|company| company.as_ref())
        .map(|company| (company, store.records_by_company(company)))
        .filter(|(_, records)| !records.is_empty())
        .collect();

    let data = match chart_type {
        ChartType::Line | ChartType::Bar => selected
            .iter()
            .map(|(company, records)| {
                let x = records.iter().map(|r| quarter_label(&r.quarter)).collect();
                let y = records.iter().map(|r| value_or_zero(r, metric)).collect();
                if chart_type == ChartType::Line {
                    Trace::line(*company, x, y)
                } else {
                    Trace::bar(*company, x, y)
                }
            })
            .collect(),
        ChartType::Pie => {
            let labels = selected.iter().map(|(company, _)| company.to_string()).collect();
            let values = selected
                .iter()
                .map(|(_, records)| records.iter().map(|r| value_or_zero(r, metric)).sum::<f64>())
                .collect();
            vec![Trace::pie(labels, values)]
        }
    };

    let layout = match chart_type {
        ChartType::Pie => Layout::new(title),
        ChartType::Line | ChartType::Bar => {
            Layout::new(title).with_axes("Quarter", metric_label(metric))
        }
    };

    Ok(ChartSpec {
        chart_id: format!("{chart_type}_{metric}_{}_companies", selected.len()),
        chart_type,
        metric: metric.to_string(),
        companies: selected.iter().map(|(company, _)| company.to_string()).collect(),
        figure: Figure { data, layout },
    })
}

fn value_or_zero(record: &FinancialRecord, metric: &str) -> f64 {
    record.metric(metric).unwrap_or(0.0)
}

fn quarter_label(quarter: &str) -> String {
    quarter.replace('_', " ")
}

/// Display label of a metric: `growth_yoy` -> `Growth Yoy`
pub fn metric_label(metric: &str) -> String {
    metric
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;

    #[test]
    fn test_pie_sums_each_company() {
        let store = RecordStore::canonical();
        let spec = generate_chart_spec(
            &store,
            "pie",
            &["Wand AI", "Nityo Infotech"],
            "revenue",
            "Revenue Share",
        )
        .unwrap();

        assert_eq!(spec.series_len(), 2);
        match &spec.figure.data[..] {
            [Trace::Pie { labels, values, .. }] => {
                assert_eq!(labels, &vec!["Wand AI".to_string(), "Nityo Infotech".to_string()]);
                assert!((values[0] - 316.0).abs() < f64::EPSILON);
                assert!((values[1] - 4245.0).abs() < f64::EPSILON);
            }
            other => panic!("expected a single pie trace, got {other:?}"),
        }
        assert!(spec.figure.layout.xaxis.is_none());
        assert_eq!(spec.chart_id, "pie_revenue_2_companies");
    }

    #[test]
    fn test_line_series_in_store_order() {
        let store = RecordStore::canonical();
        let spec = generate_chart_spec(
            &store,
            "line",
            &["Jio Platforms Limited", "Wand AI"],
            "growth_yoy",
            "Growth",
        )
        .unwrap();

        assert_eq!(spec.series_len(), 2);
        let Trace::Scatter { name, x, y, .. } = &spec.figure.data[1] else {
            panic!("expected scatter trace");
        };
        assert_eq!(name, "Wand AI");
        assert_eq!(x, &vec!["Q1 2025", "Q2 2025", "Q3 2025"]);
        assert_eq!(y, &vec![41.0, 44.6, 48.5]);

        let yaxis = spec.figure.layout.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.title, "Growth Yoy");
        assert_eq!(spec.figure.layout.xaxis.as_ref().unwrap().title, "Quarter");
    }

    #[test]
    fn test_unknown_companies_are_skipped() {
        let store = RecordStore::canonical();
        let spec = generate_chart_spec(
            &store,
            "bar",
            &["Acme", "Wand AI", "Globex"],
            "profit",
            "Profit",
        )
        .unwrap();

        assert_eq!(spec.series_len(), 1);
        assert_eq!(spec.companies, vec!["Wand AI"]);
        assert_eq!(spec.chart_id, "bar_profit_1_companies");
    }

    #[test]
    fn test_absent_metric_charts_as_zero() {
        let store = RecordStore::canonical();
        let spec = generate_chart_spec(&store, "bar", &["Wand AI"], "margin", "Margin").unwrap();
        let Trace::Bar { y, .. } = &spec.figure.data[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(y, &vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unsupported_chart_type() {
        let store = RecordStore::canonical();
        let err = generate_chart_spec(&store, "radar", &["Wand AI"], "revenue", "t").unwrap_err();
        assert!(matches!(err, FinanceError::UnsupportedChartType(kind) if kind == "radar"));
    }

    #[test]
    fn test_metric_label() {
        assert_eq!(metric_label("revenue"), "Revenue");
        assert_eq!(metric_label("attrition_rate"), "Attrition Rate");
        assert_eq!(metric_label("employee_count"), "Employee Count");
    }
}
