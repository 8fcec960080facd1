//! Chart-Spec Generator and the chart payload wire format

pub mod figure;
pub mod spec;

pub use figure::{Axis, Figure, Layout, Trace};
pub use spec::{ChartSpec, generate_chart_spec, metric_label};

use crate::error::{FinanceError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)\s*```").expect("code fence pattern")
});

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(ChartType::Line),
            "bar" => Ok(ChartType::Bar),
            "pie" => Ok(ChartType::Pie),
            other => Err(FinanceError::UnsupportedChartType(other.to_string())),
        }
    }
}

/// Chart object as exchanged with the presentation layer
///
/// `plotly_json` holds the serialized [`Figure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub chart_type: ChartType,
    pub metric: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<String>,
    pub plotly_json: String,
    pub chart_id: String,
}

impl ChartPayload {
    /// Decode the embedded figure
    pub fn figure(&self) -> Result<Figure> {
        Ok(serde_json::from_str(&self.plotly_json)?)
    }
}

impl TryFrom<&ChartSpec> for ChartPayload {
    type Error = FinanceError;

    fn try_from(spec: &ChartSpec) -> Result<Self> {
        Ok(Self {
            chart_type: spec.chart_type,
            metric: spec.metric.clone(),
            companies: spec.companies.clone(),
            plotly_json: serde_json::to_string(&spec.figure)?,
            chart_id: spec.chart_id.clone(),
        })
    }
}

/// Parse chart payloads out of stage output text
///
/// The first fenced code block is used if there is one, otherwise the whole
/// text. Accepts a JSON array of chart objects or a single object.
pub fn parse_chart_payloads(text: &str) -> Result<Vec<ChartPayload>> {
    let body = CODE_FENCE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| text.trim(), |body| body.as_str());

    match serde_json::from_str::<Vec<ChartPayload>>(body) {
        Ok(payloads) => Ok(payloads),
        Err(_) => Ok(vec![serde_json::from_str::<ChartPayload>(body)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordStore;

    fn payload(chart_type: &str, companies: &[&str], metric: &str) -> ChartPayload {
        let store = RecordStore::canonical();
        let spec = generate_chart_spec(&store, chart_type, companies, metric, "Title").unwrap();
        ChartPayload::try_from(&spec).unwrap()
    }

    #[test]
    fn test_chart_type_parse() {
        assert_eq!("bar".parse::<ChartType>().unwrap(), ChartType::Bar);
        assert!("Line".parse::<ChartType>().is_err());
        assert_eq!(ChartType::Pie.to_string(), "pie");
    }

    #[test]
    fn test_wire_round_trip_keeps_shape() {
        let store = RecordStore::canonical();
        let spec = generate_chart_spec(
            &store,
            "line",
            &["Wand AI", "Jio Platforms Limited", "Nityo Infotech"],
            "profit",
            "Profit",
        )
        .unwrap();

        let wire = serde_json::to_string(&ChartPayload::try_from(&spec).unwrap()).unwrap();
        let parsed = parse_chart_payloads(&wire).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].chart_type, spec.chart_type);
        assert_eq!(parsed[0].metric, spec.metric);
        assert_eq!(parsed[0].figure().unwrap().series_len(), spec.series_len());
    }

    #[test]
    fn test_parse_fenced_array() {
        let charts = vec![
            payload("line", &["Wand AI"], "revenue"),
            payload("pie", &["Wand AI", "Nityo Infotech"], "deal_value"),
        ];
        let text = format!(
            "```json\n{}\n```",
            serde_json::to_string_pretty(&charts).unwrap()
        );

        let parsed = parse_chart_payloads(&text).unwrap();
        assert_eq!(parsed, charts);
        assert_eq!(parsed[1].chart_id, "pie_deal_value_2_companies");
    }

    #[test]
    fn test_parse_fence_with_surrounding_prose() {
        let chart = payload("bar", &["Nityo Infotech"], "profit");
        let text = format!(
            "Here are the charts:\n```\n{}\n```\nDone.",
            serde_json::to_string(&chart).unwrap()
        );
        assert_eq!(parse_chart_payloads(&text).unwrap(), vec![chart]);
    }

    #[test]
    fn test_parse_rejects_non_chart_text() {
        assert!(parse_chart_payloads("no charts today").is_err());
        assert!(parse_chart_payloads("```json\n{\"chart_type\": \"radar\"}\n```").is_err());
    }
}
