//! Renderer-agnostic figure description (Plotly-compatible wire form)

use serde::{Deserialize, Serialize};

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Number of series (line/bar) or slices (pie)
    pub fn series_len(&self) -> usize {
        self.data
            .iter()
            .map(|trace| match trace {
                Trace::Pie { labels, .. } => labels.len(),
                Trace::Scatter { .. } | Trace::Bar { .. } => 1,
            })
            .sum()
    }
}

/// One chart trace, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Line series with markers
    Scatter {
        mode: String,
        name: String,
        x: Vec<String>,
        y: Vec<f64>,
        line: LineStyle,
        marker: MarkerStyle,
    },
    Bar {
        name: String,
        x: Vec<String>,
        y: Vec<f64>,
    },
    /// Donut with one slice per label
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
        hole: f64,
    },
}

impl Trace {
    pub(crate) fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self::Scatter {
            mode: "lines+markers".to_string(),
            name: name.into(),
            x,
            y,
            line: LineStyle { width: 3 },
            marker: MarkerStyle { size: 10 },
        }
    }

    pub(crate) fn bar(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self::Bar {
            name: name.into(),
            x,
            y,
        }
    }

    pub(crate) fn pie(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self::Pie {
            labels,
            values,
            hole: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub size: u32,
}

/// Figure layout; axis titles are absent for pie charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub template: String,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

impl Layout {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            template: "plotly_white".to_string(),
            height: 500,
            xaxis: None,
            yaxis: None,
        }
    }

    pub(crate) fn with_axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.xaxis = Some(Axis { title: x.into() });
        self.yaxis = Some(Axis { title: y.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_trace_wire_form() {
        let trace = Trace::line("Wand AI", vec!["Q1 2025".to_string()], vec![92.0]);
        assert_eq!(
            serde_json::to_value(&trace).unwrap(),
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": "Wand AI",
                "x": ["Q1 2025"],
                "y": [92.0],
                "line": {"width": 3},
                "marker": {"size": 10}
            })
        );
    }

    #[test]
    fn test_pie_layout_has_no_axes() {
        let figure = Figure {
            data: vec![Trace::pie(vec!["A".to_string()], vec![1.0])],
            layout: Layout::new("Share"),
        };
        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["data"][0]["type"], "pie");
        assert_eq!(value["data"][0]["hole"], 0.3);
        assert_eq!(value["layout"]["template"], "plotly_white");
        assert!(value["layout"].get("xaxis").is_none());
    }

    #[test]
    fn test_series_len() {
        let figure = Figure {
            data: vec![
                Trace::bar("A", vec![], vec![]),
                Trace::bar("B", vec![], vec![]),
            ],
            layout: Layout::new("t").with_axes("Quarter", "Profit"),
        };
        assert_eq!(figure.series_len(), 2);

        let pie = Figure {
            data: vec![Trace::pie(
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec![1.0, 2.0, 3.0],
            )],
            layout: Layout::new("t"),
        };
        assert_eq!(pie.series_len(), 3);
    }
}
