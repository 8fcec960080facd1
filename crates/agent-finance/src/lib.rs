//! Company financial analysis for agent-rs
//!
//! This crate provides:
//! - A read-only [`RecordStore`] of company-quarter financial records with
//!   company, quarter and id lookups
//! - Metric statistics, trend classification and company comparison
//! - Chart-spec generation (line, bar, pie) in a Plotly-compatible wire form
//! - Multi-company report summaries
//! - A [`ToolService`] facade returning uniform envelopes, exposed to
//!   workers as tools
//! - The four-stage Plan -> Analyze -> Visualize -> Report pipeline with
//!   capability-scoped stages and a deterministic rule-based worker set
//!
//! # Example
//!
//! ```no_run
//! use agent_finance::{FinanceConfig, StageWorkers, ToolService, build_pipeline};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FinanceConfig::default().with_env();
//! let service = Arc::new(ToolService::new(config.load_store()?));
//! let pipeline = build_pipeline(service, &StageWorkers::rule_based(&config))?;
//!
//! let outcome = pipeline
//!     .run("Compare revenue of Wand AI and Jio Platforms Limited", config.verbose)
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod analytics;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod prompts;
pub mod report;
pub mod service;
pub mod stages;
pub mod tools;

pub use analytics::{ComparisonResult, MetricResult, Trend, calculate_metrics, compare_companies};
pub use chart::{ChartPayload, ChartSpec, ChartType, generate_chart_spec, parse_chart_payloads};
pub use config::{FinanceConfig, FinanceConfigBuilder};
pub use data::{FinancialRecord, Metric, RecordStore};
pub use error::{FinanceError, Result};
pub use report::{ReportSummary, generate_report_summary};
pub use service::{Envelope, Status, ToolService};
pub use stages::{FinanceStage, StageWorkers, build_pipeline};
pub use tools::{Operation, ServiceTool, register_tools};
