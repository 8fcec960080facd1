//! Command-line interface for the financial analysis pipeline
//!
//! # Usage
//!
//! ```bash
//! # Run the four-stage pipeline on a request
//! finance-cli run "Compare revenue of Wand AI and Jio Platforms Limited in Q1-Q3"
//!
//! # Call a single service operation
//! finance-cli companies
//! finance-cli compare "Wand AI" "Nityo Infotech" --metric growth_yoy
//! finance-cli chart --chart-type pie --metric revenue "Wand AI" "Nityo Infotech"
//! ```

mod render;

use agent_finance::{FinanceConfig, StageWorkers, ToolService, build_pipeline};
use agent_utils::{AppConfig, LogFormat};
use agent_workflow::PipelineOutcome;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finance-cli")]
#[command(about = "Multi-stage company financial analysis", long_about = None)]
struct Args {
    /// JSON dataset to use instead of the embedded records
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Print raw JSON envelopes instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Log filter directive used when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Plan -> Analyze -> Visualize -> Report pipeline
    Run {
        /// Plain-language analysis request
        request: String,
        /// Log every stage's output
        #[arg(short, long)]
        verbose: bool,
    },
    /// List companies
    Companies,
    /// List record ids grouped by company
    RecordIds,
    /// Show one company's records
    Company { name: String },
    /// Show every company's record for one quarter
    Quarter { quarter: String },
    /// Statistics and trend of a metric over record ids
    Metrics {
        #[arg(short, long)]
        metric: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Compare two companies on a metric
    Compare {
        company1: String,
        company2: String,
        #[arg(short, long, default_value = "revenue")]
        metric: String,
    },
    /// Generate a chart payload
    Chart {
        #[arg(long, default_value = "line")]
        chart_type: String,
        #[arg(short, long, default_value = "revenue")]
        metric: String,
        #[arg(short, long, default_value = "Financial Chart")]
        title: String,
        #[arg(required = true)]
        companies: Vec<String>,
    },
    /// Generate a report summary from record ids
    Report {
        #[arg(short, long)]
        title: Option<String>,
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app_config = AppConfig::from_env();
    if args.json_logs {
        app_config = app_config.with_log_format(LogFormat::Json);
    }
    if let Some(filter) = args.log_level.as_deref() {
        app_config = app_config.with_log_filter(filter);
    }
    agent_utils::init_tracing(&app_config);

    let mut config = FinanceConfig::default().with_env();
    if let Some(path) = args.dataset.clone() {
        config.dataset_path = Some(path);
    }
    config.validate()?;

    let store = config.load_store().context("Failed to load dataset")?;
    info!(records = store.len(), environment = %app_config.environment, "Starting finance-cli");
    let service = Arc::new(ToolService::new(store));

    match args.command {
        Command::Run { request, verbose } => {
            config.verbose = config.verbose || verbose;
            run_pipeline(&config, service, &request, args.json).await
        }
        Command::Companies => render::companies(service.list_companies(), args.json),
        Command::RecordIds => render::record_ids(service.get_all_record_ids(), args.json),
        Command::Company { name } => render::records(service.get_company_data(&name), args.json),
        Command::Quarter { quarter } => {
            render::records(service.get_quarter_data(&quarter), args.json)
        }
        Command::Metrics { metric, ids } => {
            render::metrics(service.analyze_metrics(&ids, &metric), args.json)
        }
        Command::Compare {
            company1,
            company2,
            metric,
        } => render::comparison(
            service.compare_companies(&company1, &company2, &metric),
            args.json,
        ),
        Command::Chart {
            chart_type,
            metric,
            title,
            companies,
        } => render::raw(service.generate_chart_json(&chart_type, &companies, &metric, &title)),
        Command::Report { title, ids } => {
            let title = title.unwrap_or_else(|| config.report_title.clone());
            render::raw(service.generate_report(&ids, Some(&title)))
        }
    }
}

async fn run_pipeline(
    config: &FinanceConfig,
    service: Arc<ToolService>,
    request: &str,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = build_pipeline(service, &StageWorkers::rule_based(config))?;
    let outcome = pipeline.run(request, config.verbose).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        PipelineOutcome::Success { result, .. } => {
            if !json {
                println!("{result}");
            }
            Ok(())
        }
        PipelineOutcome::Failed { error } => bail!("Analysis failed: {error}"),
    }
}
