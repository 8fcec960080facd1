//! End-to-end runs of the four-stage analysis pipeline

use agent_core::{Error, Result, Task, ToolInvoker, Worker};
use agent_finance::{
    FinanceConfig, FinanceStage, FinancialRecord, RecordStore, StageWorkers, ToolService,
    build_pipeline, parse_chart_payloads,
};
use agent_workflow::PipelineOutcome;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const REQUEST: &str = "Analyze the financial performance of Wand AI and Jio Platforms Limited \
over the last 3 quarters (Q1, Q2, Q3 2025). Compare their revenue growth, profitability trends, \
and attrition rates. Create visualizations showing quarterly trends and provide a comprehensive \
report with insights.";

/// Worker that fails every invocation
struct FaultyWorker;

#[async_trait]
impl Worker for FaultyWorker {
    async fn invoke(&self, _task: Task, _tools: Arc<dyn ToolInvoker>) -> Result<String> {
        Err(Error::ProcessingFailed("analysis backend unavailable".to_string()))
    }
}

/// Worker that panics instead of returning an error
struct PanickingWorker;

#[async_trait]
impl Worker for PanickingWorker {
    async fn invoke(&self, _task: Task, _tools: Arc<dyn ToolInvoker>) -> Result<String> {
        panic!("analysis worker crashed")
    }
}

/// Worker that counts its invocations
#[derive(Default)]
struct CountingWorker {
    calls: AtomicUsize,
}

#[async_trait]
impl Worker for CountingWorker {
    async fn invoke(&self, task: Task, _tools: Arc<dyn ToolInvoker>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} done", task.stage))
    }
}

/// Worker that calls a tool outside any report-stage allow-list
struct OverreachingWorker;

#[async_trait]
impl Worker for OverreachingWorker {
    async fn invoke(&self, _task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String> {
        let out = tools.invoke_tool("list_companies", json!({})).await?;
        Ok(out.to_string())
    }
}

fn setup() -> (FinanceConfig, Arc<ToolService>) {
    let config = FinanceConfig::default();
    let store = config.load_store().expect("canonical store");
    (config, Arc::new(ToolService::new(store)))
}

#[tokio::test]
async fn test_full_run_succeeds() {
    let (config, service) = setup();
    let pipeline = build_pipeline(service, &StageWorkers::rule_based(&config)).unwrap();

    let outcome = pipeline.run(REQUEST, false).await;

    let PipelineOutcome::Success {
        result,
        task_outputs,
        agents_used,
        tasks_completed,
    } = outcome
    else {
        panic!("expected success, got {outcome:?}");
    };

    assert_eq!(agents_used, 4);
    assert_eq!(tasks_completed, 4);
    assert_eq!(
        task_outputs.stages(),
        vec!["plan", "analyze", "visualize", "report"]
    );
    assert_eq!(task_outputs.get("report"), Some(result.as_str()));

    let plan = task_outputs.get("plan").unwrap();
    assert!(plan.contains("Jio Platforms Limited"));
    assert!(!plan.contains("Nityo Infotech"));

    let analysis = task_outputs.get("analyze").unwrap();
    assert!(analysis.contains("leader: Jio Platforms Limited"));

    let charts = parse_chart_payloads(task_outputs.get("visualize").unwrap()).unwrap();
    let ids: Vec<&str> = charts.iter().map(|c| c.chart_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "line_revenue_2_companies",
            "bar_profit_2_companies",
            "line_growth_yoy_2_companies",
            "line_attrition_rate_2_companies",
        ]
    );
    for chart in &charts {
        assert_eq!(chart.figure().unwrap().series_len(), 2);
    }

    assert!(result.starts_with("# Financial Analysis Report"));
    assert!(result.contains("`line_revenue_2_companies`"));
    assert!(result.contains("\"total_records\": 6"));
}

#[tokio::test]
async fn test_second_stage_fault_aborts_run() {
    let (config, service) = setup();
    let later = Arc::new(CountingWorker::default());

    let workers = StageWorkers {
        analyze: Arc::new(FaultyWorker),
        visualize: later.clone(),
        report: later.clone(),
        ..StageWorkers::rule_based(&config)
    };
    let pipeline = build_pipeline(service, &workers).unwrap();

    let outcome = pipeline.run(REQUEST, true).await;

    assert!(!outcome.is_success());
    assert!(outcome.task_outputs().is_none());
    let error = outcome.error().unwrap();
    assert!(error.contains("analyze"), "{error}");
    assert!(error.contains("analysis backend unavailable"), "{error}");
    assert_eq!(later.calls.load(Ordering::SeqCst), 0);

    let wire = serde_json::to_value(&outcome).unwrap();
    assert_eq!(wire["status"], "failed");
    assert!(wire.get("task_outputs").is_none());
}

#[tokio::test]
async fn test_allow_list_is_enforced() {
    let (config, service) = setup();
    let workers = StageWorkers {
        report: Arc::new(OverreachingWorker),
        ..StageWorkers::rule_based(&config)
    };
    let pipeline = build_pipeline(service, &workers).unwrap();

    let outcome = pipeline.run("Wand AI revenue", false).await;

    let error = outcome.error().unwrap();
    assert!(error.contains("list_companies"), "{error}");
    assert!(error.contains("not permitted"), "{error}");
    assert!(
        !FinanceStage::Report
            .spec()
            .allowed_tools
            .contains(&"list_companies".to_string())
    );
}

#[tokio::test]
async fn test_single_company_request() {
    let (config, service) = setup();
    let pipeline = build_pipeline(service, &StageWorkers::rule_based(&config)).unwrap();

    let outcome = pipeline.run("How did Nityo do on deals in Q2?", false).await;

    let outputs = outcome.task_outputs().unwrap();
    let charts = parse_chart_payloads(outputs.get("visualize").unwrap()).unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].chart_id, "line_deal_value_1_companies");
    assert!(!outputs.get("analyze").unwrap().contains("Comparisons"));
}

#[tokio::test]
async fn test_panicking_stage_fails_run() {
    let (config, service) = setup();
    let later = Arc::new(CountingWorker::default());
    let workers = StageWorkers {
        analyze: Arc::new(PanickingWorker),
        visualize: later.clone(),
        report: later.clone(),
        ..StageWorkers::rule_based(&config)
    };
    let pipeline = build_pipeline(service, &workers).unwrap();

    let outcome = pipeline.run(REQUEST, false).await;

    let wire = serde_json::to_value(&outcome).unwrap();
    assert_eq!(wire["status"], "failed");
    let error = outcome.error().unwrap();
    assert!(error.contains("Stage 'analyze' panicked"), "{error}");
    assert!(error.contains("analysis worker crashed"), "{error}");
    assert_eq!(later.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_company_missing_requested_quarter_is_skipped() {
    let record = |code: &str, company: &str, quarter: &str, revenue: f64| {
        FinancialRecord::new(code, company, quarter, revenue, 1.0, 5.0, 10, 2.0, 3.0, "Widgets")
    };
    let store = RecordStore::from_records(vec![
        record("ACME", "Acme", "Q1_2025", 10.0),
        record("ACME", "Acme", "Q2_2025", 12.0),
        record("GLOBEX", "Globex", "Q2_2025", 20.0),
    ])
    .unwrap();
    let config = FinanceConfig::default();
    let pipeline = build_pipeline(
        Arc::new(ToolService::new(store)),
        &StageWorkers::rule_based(&config),
    )
    .unwrap();

    let outcome = pipeline
        .run("Compare Acme and Globex revenue in Q1", false)
        .await;

    assert!(outcome.is_success(), "{outcome:?}");
    let outputs = outcome.task_outputs().unwrap();
    let analysis = outputs.get("analyze").unwrap();
    assert!(analysis.contains("No records for Globex in Q1_2025; skipped."), "{analysis}");
    assert!(analysis.contains("leader: Globex"), "{analysis}");
    assert!(outcome.result().unwrap().contains("\"total_records\": 1"));
}
