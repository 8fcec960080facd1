//! The four finance stages and pipeline assembly

use crate::agents::{AnalystWorker, PlanWorker, VisualizerWorker, WriterWorker};
use crate::config::FinanceConfig;
use crate::prompts;
use crate::service::ToolService;
use crate::tools::{Operation, service_registry};
use agent_core::{Result, Worker};
use agent_workflow::{Pipeline, StageSpec};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Stage of the analysis pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinanceStage {
    Plan,
    Analyze,
    Visualize,
    Report,
}

impl FinanceStage {
    pub const ALL: [FinanceStage; 4] = [
        FinanceStage::Plan,
        FinanceStage::Analyze,
        FinanceStage::Visualize,
        FinanceStage::Report,
    ];

    /// Stage identity used as the `task_outputs` key
    pub fn name(self) -> &'static str {
        match self {
            FinanceStage::Plan => "plan",
            FinanceStage::Analyze => "analyze",
            FinanceStage::Visualize => "visualize",
            FinanceStage::Report => "report",
        }
    }

    /// Operations the stage may invoke
    pub fn allowed_operations(self) -> &'static [Operation] {
        match self {
            FinanceStage::Plan => &[
                Operation::ListCompanies,
                Operation::GetCompanyData,
                Operation::GetQuarterData,
                Operation::GetAllRecordIds,
            ],
            FinanceStage::Analyze => &[
                Operation::GetCompanyData,
                Operation::GetQuarterData,
                Operation::AnalyzeMetrics,
                Operation::CompareCompanies,
            ],
            FinanceStage::Visualize => &[
                Operation::GenerateChartJson,
                Operation::GetCompanyData,
                Operation::AnalyzeMetrics,
            ],
            FinanceStage::Report => &[Operation::GenerateReport, Operation::AnalyzeMetrics],
        }
    }

    /// Stage definition: role, goal template, persona and allow-list
    pub fn spec(self) -> StageSpec {
        let (role, goal, persona, expected) = match self {
            FinanceStage::Plan => (
                prompts::PLANNER_ROLE,
                prompts::PLAN_GOAL,
                prompts::PLANNER_PERSONA,
                prompts::PLAN_EXPECTED,
            ),
            FinanceStage::Analyze => (
                prompts::ANALYST_ROLE,
                prompts::ANALYZE_GOAL,
                prompts::ANALYST_PERSONA,
                prompts::ANALYZE_EXPECTED,
            ),
            FinanceStage::Visualize => (
                prompts::VISUALIZER_ROLE,
                prompts::VISUALIZE_GOAL,
                prompts::VISUALIZER_PERSONA,
                prompts::VISUALIZE_EXPECTED,
            ),
            FinanceStage::Report => (
                prompts::WRITER_ROLE,
                prompts::REPORT_GOAL,
                prompts::WRITER_PERSONA,
                prompts::REPORT_EXPECTED,
            ),
        };

        StageSpec::new(self.name(), role)
            .goal(goal)
            .persona(persona)
            .expected_output(expected)
            .allow(self.allowed_operations().iter().map(|op| op.name()))
    }
}

impl fmt::Display for FinanceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The worker serving each stage
#[derive(Clone)]
pub struct StageWorkers {
    pub plan: Arc<dyn Worker>,
    pub analyze: Arc<dyn Worker>,
    pub visualize: Arc<dyn Worker>,
    pub report: Arc<dyn Worker>,
}

impl StageWorkers {
    /// The deterministic rule-based worker set
    pub fn rule_based(config: &FinanceConfig) -> Self {
        Self {
            plan: Arc::new(PlanWorker::new(&config.default_metric, &config.report_title)),
            analyze: Arc::new(AnalystWorker),
            visualize: Arc::new(VisualizerWorker),
            report: Arc::new(WriterWorker),
        }
    }

    pub fn for_stage(&self, stage: FinanceStage) -> Arc<dyn Worker> {
        let worker = match stage {
            FinanceStage::Plan => &self.plan,
            FinanceStage::Analyze => &self.analyze,
            FinanceStage::Visualize => &self.visualize,
            FinanceStage::Report => &self.report,
        };
        Arc::clone(worker)
    }
}

/// Assemble the Plan -> Analyze -> Visualize -> Report pipeline
///
/// Every service operation is registered; each stage sees only its own
/// allow-list.
pub fn build_pipeline(service: Arc<ToolService>, workers: &StageWorkers) -> Result<Pipeline> {
    let registry = service_registry(&service);
    debug!(tools = ?registry.names(), "Registered service tools");

    FinanceStage::ALL
        .into_iter()
        .fold(Pipeline::builder(registry), |builder, stage| {
            builder.add_stage(stage.spec(), workers.for_stage(stage))
        })
        .build()
}
