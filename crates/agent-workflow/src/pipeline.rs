//! Pipeline definition and execution

use crate::outcome::{PipelineOutcome, TaskOutputs};
use crate::stage::StageSpec;
use agent_core::{Error, PipelineContext, Result, Task, ToolInvoker, Worker};
use agent_tools::{ToolRegistry, ToolScope};
use futures::FutureExt;
use minijinja::{Environment, context};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span};

/// A stage bound to its worker and tool scope
struct PipelineStep {
    spec: StageSpec,
    worker: Arc<dyn Worker>,
    scope: Arc<ToolScope>,
}

/// A strictly sequential, capability-scoped multi-stage pipeline
///
/// Stages execute one after another on the caller's task. Stage N+1 starts
/// only after stage N has returned, receives the original request and the
/// outputs of all earlier stages, and may only call the tools on its own
/// allow-list. There is no retry and no partial success: the first fault
/// aborts the run.
///
/// # Example
///
/// ```no_run
/// use agent_workflow::{Pipeline, StageSpec};
/// use agent_tools::ToolRegistry;
/// use std::sync::Arc;
///
/// # async fn example(worker: Arc<dyn agent_core::Worker>) -> agent_core::Result<()> {
/// let registry = Arc::new(ToolRegistry::new());
///
/// let pipeline = Pipeline::builder(registry)
///     .add_stage(StageSpec::new("plan", "Planner").goal("Plan: {{ request }}"), worker)
///     .build()?;
///
/// let outcome = pipeline.run("Compare revenue", false).await;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    steps: Vec<PipelineStep>,
    templates: Environment<'static>,
}

impl Pipeline {
    /// Create a new pipeline builder over a tool registry
    pub fn builder(registry: Arc<ToolRegistry>) -> PipelineBuilder {
        PipelineBuilder::new(registry)
    }

    /// Stage specifications in execution order
    pub fn stages(&self) -> Vec<&StageSpec> {
        self.steps.iter().map(|step| &step.spec).collect()
    }

    /// Number of workers bound to the pipeline
    pub fn agents(&self) -> usize {
        self.steps.len()
    }

    /// Run the pipeline and wrap the result in an envelope
    ///
    /// Never returns an error: faults become [`PipelineOutcome::Failed`].
    pub async fn run(&self, user_request: &str, verbose: bool) -> PipelineOutcome {
        let run_id = uuid::Uuid::new_v4();
        let span = info_span!("pipeline_run", %run_id);

        async {
            info!(stages = self.steps.len(), "Starting pipeline run");
            match self.execute(user_request, verbose).await {
                Ok(context) => {
                    info!("Pipeline run completed");
                    self.success(context)
                }
                Err(e) => {
                    error!("Pipeline run failed: {e}");
                    PipelineOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run every stage and return the accumulated context
    pub async fn execute(&self, user_request: &str, verbose: bool) -> Result<PipelineContext> {
        let mut context = PipelineContext::new();

        for (index, step) in self.steps.iter().enumerate() {
            let stage = step.spec.name.as_str();
            info!(stage, step = index + 1, of = self.steps.len(), "Stage started");

            let task = self.task_for(step, user_request, &context)?;
            let tools: Arc<dyn ToolInvoker> = step.scope.clone();

            let output = AssertUnwindSafe(step.worker.invoke(task, tools))
                .catch_unwind()
                .await
                .map_err(|panic| {
                    Error::ProcessingFailed(format!(
                        "Stage '{stage}' panicked: {}",
                        panic_message(panic.as_ref())
                    ))
                })?
                .map_err(|e| Error::Generic(format!("Stage '{stage}' failed: {e}")))?;

            if verbose {
                info!(stage, "Stage output:\n{output}");
            } else {
                debug!(stage, chars = output.len(), "Stage output recorded");
            }

            context.push(stage, output);
            info!(stage, "Stage completed");
        }

        Ok(context)
    }

    fn task_for(
        &self,
        step: &PipelineStep,
        user_request: &str,
        context: &PipelineContext,
    ) -> Result<Task> {
        let goal = self
            .templates
            .render_str(&step.spec.goal, context! { request => user_request })
            .map_err(|e| {
                Error::ProcessingFailed(format!(
                    "Failed to render goal for stage '{}': {e}",
                    step.spec.name
                ))
            })?;

        Ok(Task {
            stage: step.spec.name.clone(),
            role: step.spec.role.clone(),
            goal,
            persona: step.spec.persona.clone(),
            expected_output: step.spec.expected_output.clone(),
            request: user_request.to_string(),
            context: context.clone(),
            allowed_operations: step.scope.allowed().to_vec(),
        })
    }

    fn success(&self, context: PipelineContext) -> PipelineOutcome {
        let mut task_outputs = TaskOutputs::new();
        for entry in &context {
            task_outputs.insert(entry.stage.clone(), entry.output.clone());
        }

        PipelineOutcome::Success {
            result: context
                .last()
                .map(|entry| entry.output.clone())
                .unwrap_or_default(),
            tasks_completed: task_outputs.len(),
            task_outputs,
            agents_used: self.agents(),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    registry: Arc<ToolRegistry>,
    stages: Vec<(StageSpec, Arc<dyn Worker>)>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            stages: Vec::new(),
        }
    }

    /// Append a stage served by `worker`
    pub fn add_stage(mut self, spec: StageSpec, worker: Arc<dyn Worker>) -> Self {
        self.stages.push((spec, worker));
        self
    }

    /// Build the pipeline
    ///
    /// Fails if there are no stages, if two stages share a name, if an
    /// allow-list names an unregistered tool or if a goal template does not
    /// compile.
    pub fn build(self) -> Result<Pipeline> {
        if self.stages.is_empty() {
            return Err(Error::InitializationFailed(
                "Pipeline needs at least one stage".to_string(),
            ));
        }

        let templates = Environment::new();
        let mut steps = Vec::with_capacity(self.stages.len());

        for (spec, worker) in self.stages {
            if steps.iter().any(|step: &PipelineStep| step.spec.name == spec.name) {
                return Err(Error::InitializationFailed(format!(
                    "Duplicate stage name: {}",
                    spec.name
                )));
            }

            templates
                .template_from_str(&spec.goal)
                .map_err(|e| {
                    Error::InitializationFailed(format!(
                        "Invalid goal template for stage '{}': {e}",
                        spec.name
                    ))
                })?;

            let scope = ToolScope::new(
                spec.name.clone(),
                Arc::clone(&self.registry),
                spec.allowed_tools.iter().cloned(),
            )?;

            steps.push(PipelineStep {
                spec,
                worker,
                scope: Arc::new(scope),
            });
        }

        Ok(Pipeline { steps, templates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_tools::Tool;
    use async_trait::async_trait;
    use mockall::{Sequence, mock};
    use serde_json::{Value, json};

    mock! {
        pub StageWorker {}

        #[async_trait]
        impl Worker for StageWorker {
            async fn invoke(&self, task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String>;
        }
    }

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(json!({ "status": "success", "tool": self.0 }))
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    /// Calls one tool and reports what came back
    struct CallingWorker(&'static str);

    #[async_trait]
    impl Worker for CallingWorker {
        async fn invoke(&self, _task: Task, tools: Arc<dyn ToolInvoker>) -> Result<String> {
            let out = tools.invoke_tool(self.0, json!({})).await?;
            Ok(out.to_string())
        }
    }

    struct PanickingWorker;

    #[async_trait]
    impl Worker for PanickingWorker {
        async fn invoke(&self, _task: Task, _tools: Arc<dyn ToolInvoker>) -> Result<String> {
            panic!("index out of range")
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let registry = Arc::new(ToolRegistry::new());
        for name in ["list_companies", "analyze_metrics", "generate_report"] {
            registry.register(Arc::new(NamedTool(name)));
        }
        registry
    }

    fn spec(name: &str) -> StageSpec {
        StageSpec::new(name, format!("{name} role"))
            .goal(format!("{name}: {{{{ request }}}}"))
            .allow(["analyze_metrics"])
    }

    fn echo_worker(expected_context: usize, seq: &mut Sequence) -> Arc<dyn Worker> {
        let mut worker = MockStageWorker::new();
        worker
            .expect_invoke()
            .times(1)
            .in_sequence(seq)
            .withf(move |task, _| task.context.len() == expected_context)
            .returning(|task, _| Ok(format!("{} done", task.stage)));
        Arc::new(worker)
    }

    #[tokio::test]
    async fn test_stages_run_in_order_with_growing_context() {
        let mut seq = Sequence::new();
        let pipeline = Pipeline::builder(registry())
            .add_stage(spec("plan"), echo_worker(0, &mut seq))
            .add_stage(spec("analyze"), echo_worker(1, &mut seq))
            .add_stage(spec("visualize"), echo_worker(2, &mut seq))
            .add_stage(spec("report"), echo_worker(3, &mut seq))
            .build()
            .unwrap();

        let outcome = pipeline.run("Compare revenue", false).await;

        match outcome {
            PipelineOutcome::Success {
                result,
                task_outputs,
                agents_used,
                tasks_completed,
            } => {
                assert_eq!(result, "report done");
                assert_eq!(agents_used, 4);
                assert_eq!(tasks_completed, 4);
                assert_eq!(
                    task_outputs.stages(),
                    vec!["plan", "analyze", "visualize", "report"]
                );
                assert_eq!(task_outputs.get("analyze"), Some("analyze done"));
            }
            PipelineOutcome::Failed { error } => panic!("unexpected failure: {error}"),
        }
    }

    #[tokio::test]
    async fn test_task_carries_rendered_goal_and_prior_outputs() {
        let mut first = MockStageWorker::new();
        first
            .expect_invoke()
            .returning(|_, _| Ok("the plan".to_string()));

        let mut second = MockStageWorker::new();
        second
            .expect_invoke()
            .withf(|task, tools| {
                task.goal == "analyze: Compare revenue"
                    && task.request == "Compare revenue"
                    && task.context.output_of("plan") == Some("the plan")
                    && task.allowed_operations == vec!["analyze_metrics".to_string()]
                    && tools.allowed_operations() == vec!["analyze_metrics".to_string()]
            })
            .returning(|_, _| Ok("analysis".to_string()));

        let pipeline = Pipeline::builder(registry())
            .add_stage(spec("plan"), Arc::new(first))
            .add_stage(spec("analyze"), Arc::new(second))
            .build()
            .unwrap();

        assert!(pipeline.run("Compare revenue", true).await.is_success());
    }

    #[tokio::test]
    async fn test_fault_in_second_stage_aborts_run() {
        let mut plan = MockStageWorker::new();
        plan.expect_invoke().times(1).returning(|_, _| Ok("plan".to_string()));

        let mut analyze = MockStageWorker::new();
        analyze
            .expect_invoke()
            .times(1)
            .returning(|_, _| Err(Error::ProcessingFailed("backend unavailable".to_string())));

        let mut visualize = MockStageWorker::new();
        visualize.expect_invoke().times(0);

        let mut report = MockStageWorker::new();
        report.expect_invoke().times(0);

        let pipeline = Pipeline::builder(registry())
            .add_stage(spec("plan"), Arc::new(plan))
            .add_stage(spec("analyze"), Arc::new(analyze))
            .add_stage(spec("visualize"), Arc::new(visualize))
            .add_stage(spec("report"), Arc::new(report))
            .build()
            .unwrap();

        let outcome = pipeline.run("anything", false).await;

        let error = outcome.error().unwrap();
        assert!(error.contains("Stage 'analyze' failed"));
        assert!(error.contains("backend unavailable"));
        assert!(outcome.task_outputs().is_none());
    }

    #[tokio::test]
    async fn test_panicking_worker_becomes_failed_envelope() {
        let mut plan = MockStageWorker::new();
        plan.expect_invoke().times(1).returning(|_, _| Ok("plan".to_string()));

        let mut report = MockStageWorker::new();
        report.expect_invoke().times(0);

        let pipeline = Pipeline::builder(registry())
            .add_stage(spec("plan"), Arc::new(plan))
            .add_stage(spec("analyze"), Arc::new(PanickingWorker))
            .add_stage(spec("report"), Arc::new(report))
            .build()
            .unwrap();

        let outcome = pipeline.run("anything", false).await;

        assert!(!outcome.is_success());
        let error = outcome.error().unwrap();
        assert!(error.contains("Stage 'analyze' panicked"), "{error}");
        assert!(error.contains("index out of range"), "{error}");
    }

    #[tokio::test]
    async fn test_worker_cannot_escape_allow_list() {
        let pipeline = Pipeline::builder(registry())
            .add_stage(spec("plan"), Arc::new(CallingWorker("generate_report")))
            .build()
            .unwrap();

        let outcome = pipeline.run("anything", false).await;
        let error = outcome.error().unwrap();
        assert!(error.contains("'generate_report' is not permitted"));
    }

    #[tokio::test]
    async fn test_worker_reaches_allowed_tool() {
        let pipeline = Pipeline::builder(registry())
            .add_stage(spec("plan"), Arc::new(CallingWorker("analyze_metrics")))
            .build()
            .unwrap();

        let outcome = pipeline.run("anything", false).await;
        assert!(outcome.result().unwrap().contains("analyze_metrics"));
    }

    #[test]
    fn test_build_rejects_unknown_tool() {
        let result = Pipeline::builder(registry())
            .add_stage(
                StageSpec::new("plan", "Planner").allow(["delete_everything"]),
                Arc::new(CallingWorker("delete_everything")),
            )
            .build();
        assert!(matches!(result, Err(Error::ToolNotFound(_))));
    }

    #[test]
    fn test_build_rejects_duplicate_stage() {
        let result = Pipeline::builder(registry())
            .add_stage(spec("plan"), Arc::new(CallingWorker("analyze_metrics")))
            .add_stage(spec("plan"), Arc::new(CallingWorker("analyze_metrics")))
            .build();
        assert!(matches!(result, Err(Error::InitializationFailed(_))));
    }

    #[test]
    fn test_build_rejects_empty_and_bad_template() {
        assert!(Pipeline::builder(registry()).build().is_err());

        let result = Pipeline::builder(registry())
            .add_stage(
                StageSpec::new("plan", "Planner").goal("{{ unclosed"),
                Arc::new(CallingWorker("analyze_metrics")),
            )
            .build();
        assert!(matches!(result, Err(Error::InitializationFailed(_))));
    }
}
