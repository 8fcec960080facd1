//! Sequential multi-stage orchestration for agent-rs
//!
//! A [`Pipeline`] runs an ordered list of stages. Each stage is bound at
//! build time to a goal template, a persona, a [`Worker`](agent_core::Worker)
//! and an allow-list of tools. Stages run strictly one after another; every
//! stage sees the original request plus the outputs of all earlier stages,
//! and the first stage fault aborts the run.

pub mod outcome;
pub mod pipeline;
pub mod stage;

// Re-export for convenience
pub use outcome::{PipelineOutcome, TaskOutputs};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use stage::StageSpec;
