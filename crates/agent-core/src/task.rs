//! The unit of work handed to a worker

use crate::PipelineContext;
use serde::{Deserialize, Serialize};

/// Everything a worker needs to carry out one stage
///
/// A task bundles the stage's goal and persona with the original user
/// request, the outputs of every prior stage and the names of the tools
/// the stage is allowed to call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stage identity (e.g. "visualize")
    pub stage: String,
    /// Role title of the worker (e.g. "Data Visualization Expert")
    pub role: String,
    /// Natural-language goal for this stage
    pub goal: String,
    /// Persona / backstory description
    pub persona: String,
    /// Description of the output the stage is expected to produce
    pub expected_output: String,
    /// The original user request
    pub request: String,
    /// Outputs of all prior stages
    pub context: PipelineContext,
    /// Tool names this stage may invoke
    pub allowed_operations: Vec<String>,
}
