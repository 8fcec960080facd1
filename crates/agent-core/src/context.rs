//! Accumulated stage outputs for a pipeline run
//!
//! The `PipelineContext` is an append-only, ordered list of the outputs
//! produced by every stage that has completed so far. A stage receives the
//! full context of its predecessors and never sees output of later stages.

use serde::{Deserialize, Serialize};

/// Output of one completed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    /// Stage identity (e.g. "plan", "analyze")
    pub stage: String,
    /// Raw free-form text produced by the stage's worker
    pub output: String,
}

/// Context passed to workers during a pipeline run
///
/// Created empty when a run starts, grows by one entry per completed stage
/// and is discarded when the run ends.
///
/// # Example
///
/// ```
/// use agent_core::PipelineContext;
///
/// let mut ctx = PipelineContext::new();
/// ctx.push("plan", "companies: Wand AI");
///
/// assert_eq!(ctx.len(), 1);
/// assert_eq!(ctx.output_of("plan"), Some("companies: Wand AI"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineContext {
    entries: Vec<StageOutput>,
}

impl PipelineContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage output
    pub fn push(&mut self, stage: impl Into<String>, output: impl Into<String>) {
        self.entries.push(StageOutput {
            stage: stage.into(),
            output: output.into(),
        });
    }

    /// Get the output of a named stage
    pub fn output_of(&self, stage: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.stage == stage)
            .map(|entry| entry.output.as_str())
    }

    /// Iterate over entries in completion order
    pub fn iter(&self) -> std::slice::Iter<'_, StageOutput> {
        self.entries.iter()
    }

    /// Stage names in completion order
    pub fn stages(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.stage.as_str()).collect()
    }

    /// The most recently appended output
    pub fn last(&self) -> Option<&StageOutput> {
        self.entries.last()
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PipelineContext {
    type Item = &'a StageOutput;
    type IntoIter = std::slice::Iter<'a, StageOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut ctx = PipelineContext::new();
        assert!(ctx.is_empty());
        assert!(ctx.last().is_none());

        ctx.push("plan", "step one");
        ctx.push("analyze", "step two");

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.stages(), vec!["plan", "analyze"]);
        assert_eq!(ctx.last().map(|e| e.stage.as_str()), Some("analyze"));
    }

    #[test]
    fn test_output_of_missing_stage() {
        let mut ctx = PipelineContext::new();
        ctx.push("plan", "x");
        assert_eq!(ctx.output_of("report"), None);
    }
}
