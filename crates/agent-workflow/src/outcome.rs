//! Pipeline result envelope

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered mapping from stage identity to that stage's raw output
///
/// Serializes as a JSON object whose keys appear in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOutputs(Vec<(String, String)>);

impl TaskOutputs {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage output
    pub fn insert(&mut self, stage: impl Into<String>, output: impl Into<String>) {
        self.0.push((stage.into(), output.into()));
    }

    /// Get the output of a stage
    pub fn get(&self, stage: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, output)| output.as_str())
    }

    /// Stage names in order
    pub fn stages(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterate over `(stage, output)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, output)| (name.as_str(), output.as_str()))
    }

    /// Number of stages recorded
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no stage has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TaskOutputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (stage, output) in &self.0 {
            map.serialize_entry(stage, output)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaskOutputs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OutputsVisitor;

        impl<'de> Visitor<'de> for OutputsVisitor {
            type Value = TaskOutputs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of stage name to output text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut outputs = TaskOutputs::new();
                while let Some((stage, output)) = access.next_entry::<String, String>()? {
                    outputs.insert(stage, output);
                }
                Ok(outputs)
            }
        }

        deserializer.deserialize_map(OutputsVisitor)
    }
}

/// Final envelope of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Every stage completed
    Success {
        /// Output of the final stage
        result: String,
        /// Raw output of every stage, in order
        task_outputs: TaskOutputs,
        /// Number of workers that took part
        agents_used: usize,
        /// Number of stages completed
        tasks_completed: usize,
    },
    /// A stage raised an unrecoverable fault
    Failed {
        /// Human-readable description of the fault
        error: String,
    },
}

impl PipelineOutcome {
    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Output of the final stage, if the run succeeded
    pub fn result(&self) -> Option<&str> {
        match self {
            Self::Success { result, .. } => Some(result),
            Self::Failed { .. } => None,
        }
    }

    /// Per-stage outputs, if the run succeeded
    pub fn task_outputs(&self) -> Option<&TaskOutputs> {
        match self {
            Self::Success { task_outputs, .. } => Some(task_outputs),
            Self::Failed { .. } => None,
        }
    }

    /// Fault description, if the run failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }
}
