//! Stage definitions

use serde::{Deserialize, Serialize};

/// Static description of one pipeline stage
///
/// `goal` is a MiniJinja template rendered once per run with the variable
/// `request` (the original user request) in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSpec {
    /// Stage identity, unique within a pipeline
    pub name: String,
    /// Role title of the worker
    pub role: String,
    /// Goal template
    pub goal: String,
    /// Persona / backstory
    pub persona: String,
    /// What the stage is expected to produce
    pub expected_output: String,
    /// Tool names the stage may invoke
    pub allowed_tools: Vec<String>,
}

impl StageSpec {
    /// Create a stage with a name and role; other fields start empty
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            goal: String::new(),
            persona: String::new(),
            expected_output: String::new(),
            allowed_tools: Vec::new(),
        }
    }

    /// Set the goal template
    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Set the persona
    pub fn persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Set the expected output description
    pub fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    /// Set the tool allow-list
    pub fn allow(mut self, tools: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }
}
