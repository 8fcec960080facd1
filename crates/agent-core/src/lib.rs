//! Core abstractions for staged analysis agents
//!
//! This crate defines the fundamental traits and types shared by the tool,
//! workflow and domain crates: the [`Worker`] capability each pipeline stage
//! delegates to, the [`ToolInvoker`] surface a worker is allowed to call, the
//! [`Task`] handed to a worker and the append-only [`PipelineContext`].

pub mod context;
pub mod error;
pub mod task;
pub mod worker;

pub use context::{PipelineContext, StageOutput};
pub use error::{Error, Result};
pub use task::Task;
pub use worker::{ToolInvoker, Worker};
