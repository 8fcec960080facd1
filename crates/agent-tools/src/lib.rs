//! Tool management and execution framework for agent-rs
//!
//! This crate provides a framework for defining tools (named, independently
//! invocable operations), collecting them in a [`ToolRegistry`] and handing
//! workers a [`ToolScope`]: a view of the registry restricted to a stage's
//! allow-list.

pub mod registry;
pub mod scope;
pub mod tool;

pub use registry::ToolRegistry;
pub use scope::ToolScope;
pub use tool::Tool;
