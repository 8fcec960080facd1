//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the workspace:
//! tracing setup and process-level configuration.

pub mod config;
pub mod logging;

pub use config::{AppConfig, LogFormat};
pub use logging::init_tracing;
