//! Core orchestration logic.
//!
//! This module contains:
//! - Logger: Operator log (console + append-only file)
//! - Executor: Runs invocations through a shell
//! - Safety: Confirmation and backup gate for dangerous commands
//! - Orchestrator: Resolves names to commands, aliases and orders

pub mod executor;
pub mod logger;
pub mod orchestrator;
pub mod safety;

// Re-export commonly used types
pub use executor::Executor;
pub use logger::{Level, Logger};
pub use orchestrator::Orchestrator;
pub use safety::SafetyGate;
