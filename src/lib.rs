//! cmdrunner - Configuration-driven management command runner
//!
//! Runs named shell-level commands declared in a YAML document, with
//! command sequences, execution orders and aliases, and a safety gate
//! (confirmation + backup) in front of dangerous commands.
//!
//! # Modules
//!
//! - `adapters`: Shell and confirmation seams
//! - `config`: Configuration document loading and lookup
//! - `core`: Orchestration logic (Logger, Executor, Safety, Orchestrator)
//! - `domain`: Data structures (CommandDefinition, RunOutcome)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List everything the document declares
//! cmdrunner --list
//!
//! # Run a command or an alias
//! cmdrunner migrate
//!
//! # Run an execution order
//! cmdrunner --order initial_setup
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::config::{ConfigError, Document};
pub use crate::core::{Logger, Orchestrator};
pub use crate::domain::{CommandBody, CommandDefinition, RunOutcome, SequenceReport};
