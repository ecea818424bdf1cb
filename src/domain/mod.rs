//! Domain types for the command runner.
//!
//! This module contains the core data structures:
//! - Command: Named command definitions and their bodies
//! - Outcome: What a run reduces to

pub mod command;
pub mod outcome;

// Re-export commonly used types
pub use command::{CommandBody, CommandDefinition};
pub use outcome::{RunOutcome, SequenceReport};
