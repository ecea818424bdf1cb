//! Adapter interfaces for the outside world.
//!
//! The runner only touches two external things: a shell that runs opaque
//! invocation strings, and an operator who answers yes/no prompts. Both sit
//! behind traits so tests can substitute deterministic implementations.

pub mod prompt;
pub mod shell;

use async_trait::async_trait;
use thiserror::Error;

pub use prompt::StdinPrompt;
pub use shell::SystemShell;

/// Captured result of a finished shell process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// Exit status (None when terminated by a signal)
    pub code: Option<i32>,

    pub stdout: String,

    pub stderr: String,
}

impl ShellOutput {
    /// Create an output with an exit code and no captured text
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Failure to run a process at all
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs invocation strings and collects their output
#[async_trait]
pub trait Shell: Send + Sync {
    /// Human-readable shell name
    fn name(&self) -> &str;

    /// Run `invocation` to completion, capturing stdout and stderr in full
    async fn run(&self, invocation: &str) -> Result<ShellOutput, ShellError>;
}

/// Source of yes/no answers for the safety gate
pub trait Confirmation: Send + Sync {
    /// Show `prompt` and return the raw answer (None on end of input)
    fn ask(&self, prompt: &str) -> Option<String>;

    /// Ask and interpret the answer; only "yes" or "y" counts as agreement
    fn confirm(&self, prompt: &str) -> bool {
        self.ask(prompt).map_or(false, |answer| is_affirmative(&answer))
    }
}

/// Case-insensitive "yes"/"y", surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("YES\n"));
        assert!(is_affirmative("  y  "));

        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yeah"));
        assert!(!is_affirmative("n"));
    }

    #[test]
    fn test_shell_output_success() {
        assert!(ShellOutput::exited(0).success());
        assert!(!ShellOutput::exited(2).success());
        assert!(!ShellOutput::default().success());
    }
}
