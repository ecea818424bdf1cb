//! System shell adapter.
//!
//! Hands each invocation to `sh -c` (`cmd /C` on Windows) in the current
//! working directory and waits for it to finish. There is no timeout: a
//! command runs for as long as it runs.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{Shell, ShellError, ShellOutput};

/// Shell adapter using the platform shell
pub struct SystemShell {
    program: String,
    flag: String,
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemShell {
    /// Platform default shell
    pub fn new() -> Self {
        if cfg!(windows) {
            Self::with_program("cmd", "/C")
        } else {
            Self::with_program("sh", "-c")
        }
    }

    /// Use a custom shell binary, e.g. `bash -c`
    pub fn with_program(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }
}

#[async_trait]
impl Shell for SystemShell {
    fn name(&self) -> &str {
        &self.program
    }

    async fn run(&self, invocation: &str) -> Result<ShellOutput, ShellError> {
        debug!(shell = %self.program, %invocation, "Spawning");

        let output = Command::new(&self.program)
            .arg(&self.flag)
            .arg(invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ShellError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(code = ?output.status.code(), "Process exited");

        Ok(ShellOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_status() {
        let shell = SystemShell::new();
        let output = tokio_test::block_on(shell.run("echo hello; exit 3")).unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "hello");
        assert!(!output.success());
    }

    #[test]
    fn test_captures_stderr() {
        let shell = SystemShell::new();
        let output = tokio_test::block_on(shell.run("echo oops 1>&2")).unwrap();

        assert!(output.success());
        assert_eq!(output.stderr.trim(), "oops");
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_missing_shell_is_spawn_error() {
        let shell = SystemShell::with_program("/nonexistent/shell", "-c");
        let result = tokio_test::block_on(shell.run("true"));
        assert!(matches!(result, Err(ShellError::Spawn { .. })));
    }
}
