//! Command execution.
//!
//! Runs invocations through a [`Shell`] and reduces each one to a success
//! flag. Output, exit status and launch errors all end up in the operator
//! log; nothing propagates to the caller as an error.

use tracing::{debug, instrument};

use crate::adapters::Shell;
use crate::domain::{CommandBody, CommandDefinition, RunOutcome, SequenceReport};

use super::logger::Logger;

/// Runs single invocations and fail-fast sequences
pub struct Executor<'a> {
    shell: &'a dyn Shell,
    log: &'a Logger,
}

impl<'a> Executor<'a> {
    pub fn new(shell: &'a dyn Shell, log: &'a Logger) -> Self {
        Self { shell, log }
    }

    /// Run one invocation; true iff the process exited 0
    #[instrument(skip(self, description), fields(shell = %self.shell.name()))]
    pub async fn execute(&self, invocation: &str, description: Option<&str>) -> bool {
        if let Some(description) = description {
            self.log.info(format!("Executing: {}", description));
        }
        self.log.info(format!("Command: {}", invocation));

        let output = match self.shell.run(invocation).await {
            Ok(output) => output,
            Err(e) => {
                self.log.error(format!("EXCEPTION: {}", e));
                return false;
            }
        };

        if output.success() {
            self.log.info("SUCCESS: Command completed successfully");
            let stdout = output.stdout.trim();
            if !stdout.is_empty() {
                self.log.info(format!("Output: {}", stdout));
            }
            true
        } else {
            self.log.error(format!(
                "ERROR: Command failed with return code {}",
                output.code.unwrap_or(-1)
            ));
            let stderr = output.stderr.trim();
            if !stderr.is_empty() {
                self.log.error(format!("Error output: {}", stderr));
            }
            false
        }
    }

    /// Run invocations in order, stopping at the first failure
    pub async fn execute_sequence(
        &self,
        invocations: &[String],
        description: Option<&str>,
    ) -> SequenceReport {
        if let Some(description) = description {
            self.log.info(format!("Starting sequence: {}", description));
        }

        let mut report = SequenceReport {
            succeeded: 0,
            total: invocations.len(),
        };

        for invocation in invocations {
            if self.execute(invocation, None).await {
                report.succeeded += 1;
            } else {
                self.log
                    .error(format!("Sequence failed at command: {}", invocation));
                break;
            }
        }

        debug!(%report, "Sequence finished");

        if report.is_complete() {
            self.log
                .info(format!("Sequence completed successfully ({})", report));
        } else {
            self.log.error(format!("Sequence failed ({})", report));
        }

        report
    }

    /// Run whichever body the definition carries
    pub async fn execute_definition(&self, definition: &CommandDefinition) -> RunOutcome {
        let description = definition.description.as_deref();
        match &definition.body {
            CommandBody::Single(invocation) => {
                RunOutcome::from(self.execute(invocation, description).await)
            }
            CommandBody::Sequence(invocations) => {
                self.execute_sequence(invocations, description).await.outcome()
            }
        }
    }
}
