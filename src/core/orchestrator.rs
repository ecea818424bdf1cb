//! Command orchestrator.
//!
//! Resolves a requested name against commands, aliases and execution orders
//! and runs it:
//! - single commands pass the safety gate, then run their body
//! - command sequences run fail-fast
//! - execution orders run their named commands in order, fail-fast
//! - aliases resolve to an execution order if one has that name, otherwise
//!   to a command
//!
//! Each call is independent; the only state is the immutable document.

use tracing::{debug, info, instrument};

use crate::adapters::{Confirmation, Shell};
use crate::config::Document;
use crate::domain::{RunOutcome, SequenceReport};

use super::executor::Executor;
use super::logger::Logger;
use super::safety::SafetyGate;

/// Main command orchestrator
pub struct Orchestrator<'a> {
    document: &'a Document,
    log: &'a Logger,
    executor: Executor<'a>,
    gate: SafetyGate<'a>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator over a loaded document
    pub fn new(
        document: &'a Document,
        log: &'a Logger,
        shell: &'a dyn Shell,
        confirm: &'a dyn Confirmation,
    ) -> Self {
        Self {
            document,
            log,
            executor: Executor::new(shell, log),
            gate: SafetyGate::from_document(document, confirm, log),
        }
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    /// Resolve `name` as a command first and as an alias only if no command
    /// has that name. A command that exists but fails is not retried.
    #[instrument(skip(self))]
    pub async fn run(&self, name: &str) -> RunOutcome {
        let outcome = self.run_single_command(name).await;
        if outcome.is_not_found() {
            debug!("No command named '{}', trying aliases", name);
            return self.run_alias(name).await;
        }
        outcome
    }

    /// Run one named command (single invocation or sequence)
    #[instrument(skip(self))]
    pub async fn run_single_command(&self, name: &str) -> RunOutcome {
        let Some(definition) = self.document.command(name) else {
            self.log
                .error(format!("ERROR: Command '{}' not found", name));
            return RunOutcome::NotFound;
        };

        if !self.gate.check(name, &self.executor).await {
            return RunOutcome::Cancelled;
        }

        let outcome = self.executor.execute_definition(definition).await;
        info!(%outcome, "Command finished");
        outcome
    }

    /// Run raw invocations in order, stopping at the first failure
    pub async fn run_command_sequence(
        &self,
        invocations: &[String],
        description: Option<&str>,
    ) -> SequenceReport {
        self.executor.execute_sequence(invocations, description).await
    }

    /// Run every command of a named execution order, stopping at the first
    /// one that does not succeed
    #[instrument(skip(self))]
    pub async fn run_execution_order(&self, order_name: &str) -> RunOutcome {
        let Some(commands) = self.document.execution_order(order_name) else {
            self.log.error(format!(
                "ERROR: Execution order '{}' not found",
                order_name
            ));
            return RunOutcome::NotFound;
        };

        self.log
            .info(format!("Starting execution order: {}", order_name));

        let mut succeeded = 0usize;
        for command_name in commands {
            if self.run_single_command(command_name).await.is_success() {
                succeeded += 1;
            } else {
                self.log
                    .error(format!("Execution order failed at: {}", command_name));
                break;
            }
        }

        if succeeded == commands.len() {
            self.log.info(format!(
                "Execution order '{}' completed successfully",
                order_name
            ));
            RunOutcome::Succeeded
        } else {
            self.log
                .error(format!("Execution order '{}' failed", order_name));
            RunOutcome::Failed
        }
    }

    /// Run whatever an alias points to
    #[instrument(skip(self))]
    pub async fn run_alias(&self, alias_name: &str) -> RunOutcome {
        let Some(target) = self.document.alias(alias_name) else {
            self.log
                .error(format!("ERROR: Alias '{}' not found", alias_name));
            return RunOutcome::NotFound;
        };

        if self.document.is_execution_order(target) {
            self.run_execution_order(target).await
        } else {
            self.run_single_command(target).await
        }
    }
}
