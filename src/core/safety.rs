//! Safety gate for dangerous commands.
//!
//! Commands named in `security.dangerous_commands` are announced with a
//! warning, optionally confirmed by the operator, and optionally preceded by
//! the `backup_database` backup entry. The backup's own outcome is logged but
//! never stops the command.

use tracing::{debug, instrument};

use crate::adapters::Confirmation;
use crate::config::{Document, SecurityPolicy, BACKUP_DATABASE};
use crate::domain::CommandDefinition;

use super::executor::Executor;
use super::logger::Logger;

pub const BACKUP_PROMPT: &str = "Do you want to create a backup first? (yes/no): ";

pub fn confirmation_prompt(command_name: &str) -> String {
    format!(
        "Are you sure you want to execute '{}'? (yes/no): ",
        command_name
    )
}

/// Decides whether a named command may run
pub struct SafetyGate<'a> {
    policy: &'a SecurityPolicy,
    backup: Option<&'a CommandDefinition>,
    confirm: &'a dyn Confirmation,
    log: &'a Logger,
}

impl<'a> SafetyGate<'a> {
    pub fn new(
        policy: &'a SecurityPolicy,
        backup: Option<&'a CommandDefinition>,
        confirm: &'a dyn Confirmation,
        log: &'a Logger,
    ) -> Self {
        Self {
            policy,
            backup,
            confirm,
            log,
        }
    }

    /// Gate using the document's policy and its `backup_database` entry
    pub fn from_document(
        document: &'a Document,
        confirm: &'a dyn Confirmation,
        log: &'a Logger,
    ) -> Self {
        Self::new(
            document.security(),
            document.backup(BACKUP_DATABASE),
            confirm,
            log,
        )
    }

    /// Returns false only when the operator declines a dangerous command
    #[instrument(skip(self, executor))]
    pub async fn check(&self, command_name: &str, executor: &Executor<'_>) -> bool {
        if !self.policy.is_dangerous(command_name) {
            return true;
        }

        self.log.warning(format!(
            "WARNING: '{}' is marked as a dangerous command",
            command_name
        ));

        if self.policy.confirmation_required
            && !self.confirm.confirm(&confirmation_prompt(command_name))
        {
            self.log.info("Command execution cancelled by user");
            return false;
        }

        if self.policy.backup_before_dangerous && self.confirm.confirm(BACKUP_PROMPT) {
            self.run_backup(executor).await;
        }

        true
    }

    async fn run_backup(&self, executor: &Executor<'_>) {
        let Some(backup) = self.backup else {
            debug!("No backup entry configured, skipping backup");
            return;
        };

        let outcome = executor.execute_definition(backup).await;
        debug!(%outcome, "Backup finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_prompt_names_command() {
        assert_eq!(
            confirmation_prompt("reset_db"),
            "Are you sure you want to execute 'reset_db'? (yes/no): "
        );
    }
}
