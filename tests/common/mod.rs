//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use cmdrunner::adapters::{Confirmation, Shell, ShellError, ShellOutput};

/// Shell that records invocations instead of running them.
///
/// Every invocation exits 0 and echoes `ran <invocation>` unless told
/// otherwise.
#[derive(Default)]
pub struct FakeShell {
    exits: HashMap<String, i32>,
    stderr: HashMap<String, String>,
    unlaunchable: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `invocation` exit with `code`
    pub fn fail(mut self, invocation: &str, code: i32) -> Self {
        self.exits.insert(invocation.to_string(), code);
        self
    }

    /// Make `invocation` exit with `code` and print `stderr`
    pub fn fail_with(mut self, invocation: &str, code: i32, stderr: &str) -> Self {
        self.stderr.insert(invocation.to_string(), stderr.to_string());
        self.fail(invocation, code)
    }

    /// Make `invocation` fail to launch at all
    pub fn unlaunchable(mut self, invocation: &str) -> Self {
        self.unlaunchable.insert(invocation.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Shell for FakeShell {
    fn name(&self) -> &str {
        "fake"
    }

    async fn run(&self, invocation: &str) -> Result<ShellOutput, ShellError> {
        self.calls.lock().unwrap().push(invocation.to_string());

        if self.unlaunchable.contains(invocation) {
            return Err(ShellError::Spawn {
                program: "fake".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "shell unavailable"),
            });
        }

        let code = self.exits.get(invocation).copied().unwrap_or(0);
        let stderr = self.stderr.get(invocation).cloned().unwrap_or_default();
        Ok(ShellOutput::exited(code)
            .with_stdout(format!("ran {}", invocation))
            .with_stderr(stderr))
    }
}

/// Confirmation source with canned answers; runs out as end of input
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmation for ScriptedConfirm {
    fn ask(&self, prompt: &str) -> Option<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front()
    }
}

/// Document used across orchestrator and safety tests
pub const RUNNER_YAML: &str = r#"
project:
  name: ICGVWA
  version: "1.0"

logging:
  enabled: false

security:
  dangerous_commands: [reset_db]
  confirmation_required: true
  backup_before_dangerous: true

setup_commands:
  - name: migrate
    description: Apply migrations
    command: migrate-cmd
  - name: shared
    description: Defined twice
    command: shared-from-setup

data_commands:
  - name: import
    description: Import members
    command: import-cmd
  - name: shared
    description: Defined twice
    command: shared-from-data

maintenance_commands:
  - name: reset_db
    description: Drop all data
    command: reset-cmd
  - name: broken
    description: Always fails
    command: broken-cmd

one_time_commands:
  - name: bootstrap
    description: First run
    commands:
      - step-a
      - step-b
      - step-c

execution_order:
  initial_setup: [migrate, import]
  failing_order: [migrate, broken, import]
  ghost_order: [migrate, missing, import]
  wipe_and_load: [reset_db, import]

aliases:
  setup: initial_setup
  mig: migrate
  dangling: nowhere
  broken: initial_setup

backup_commands:
  - name: backup_database
    description: Dump database
    command: backup-cmd
  - name: backup_database
    description: Shadowed entry
    command: second-backup-cmd
"#;
