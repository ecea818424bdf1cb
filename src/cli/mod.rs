//! Command-line interface for cmdrunner.
//!
//! Runs a command or alias by name, runs an execution order, lists what the
//! document declares, or checks the document's cross-references.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::warn;

use crate::adapters::{StdinPrompt, SystemShell};
use crate::config::{Document, DEFAULT_CONFIG_FILE};
use crate::core::{Logger, Orchestrator};

/// Management command runner
#[derive(Parser, Debug)]
#[command(name = "cmdrunner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command name, alias, or execution order to run
    pub command: Option<String>,

    /// List all available commands
    #[arg(short, long)]
    pub list: bool,

    /// Path to YAML config file
    #[arg(short, long, env = "CMDRUNNER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Run commands in execution order
    #[arg(short, long)]
    pub order: Option<String>,

    /// Check the config file's references and exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Execute the CLI command, returning the process exit status
    pub async fn execute(self) -> Result<i32> {
        let document = Document::load(&self.config)
            .with_context(|| format!("Failed to load config: {}", self.config.display()))?;

        if self.list {
            print!("{}", render_listing(&document));
            return Ok(0);
        }

        let issues = document.validate();

        if self.check {
            for issue in &issues {
                println!("{}", issue);
            }
            if issues.is_empty() {
                println!("{}: OK", self.config.display());
                return Ok(0);
            }
            return Ok(1);
        }

        for issue in &issues {
            warn!(%issue, "Configuration problem");
        }

        let log = Logger::from_policy(document.logging());
        let shell = SystemShell::new();
        let prompt = StdinPrompt;
        let orchestrator = Orchestrator::new(&document, &log, &shell, &prompt);

        if let Some(order) = self.order {
            let outcome = orchestrator.run_execution_order(&order).await;
            return Ok(outcome.exit_code());
        }

        if let Some(name) = self.command {
            let outcome = orchestrator.run(&name).await;
            return Ok(outcome.exit_code());
        }

        Cli::command()
            .print_help()
            .context("Failed to print help")?;
        Ok(0)
    }
}

/// Human-readable listing of everything the document declares
pub fn render_listing(document: &Document) -> String {
    let mut out = String::new();
    let project = document.project();
    let security = document.security();

    let _ = writeln!(out, "\n=== {} Management Commands ===", project.display_name());
    let _ = writeln!(out, "Project: {}", project.display_name());
    let _ = writeln!(out, "Version: {}", project.display_version());
    let _ = writeln!(out);

    for category in document.categories() {
        if category.commands.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}:", category.title());
        for command in &category.commands {
            let dangerous = if security.is_dangerous(&command.name) {
                " (DANGEROUS)"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {:<30} - {}{}",
                command.name,
                command.description.as_deref().unwrap_or(""),
                dangerous
            );
        }
    }

    let one_time = document.one_time_commands();
    if !one_time.is_empty() {
        let _ = writeln!(out, "\nOne-time Command Sequences:");
        for command in one_time {
            let _ = writeln!(
                out,
                "  {:<30} - {}",
                command.name,
                command.description.as_deref().unwrap_or("")
            );
        }
    }

    let mut orders = document.execution_orders().peekable();
    if orders.peek().is_some() {
        let _ = writeln!(out, "\nExecution Orders:");
        for (name, _) in orders {
            let _ = writeln!(out, "  {}", name);
        }
    }

    let mut aliases = document.aliases().peekable();
    if aliases.peek().is_some() {
        let _ = writeln!(out, "\nAliases:");
        for (alias, target) in aliases {
            let _ = writeln!(out, "  {:<30} -> {}", alias, target);
        }
    }

    out
}
