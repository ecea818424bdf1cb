//! Command definitions.
//!
//! A command is either a single shell invocation or an ordered list of
//! invocations. The YAML form uses `command:` or `commands:`; exactly one
//! must be present, and the choice is decoded once at load time.

use serde::{Deserialize, Serialize};

/// Body of a command: what actually gets handed to the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandBody {
    /// One shell invocation
    Single(String),

    /// Invocations run in order, stopping at the first failure
    Sequence(Vec<String>),
}

impl CommandBody {
    /// Invocations in execution order
    pub fn invocations(&self) -> Vec<&str> {
        match self {
            Self::Single(invocation) => vec![invocation.as_str()],
            Self::Sequence(invocations) => invocations.iter().map(String::as_str).collect(),
        }
    }
}

/// A named, runnable command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    /// Unique name used for lookup (case-sensitive)
    pub name: String,

    /// Human-readable description
    pub description: Option<String>,

    /// What to run
    pub body: CommandBody,
}

impl CommandDefinition {
    pub fn single(name: impl Into<String>, invocation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            body: CommandBody::Single(invocation.into()),
        }
    }

    pub fn sequence<I, S>(name: impl Into<String>, invocations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            body: CommandBody::Sequence(invocations.into_iter().map(Into::into).collect()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.body, CommandBody::Sequence(_))
    }
}

/// Raw YAML schema for a command entry (matches the document structure)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCommand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub commands: Option<Vec<String>>,
}

impl TryFrom<RawCommand> for CommandDefinition {
    type Error = String;

    fn try_from(raw: RawCommand) -> Result<Self, Self::Error> {
        if raw.name.is_empty() {
            return Err("command name cannot be empty".to_string());
        }

        let body = match (raw.command, raw.commands) {
            (Some(invocation), None) => CommandBody::Single(invocation),
            (None, Some(invocations)) => CommandBody::Sequence(invocations),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "command '{}' declares both 'command' and 'commands'",
                    raw.name
                ))
            }
            (None, None) => {
                return Err(format!(
                    "command '{}' declares neither 'command' nor 'commands'",
                    raw.name
                ))
            }
        };

        Ok(Self {
            name: raw.name,
            description: raw.description,
            body,
        })
    }
}
