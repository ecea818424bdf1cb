//! Command configuration document.
//!
//! The document is a YAML file (default `management_commands.yml`) with:
//! - `project`: name and version, descriptive only
//! - `logging`: whether to append to a log file, and where
//! - `security`: dangerous command names and the confirmation/backup policy
//! - any number of `<category>_commands` lists of command definitions
//! - `one_time_commands`: named command sequences
//! - `execution_order`: named lists of command names
//! - `aliases`: shorthand names for commands or execution orders
//! - `backup_commands`: commands used by the safety gate
//!
//! Unknown top-level keys are ignored. The document is loaded once and never
//! mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::domain::command::RawCommand;
use crate::domain::CommandDefinition;

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "management_commands.yml";

/// Log file used when `logging.log_file` is absent
pub const DEFAULT_LOG_FILE: &str = "management_commands.log";

/// Name of the backup entry the safety gate runs
pub const BACKUP_DATABASE: &str = "backup_database";

const ONE_TIME_KEY: &str = "one_time_commands";
const BACKUP_KEY: &str = "backup_commands";
const CATEGORY_SUFFIX: &str = "_commands";

/// Errors raised while loading the document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing YAML file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Reference problems that do not prevent loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("Execution order '{order}' references unknown command '{command}'")]
    UnknownOrderStep { order: String, command: String },

    #[error("Execution order '{0}' is empty")]
    EmptyOrder(String),

    #[error("Alias '{alias}' points to unknown target '{target}'")]
    DanglingAlias { alias: String, target: String },

    #[error("Dangerous command '{0}' is not defined")]
    UnknownDangerous(String),

    #[error("No 'backup_database' entry in backup_commands; backups will be skipped")]
    MissingBackup,
}

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    project: Option<ProjectInfo>,
    #[serde(default)]
    logging: Option<LoggingPolicy>,
    #[serde(default)]
    security: Option<SecurityPolicy>,
    #[serde(default)]
    one_time_commands: Option<Vec<RawCommand>>,
    #[serde(default)]
    execution_order: Option<Mapping>,
    #[serde(default)]
    aliases: Option<Mapping>,
    #[serde(default)]
    backup_commands: Option<Vec<RawCommand>>,
    /// Everything else: command categories and ignored keys
    #[serde(flatten)]
    rest: Mapping,
}

/// Descriptive project metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInfo {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
}

impl ProjectInfo {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or("Unknown")
    }
}

/// Operator log policy
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingPolicy {
    /// Append log lines to `log_file` (console output is unconditional)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log file path, relative to the working directory unless absolute
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for LoggingPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: default_log_file(),
        }
    }
}

/// Safety policy for dangerous commands
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityPolicy {
    #[serde(default)]
    pub dangerous_commands: HashSet<String>,

    /// Ask before running a dangerous command
    #[serde(default = "default_true")]
    pub confirmation_required: bool,

    /// Offer a backup before running a dangerous command
    #[serde(default = "default_true")]
    pub backup_before_dangerous: bool,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            dangerous_commands: HashSet::new(),
            confirmation_required: true,
            backup_before_dangerous: true,
        }
    }
}

impl SecurityPolicy {
    pub fn is_dangerous(&self, name: &str) -> bool {
        self.dangerous_commands.contains(name)
    }
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

/// Accept `version: 1.0` as well as `version: "1.0"`
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, found {:?}",
            other
        ))),
    }
}

/// A named group of command definitions, in document order
#[derive(Debug, Clone)]
pub struct Category {
    /// Top-level key, e.g. `setup_commands`
    pub key: String,
    pub commands: Vec<CommandDefinition>,
}

impl Category {
    /// Section title used when listing
    pub fn title(&self) -> String {
        match self.key.as_str() {
            "setup_commands" => "Setup Commands".to_string(),
            "data_commands" => "Data Management Commands".to_string(),
            "user_commands" => "User Management Commands".to_string(),
            "maintenance_commands" => "System Maintenance Commands".to_string(),
            "rbac_commands" => "RBAC Commands".to_string(),
            other => other
                .split('_')
                .filter(|word| !word.is_empty())
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<String>>()
                .join(" "),
        }
    }
}

/// The loaded, immutable configuration document
#[derive(Debug, Clone)]
pub struct Document {
    /// File the document was loaded from (None when parsed from a string)
    pub source: Option<PathBuf>,
    project: ProjectInfo,
    logging: LoggingPolicy,
    security: SecurityPolicy,
    categories: Vec<Category>,
    one_time: Vec<CommandDefinition>,
    execution_orders: Vec<(String, Vec<String>)>,
    aliases: Vec<(String, String)>,
    backups: Vec<CommandDefinition>,
    /// Name -> definition across categories then one-time sequences, last wins
    index: HashMap<String, CommandDefinition>,
}

impl Document {
    /// Load and parse a document from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut document = Self::from_yaml(&content)?;
        document.source = Some(path.to_path_buf());
        Ok(document)
    }

    /// Parse a document from YAML content
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Self::resolve(file)
    }

    fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut categories = Vec::new();
        for (key, value) in file.rest {
            let Some(key) = key.as_str() else { continue };
            if !key.ends_with(CATEGORY_SUFFIX) || key == ONE_TIME_KEY || key == BACKUP_KEY {
                continue;
            }
            if !value.is_sequence() {
                continue;
            }

            let raw: Vec<RawCommand> = serde_yaml::from_value(value)?;
            categories.push(Category {
                key: key.to_string(),
                commands: convert_commands(raw)?,
            });
        }

        let one_time = convert_commands(file.one_time_commands.unwrap_or_default())?;
        let backups = convert_commands(file.backup_commands.unwrap_or_default())?;

        let mut execution_orders = Vec::new();
        for (key, value) in file.execution_order.unwrap_or_default() {
            let name = mapping_key(&key, "execution_order")?;
            let steps: Vec<String> = serde_yaml::from_value(value)
                .map_err(|e| ConfigError::Invalid(format!("execution order '{}': {}", name, e)))?;
            execution_orders.push((name, steps));
        }

        let mut aliases = Vec::new();
        for (key, value) in file.aliases.unwrap_or_default() {
            let alias = mapping_key(&key, "aliases")?;
            let target = value.as_str().ok_or_else(|| {
                ConfigError::Invalid(format!("alias '{}' must point to a name", alias))
            })?;
            aliases.push((alias, target.to_string()));
        }

        let mut index = HashMap::new();
        for definition in categories
            .iter()
            .flat_map(|category| category.commands.iter())
            .chain(one_time.iter())
        {
            index.insert(definition.name.clone(), definition.clone());
        }

        Ok(Self {
            source: None,
            project: file.project.unwrap_or_default(),
            logging: file.logging.unwrap_or_default(),
            security: file.security.unwrap_or_default(),
            categories,
            one_time,
            execution_orders,
            aliases,
            backups,
            index,
        })
    }

    /// Look up a command across all categories and one-time sequences
    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.index.get(name)
    }

    /// Look up an execution order's command names
    pub fn execution_order(&self, name: &str) -> Option<&[String]> {
        self.execution_orders
            .iter()
            .find(|(order, _)| order == name)
            .map(|(_, steps)| steps.as_slice())
    }

    pub fn is_execution_order(&self, name: &str) -> bool {
        self.execution_order(name).is_some()
    }

    /// Look up an alias target
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(alias, _)| alias == name)
            .map(|(_, target)| target.as_str())
    }

    /// First backup entry with the given name
    pub fn backup(&self, name: &str) -> Option<&CommandDefinition> {
        self.backups.iter().find(|backup| backup.name == name)
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    pub fn logging(&self) -> &LoggingPolicy {
        &self.logging
    }

    pub fn security(&self) -> &SecurityPolicy {
        &self.security
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn one_time_commands(&self) -> &[CommandDefinition] {
        &self.one_time
    }

    pub fn execution_orders(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.execution_orders
            .iter()
            .map(|(name, steps)| (name.as_str(), steps.as_slice()))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
    }

    /// Every declared command name, in enumeration order (duplicates included)
    pub fn declared_command_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|category| category.commands.iter())
            .chain(self.one_time.iter())
            .map(|definition| definition.name.as_str())
            .collect()
    }

    /// Check cross-references between orders, aliases, policy and commands
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (order, steps) in &self.execution_orders {
            if steps.is_empty() {
                issues.push(ConfigIssue::EmptyOrder(order.clone()));
            }
            for command in steps {
                if self.command(command).is_none() {
                    issues.push(ConfigIssue::UnknownOrderStep {
                        order: order.clone(),
                        command: command.clone(),
                    });
                }
            }
        }

        for (alias, target) in &self.aliases {
            if self.command(target).is_none() && !self.is_execution_order(target) {
                issues.push(ConfigIssue::DanglingAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        let mut dangerous: Vec<&String> = self.security.dangerous_commands.iter().collect();
        dangerous.sort();
        for name in dangerous {
            if self.command(name).is_none() {
                issues.push(ConfigIssue::UnknownDangerous(name.clone()));
            }
        }

        if self.security.backup_before_dangerous
            && !self.security.dangerous_commands.is_empty()
            && self.backup(BACKUP_DATABASE).is_none()
        {
            issues.push(ConfigIssue::MissingBackup);
        }

        issues
    }
}

fn convert_commands(raw: Vec<RawCommand>) -> Result<Vec<CommandDefinition>, ConfigError> {
    raw.into_iter()
        .map(|command| CommandDefinition::try_from(command).map_err(ConfigError::Invalid))
        .collect()
}

fn mapping_key(key: &Value, section: &str) -> Result<String, ConfigError> {
    key.as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::Invalid(format!("{} keys must be strings", section)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommandBody;

    const SAMPLE: &str = r#"
project:
  name: ICGVWA
  version: 1.0
logging:
  enabled: false
security:
  dangerous_commands: [reset_db]
setup_commands:
  - name: migrate
    description: Apply migrations
    command: python manage.py migrate
access_control_commands:
  - name: grant
    description: Grant roles
    command: python manage.py grant
one_time_commands:
  - name: bootstrap
    description: First run
    commands:
      - echo one
      - echo two
execution_order:
  initial_setup: [migrate, bootstrap]
aliases:
  setup: initial_setup
  m: migrate
unrelated_key: 42
"#;

    #[test]
    fn test_document_parsing() {
        let doc = Document::from_yaml(SAMPLE).unwrap();

        assert_eq!(doc.project().display_name(), "ICGVWA");
        assert_eq!(doc.project().display_version(), "1.0");
        assert!(!doc.logging().enabled);
        assert_eq!(doc.logging().log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(doc.security().is_dangerous("reset_db"));
        assert!(doc.security().confirmation_required);
        assert!(doc.security().backup_before_dangerous);

        let keys: Vec<&str> = doc.categories().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["setup_commands", "access_control_commands"]);

        assert_eq!(
            doc.command("bootstrap").unwrap().body,
            CommandBody::Sequence(vec!["echo one".into(), "echo two".into()])
        );
        assert_eq!(
            doc.execution_order("initial_setup").unwrap(),
            &["migrate".to_string(), "bootstrap".to_string()]
        );
        assert_eq!(doc.alias("setup"), Some("initial_setup"));
        assert!(doc.alias("missing").is_none());
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        let doc = Document::from_yaml(SAMPLE).unwrap();
        assert!(doc.command("migrate").is_some());
        assert!(doc.command("Migrate").is_none());
        assert!(doc.execution_order("Initial_Setup").is_none());
    }

    #[test]
    fn test_category_titles() {
        let known = Category {
            key: "rbac_commands".into(),
            commands: vec![],
        };
        let derived = Category {
            key: "access_control_commands".into(),
            commands: vec![],
        };
        assert_eq!(known.title(), "RBAC Commands");
        assert_eq!(derived.title(), "Access Control Commands");
    }

    #[test]
    fn test_defaults_for_minimal_document() {
        let doc = Document::from_yaml("project:\n  name: tiny\n").unwrap();
        assert!(doc.logging().enabled);
        assert_eq!(doc.project().display_version(), "Unknown");
        assert!(doc.categories().is_empty());
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn test_invalid_alias_target() {
        let result = Document::from_yaml("aliases:\n  a: [x, y]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validation_issues() {
        let yaml = r#"
security:
  dangerous_commands: [ghost]
setup_commands:
  - name: migrate
    command: "true"
execution_order:
  broken: [migrate, nope]
  hollow: []
aliases:
  lost: nowhere
"#;
        let doc = Document::from_yaml(yaml).unwrap();
        let issues = doc.validate();

        assert!(issues.contains(&ConfigIssue::UnknownOrderStep {
            order: "broken".into(),
            command: "nope".into(),
        }));
        assert!(issues.contains(&ConfigIssue::EmptyOrder("hollow".into())));
        assert!(issues.contains(&ConfigIssue::DanglingAlias {
            alias: "lost".into(),
            target: "nowhere".into(),
        }));
        assert!(issues.contains(&ConfigIssue::UnknownDangerous("ghost".into())));
        assert!(issues.contains(&ConfigIssue::MissingBackup));
    }
}
