//! Declarative JSON model for optkit registries.
//!
//! A schema lists groups, options, positional slots and commands; it is the
//! serialized counterpart of an [`optkit::Options`] registry. Command
//! callbacks cannot be serialized, so [`OptionsSchema::build`] asks the
//! caller for one per declared command.

use optkit::{CommandFn, Options, Value, VarType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current `format-version` written by [`OptionsSchema::to_json`].
pub const SCHEMA_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse options schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema format-version {0} (expected {expected})", expected = SCHEMA_FORMAT_VERSION)]
    Version(u32),

    #[error("default value for '{name}' does not match type {expected}")]
    DefaultType { name: String, expected: ArgType },

    #[error(transparent)]
    Register(#[from] optkit::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ArgType {
    #[default]
    Bool,
    String,
    Int,
    Float,
    PositionalSlice,
}

impl ArgType {
    pub fn var_type(self) -> VarType {
        match self {
            Self::Bool => VarType::Bool,
            Self::String => VarType::String,
            Self::Int => VarType::Int,
            Self::Float => VarType::Float,
            Self::PositionalSlice => VarType::PositionalSlice,
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.var_type().as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ArgSchema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long: String,
    /// Display name of a positional slot (no short or long name).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default, rename = "type")]
    pub arg_type: ArgType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
}

impl ArgSchema {
    pub fn is_positional(&self) -> bool {
        self.short.is_empty() && self.long.is_empty()
    }

    fn display_name(&self) -> String {
        if !self.long.is_empty() {
            format!("--{}", self.long)
        } else if !self.short.is_empty() {
            format!("-{}", self.short)
        } else {
            format!("<{}>", self.name)
        }
    }

    /// The declared default as a typed value, or the zero value when absent.
    pub fn default_value(&self) -> Result<Value, SchemaError> {
        let Some(raw) = &self.default else {
            return Ok(Value::zero(self.arg_type.var_type()));
        };
        let mismatch = || SchemaError::DefaultType {
            name: self.display_name(),
            expected: self.arg_type,
        };

        let value = match self.arg_type {
            ArgType::Bool => Value::Bool(raw.as_bool().ok_or_else(mismatch)?),
            ArgType::String => Value::String(raw.as_str().ok_or_else(mismatch)?.to_string()),
            ArgType::Int => Value::Int(raw.as_i64().ok_or_else(mismatch)?),
            ArgType::Float => Value::Float(raw.as_f64().ok_or_else(mismatch)?),
            ArgType::PositionalSlice => {
                let items = raw.as_array().ok_or_else(mismatch)?;
                let strings = items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(mismatch)?;
                Value::Strings(strings)
            }
        };
        Ok(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CommandSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsSchema {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Register `-h/--help`.
    #[serde(default)]
    pub default_help: bool,
    /// Groups to create up front, fixing their order in help output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSchema>,
}

impl Default for OptionsSchema {
    fn default() -> Self {
        Self {
            format_version: SCHEMA_FORMAT_VERSION,
            name: String::new(),
            summary: String::new(),
            default_help: false,
            groups: Vec::new(),
            args: Vec::new(),
            commands: Vec::new(),
        }
    }
}

fn default_format_version() -> u32 {
    SCHEMA_FORMAT_VERSION
}

impl OptionsSchema {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(json)?;
        if schema.format_version != SCHEMA_FORMAT_VERSION {
            return Err(SchemaError::Version(schema.format_version));
        }
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a registry. `make_func` supplies the callback for each
    /// declared command; returning `None` leaves the command without one.
    pub fn build<F>(&self, mut make_func: F) -> Result<Options, SchemaError>
    where
        F: FnMut(&CommandSchema) -> Option<CommandFn>,
    {
        let mut opt = Options::new().with_program(self.name.clone());
        for group in &self.groups {
            opt.add_group(group);
        }
        for arg in &self.args {
            let default = arg.default_value()?;
            if arg.is_positional() {
                opt.add_positional(&arg.group, &arg.name, &arg.help, default, arg.required)?;
            } else {
                opt.register(
                    &arg.group,
                    &arg.short,
                    &arg.long,
                    &arg.help,
                    default,
                    arg.required,
                )?;
            }
        }

        // After the args: a declared `-h` or `--help` suppresses the default.
        if self.default_help {
            opt.set_default_help();
        }

        for cmd in &self.commands {
            let mut command = optkit::Command::new(cmd.name.clone())
                .with_help(cmd.help.clone())
                .with_aliases(cmd.aliases.iter().cloned());
            if let Some(func) = make_func(cmd) {
                command = command.with_func(func);
            }
            opt.set_command(&cmd.group, command)?;
        }

        Ok(opt)
    }
}
