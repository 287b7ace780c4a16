use std::fmt;

use crate::value::{Value, VarType};

/// A declared option or positional slot.
///
/// A positional slot has neither a short nor a long name; it carries a
/// display name used for lookup and help output instead.
#[derive(Debug, Clone)]
pub struct Opt {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) default: Value,
    pub(crate) value: Option<Value>,
    pub(crate) required: bool,
    pub(crate) group: String,
}

impl Opt {
    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Display name of a positional slot (empty for named options).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    pub fn var_type(&self) -> VarType {
        self.default.var_type()
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// The value observed in input, or `None` if the option was never seen.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The parsed value if set, else the default.
    pub fn resolved(&self) -> &Value {
        self.value.as_ref().unwrap_or(&self.default)
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// `--long`, else `-s`, else `<name>`.
    pub fn display_name(&self) -> String {
        if let Some(long) = &self.long {
            format!("--{long}")
        } else if let Some(c) = self.short {
            format!("-{c}")
        } else {
            format!("<{}>", self.name)
        }
    }
}

/// Explicit lookup key: the kind of name is never inferred from its length.
///
/// `'v'` converts to [`Key::Short`] and `"verbose"` to [`Key::Long`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Short(char),
    Long(&'a str),
    Positional(&'a str),
}

impl From<char> for Key<'_> {
    fn from(c: char) -> Self {
        Self::Short(c)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Self::Long(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Self::Long(name.as_str())
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(c) => write!(f, "-{c}"),
            Self::Long(name) => write!(f, "--{name}"),
            Self::Positional(name) => write!(f, "<{name}>"),
        }
    }
}
