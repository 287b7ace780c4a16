use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::group::{DEFAULT_GROUP, Group};
use crate::opt::{Key, Opt};
use crate::value::Value;

/// The option registry: options, positional slots, groups and commands.
///
/// Every option lives once in an arena; the short and long maps both point
/// at the same record, so a value set through one name is visible through
/// the other.
#[derive(Debug)]
pub struct Options {
    pub(crate) program: String,
    pub(crate) opts: Vec<Opt>,
    pub(crate) short: HashMap<char, usize>,
    pub(crate) long: HashMap<String, usize>,
    pub(crate) positional: Vec<usize>,
    pub(crate) groups: IndexMap<String, Group>,
    pub(crate) commands: HashMap<String, Command>,
    pub(crate) aliases: HashMap<String, String>,
    pub(crate) remainder: Vec<String>,
    pub(crate) has_help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    /// Create an empty registry with the `"default"` group.
    pub fn new() -> Self {
        let mut opt = Self {
            program: String::new(),
            opts: Vec::new(),
            short: HashMap::new(),
            long: HashMap::new(),
            positional: Vec::new(),
            groups: IndexMap::new(),
            commands: HashMap::new(),
            aliases: HashMap::new(),
            remainder: Vec::new(),
            has_help: false,
        };
        opt.add_group(DEFAULT_GROUP);
        opt
    }

    /// Set the program name shown in the usage line.
    pub fn with_program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    pub fn set_program(&mut self, name: impl Into<String>) {
        self.program = name.into();
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    // ---------------------------------------------------------------------
    // Groups
    // ---------------------------------------------------------------------

    /// Add a group, keeping insertion order for help output. Adding an
    /// existing group returns it unchanged.
    pub fn add_group(&mut self, name: &str) -> &mut Group {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name))
    }

    /// Look up a group. The empty name means `"default"`.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(group_name(name))
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Remove a group. Its options and commands stay registered.
    pub fn remove_group(&mut self, name: &str) -> Option<Group> {
        self.groups.shift_remove(group_name(name))
    }

    /// The option records of a group, in the group's current order.
    pub fn group_options(&self, name: &str) -> Vec<&Opt> {
        self.group(name)
            .map(|g| g.options.iter().map(|&idx| &self.opts[idx]).collect())
            .unwrap_or_default()
    }

    /// Sort a group's options by short name, falling back to the long name
    /// (and the display name for positionals) when there is no short name.
    pub fn sort_group(&mut self, name: &str) {
        let opts = &self.opts;
        if let Some(group) = self.groups.get_mut(group_name(name)) {
            group.options.sort_by_cached_key(|&idx| sort_key(&opts[idx]));
        }
    }

    fn group_entry(&mut self, name: &str) -> &mut Group {
        self.add_group(group_name(name))
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Register an option. Its type is the variant of `default`.
    ///
    /// `short` must be empty or one character, `long` empty or longer than
    /// one character. With both names empty the option becomes an unnamed
    /// positional slot.
    pub fn register(
        &mut self,
        group: &str,
        short: &str,
        long: &str,
        help: &str,
        default: impl Into<Value>,
        required: bool,
    ) -> Result<()> {
        let mut chars = short.chars();
        let short = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(c),
            (Some(_), Some(_)) => return Err(Error::LongShortMismatch(format!("-{short}"))),
        };
        if !long.is_empty() && long.chars().count() <= 1 {
            return Err(Error::LongShortMismatch(format!("--{long}")));
        }
        let long = (!long.is_empty()).then(|| long.to_string());

        if short.is_none() && long.is_none() {
            return self.add_positional(group, "", help, default, required);
        }
        if let Some(c) = short {
            if self.short.contains_key(&c) {
                return Err(Error::DuplicateOption(format!("-{c}")));
            }
        }
        if let Some(name) = &long {
            if self.long.contains_key(name) {
                return Err(Error::DuplicateOption(format!("--{name}")));
            }
        }

        let idx = self.push(Opt {
            short,
            long: long.clone(),
            name: String::new(),
            help: help.to_string(),
            default: default.into(),
            value: None,
            required,
            group: group_name(group).to_string(),
        });
        if let Some(c) = short {
            self.short.insert(c, idx);
        }
        if let Some(name) = long {
            self.long.insert(name, idx);
        }
        tracing::trace!(option = %self.opts[idx].display_name(), group = group_name(group), "registered option");
        Ok(())
    }

    /// Register a positional slot. Slots are filled in registration order.
    ///
    /// A slot whose default is [`Value::Strings`] swallows every remaining
    /// token once reached.
    pub fn add_positional(
        &mut self,
        group: &str,
        name: &str,
        help: &str,
        default: impl Into<Value>,
        required: bool,
    ) -> Result<()> {
        if !name.is_empty() && self.positional(name).is_some() {
            return Err(Error::DuplicateOption(format!("<{name}>")));
        }

        let idx = self.push(Opt {
            short: None,
            long: None,
            name: name.to_string(),
            help: help.to_string(),
            default: default.into(),
            value: None,
            required,
            group: group_name(group).to_string(),
        });
        self.positional.push(idx);
        tracing::trace!(slot = name, position = self.positional.len() - 1, "registered positional");
        Ok(())
    }

    fn push(&mut self, opt: Opt) -> usize {
        let idx = self.opts.len();
        let group = opt.group.clone();
        self.opts.push(opt);
        self.group_entry(&group).options.push(idx);
        idx
    }

    /// Register `-h/--help`, unless either name is already taken.
    pub fn set_default_help(&mut self) {
        if self.short.contains_key(&'h') || self.long.contains_key("help") {
            return;
        }
        if self
            .register("", "h", "help", "Print this help message", false, false)
            .is_ok()
        {
            self.has_help = true;
        }
    }

    pub fn has_default_help(&self) -> bool {
        self.has_help
    }

    /// Register a command into `group`. Names and aliases must be unique
    /// across all commands.
    pub fn set_command(&mut self, group: &str, command: Command) -> Result<()> {
        let name = command.name().to_string();
        if self.resolve_command(&name).is_some() {
            return Err(Error::CommandConflict(name));
        }
        let mut seen = HashSet::new();
        for alias in command.aliases().iter().filter(|a| **a != name) {
            if self.resolve_command(alias).is_some() || !seen.insert(alias.as_str()) {
                return Err(Error::CommandConflict(alias.clone()));
            }
        }

        for alias in seen {
            self.aliases.insert(alias.to_string(), name.clone());
        }
        self.group_entry(group).commands.push(name.clone());
        tracing::trace!(command = %name, aliases = command.aliases().len(), "registered command");
        self.commands.insert(name, command);
        Ok(())
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Canonical command name for `token`: an exact name first, then an alias.
    pub fn resolve_command(&self, token: &str) -> Option<&str> {
        if let Some((name, _)) = self.commands.get_key_value(token) {
            return Some(name.as_str());
        }
        self.aliases.get(token).map(String::as_str)
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    pub(crate) fn index_of(&self, key: Key<'_>) -> Option<usize> {
        match key {
            Key::Short(c) => self.short.get(&c).copied(),
            Key::Long(name) => self.long.get(name).copied(),
            Key::Positional(name) => self
                .positional
                .iter()
                .copied()
                .find(|&idx| self.opts[idx].name == name),
        }
    }

    pub fn get_option<'k>(&self, key: impl Into<Key<'k>>) -> Option<&Opt> {
        self.index_of(key.into()).map(|idx| &self.opts[idx])
    }

    pub fn short(&self, c: char) -> Option<&Opt> {
        self.get_option(Key::Short(c))
    }

    pub fn long(&self, name: &str) -> Option<&Opt> {
        self.get_option(Key::Long(name))
    }

    pub fn positional(&self, name: &str) -> Option<&Opt> {
        self.get_option(Key::Positional(name))
    }

    /// Every option and positional slot, in registration order.
    pub fn options(&self) -> impl Iterator<Item = &Opt> {
        self.opts.iter()
    }

    /// Positional slots, in consumption order.
    pub fn positionals(&self) -> impl Iterator<Item = &Opt> {
        self.positional.iter().map(|&idx| &self.opts[idx])
    }

    /// Tokens left unclassified by the last parse, in input order.
    pub fn remainder(&self) -> &[String] {
        self.remainder.as_slice()
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// The parsed value if set, else the registered default.
    pub fn value<'k>(&self, key: impl Into<Key<'k>>) -> Option<&Value> {
        self.get_option(key).map(Opt::resolved)
    }

    /// `false` for unknown names and non-bool options.
    pub fn get_bool<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        self.value(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_string<'k>(&self, key: impl Into<Key<'k>>) -> &str {
        self.value(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn get_int<'k>(&self, key: impl Into<Key<'k>>) -> i64 {
        self.value(key).and_then(Value::as_int).unwrap_or(0)
    }

    pub fn get_float<'k>(&self, key: impl Into<Key<'k>>) -> f64 {
        self.value(key).and_then(Value::as_float).unwrap_or(0.0)
    }

    /// Tokens collected by a positional slice slot.
    pub fn get_strings<'k>(&self, key: impl Into<Key<'k>>) -> &[String] {
        self.value(key).and_then(Value::as_strings).unwrap_or(&[])
    }
}

fn group_name(name: &str) -> &str {
    if name.is_empty() { DEFAULT_GROUP } else { name }
}

fn sort_key(opt: &Opt) -> String {
    opt.short
        .map(String::from)
        .or_else(|| opt.long.clone())
        .unwrap_or_else(|| opt.name.clone())
}
