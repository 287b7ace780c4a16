use std::fmt;

use crate::error::BoxError;

/// Callback run with every token after the matched command name.
pub type CommandFn = Box<dyn FnMut(&[String]) -> Result<(), BoxError>>;

/// A sub-command: matching it ends the parse and hands the rest of the
/// tokens to its callback.
///
/// ```
/// use optkit::Command;
///
/// let cmd = Command::new("moo")
///     .with_help("Have you mooed today?")
///     .with_aliases(["cow"])
///     .with_func(|args| {
///         println!("moo {args:?}");
///         Ok(())
///     });
/// assert_eq!(cmd.aliases(), ["cow"]);
/// ```
pub struct Command {
    name: String,
    help: String,
    aliases: Vec<String>,
    pub(crate) func: Option<CommandFn>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            aliases: Vec::new(),
            func: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_func<F>(mut self, func: F) -> Self
    where
        F: FnMut(&[String]) -> Result<(), BoxError> + 'static,
    {
        self.func = Some(Box::new(func));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn aliases(&self) -> &[String] {
        self.aliases.as_slice()
    }

    pub fn has_func(&self) -> bool {
        self.func.is_some()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("aliases", &self.aliases)
            .field("func", &self.func.as_ref().map(|_| "FnMut"))
            .finish()
    }
}
