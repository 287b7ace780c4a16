/// Name of the group created by [`crate::Options::new`].
pub const DEFAULT_GROUP: &str = "default";

/// An ordered, named bag of options and commands. Only used for display.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub(crate) name: String,
    pub(crate) options: Vec<usize>,
    pub(crate) commands: Vec<String>,
}

impl Group {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Command names, in registration order.
    pub fn commands(&self) -> &[String] {
        self.commands.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.commands.is_empty()
    }
}
