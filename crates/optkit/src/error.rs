//! Error types for registration and parsing.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Error returned by a command callback.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure aborts the current registration or scan.
///
/// Option names are carried in their display form: `-p`, `--port`, or `<file>`.
#[derive(Debug, Error)]
pub enum Error {
    /// A required option never received a value.
    #[error("{0}: missing required option")]
    MissingRequired(String),

    /// A value-taking option reached the end of input without a value.
    #[error("{0}: missing argument")]
    MissingArgument(String),

    /// A short name longer than one character, or a long name of one character.
    #[error("{0}: short option must be one character, long option more than one")]
    LongShortMismatch(String),

    #[error("{0}: unknown option")]
    UnknownOption(String),

    /// A bare `--` token.
    #[error("long option without a string")]
    EmptyLong,

    /// A named option declared with a type only positional slots accept.
    #[error("{0}: unknown option type")]
    UnknownType(String),

    /// A matched command was registered without a callback.
    #[error("{0}: missing command function")]
    MissingFunc(String),

    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),

    /// The callback of a dispatched command failed.
    #[error("{name}: command failed")]
    Command {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("{0}: option already registered")]
    DuplicateOption(String),

    /// A command name or alias that is already taken.
    #[error("{0}: command name or alias already registered")]
    CommandConflict(String),
}

pub type Result<T> = std::result::Result<T, Error>;
