//! Registry-driven command-line option parsing.
//!
//! Declare options, positional slots and commands on an [`Options`] registry,
//! then feed it the tokens after the program name. The parser writes values
//! back into the registry, collects tokens it could not classify into the
//! [`Options::remainder`], and may hand the rest of the input to a matched
//! [`Command`].
//!
//! Token forms:
//! - `--name value` / `--name=value` long options
//! - `-n value` / `-n=value` short options, `-abc` clusters of short flags
//! - boolean options take an optional truthy/falsy value (`true/yes/on/1/t`,
//!   `false/no/off/0/f`) and default to `true` when bare
//! - anything else fills positional slots in registration order; a slot
//!   typed [`VarType::PositionalSlice`] swallows every remaining token
//!
//! The crate never prints or exits; help requests come back as
//! [`ParseOutcome::Help`].
//!
//! ```
//! use optkit::{Key, Options, Value};
//!
//! let mut opt = Options::new().with_program("tool");
//! opt.set_default_help();
//! opt.register("", "v", "verbose", "Show more details.", false, false)?;
//! opt.register("", "p", "port", "Port number.", Value::Int(3000), false)?;
//! opt.add_positional("", "files", "Input files.", Vec::<String>::new(), false)?;
//!
//! opt.parse_args(&["-v", "-p", "8080", "a.txt", "--not-an-option"])?;
//! assert!(opt.get_bool('v'));
//! assert_eq!(opt.get_int("port"), 8080);
//! assert_eq!(opt.get_strings(Key::Positional("files")), ["a.txt", "--not-an-option"]);
//! # Ok::<(), optkit::Error>(())
//! ```

mod command;
mod error;
mod group;
mod help;
mod opt;
mod options;
mod parse;
mod value;

pub use command::{Command, CommandFn};
pub use error::{BoxError, Error, Result};
pub use group::{DEFAULT_GROUP, Group};
pub use opt::{Key, Opt};
pub use options::Options;
pub use parse::ParseOutcome;
pub use value::{Value, VarType, parse_bool};
