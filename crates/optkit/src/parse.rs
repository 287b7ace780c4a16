//! The token-consumption state machine.
//!
//! Tokens are classified left to right, in priority order:
//! 1. a registered command name (or alias) ends the scan and runs the
//!    command with every later token
//! 2. `--name[=value]` long options
//! 3. `-abc[=value]` short clusters; an inline value binds to the last
//!    character only
//! 4. positional slots, in registration order; a slice slot swallows the
//!    rest of the input
//! 5. anything else lands in the remainder
//!
//! Empty tokens are skipped before classification.
//!
//! Value-taking options consume the next unconsumed token through a
//! cursor; the caller's tokens are never modified.

use std::path::Path;

use crate::error::{Error, Result};
use crate::opt::Opt;
use crate::options::Options;
use crate::value::{Value, VarType, parse_bool};

/// How a successful parse ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was scanned and all required options are set.
    Done,
    /// A command matched; its callback already ran with the trailing tokens.
    Dispatched(String),
    /// Help was requested. Carries the rendered text.
    Help(String),
}

/// Look-ahead over the tokens after the one being classified.
struct Lookahead<'a, 't> {
    tokens: &'a [&'t str],
    next: usize,
}

impl<'a, 't> Lookahead<'a, 't> {
    fn new(tokens: &'a [&'t str], next: usize) -> Self {
        Self { tokens, next }
    }

    fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.next).copied()
    }

    fn take(&mut self) -> Option<&'t str> {
        let token = self.peek()?;
        self.next += 1;
        Some(token)
    }
}

#[derive(Debug, Default)]
struct ScanState {
    next_slot: usize,
    slice: Option<usize>,
    unknown: Vec<String>,
}

impl Options {
    /// Parse `args` (without the program name) into the registry.
    ///
    /// The first error aborts the scan. On success the unclassified tokens
    /// are available from [`Options::remainder`].
    ///
    /// ```
    /// use optkit::{Options, ParseOutcome, Value};
    ///
    /// let mut opt = Options::new();
    /// opt.register("", "p", "port", "Port number.", Value::Int(3000), false)?;
    /// opt.register("", "v", "verbose", "Verbose output.", false, false)?;
    ///
    /// let outcome = opt.parse_args(&["-v", "--port=4000", "stray"])?;
    /// assert_eq!(outcome, ParseOutcome::Done);
    /// assert_eq!(opt.get_int("port"), 4000);
    /// assert!(opt.get_bool('v'));
    /// assert_eq!(opt.remainder(), ["stray"]);
    /// # Ok::<(), optkit::Error>(())
    /// ```
    pub fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<ParseOutcome> {
        let outcome = self.scan(args)?;
        if outcome == ParseOutcome::Done {
            self.check_required()?;
        }
        Ok(outcome)
    }

    /// Parse `args` and answer help requests instead of exiting.
    ///
    /// Returns [`ParseOutcome::Help`] when `empty_help` is set and `args` is
    /// empty, or when the default help flag was registered and supplied.
    /// A help request wins over missing required options.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S], empty_help: bool) -> Result<ParseOutcome> {
        if args.is_empty() && empty_help {
            return Ok(ParseOutcome::Help(self.help()));
        }

        let outcome = self.scan(args)?;
        if outcome != ParseOutcome::Done {
            return Ok(outcome);
        }
        if self.has_help && self.get_bool('h') {
            return Ok(ParseOutcome::Help(self.help()));
        }
        self.check_required()?;
        Ok(outcome)
    }

    /// Parse the process arguments, see [`Options::parse`].
    ///
    /// The base name of `argv[0]` becomes the program name unless one was set.
    pub fn parse_env(&mut self, empty_help: bool) -> Result<ParseOutcome> {
        let mut argv = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
        if let Some(program) = argv.next() {
            if self.program.is_empty() {
                let base = Path::new(&program)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or(program);
                self.program = base;
            }
        }
        let args: Vec<String> = argv.collect();
        self.parse(&args, empty_help)
    }

    fn scan<S: AsRef<str>>(&mut self, args: &[S]) -> Result<ParseOutcome> {
        let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let mut state = ScanState::default();
        let mut i = 0usize;

        while i < tokens.len() {
            let token = tokens[i];
            if token.is_empty() {
                i += 1;
                continue;
            }

            if let Some(idx) = state.slice {
                if let Some(Value::Strings(values)) = &mut self.opts[idx].value {
                    values.push(token.to_string());
                }
                i += 1;
                continue;
            }

            if let Some(name) = self.resolve_command(token).map(str::to_string) {
                self.remainder = std::mem::take(&mut state.unknown);
                return self.dispatch(&name, token, &tokens[i + 1..]);
            }

            let mut ahead = Lookahead::new(&tokens, i + 1);
            if token.len() < 2 {
                self.positional_token(&mut state, token)?;
            } else if let Some(body) = token.strip_prefix("--") {
                self.long_option(body, &mut ahead)?;
            } else if let Some(body) = token.strip_prefix('-') {
                self.short_cluster(token, body, &mut ahead)?;
            } else {
                self.positional_token(&mut state, token)?;
            }
            i = ahead.next;
        }

        self.remainder = state.unknown;
        Ok(ParseOutcome::Done)
    }

    fn dispatch(&mut self, name: &str, token: &str, rest: &[&str]) -> Result<ParseOutcome> {
        let rest: Vec<String> = rest.iter().map(|s| s.to_string()).collect();
        let func = self
            .commands
            .get_mut(name)
            .and_then(|cmd| cmd.func.as_deref_mut())
            .ok_or_else(|| Error::MissingFunc(token.to_string()))?;

        tracing::debug!(command = name, args = rest.len(), "dispatching command");
        func(rest.as_slice()).map_err(|source| Error::Command {
            name: name.to_string(),
            source,
        })?;
        Ok(ParseOutcome::Dispatched(name.to_string()))
    }

    fn long_option<'t>(&mut self, body: &'t str, ahead: &mut Lookahead<'_, 't>) -> Result<()> {
        if body.is_empty() {
            return Err(Error::EmptyLong);
        }
        let (name, inline) = split_option(body);
        let flag = format!("--{name}");
        let Some(&idx) = self.long.get(name) else {
            return Err(Error::UnknownOption(flag));
        };
        self.assign(idx, inline, ahead, &flag)
    }

    fn short_cluster<'t>(
        &mut self,
        token: &str,
        body: &'t str,
        ahead: &mut Lookahead<'_, 't>,
    ) -> Result<()> {
        let (cluster, inline) = split_option(body);
        let Some(last) = cluster.chars().count().checked_sub(1) else {
            return Err(Error::UnknownOption(token.to_string()));
        };

        for (n, c) in cluster.chars().enumerate() {
            let flag = format!("-{c}");
            let Some(&idx) = self.short.get(&c) else {
                return Err(Error::UnknownOption(flag));
            };
            let inline = if n == last { inline } else { None };
            self.assign(idx, inline, ahead, &flag)?;
        }
        Ok(())
    }

    fn assign<'t>(
        &mut self,
        idx: usize,
        inline: Option<&'t str>,
        ahead: &mut Lookahead<'_, 't>,
        flag: &str,
    ) -> Result<()> {
        let value = match self.opts[idx].var_type() {
            VarType::Bool => Value::Bool(bool_value(inline, ahead)),
            VarType::String => Value::String(required_value(inline, ahead, flag)?.to_string()),
            VarType::Int => Value::Int(required_value(inline, ahead, flag)?.parse::<i64>()?),
            VarType::Float => Value::Float(required_value(inline, ahead, flag)?.parse::<f64>()?),
            VarType::PositionalSlice => return Err(Error::UnknownType(flag.to_string())),
        };
        tracing::trace!(option = flag, %value, "option set");
        self.opts[idx].value = Some(value);
        Ok(())
    }

    fn positional_token(&mut self, state: &mut ScanState, token: &str) -> Result<()> {
        let Some(&idx) = self.positional.get(state.next_slot) else {
            tracing::trace!(token, "unclassified token");
            state.unknown.push(token.to_string());
            return Ok(());
        };

        let slot = &mut self.opts[idx];
        let value = match slot.var_type() {
            // Falsy and unrecognized tokens both read as false.
            VarType::Bool => Value::Bool(parse_bool(token).unwrap_or(false)),
            VarType::String => Value::String(token.to_string()),
            VarType::Int => Value::Int(token.parse::<i64>()?),
            VarType::Float => Value::Float(token.parse::<f64>()?),
            VarType::PositionalSlice => {
                slot.value = Some(Value::Strings(vec![token.to_string()]));
                state.slice = Some(idx);
                tracing::trace!(slot = %slot.display_name(), "positional slice reached");
                return Ok(());
            }
        };
        tracing::trace!(slot = %slot.display_name(), %value, "positional set");
        slot.value = Some(value);
        state.next_slot += 1;
        Ok(())
    }

    /// Fail on the first required option without a value: short names
    /// first, then long-only options, then positional slots.
    fn check_required(&self) -> Result<()> {
        let unset = |o: &&Opt| o.required && o.value.is_none();

        if let Some(c) = self.opts.iter().filter(unset).find_map(|o| o.short) {
            return Err(Error::MissingRequired(format!("-{c}")));
        }
        if let Some(long) = self
            .opts
            .iter()
            .filter(unset)
            .find_map(|o| o.long.as_deref())
        {
            return Err(Error::MissingRequired(format!("--{long}")));
        }
        if let Some(o) = self.positionals().find(unset) {
            return Err(Error::MissingRequired(o.display_name()));
        }
        Ok(())
    }
}

/// Split `name=value`. An empty inline value counts as absent.
fn split_option(body: &str) -> (&str, Option<&str>) {
    match body.split_once('=') {
        Some((name, value)) if !value.is_empty() => (name, Some(value)),
        Some((name, _)) => (name, None),
        None => (body, None),
    }
}

/// Inline truthy/falsy, else a truthy/falsy next token (consumed), else `true`.
fn bool_value(inline: Option<&str>, ahead: &mut Lookahead<'_, '_>) -> bool {
    if let Some(b) = inline.and_then(parse_bool) {
        return b;
    }
    if let Some(b) = ahead.peek().and_then(parse_bool) {
        ahead.take();
        return b;
    }
    true
}

fn required_value<'t>(
    inline: Option<&'t str>,
    ahead: &mut Lookahead<'_, 't>,
    flag: &str,
) -> Result<&'t str> {
    inline
        .or_else(|| ahead.take())
        .ok_or_else(|| Error::MissingArgument(flag.to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{Command, Key};

    fn typed() -> Options {
        let mut opt = Options::new();
        opt.register("", "v", "verbose", "Verbose output.", false, false)
            .unwrap();
        opt.register("", "f", "file", "Full file path.", "", false)
            .unwrap();
        opt.register("", "p", "port", "Port number.", Value::Int(3000), false)
            .unwrap();
        opt.register("", "r", "ratio", "Ratio.", 1.0, false).unwrap();
        opt
    }

    fn recorder() -> (Rc<RefCell<Vec<Vec<String>>>>, Command) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        let cmd = Command::new("moo")
            .with_help("Have you mooed today?")
            .with_aliases(["cow"])
            .with_func(move |args| {
                seen.borrow_mut().push(args.to_vec());
                Ok(())
            });
        (calls, cmd)
    }

    #[test]
    fn separate_and_inline_values_agree() {
        let cases: [(&[&str], &[&str]); 4] = [
            (&["--verbose", "yes"], &["--verbose=yes"]),
            (&["--file", "/tmp/x"], &["--file=/tmp/x"]),
            (&["--port", "4000"], &["--port=4000"]),
            (&["--ratio", "2.5"], &["--ratio=2.5"]),
        ];
        for (separate, inline) in cases {
            let mut a = typed();
            let mut b = typed();
            a.parse_args(separate).unwrap();
            b.parse_args(inline).unwrap();
            for key in ["verbose", "file", "port", "ratio"] {
                assert_eq!(a.value(key), b.value(key), "{separate:?} vs {inline:?}");
            }
        }

        let mut opt = typed();
        opt.parse_args(&["--verbose", "yes", "--file", "/tmp/x", "--port", "4000", "--ratio", "2.5"])
            .unwrap();
        assert!(opt.get_bool("verbose"));
        assert_eq!(opt.get_string("file"), "/tmp/x");
        assert_eq!(opt.get_int("port"), 4000);
        assert_eq!(opt.get_float("ratio"), 2.5);
        assert!(opt.remainder().is_empty());
    }

    #[test]
    fn short_int_option_takes_next_token() {
        let mut opt = typed();
        opt.parse_args(&["-p", "4000"]).unwrap();
        assert_eq!(opt.get_int('p'), 4000);
    }

    #[test]
    fn combined_short_flags_set_every_flag() {
        let mut opt = Options::new();
        opt.register("", "a", "", "", false, false).unwrap();
        opt.register("", "b", "", "", false, false).unwrap();
        opt.parse_args(&["-ab"]).unwrap();
        assert!(opt.get_bool('a'));
        assert!(opt.get_bool('b'));
    }

    #[test]
    fn inline_value_binds_to_last_cluster_character() {
        let mut opt = typed();
        opt.parse_args(&["-vp=8080", "rest"]).unwrap();
        assert!(opt.get_bool('v'));
        assert_eq!(opt.get_int('p'), 8080);
        assert_eq!(opt.remainder(), ["rest"]);
    }

    #[test]
    fn cluster_value_options_consume_following_tokens_in_turn() {
        let mut opt = typed();
        opt.parse_args(&["-fp", "a.txt", "9"]).unwrap();
        assert_eq!(opt.get_string('f'), "a.txt");
        assert_eq!(opt.get_int('p'), 9);
    }

    #[test]
    fn bool_flags_decode_truthy_and_falsy_values() {
        let mut opt = typed();
        opt.parse_args(&["--verbose=off"]).unwrap();
        assert!(!opt.get_bool('v'));

        let mut opt = typed();
        opt.parse_args(&["-v", "NO", "next"]).unwrap();
        assert!(!opt.get_bool('v'));
        assert_eq!(opt.remainder(), ["next"]);

        let mut opt = typed();
        opt.parse_args(&["-v=1"]).unwrap();
        assert!(opt.get_bool("verbose"));
    }

    #[test]
    fn bare_bool_flag_does_not_consume_non_boolean_token() {
        let mut opt = typed();
        opt.parse_args(&["--verbose", "file.txt"]).unwrap();
        assert!(opt.get_bool("verbose"));
        assert_eq!(opt.remainder(), ["file.txt"]);
    }

    #[test]
    fn value_option_consumes_dash_token() {
        let mut opt = typed();
        opt.parse_args(&["--port", "-5", "--file", "--verbose"]).unwrap();
        assert_eq!(opt.get_int("port"), -5);
        assert_eq!(opt.get_string("file"), "--verbose");
        assert!(!opt.get_bool("verbose"));
    }

    #[test]
    fn last_occurrence_wins() {
        let mut opt = typed();
        opt.parse_args(&["-p", "1", "--port=2", "-p=3", "--port", "4"])
            .unwrap();
        assert_eq!(opt.get_int('p'), 4);
    }

    #[test]
    fn missing_argument_at_end_of_input() {
        for args in [&["--file"][..], &["-f"], &["--port="], &["-vf"]] {
            let err = typed().parse_args(args).unwrap_err();
            assert!(matches!(err, Error::MissingArgument(_)), "{args:?}: {err:?}");
        }
    }

    #[test]
    fn numeric_parse_failures_pass_through() {
        let err = typed().parse_args(&["--port", "abc"]).unwrap_err();
        let expected = "abc".parse::<i64>().unwrap_err();
        match err {
            Error::ParseInt(e) => assert_eq!(e, expected),
            other => panic!("expected ParseInt, got: {other:?}"),
        }

        let err = typed().parse_args(&["-r=x"]).unwrap_err();
        assert!(matches!(err, Error::ParseFloat(_)), "{err:?}");
    }

    #[test]
    fn empty_long_option_fails() {
        let err = typed().parse_args(&["--"]).unwrap_err();
        assert!(matches!(err, Error::EmptyLong), "{err:?}");
    }

    #[test]
    fn unknown_options_fail_fast() {
        let mut opt = Options::new();
        opt.register("", "", "known", "", Value::Int(0), false)
            .unwrap();
        let err = opt.parse_args(&["--known=1", "stray", "-k"]).unwrap_err();
        match err {
            Error::UnknownOption(name) => assert_eq!(name, "-k"),
            other => panic!("expected UnknownOption, got: {other:?}"),
        }
        assert!(opt.remainder().is_empty());

        let err = typed().parse_args(&["--nope=1"]).unwrap_err();
        assert!(matches!(err, Error::UnknownOption(ref n) if n == "--nope"), "{err:?}");
    }

    #[test]
    fn unknown_cluster_character_stops_processing() {
        let mut opt = typed();
        let err = opt.parse_args(&["-vxp", "7"]).unwrap_err();
        assert!(matches!(err, Error::UnknownOption(ref n) if n == "-x"), "{err:?}");
        assert!(opt.get_bool('v'));
        assert!(!opt.short('p').unwrap().is_set());
    }

    #[test]
    fn unknown_tokens_keep_their_order() {
        let mut opt = typed();
        opt.parse_args(&["one", "-v", "two", "x", "three"]).unwrap();
        assert_eq!(opt.remainder(), ["one", "two", "x", "three"]);
    }

    #[test]
    fn positionals_fill_in_registration_order() {
        let mut opt = typed();
        opt.add_positional("", "name", "", "", false).unwrap();
        opt.add_positional("", "count", "", Value::Int(0), false)
            .unwrap();
        opt.add_positional("", "scale", "", 0.0, false).unwrap();
        opt.add_positional("", "force", "", false, false).unwrap();

        opt.parse_args(&["alpha", "-v", "3", "0.25", "yes", "extra"])
            .unwrap();
        assert_eq!(opt.get_string(Key::Positional("name")), "alpha");
        assert_eq!(opt.get_int(Key::Positional("count")), 3);
        assert_eq!(opt.get_float(Key::Positional("scale")), 0.25);
        assert!(opt.get_bool(Key::Positional("force")));
        assert_eq!(opt.remainder(), ["extra"]);
    }

    #[test]
    fn bool_positional_reads_unrecognized_as_false() {
        for token in ["no", "maybe"] {
            let mut opt = Options::new();
            opt.add_positional("", "force", "", true, false).unwrap();
            opt.parse_args(&[token]).unwrap();
            assert!(!opt.get_bool(Key::Positional("force")), "{token}");
        }
    }

    #[test]
    fn numeric_positional_failure_aborts() {
        let mut opt = Options::new();
        opt.add_positional("", "count", "", Value::Int(0), false)
            .unwrap();
        let err = opt.parse_args(&["many"]).unwrap_err();
        assert!(matches!(err, Error::ParseInt(_)), "{err:?}");
    }

    #[test]
    fn positional_slice_is_greedy() {
        let mut opt = typed();
        opt.add_positional("", "files", "", Vec::<String>::new(), false)
            .unwrap();
        opt.add_positional("", "never", "", "", false).unwrap();
        opt.set_command("", Command::new("moo").with_func(|_| Ok(())))
            .unwrap();

        let outcome = opt.parse_args(&["x", "-y", "--z", "moo", "-v"]).unwrap();
        assert_eq!(outcome, ParseOutcome::Done);
        assert_eq!(
            opt.get_strings(Key::Positional("files")),
            ["x", "-y", "--z", "moo", "-v"]
        );
        assert!(!opt.get_bool('v'));
        assert!(!opt.positional("never").unwrap().is_set());
        assert!(opt.remainder().is_empty());
    }

    #[test]
    fn slice_value_is_replaced_on_reparse() {
        let mut opt = Options::new();
        opt.add_positional("", "files", "", Vec::<String>::new(), false)
            .unwrap();
        opt.parse_args(&["a", "b"]).unwrap();
        opt.parse_args(&["c"]).unwrap();
        assert_eq!(opt.get_strings(Key::Positional("files")), ["c"]);
    }

    #[test]
    fn short_tokens_fill_positionals_or_remainder() {
        let mut opt = Options::new();
        opt.add_positional("", "input", "", "", false).unwrap();
        opt.parse_args(&["-", "x"]).unwrap();
        assert_eq!(opt.get_string(Key::Positional("input")), "-");
        assert_eq!(opt.remainder(), ["x"]);
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let mut opt = Options::new();
        opt.add_positional("", "input", "", "", false).unwrap();
        opt.parse_args(&["", "x"]).unwrap();
        assert_eq!(opt.get_string(Key::Positional("input")), "x");
        assert!(opt.remainder().is_empty());

        let mut opt = typed();
        opt.add_positional("", "files", "", Vec::<String>::new(), false)
            .unwrap();
        opt.parse_args(&["--file", "", "a", "", "b"]).unwrap();
        assert!(opt.long("file").unwrap().is_set());
        assert_eq!(opt.get_string("file"), "");
        assert_eq!(opt.get_strings(Key::Positional("files")), ["a", "b"]);
    }

    #[test]
    fn empty_cluster_with_inline_value_is_unknown() {
        let err = typed().parse_args(&["-=x"]).unwrap_err();
        assert!(matches!(err, Error::UnknownOption(ref n) if n == "-=x"), "{err:?}");
    }

    #[test]
    fn required_option_must_be_supplied() {
        let build = || {
            let mut opt = Options::new();
            opt.register("", "p", "port", "", Value::Int(0), true)
                .unwrap();
            opt
        };

        let err = build().parse_args(&[] as &[&str]).unwrap_err();
        match err {
            Error::MissingRequired(name) => assert_eq!(name, "-p"),
            other => panic!("expected MissingRequired, got: {other:?}"),
        }

        for args in [&["-p", "1"][..], &["-p=1"], &["--port", "1"], &["--port=1"]] {
            build().parse_args(args).unwrap();
        }
    }

    #[test]
    fn required_checks_long_only_then_positionals() {
        let build = || {
            let mut opt = Options::new();
            opt.register("", "", "token", "", "", true).unwrap();
            opt.add_positional("", "file", "", "", true).unwrap();
            opt
        };

        let err = build().parse_args(&["a.txt"]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired(ref n) if n == "--token"), "{err:?}");

        let mut opt = build();
        let err = opt.parse_args(&["--token", "t"]).unwrap_err();
        assert!(matches!(err, Error::MissingRequired(ref n) if n == "<file>"), "{err:?}");

        // Values persist across parses of the same registry.
        opt.parse_args(&["a.txt"]).unwrap();
    }

    #[test]
    fn command_short_circuits_the_scan() {
        let (calls, cmd) = recorder();
        let mut opt = Options::new();
        opt.set_default_help();
        opt.register("", "", "token", "", "", true).unwrap();
        opt.set_command("", cmd).unwrap();

        let outcome = opt.parse_args(&["moo", "--help"]).unwrap();
        assert_eq!(outcome, ParseOutcome::Dispatched("moo".to_string()));
        assert_eq!(*calls.borrow(), [vec!["--help".to_string()]]);
        assert!(!opt.get_bool("help"));
    }

    #[test]
    fn options_before_command_are_applied() {
        let (calls, cmd) = recorder();
        let mut opt = typed();
        opt.set_command("", cmd).unwrap();

        opt.parse_args(&["-v", "stray", "cow", "a", "-b"]).unwrap();
        assert!(opt.get_bool('v'));
        assert_eq!(opt.remainder(), ["stray"]);
        assert_eq!(
            *calls.borrow(),
            [vec!["a".to_string(), "-b".to_string()]]
        );
    }

    #[test]
    fn consumed_value_is_not_matched_as_command() {
        let (calls, cmd) = recorder();
        let mut opt = typed();
        opt.set_command("", cmd).unwrap();
        opt.parse_args(&["--file", "moo"]).unwrap();
        assert_eq!(opt.get_string("file"), "moo");
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn command_without_func_fails() {
        let mut opt = Options::new();
        opt.set_command("", Command::new("moo")).unwrap();
        let err = opt.parse_args(&["moo"]).unwrap_err();
        assert!(matches!(err, Error::MissingFunc(ref n) if n == "moo"), "{err:?}");
    }

    #[test]
    fn command_failure_is_propagated() {
        let mut opt = Options::new();
        opt.set_command(
            "",
            Command::new("moo").with_func(|_| Err("no grass".into())),
        )
        .unwrap();
        let err = opt.parse_args(&["moo"]).unwrap_err();
        match err {
            Error::Command { name, source } => {
                assert_eq!(name, "moo");
                assert_eq!(source.to_string(), "no grass");
            }
            other => panic!("expected Command, got: {other:?}"),
        }
    }

    #[test]
    fn slice_type_on_named_option_is_unknown_type() {
        let mut opt = Options::new();
        opt.register("", "l", "list", "", Vec::<String>::new(), false)
            .unwrap();
        let err = opt.parse_args(&["--list", "a"]).unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref n) if n == "--list"), "{err:?}");
    }

    #[test]
    fn parse_returns_help_on_empty_input() {
        let mut opt = typed().with_program("tool");
        let outcome = opt.parse(&[] as &[&str], true).unwrap();
        let ParseOutcome::Help(text) = outcome else {
            panic!("expected Help");
        };
        assert!(text.contains("tool"));

        let outcome = typed().parse(&[] as &[&str], false).unwrap();
        assert_eq!(outcome, ParseOutcome::Done);
    }

    #[test]
    fn parse_help_flag_wins_over_missing_required() {
        let mut opt = Options::new();
        opt.set_default_help();
        opt.register("", "p", "port", "", Value::Int(0), true)
            .unwrap();

        let outcome = opt.parse(&["-h"], false).unwrap();
        assert!(matches!(outcome, ParseOutcome::Help(_)), "{outcome:?}");

        let err = opt.parse(&["-h=false"], false).unwrap_err();
        assert!(matches!(err, Error::MissingRequired(_)), "{err:?}");
    }
}
