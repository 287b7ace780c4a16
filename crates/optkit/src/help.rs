//! Usage text rendering. Reads the registry, never mutates it.

use crate::group::{DEFAULT_GROUP, Group};
use crate::opt::Opt;
use crate::options::Options;
use crate::value::VarType;

impl Options {
    /// Render usage text for all groups, options, positionals and commands.
    pub fn help(&self) -> String {
        let mut out = String::from("Usage:\n  ");
        out.push_str(if self.program.is_empty() {
            "program"
        } else {
            self.program.as_str()
        });
        if self.opts.iter().any(|o| !o.is_positional()) {
            out.push_str(" [OPTIONS]");
        }
        if !self.commands.is_empty() {
            out.push_str(" [COMMAND]");
        }
        for slot in self.positionals() {
            out.push(' ');
            out.push_str(&positional_usage(slot));
        }
        out.push('\n');

        for group in self.groups.values() {
            let (positionals, options): (Vec<&Opt>, Vec<&Opt>) = group
                .options
                .iter()
                .map(|&idx| &self.opts[idx])
                .partition(|o| o.is_positional());

            if !options.is_empty() {
                out.push_str(&format!("\n{} options:\n", heading(group)));
                let rows = options
                    .iter()
                    .map(|o| (option_left(o), option_help(o)))
                    .collect();
                push_rows(&mut out, rows);
            }

            if !positionals.is_empty() {
                out.push_str(&format!("\n{} arguments:\n", heading(group)));
                let rows = positionals
                    .iter()
                    .map(|o| (positional_usage(o), option_help(o)))
                    .collect();
                push_rows(&mut out, rows);
            }

            if !group.commands.is_empty() {
                out.push_str(&format!("\n{} commands:\n", heading(group)));
                let rows = group
                    .commands
                    .iter()
                    .filter_map(|name| self.commands.get(name))
                    .map(|cmd| {
                        let mut help = cmd.help().trim().to_string();
                        if !cmd.aliases().is_empty() {
                            if !help.is_empty() {
                                help.push(' ');
                            }
                            help.push_str(&format!("(aliases: {})", cmd.aliases().join(",")));
                        }
                        (cmd.name().to_string(), help)
                    })
                    .collect();
                push_rows(&mut out, rows);
            }
        }

        out
    }
}

fn heading(group: &Group) -> &str {
    if group.name == DEFAULT_GROUP {
        "Main"
    } else {
        group.name.as_str()
    }
}

fn value_placeholder(ty: VarType) -> Option<&'static str> {
    match ty {
        VarType::Bool | VarType::PositionalSlice => None,
        VarType::String => Some("<STRING>"),
        VarType::Int => Some("<INT>"),
        VarType::Float => Some("<FLOAT>"),
    }
}

fn option_left(opt: &Opt) -> String {
    let mut out = match (opt.short, opt.long.as_deref()) {
        (Some(c), Some(long)) => format!("-{c}, --{long}"),
        (Some(c), None) => format!("-{c}"),
        (None, Some(long)) => format!("    --{long}"),
        (None, None) => String::new(),
    };
    if let Some(placeholder) = value_placeholder(opt.var_type()) {
        out.push(' ');
        out.push_str(placeholder);
    }
    out
}

fn positional_usage(opt: &Opt) -> String {
    let name = if opt.name.is_empty() {
        opt.var_type().as_str().to_ascii_uppercase()
    } else {
        opt.name.clone()
    };
    match (opt.var_type(), opt.required) {
        (VarType::PositionalSlice, true) => format!("<{name}>..."),
        (VarType::PositionalSlice, false) => format!("[{name}]..."),
        (_, true) => format!("<{name}>"),
        (_, false) => format!("[{name}]"),
    }
}

fn option_help(opt: &Opt) -> String {
    let mut out = opt.help.trim().to_string();
    let mut append = |s: &str| {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(s);
    };
    if opt.required && !opt.is_positional() {
        append("(required)");
    }
    if !opt.default.is_zero() {
        append(&format!("[default: {}]", opt.default));
    }
    out
}

fn push_rows(out: &mut String, rows: Vec<(String, String)>) {
    let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Command, Options, Value};

    fn sample() -> Options {
        let mut opt = Options::new().with_program("tool");
        opt.set_default_help();
        opt.register("", "p", "port", "Port number.", Value::Int(3000), true)
            .unwrap();
        opt.register("Output", "", "format", "Output format.", "", false)
            .unwrap();
        opt.add_positional("", "files", "Input files.", Vec::<String>::new(), false)
            .unwrap();
        opt.set_command(
            "",
            Command::new("moo")
                .with_help("Have you mooed today?")
                .with_aliases(["cow", "bovine"]),
        )
        .unwrap();
        opt
    }

    #[test]
    fn help_lists_usage_groups_and_commands() {
        let text = sample().help();
        assert!(text.starts_with("Usage:\n  tool [OPTIONS] [COMMAND] [files]...\n"), "{text}");
        assert!(text.contains("Main options:"), "{text}");
        assert!(text.contains("-h, --help"), "{text}");
        assert!(text.contains("-p, --port <INT>"), "{text}");
        assert!(text.contains("Port number. (required) [default: 3000]"), "{text}");
        assert!(text.contains("Output options:"), "{text}");
        assert!(text.contains("    --format <STRING>"), "{text}");
        assert!(text.contains("Main arguments:"), "{text}");
        assert!(text.contains("Main commands:"), "{text}");
        assert!(text.contains("Have you mooed today? (aliases: cow,bovine)"), "{text}");
    }

    #[test]
    fn help_aligns_columns() {
        let text = sample().help();
        let col = |needle: &str| {
            let line = text.lines().find(|l| l.contains(needle)).unwrap();
            line.find(needle).unwrap()
        };
        assert_eq!(col("Print this help message"), col("Port number."));
    }

    #[test]
    fn help_pads_by_characters() {
        let mut opt = Options::new();
        opt.register("", "g", "größe", "Size.", Value::Int(0), false)
            .unwrap();
        let text = opt.help();
        assert!(text.contains("\n  -g, --größe <INT>  Size.\n"), "{text}");
    }

    #[test]
    fn help_omits_empty_sections() {
        let text = Options::new().help();
        assert_eq!(text, "Usage:\n  program\n");
    }
}
