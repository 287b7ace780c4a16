mod report;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use optkit::{CommandFn, ParseOutcome};
use optkit_schema::{ArgSchema, ArgType, CommandSchema, OptionsSchema};
use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};
use tracing_subscriber::{EnvFilter, fmt};

use crate::report::{DispatchReport, build_report, render_human};

const DEFAULT_SCHEMA_NAME: &str = "optkit.json";

#[derive(Parser)]
#[command(name = "optkit")]
#[command(version, about = "Parse arguments against an optkit JSON schema", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample schema
    Init(InitArgs),

    /// Parse arguments (after `--`) against a schema and report the values
    Parse(ParseArgs),

    /// Print the help text a schema renders
    Help(HelpArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Program name recorded in the schema
    #[arg(short, long, default_value = "my-tool")]
    name: String,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the options schema
    #[arg(short, long, default_value = DEFAULT_SCHEMA_NAME, value_name = "FILE")]
    schema: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Treat empty input as a help request
    #[arg(long)]
    empty_help: bool,

    /// Arguments to parse
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Parser)]
struct HelpArgs {
    /// Path to the options schema
    #[arg(short, long, default_value = DEFAULT_SCHEMA_NAME, value_name = "FILE")]
    schema: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Parse(args) => parse_command(args),
        Commands::Help(args) => help_command(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let schema_path = dir.join(DEFAULT_SCHEMA_NAME);
    if schema_path.exists() {
        bail!("{DEFAULT_SCHEMA_NAME} already exists in {}", dir.display());
    }

    let json = sample_schema(args.name).to_json()?;
    fs::write(&schema_path, &json)
        .with_context(|| format!("failed to write {}", schema_path.display()))?;

    eprintln!("Created: {}", schema_path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_SCHEMA_NAME} to declare your options");
    eprintln!("  2. Run: optkit parse -- --verbose input.txt");

    Ok(())
}

fn sample_schema(name: String) -> OptionsSchema {
    OptionsSchema {
        name,
        summary: "Example tool".to_string(),
        default_help: true,
        args: vec![
            ArgSchema {
                short: "v".to_string(),
                long: "verbose".to_string(),
                help: "Show more details in output.".to_string(),
                arg_type: ArgType::Bool,
                ..Default::default()
            },
            ArgSchema {
                short: "p".to_string(),
                long: "port".to_string(),
                help: "Port number.".to_string(),
                arg_type: ArgType::Int,
                default: Some(serde_json::json!(3000)),
                ..Default::default()
            },
            ArgSchema {
                name: "files".to_string(),
                help: "Input files.".to_string(),
                arg_type: ArgType::PositionalSlice,
                ..Default::default()
            },
        ],
        commands: vec![CommandSchema {
            name: "moo".to_string(),
            help: "Have you mooed today?".to_string(),
            aliases: vec!["cow".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn load_schema(path: &Path) -> Result<OptionsSchema> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    OptionsSchema::from_json(&json)
        .with_context(|| format!("invalid schema: {}", path.display()))
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let schema = load_schema(&args.schema)?;
    let dispatched: Rc<RefCell<Option<DispatchReport>>> = Rc::new(RefCell::new(None));
    let mut opt = schema.build(|cmd| {
        let slot = Rc::clone(&dispatched);
        let name = cmd.name.clone();
        let func: CommandFn = Box::new(move |rest: &[String]| {
            *slot.borrow_mut() = Some(DispatchReport {
                name: name.clone(),
                args: rest.to_vec(),
            });
            Ok(())
        });
        Some(func)
    })?;

    let outcome = opt
        .parse(&args.args, args.empty_help)
        .context("failed to parse arguments")?;
    if let ParseOutcome::Help(text) = outcome {
        print!("{text}");
        return Ok(());
    }

    let command = dispatched.borrow().clone();
    let report = build_report(&opt, command);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_human(&report));
    }

    Ok(())
}

fn help_command(args: HelpArgs) -> Result<()> {
    tracing::debug!("executing help command");

    let schema = load_schema(&args.schema)?;
    let opt = schema.build(|_| None)?;
    if !schema.summary.trim().is_empty() {
        println!("{}\n", schema.summary.trim());
    }
    print!("{}", opt.help());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
