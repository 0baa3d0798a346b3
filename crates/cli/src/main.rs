mod manifest;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};
use switchyard::{ValueSpec, to_switches};
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{DEFAULT_MANIFEST_NAME, load_manifest, write_default_manifest};

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(version, about = "Declarative command-line switch parsing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter switchyard.json manifest
    Init(InitArgs),

    /// Parse tokens against the manifest and print the result as JSON
    Parse(ParseArgs),

    /// Print usage for the declared arguments and switches
    Usage(UsageArgs),

    /// Render a JSON object of values back into a switch string
    ToSwitches(ToSwitchesArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Overwrite an existing manifest
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the declaration manifest
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Tokens to parse, given after `--`
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct UsageArgs {
    /// Path to the declaration manifest
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,
}

#[derive(Parser)]
struct ToSwitchesArgs {
    /// JSON object mapping names to values, e.g. '{"force": true, "n": 5}'
    #[arg(value_name = "JSON")]
    json: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Parse(args) => parse(args),
        Commands::Usage(args) => usage(args),
        Commands::ToSwitches(args) => render_switches(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let dest = write_default_manifest(&dir, args.force)?;

    eprintln!("Created: {}", dest.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_MANIFEST_NAME} to declare your arguments and switches");
    eprintln!("  2. Run: switchyard usage");
    eprintln!("  3. Run: switchyard parse -- 3 --unit weeks -f");

    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    let loaded = load_manifest(args.manifest.as_deref())?;
    let parser = loaded
        .manifest
        .build_parser()
        .with_context(|| format!("invalid manifest: {}", loaded.path.display()))?;

    tracing::debug!(tokens = args.tokens.len(), "parsing tokens");
    let result = parser.parse(args.tokens.as_slice())?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{out}");
    Ok(())
}

fn usage(args: UsageArgs) -> Result<()> {
    let loaded = load_manifest(args.manifest.as_deref())?;
    let parser = loaded
        .manifest
        .build_parser()
        .with_context(|| format!("invalid manifest: {}", loaded.path.display()))?;

    println!("{}", parser.formatted_usage());

    let mut specs: Vec<&ValueSpec> = parser.arguments().iter().chain(parser.options()).collect();
    specs.sort_by(|a, b| a.cmp_priority(b));

    let rows: Vec<(String, &str)> = specs
        .iter()
        .map(|spec| (spec.usage(), spec.description().unwrap_or_default()))
        .collect();
    let width = rows.iter().map(|(u, _)| u.len()).max().unwrap_or(0);
    for (usage, description) in rows {
        let line = format!("  {usage:<width$}  {description}");
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn render_switches(args: ToSwitchesArgs) -> Result<()> {
    let json: serde_json::Value =
        serde_json::from_str(&args.json).context("failed to parse JSON argument")?;
    let values = manifest::json_object(&json)?;
    println!("{}", to_switches(&values));
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
