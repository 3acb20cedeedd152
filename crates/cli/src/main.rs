use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use symgraph_lookup::{parse_symbol_query, LookupConfig, StaticFacts, SymbolLookup};
use symgraph_protocol::LookupOutcome;

mod fixture;

use fixture::Fixture;

#[derive(Parser)]
#[command(name = "symgraph")]
#[command(about = "Symbol lookup with connection graphs over chunked code", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a `symbol = ...` query against a workspace fixture
    Lookup(LookupArgs),

    /// Show how a query is parsed
    Parse(ParseArgs),

    /// Print the JSON schema of the lookup response
    Schema,
}

#[derive(Args)]
struct LookupArgs {
    /// Workspace fixture (JSON: root, files, metadata)
    #[arg(long)]
    workspace: PathBuf,

    /// Query text, e.g. "symbol = auth.ts::TokenService"
    #[arg(long)]
    query: String,

    /// Lookup config (JSON or TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full JSON response instead of the text output
    #[arg(long)]
    json: bool,

    /// Skip the source snapshot section
    #[arg(long)]
    no_code: bool,
}

#[derive(Args)]
struct ParseArgs {
    query: String,
}

fn main() -> Result<ExitCode> {
    let mut cli = Cli::parse();
    if matches!(&cli.command, Commands::Lookup(args) if args.json) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Lookup(args) => run_lookup(args),
        Commands::Parse(args) => run_parse(&args),
        Commands::Schema => run_schema(),
    }
}

fn run_lookup(args: LookupArgs) -> Result<ExitCode> {
    let fixture = Fixture::load(&args.workspace)?;

    let mut config = match &args.config {
        Some(path) => LookupConfig::from_file(path)?,
        None => LookupConfig::default(),
    };
    if let Some(root) = &fixture.root {
        config = config.with_workspace_root(root);
    }
    if args.no_code {
        config = config.without_code();
    }

    let engine = SymbolLookup::new(StaticFacts::new(fixture.metadata)).with_config(config);
    let outcome = engine
        .lookup(&args.query, &fixture.files)
        .context("Symbol lookup failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    let LookupOutcome {
        response: Some(response),
        ..
    } = outcome
    else {
        if !args.json {
            eprintln!("Not a symbol lookup; expected a query like \"symbol = Name\"");
        }
        return Ok(ExitCode::from(2));
    };

    if !args.json {
        println!("{}", response.output);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_parse(args: &ParseArgs) -> Result<ExitCode> {
    let parsed = parse_symbol_query(&args.query);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(ExitCode::SUCCESS)
}

fn run_schema() -> Result<ExitCode> {
    let schema = schemars::schema_for!(LookupOutcome);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}
