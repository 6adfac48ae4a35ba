//! CLI Adapter.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::app::commands::{self, apply, check, list, parse, show};
use crate::app::{AppContext, Config, logging};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "prompt-decorators")]
#[command(version)]
#[command(about = "Expand +++Decorator annotations into prompt directives", long_about = None)]
struct Cli {
    /// Config file (defaults to ./prompt-decorators.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Additional definition directory (repeatable)
    #[arg(long = "registry", global = true, value_name = "DIR")]
    registries: Vec<PathBuf>,
    /// Do not load the built-in decorator catalog
    #[arg(long, global = true)]
    no_builtin: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decorate annotated text and print the resulting prompt
    #[clap(visible_alias = "a")]
    Apply {
        /// Input file (stdin when omitted or `-`)
        file: Option<PathBuf>,
        /// Fail on unknown decorators and invalid parameters
        #[arg(long)]
        strict: bool,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the invocations and body parsed from annotated text
    #[clap(visible_alias = "p")]
    Parse {
        /// Input file (stdin when omitted or `-`)
        file: Option<PathBuf>,
    },
    /// List available decorators
    #[clap(visible_alias = "ls")]
    List {
        /// Only decorators in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Describe one decorator
    Show {
        /// Decorator name (case-insensitive)
        name: String,
    },
    /// Validate the configured registry
    Check,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let cwd = std::env::current_dir()?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    let ctx = AppContext::from_overrides(config, cli.registries, cli.no_builtin)?;

    match cli.command {
        Commands::Apply { file, strict, json } => run_apply(&ctx, file, strict, json),
        Commands::Parse { file } => {
            let text = commands::read_input(file.as_deref())?;
            println!("{}", parse::render(&parse::execute(&ctx, &text)?));
            Ok(())
        }
        Commands::List { category } => run_list(&ctx, category.as_deref()),
        Commands::Show { name } => {
            print!("{}", show::render(show::execute(&ctx, &name)?));
            Ok(())
        }
        Commands::Check => {
            let report = check::execute(&ctx);
            println!(
                "✅ Registry OK: {} decorator(s) in {} categor{}",
                report.decorators,
                report.categories.len(),
                if report.categories.len() == 1 { "y" } else { "ies" }
            );
            Ok(())
        }
    }
}

fn run_apply(
    ctx: &AppContext,
    file: Option<PathBuf>,
    strict: bool,
    json: bool,
) -> Result<(), AppError> {
    let text = commands::read_input(file.as_deref())?;
    let outcome = apply::execute(ctx, &text, strict)?;

    if json {
        println!("{}", apply::to_json(&outcome)?);
        return Ok(());
    }

    for warning in &outcome.warnings {
        eprintln!("⚠️  {}", warning);
    }
    for skipped in &outcome.skipped {
        eprintln!("⚠️  line {}: skipped {}: {}", skipped.line, skipped.name, skipped.error);
    }
    println!("{}", outcome.prompt);
    Ok(())
}

fn run_list(ctx: &AppContext, category: Option<&str>) -> Result<(), AppError> {
    let summaries = list::execute(ctx, category);
    if summaries.is_empty() {
        println!("No decorators found");
        return Ok(());
    }

    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for summary in summaries {
        println!("{:width$}  {:<12}  {}", summary.name, summary.category, summary.version);
    }
    Ok(())
}
