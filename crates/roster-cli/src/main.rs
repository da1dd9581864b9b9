mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{customers, Context};
use crate::error::{exit_code_for, report_error};
use roster_config as config;
use roster_store::{paths, Database};

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "roster CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new customer
    Add(customers::AddArgs),
    /// List customers in id order
    List,
    Show(customers::ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path.or(app_config.database.path))
        .with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store = Database::init(&db_path)
        .and_then(|database| database.open())
        .with_context(|| format!("open database {}", db_path.display()))?;

    let ctx = Context {
        store: &store,
        json,
    };

    match command {
        Command::Add(args) => customers::add_customer(&ctx, args),
        Command::List => customers::list_customers(&ctx),
        Command::Show(args) => customers::show_customer(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
