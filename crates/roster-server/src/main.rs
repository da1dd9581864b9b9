use anyhow::{Context as _, Result};
use clap::Parser;
use roster_config as config;
use roster_server::{router, AppState};
use roster_store::{paths, Database};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(name = "roster-server", version, about = "roster HTTP API")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    db_path: Option<PathBuf>,
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("server failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        db_path,
        bind,
        verbose: _,
    } = cli;

    let app_config = config::load(config_path).with_context(|| "load config")?;
    let bind_address: SocketAddr = match bind {
        Some(raw) => config::parse_bind_address(&raw).with_context(|| "parse --bind")?,
        None => app_config.server.bind_address,
    };

    let db_path = paths::resolve_db_path(db_path.or(app_config.database.path))
        .with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let db = Database::init(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;

    let app = router(AppState::new(db));
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("bind {}", bind_address))?;
    info!(address = %bind_address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "serve")?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
