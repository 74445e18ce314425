use anyhow::{anyhow, Context, Result};
use axum::{routing::get, Json, Router};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::PathBuf;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use appointments::config::AppointmentsConfig;
use appointments::Appointments;

mod config;
mod logging;

use config::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Beautique Server - booking backend for the salon storefront
#[derive(Parser)]
#[command(name = "beautique-server")]
#[command(about = "Beautique Server - beauty-salon booking backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.clone().unwrap_or_default();
    logging::init_logging(&logging_config);
    tracing::info!("Beautique Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Per-module configuration from the `modules` bag, defaults when absent.
fn module_config(config: &AppConfig) -> Result<AppointmentsConfig> {
    match config.modules.get("appointments") {
        Some(value) => serde_json::from_value(value.clone())
            .context("Invalid appointments module configuration"),
        None => Ok(AppointmentsConfig::default()),
    }
}

async fn connect_database(config: &AppConfig, mock: bool) -> Result<DatabaseConnection> {
    // URL from config; override with in-memory SQLite when --mock is set
    let url = if mock {
        "sqlite::memory:".to_string()
    } else {
        config
            .database
            .as_ref()
            .map(|db| db.url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!("Database URL not configured"))?
    };

    let mut opts = ConnectOptions::new(url.clone());
    if let Some(max_conns) = config.database.as_ref().and_then(|db| db.max_conns) {
        opts.max_connections(max_conns);
    }
    if mock {
        // Every pooled `:memory:` connection would get its own database.
        opts.max_connections(1);
    }
    opts.connect_timeout(Duration::from_secs(5)).sqlx_logging(false);

    tracing::info!("Connecting to database: {}", url);
    Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database '{url}'"))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let db = connect_database(&config, args.mock).await?;

    Appointments::migrate(&db).await?;
    let module = Appointments::init(db, &module_config(&config)?)?;

    let openapi = Appointments::openapi();
    let app = Router::new()
        .merge(module.rest_router())
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .layer(TraceLayer::new_for_http());

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
            .await
            .with_context(|| {
                format!(
                    "Failed to bind {}:{}",
                    config.server.host, config.server.port
                )
            })?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Beautique Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    module_config(&config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
