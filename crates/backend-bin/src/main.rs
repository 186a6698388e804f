use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backend_lib::{
    auth::password::hash_password_secure,
    config::{LogFormat, Settings, DEFAULT_CONFIG_FILE, HASH_COST_RANGE},
    router, AppState,
};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// CareerFlow admin authentication server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print an scrypt hash for `admin_password_hash`
    HashPassword {
        password: String,
        /// scrypt cost factor (log_n)
        #[arg(long, default_value_t = 15)]
        cost: u8,
    },
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

async fn serve(config: PathBuf) -> anyhow::Result<()> {
    // Configuration errors are fatal: never run an admin panel with insecure defaults.
    let settings = Settings::load_from(&config)
        .with_context(|| format!("invalid configuration (file: {})", config.display()))?;
    init_tracing(&settings);
    tracing::debug!(?settings, "Configuration loaded");

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings).context("failed to initialise authentication")?);
    let app = router::create_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::HashPassword { mut password, cost } => {
            if !HASH_COST_RANGE.contains(&cost) {
                anyhow::bail!(
                    "cost must be between {} and {}",
                    HASH_COST_RANGE.start(),
                    HASH_COST_RANGE.end()
                );
            }
            let hash = hash_password_secure(&mut password, cost)?;
            println!("{hash}");
            Ok(())
        },
    }
}
