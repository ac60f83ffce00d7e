use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use expense_audit::api::{AppState, create_router};
use expense_audit::config::{AuditConfig, ConfigLoader};

const DEFAULT_CONFIG_DIR: &str = "config/default";

#[derive(Parser)]
#[command(
    name = "expense-audit-server",
    version,
    about = "Travel expense audit HTTP service."
)]
struct Args {
    /// Configuration directory containing audit.yaml and columns.yaml.
    #[arg(long, env = "EXPENSE_AUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the configuration.
    #[arg(long, env = "EXPENSE_AUDIT_HOST")]
    host: Option<String>,

    /// Port to bind, overriding the configuration.
    #[arg(long, env = "EXPENSE_AUDIT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?.with_bind(args.host, args.port);

    setup_logging(&config.server().log_level);
    tracing::info!("Expense audit server v{} starting", env!("CARGO_PKG_VERSION"));

    let address = format!("{}:{}", config.server().host, config.server().port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(address = %address, "Listening");

    let router = create_router(AppState::new(config));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Loads the configuration directory. Without an explicit directory, a
/// missing `config/default` falls back to the built-in defaults.
fn load_config(dir: Option<&Path>) -> Result<AuditConfig> {
    match dir {
        Some(dir) => ConfigLoader::load(dir)
            .map(ConfigLoader::into_config)
            .with_context(|| format!("failed to load configuration from {}", dir.display())),
        None if Path::new(DEFAULT_CONFIG_DIR).is_dir() => ConfigLoader::load(DEFAULT_CONFIG_DIR)
            .map(ConfigLoader::into_config)
            .context("failed to load default configuration"),
        None => Ok(AuditConfig::default()),
    }
}

/// `RUST_LOG` wins over the configured level.
fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Ctrl+C received; shutting down");
    }
}
