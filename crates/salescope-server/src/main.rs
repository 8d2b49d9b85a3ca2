//! salescope server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), generates the
//! sample dataset, and serves the JSON API over HTTP.
//!
//! ```
//! cargo run -p salescope-server -- --port 8080 --seed 42
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use salescope_server::{Overrides, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Salescope sales analytics API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Interface to bind.
  #[arg(long)]
  host: Option<String>,

  /// Port to bind.
  #[arg(short, long)]
  port: Option<u16>,

  /// Seed for reproducible sample data.
  #[arg(long)]
  seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let loaded = ServerConfig::load(&cli.config).with_context(|| {
    format!("failed to read configuration from {:?}", cli.config)
  })?;
  let server_cfg = Overrides {
    host: cli.host,
    port: cli.port,
    seed: cli.seed,
  }
  .apply(loaded);

  let app = salescope_server::app(&server_cfg).context("failed to build app")?;
  let address = server_cfg.address();

  tracing::info!(
    days = server_cfg.days,
    seed = ?server_cfg.seed,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
