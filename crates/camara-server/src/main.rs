//! camara-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! mirror, and serves the JSON API over HTTP.
//!
//! # One-shot sync
//!
//! To pull upstream data into the configured store without starting the
//! server:
//!
//! ```
//! cargo run -p camara-server -- --sync-once
//! ```

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use camara_api::AppState;
use camara_store_sqlite::SqliteStore;
use camara_sync::SyncPipeline;
use camara_upstream::UpstreamClient;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Câmara open-data mirror server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Run one full sync, print its summary as JSON and exit.
  #[arg(long)]
  sync_once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(cli.config)?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let upstream =
    UpstreamClient::new(server_cfg.upstream()).context("failed to build upstream client")?;
  let sync = SyncPipeline::new(Arc::clone(&store), Arc::new(upstream), server_cfg.sync());

  // Helper mode: sync once and exit.
  if cli.sync_once {
    let summary = sync.run_full().await.context("sync failed")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  let app = camara_api::router(AppState { store, sync }).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  info!("Listening on http://{address}");
  info!("To sync: POST http://{address}/api/sync");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  info!("server stopped");
  Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!("shutting down");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tilde_is_expanded_only_at_start() {
    let plain = PathBuf::from("./transparencia.db");
    assert_eq!(expand_tilde(&plain), plain);

    let inner = PathBuf::from("data/~/x.db");
    assert_eq!(expand_tilde(&inner), inner);

    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/camara.db")),
        PathBuf::from(home).join("camara.db")
      );
    }
  }

  #[test]
  fn cli_parses_flags() {
    let cli = Cli::parse_from(["camara-server", "--config", "prod.toml", "--sync-once"]);
    assert_eq!(cli.config, PathBuf::from("prod.toml"));
    assert!(cli.sync_once);

    let cli = Cli::parse_from(["camara-server"]);
    assert_eq!(cli.config, PathBuf::from("config.toml"));
    assert!(!cli.sync_once);
  }
}
