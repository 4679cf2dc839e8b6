//! clientele server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured client store, and serves the `/clients` API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use clientele_core::{memory::MemoryStore, service::ClientService, store::ClientStore};
use clientele_server::{ServerConfig, StoreBackend, expand_tilde};
use clientele_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "clientele client-record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let address = server_cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  match server_cfg.backend {
    StoreBackend::Sqlite => {
      let store_path = expand_tilde(&server_cfg.store_path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      tracing::info!(path = %store_path.display(), "using sqlite store");
      serve(listener, store).await
    }
    StoreBackend::Memory => {
      tracing::warn!("using in-memory store; data is lost on exit");
      serve(listener, MemoryStore::new()).await
    }
  }
}

async fn serve<S: ClientStore + 'static>(listener: TcpListener, store: S) -> anyhow::Result<()> {
  let app = clientele_server::app(ClientService::new(Arc::new(store)));

  tracing::info!("Listening on http://{}", listener.local_addr()?);
  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
