//! mentor-server binary.
//!
//! Reads `mentor.toml` (or the path given with `--config`) under `MENTOR_*`
//! environment overrides, opens the SQLite context store and serves the JSON
//! API over HTTP until Ctrl-C / SIGTERM.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use mentor_api::AppState;
use mentor_llm::ChatClient;
use mentor_server::{ServerConfig, app, shutdown_signal};
use mentor_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Mentor learning assistant server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, env = "MENTOR_CONFIG", default_value = "mentor.toml")]
  config: PathBuf,
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

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if server_cfg.llm.api_key.is_empty() {
    tracing::warn!("no LLM api key configured; generation requests will be unauthenticated");
  }

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let llm = ChatClient::new(server_cfg.llm.clone()).context("failed to build LLM client")?;

  let router = app(AppState::new(store, llm));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
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
