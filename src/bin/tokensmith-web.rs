//! Tokensmith Web Server Binary
//!
//! Owns the live design session and serves it over HTTP. The session is
//! restored from the snapshot file at startup and written back, debounced,
//! after every change.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from config.toml (127.0.0.1:4319 by default)
//! tokensmith-web
//!
//! # Custom port and a catalog file instead of the built-in one
//! tokensmith-web --port 8080 --catalog ./catalog.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokensmith::config::Config;
use tokensmith::models::{Catalog, Session};
use tokensmith::services::{DebouncedPersister, SnapshotStore};
use tokensmith::web::{self, AppState};

/// Tokensmith Web Server - REST API for the live design session
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on [default: server.port from config]
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to [default: server.host from config]
    #[arg(long)]
    host: Option<String>,

    /// Catalog JSON file to use instead of the built-in catalog
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Snapshot file to restore from and persist to
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {e:#}");
        Config::default()
    });

    let catalog = Catalog::load_or_embedded(args.catalog.as_deref())?;
    for issue in catalog.validate() {
        warn!("Catalog: {issue}");
    }

    let store = SnapshotStore::resolve(args.snapshot.as_deref(), &config)?;
    let session = match store.load() {
        Some(snapshot) => {
            info!("Restored session from {}", store.path().display());
            Session::from_state(snapshot.state())
        }
        None => Session::new(),
    };

    let persister =
        DebouncedPersister::spawn(store, Duration::from_millis(config.snapshot.debounce_ms));
    let state = AppState::new(session, catalog).with_persister(persister);
    // The bridge can answer from the snapshot as soon as the server has run once.
    state.persist();

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid bind address {host}:{port}"))?;

    web::run_server(state, addr).await
}
