//! Where the bridge reads design data from.
//!
//! [`RemoteSource`] asks a running `tokensmith-web` over HTTP;
//! [`SnapshotSource`] reads the last snapshot the server persisted.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::export::ExporterRegistry;
use crate::models::{DesignConfig, SessionState};
use crate::services::SnapshotStore;

/// A read-only supplier of design data.
pub trait DataSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The assembled design configuration.
    fn config(&self) -> Result<DesignConfig>;

    /// Raw selections, overrides and type scale.
    fn state(&self) -> Result<SessionState>;

    /// Output of one bridge-visible export format.
    fn export(&self, format: &str) -> Result<String>;
}

/// HTTP client for the web server's API.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    http: Client,
    base_url: String,
}

impl RemoteSource {
    /// Creates a client for `base_url` with a request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tokensmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, path: &str) -> Result<reqwest::blocking::Response> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("{url} returned {status}: {body}"));
        }
        Ok(response)
    }
}

impl DataSource for RemoteSource {
    fn name(&self) -> &'static str {
        "server"
    }

    fn config(&self) -> Result<DesignConfig> {
        self.get("/api/config")?
            .json()
            .context("Server returned an unreadable config")
    }

    fn state(&self) -> Result<SessionState> {
        self.get("/api/state")?
            .json()
            .context("Server returned an unreadable state")
    }

    fn export(&self, format: &str) -> Result<String> {
        self.get(&format!("/api/export/{format}"))?
            .text()
            .context("Server returned an unreadable export")
    }
}

/// Reads the snapshot file and runs exporters locally over its stored config.
#[derive(Debug)]
pub struct SnapshotSource {
    store: SnapshotStore,
    registry: ExporterRegistry,
}

impl SnapshotSource {
    /// Creates a source for `store`.
    #[must_use]
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            store,
            registry: ExporterRegistry::new(),
        }
    }
}

impl DataSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn config(&self) -> Result<DesignConfig> {
        self.store
            .load()
            .and_then(|snapshot| snapshot.config)
            .ok_or_else(|| anyhow!("No config in {}", self.store.path().display()))
    }

    fn state(&self) -> Result<SessionState> {
        self.store
            .load()
            .map(|snapshot| snapshot.state())
            .ok_or_else(|| anyhow!("No snapshot at {}", self.store.path().display()))
    }

    fn export(&self, format: &str) -> Result<String> {
        let exporter = self
            .registry
            .get_bridge(format)
            .ok_or_else(|| anyhow!("Format '{format}' is not available to the bridge"))?;
        Ok(exporter.run(&self.config()?))
    }
}
