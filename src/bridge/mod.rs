//! Read-only agent bridge.
//!
//! Every query walks the configured sources in order (normally the running
//! server, then the snapshot file) and answers from the first one that
//! responds. When none does, the answer is [`NO_DATA_MESSAGE`]. Queries
//! always produce text; transport and file errors are logged at debug level
//! and never reach the caller.

pub mod source;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::constants::NO_DATA_MESSAGE;
use crate::export::{flatten_tokens, format_token, ExporterRegistry, TokenFormat};
use crate::models::{DesignConfig, Scheme};
use crate::services::SnapshotStore;

pub use source::{DataSource, RemoteSource, SnapshotSource};

/// Ordered list of data sources.
pub struct Bridge {
    sources: Vec<Box<dyn DataSource>>,
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("Bridge").field("sources", &names).finish()
    }
}

impl Bridge {
    /// Creates a bridge over explicit sources, tried in order.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn DataSource>>) -> Self {
        Self { sources }
    }

    /// Server first, then snapshot.
    ///
    /// `url` and `snapshot` override the configured values. A server that
    /// cannot be set up (bad URL) is skipped rather than failing the bridge.
    pub fn from_config(config: &Config, url: Option<&str>, snapshot: Option<&Path>) -> Result<Self> {
        let mut sources: Vec<Box<dyn DataSource>> = Vec::new();

        let url = url.unwrap_or(&config.bridge.url);
        match RemoteSource::new(url, Duration::from_millis(config.bridge.timeout_ms)) {
            Ok(remote) => sources.push(Box::new(remote)),
            Err(err) => debug!("Server source disabled: {err:#}"),
        }

        let store = SnapshotStore::resolve(snapshot, config)?;
        sources.push(Box::new(SnapshotSource::new(store)));

        Ok(Self::new(sources))
    }

    fn first<T>(&self, query: &str, fetch: impl Fn(&dyn DataSource) -> Result<T>) -> Option<T> {
        for source in &self.sources {
            match fetch(source.as_ref()) {
                Ok(value) => {
                    debug!("{query}: answered by {}", source.name());
                    return Some(value);
                }
                Err(err) => debug!("{query}: {} unavailable: {err:#}", source.name()),
            }
        }
        None
    }

    fn config(&self) -> Option<DesignConfig> {
        self.first("config", |source| source.config())
    }

    /// Full design configuration as JSON.
    #[must_use]
    pub fn get_config(&self) -> String {
        self.config()
            .map_or_else(no_data, |config| to_json(&config))
    }

    /// Resolved colors, both schemes or one.
    #[must_use]
    pub fn get_colors(&self, scheme: Option<Scheme>) -> String {
        let Some(config) = self.config() else {
            return no_data();
        };
        match (config.tokens.colors, scheme) {
            (None, _) => "No colors selected.".to_string(),
            (Some(colors), Some(scheme)) => to_json(colors.mode(scheme)),
            (Some(colors), None) => to_json(&colors),
        }
    }

    /// Typography tokens.
    #[must_use]
    pub fn get_typography(&self) -> String {
        let Some(config) = self.config() else {
            return no_data();
        };
        config
            .tokens
            .typography
            .map_or_else(|| "No typography selected.".to_string(), |t| to_json(&t))
    }

    /// Raw selections, overrides and type scale.
    #[must_use]
    pub fn get_selections(&self) -> String {
        self.first("selections", |source| source.state())
            .map_or_else(no_data, |state| to_json(&state))
    }

    /// Output of one export format.
    ///
    /// Only formats the bridge may serve are accepted.
    #[must_use]
    pub fn get_export(&self, format: &str) -> String {
        let registry = ExporterRegistry::new();
        if registry.get_bridge(format).is_none() {
            return format!(
                "Unknown export format '{format}'. Available formats: {}",
                registry.bridge_ids().join(", ")
            );
        }
        self.first("export", |source| source.export(format))
            .unwrap_or_else(no_data)
    }

    /// One value by dot path.
    ///
    /// Paths are looked up under `tokens` first (`colors.light.primary`), then
    /// from the config root (`tokens.radius.md`, `componentPreferences.button.name`).
    /// Strings are printed bare, anything else as JSON.
    #[must_use]
    pub fn get_token(&self, path: &str) -> String {
        let Some(config) = self.config() else {
            return no_data();
        };
        let Ok(root) = serde_json::to_value(&config) else {
            return no_data();
        };

        let found = lookup(&root["tokens"], path).or_else(|| lookup(&root, path));
        match found {
            Some(Value::String(s)) => s.clone(),
            Some(value) => to_json(value),
            None => format!("Token '{path}' not found."),
        }
    }

    /// One leaf token as a single line in a token browser encoding.
    ///
    /// Only leaf paths resolve (`colors.dark.primary`, `spacing.md`); the
    /// leading `tokens.` segment is optional.
    #[must_use]
    pub fn get_token_line(&self, path: &str, format: TokenFormat) -> String {
        let Some(config) = self.config() else {
            return no_data();
        };
        let wanted = path.strip_prefix("tokens.").unwrap_or(path);
        flatten_tokens(&config)
            .iter()
            .find(|token| token.dot_path() == wanted)
            .map_or_else(
                || format!("Token '{path}' not found."),
                |token| format_token(token, format),
            )
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |node, segment| node.get(segment))
        .filter(|node| !node.is_null())
}

fn no_data() -> String {
    NO_DATA_MESSAGE.to_string()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| no_data())
}
