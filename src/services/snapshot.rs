//! Session snapshots on disk.
//!
//! The web server persists every session change so that the CLI bridge can
//! answer queries while the server is down, and so a restarted server resumes
//! where it left off. Writes are debounced on a background thread: bursts of
//! edits collapse into one write of the latest state.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{ColorOverrides, DesignConfig, Selections, Session, SessionState};

/// File name of the snapshot inside the config directory.
pub const SNAPSHOT_FILE_NAME: &str = "snapshot.json";

/// A persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Category selections
    #[serde(default)]
    pub selections: Selections,
    /// Color overrides
    #[serde(default)]
    pub color_overrides: ColorOverrides,
    /// Type scale ID
    pub type_scale: String,
    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,
    /// Assembled config at the time of the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DesignConfig>,
}

impl Snapshot {
    /// Captures a session and its assembled config.
    #[must_use]
    pub fn capture(session: &Session, config: Option<DesignConfig>) -> Self {
        Self {
            selections: session.selections.clone(),
            color_overrides: session.overrides.clone(),
            type_scale: session.type_scale_id.clone(),
            saved_at: Utc::now(),
            config,
        }
    }

    /// Returns the session state stored in this snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            selections: self.selections.clone(),
            color_overrides: self.color_overrides.clone(),
            type_scale: self.type_scale.clone(),
        }
    }
}

/// Reads and writes one snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside the config directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join(SNAPSHOT_FILE_NAME)))
    }

    /// Uses `path` if given, then the configured path, then the default location.
    pub fn resolve(path: Option<&Path>, config: &Config) -> Result<Self> {
        match path.or(config.snapshot.path.as_deref()) {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_location(),
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot.
    ///
    /// A missing file yields `None`. So does a corrupt one, after a warning.
    #[must_use]
    pub fn load(&self) -> Option<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                debug!("No snapshot at {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!("Ignoring unreadable snapshot {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Writes the snapshot using a temp file + rename.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp snapshot file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename snapshot file to {}", self.path.display())
        })?;

        Ok(())
    }
}

/// Writes snapshots on a background thread after a quiet period.
///
/// Each scheduled snapshot replaces any pending one. Dropping the persister
/// flushes the pending snapshot and joins the thread. Write failures are
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct DebouncedPersister {
    sender: Option<Sender<Snapshot>>,
    worker: Option<JoinHandle<()>>,
}

impl DebouncedPersister {
    /// Starts the background writer.
    #[must_use]
    pub fn spawn(store: SnapshotStore, quiet: Duration) -> Self {
        let (sender, receiver) = mpsc::channel::<Snapshot>();

        let worker = thread::spawn(move || {
            while let Ok(mut latest) = receiver.recv() {
                let disconnected = loop {
                    match receiver.recv_timeout(quiet) {
                        Ok(next) => latest = next,
                        Err(RecvTimeoutError::Timeout) => break false,
                        Err(RecvTimeoutError::Disconnected) => break true,
                    }
                };

                match store.save(&latest) {
                    Ok(()) => debug!("Snapshot written to {}", store.path().display()),
                    Err(err) => warn!("Snapshot write failed: {err:#}"),
                }

                if disconnected {
                    break;
                }
            }
        });

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Schedules `snapshot` for writing.
    pub fn schedule(&self, snapshot: Snapshot) {
        if let Some(sender) = &self.sender {
            if sender.send(snapshot).is_err() {
                warn!("Snapshot writer has stopped; change not persisted");
            }
        }
    }
}

impl Drop for DebouncedPersister {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Snapshot writer panicked");
            }
        }
    }
}
