//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tokensmith::export::{Exporter, JsonExporter};
use tokensmith::models::{Catalog, DesignConfig, Session};
use tokensmith::services::{Snapshot, SnapshotStore};

/// A session with the given category selections.
pub fn session_with(selections: &[(&str, &str)]) -> Session {
    let mut session = Session::new();
    for (category, id) in selections {
        session.select(*category, *id);
    }
    session
}

/// A fully populated session: every token group plus two components and a
/// dark-mode override.
pub fn full_session() -> Session {
    let mut session = session_with(&[
        ("colors", "ocean"),
        ("typography", "editorial"),
        ("spacing", "comfortable"),
        ("radius", "rounded"),
        ("shadows", "elevated"),
        ("button", "neon"),
        ("slider", "classic"),
    ]);
    session.set_override(
        tokensmith::models::Scheme::Dark,
        tokensmith::models::ColorKey::Primary,
        "#FF00AA",
    );
    session.set_type_scale("perfect-fourth");
    session
}

/// Assembles `session` against the built-in catalog.
pub fn assemble(session: &Session) -> DesignConfig {
    session.assemble(&Catalog::load().expect("built-in catalog"))
}

/// The JSON export of `session`, as a user would save it.
pub fn json_export(session: &Session) -> String {
    JsonExporter.run(&assemble(session))
}

/// Writes the JSON export of `session` to `dir/name`.
pub fn write_export_file(dir: &Path, name: &str, session: &Session) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json_export(session)).expect("write export file");
    path
}

/// Writes a snapshot of `session` (with its assembled config) to
/// `dir/snapshot.json`.
pub fn write_snapshot(dir: &Path, session: &Session) -> PathBuf {
    let path = dir.join("snapshot.json");
    SnapshotStore::new(&path)
        .save(&Snapshot::capture(session, Some(assemble(session))))
        .expect("write snapshot");
    path
}

/// Path to the tokensmith binary.
pub fn tokensmith_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tokensmith")
}

/// A Command with an isolated config directory and a server URL nothing
/// listens on.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(tokensmith_bin());
    cmd.env("TOKENSMITH_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(["--url", "http://127.0.0.1:9"]);
    cmd.args(args);
    cmd
}
