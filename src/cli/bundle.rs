//! Offline export: turn a saved JSON export into format files.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::export::ExporterRegistry;
use crate::models::{Catalog, Session};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Export design tokens from a saved JSON document
#[derive(Debug, Clone, Args)]
pub struct BundleArgs {
    /// JSON document previously exported by Tokensmith
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Format to write (repeatable): json, css, tailwind, swift, kotlin,
    /// flutter, react-native, claude-md
    #[arg(short, long = "format", value_name = "FORMAT", required = true)]
    pub formats: Vec<String>,

    /// Output directory [default: export.output_dir from config]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Catalog JSON file to use instead of the built-in catalog
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

impl BundleArgs {
    /// Execute the bundle command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();
        let registry = ExporterRegistry::new();

        registry
            .select(&self.formats)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let text = fs::read_to_string(&self.input).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.input.display()))
        })?;

        let catalog = Catalog::load_or_embedded(self.catalog.as_deref())
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;

        let mut session = Session::new();
        session.set_type_scale(config.export.default_type_scale.clone());
        session.import_json(&text).map_err(|e| {
            CliError::validation(format!("Failed to import {}: {e}", self.input.display()))
        })?;

        for (category, id) in &session.selections {
            if !catalog.contains(category, id) {
                warn!("Skipping unknown {category} selection '{id}'");
            }
        }

        let design = session.assemble(&catalog);
        let dir = self
            .output
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone());

        let path = registry
            .write_artifacts(&design, &self.formats, &dir)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("Wrote {}", path.display());
        Ok(())
    }
}
