//! Export artifacts on disk and zip bundles.
//!
//! One requested format is written as a standalone file named by its backend.
//! Several formats are packed into `design-system.zip` together with a
//! `manifest.json` that lists the files.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::{ExportError, Exporter, ExporterRegistry};
use crate::models::DesignConfig;

/// File name of multi-format bundles.
pub const BUNDLE_FILE_NAME: &str = "design-system.zip";

/// Manifest inside every bundle.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

impl ExporterRegistry {
    /// Resolves format IDs to backends, dropping repeats.
    pub fn select(&self, ids: &[impl AsRef<str>]) -> Result<Vec<&dyn Exporter>, ExportError> {
        if ids.is_empty() {
            return Err(ExportError::NoFormats);
        }
        let mut selected: Vec<&dyn Exporter> = Vec::new();
        for id in ids {
            let exporter = self.require(id.as_ref())?;
            if !selected.iter().any(|e| e.id() == exporter.id()) {
                selected.push(exporter);
            }
        }
        Ok(selected)
    }

    /// Builds a zip archive with one file per format plus a manifest.
    ///
    /// # Errors
    /// Returns an error for unknown or missing formats, or if the archive
    /// cannot be written.
    pub fn bundle_zip(&self, config: &DesignConfig, ids: &[impl AsRef<str>]) -> Result<Vec<u8>> {
        let exporters = self.select(ids)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let mut files = Vec::new();
        for exporter in &exporters {
            let content = exporter.run(config);
            add_file_to_zip(&mut zip, exporter.file_name(), content.as_bytes(), options)?;
            files.push(json!({
                "format": exporter.id(),
                "label": exporter.label(),
                "file": exporter.file_name(),
                "bytes": content.len(),
            }));
        }

        let manifest = json!({
            "generator": crate::constants::APP_BINARY_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "generatedAt": Utc::now().to_rfc3339(),
            "typeScale": config.type_scale,
            "files": files,
        });
        let manifest =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        add_file_to_zip(&mut zip, MANIFEST_FILE_NAME, manifest.as_bytes(), options)?;

        let cursor = zip.finish().context("Failed to finalize zip")?;
        debug!("Bundled {} formats", exporters.len());
        Ok(cursor.into_inner())
    }

    /// Writes the requested formats into `dir`.
    ///
    /// One format becomes a standalone file, several become
    /// [`BUNDLE_FILE_NAME`]. Returns the path written.
    ///
    /// # Errors
    /// Returns an error for unknown or missing formats, or on I/O failure.
    pub fn write_artifacts(
        &self,
        config: &DesignConfig,
        ids: &[impl AsRef<str>],
        dir: &Path,
    ) -> Result<PathBuf> {
        let exporters = self.select(ids)?;

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let (path, bytes) = match exporters.as_slice() {
            [single] => (dir.join(single.file_name()), single.run(config).into_bytes()),
            _ => (dir.join(BUNDLE_FILE_NAME), self.bundle_zip(config, ids)?),
        };

        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Adds a file to a zip archive with zip-slip prevention.
fn add_file_to_zip<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    if name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
        anyhow::bail!("Invalid filename in zip: {name}");
    }

    zip.start_file(name, options)
        .with_context(|| format!("Failed to start file {name}"))?;
    zip.write_all(content)
        .with_context(|| format!("Failed to write file {name}"))?;

    Ok(())
}
