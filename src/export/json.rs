//! Canonical JSON export.
//!
//! The whole [`DesignConfig`] is written as-is, including the raw selections
//! and overrides, so the output doubles as an import document.

use tracing::warn;

use super::{Exporter, JSON_CONTENT_TYPE};
use crate::models::DesignConfig;

/// `tokens.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn id(&self) -> &'static str {
        "json"
    }

    fn label(&self) -> &'static str {
        "JSON"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn file_name(&self) -> &'static str {
        "tokens.json"
    }

    fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    fn run(&self, config: &DesignConfig) -> String {
        match config.to_json_pretty() {
            Ok(mut json) => {
                json.push('\n');
                json
            }
            Err(err) => {
                warn!("Failed to serialize design config: {err}");
                "{}\n".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, ColorOverrides, Selections, Session};
    use crate::services::assemble;

    #[test]
    fn test_typography_only_has_no_colors_key() {
        let mut selections = Selections::new();
        selections.insert("typography".to_string(), "geometric".to_string());
        let config = assemble(
            &Catalog::load().unwrap(),
            &selections,
            &ColorOverrides::new(),
            "major-third",
        );

        let output = JsonExporter.run(&config);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["tokens"].get("colors").is_none());
        assert_eq!(value["tokens"]["typography"]["headingFont"], "Poppins, sans-serif");
        assert_eq!(DesignConfig::from_json(&output).unwrap(), config);
    }

    #[test]
    fn test_output_is_an_import_document() {
        let catalog = Catalog::load().unwrap();
        let mut session = Session::new();
        session.select("colors", "ember");
        session.select("button", "neon");
        let output = JsonExporter.run(&session.assemble(&catalog));

        let mut restored = Session::new();
        restored.import_json(&output).unwrap();
        assert_eq!(restored, session);
    }
}
