//! Format backends for the assembled design configuration.
//!
//! Each backend is an [`Exporter`]: a pure function from a [`DesignConfig`] to
//! the text of one artifact. Backends never fail; a token group that is absent
//! from the config is simply left out of the output. The [`ExporterRegistry`]
//! holds every backend by ID and also produces multi-format zip bundles.

pub mod bundle;
pub mod claude_md;
pub mod css;
pub mod flatten;
pub mod flutter;
pub mod json;
pub mod kotlin;
pub mod react_native;
pub mod swift;
pub mod tailwind;
pub mod token_browser;

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::DesignConfig;

pub use bundle::{BUNDLE_FILE_NAME, MANIFEST_FILE_NAME};
pub use claude_md::ClaudeMdExporter;
pub use css::CssExporter;
pub use flatten::{camel_ident, css_var_name, flatten_tokens, pascal_ident, FlatToken};
pub use flutter::FlutterExporter;
pub use json::JsonExporter;
pub use kotlin::KotlinExporter;
pub use react_native::ReactNativeExporter;
pub use swift::SwiftExporter;
pub use tailwind::TailwindExporter;
pub use token_browser::{format_token, TokenFormat};

/// Content type of plain-text artifacts.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Content type of JSON artifacts.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Errors raised when selecting formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// No backend is registered under this ID.
    #[error("Unknown export format '{0}'. Available formats: {1}")]
    UnknownFormat(String, String),
    /// An export was requested without any format.
    #[error("No export format requested")]
    NoFormats,
}

/// One output format.
pub trait Exporter: Send + Sync {
    /// Stable format ID (`css`, `react-native`, ...).
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn label(&self) -> &'static str;

    /// File extension without the dot.
    fn file_extension(&self) -> &'static str;

    /// File name used for standalone files and inside bundles.
    fn file_name(&self) -> &'static str;

    /// HTTP content type of the output.
    fn content_type(&self) -> &'static str {
        TEXT_CONTENT_TYPE
    }

    /// Whether the agent bridge may request this format.
    fn bridge_visible(&self) -> bool {
        true
    }

    /// Renders the artifact.
    fn run(&self, config: &DesignConfig) -> String;
}

/// Backends by format ID, in registration order.
pub struct ExporterRegistry {
    exporters: IndexMap<&'static str, Box<dyn Exporter>>,
}

impl std::fmt::Debug for ExporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterRegistry")
            .field("formats", &self.ids())
            .finish()
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(JsonExporter));
        registry.register(Box::new(CssExporter));
        registry.register(Box::new(TailwindExporter));
        registry.register(Box::new(SwiftExporter));
        registry.register(Box::new(KotlinExporter));
        registry.register(Box::new(FlutterExporter));
        registry.register(Box::new(ReactNativeExporter));
        registry.register(Box::new(ClaudeMdExporter));
        registry
    }
}

impl ExporterRegistry {
    /// Registry with every built-in backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with no backends.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            exporters: IndexMap::new(),
        }
    }

    /// Adds a backend, replacing any backend with the same ID.
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters.insert(exporter.id(), exporter);
    }

    /// Looks up a backend.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Exporter> {
        self.exporters.get(id).map(AsRef::as_ref)
    }

    /// Looks up a backend, naming the available formats on failure.
    pub fn require(&self, id: &str) -> Result<&dyn Exporter, ExportError> {
        self.get(id)
            .ok_or_else(|| ExportError::UnknownFormat(id.to_string(), self.ids().join(", ")))
    }

    /// Looks up a backend the agent bridge may use.
    #[must_use]
    pub fn get_bridge(&self, id: &str) -> Option<&dyn Exporter> {
        self.get(id).filter(|e| e.bridge_visible())
    }

    /// Every registered format ID.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.exporters.keys().copied().collect()
    }

    /// Format IDs the agent bridge may request.
    #[must_use]
    pub fn bridge_ids(&self) -> Vec<&'static str> {
        self.exporters
            .values()
            .filter(|e| e.bridge_visible())
            .map(|e| e.id())
            .collect()
    }

    /// Iterates every backend.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Exporter> {
        self.exporters.values().map(AsRef::as_ref)
    }

    /// Runs one backend.
    pub fn export(&self, id: &str, config: &DesignConfig) -> Result<String, ExportError> {
        Ok(self.require(id)?.run(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperJson;

    impl Exporter for UpperJson {
        fn id(&self) -> &'static str {
            "json"
        }
        fn label(&self) -> &'static str {
            "Shouting JSON"
        }
        fn file_extension(&self) -> &'static str {
            "json"
        }
        fn file_name(&self) -> &'static str {
            "TOKENS.JSON"
        }
        fn run(&self, _config: &DesignConfig) -> String {
            "{}".to_string()
        }
    }

    #[test]
    fn test_default_registry() {
        let registry = ExporterRegistry::new();
        assert_eq!(
            registry.ids(),
            vec![
                "json",
                "css",
                "tailwind",
                "swift",
                "kotlin",
                "flutter",
                "react-native",
                "claude-md"
            ]
        );
        assert_eq!(
            registry.bridge_ids(),
            vec!["json", "css", "tailwind", "swift", "kotlin", "claude-md"]
        );
        assert!(registry.get_bridge("flutter").is_none());
        assert!(registry.get("flutter").is_some());
    }

    #[test]
    fn test_file_names_and_extensions() {
        let registry = ExporterRegistry::new();
        for exporter in registry.iter() {
            assert!(
                exporter
                    .file_name()
                    .ends_with(&format!(".{}", exporter.file_extension())),
                "{} has a mismatched file name",
                exporter.id()
            );
        }
        assert_eq!(registry.get("json").unwrap().content_type(), JSON_CONTENT_TYPE);
        assert_eq!(registry.get("css").unwrap().content_type(), TEXT_CONTENT_TYPE);
    }

    #[test]
    fn test_register_replaces_by_id() {
        let mut registry = ExporterRegistry::new();
        registry.register(Box::new(UpperJson));
        assert_eq!(registry.ids().len(), 8);
        assert_eq!(registry.get("json").unwrap().file_name(), "TOKENS.JSON");
        assert_eq!(registry.ids()[0], "json");
    }

    #[test]
    fn test_unknown_format() {
        let registry = ExporterRegistry::new();
        let err = registry.require("yaml").err().unwrap();
        assert!(err.to_string().contains("yaml"));
        assert!(err.to_string().contains("claude-md"));
    }
}
