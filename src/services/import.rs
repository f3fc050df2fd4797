//! Import of exported JSON documents.
//!
//! Any document with a `selections` object is accepted: a full JSON export, a
//! snapshot, or a hand-written file. Only string values are taken from
//! `selections`. Color overrides must name a known color key and hold a hex
//! color, which is stored as uppercase `#RRGGBB`; anything else is skipped.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::models::{ColorKey, ColorOverrides, RgbColor, Scheme, Selections};

/// Reasons an import document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Text is not JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// Top level is not an object.
    #[error("Import document must be a JSON object")]
    NotAnObject,
    /// No `selections` object.
    #[error("Import document has no \"selections\" object")]
    MissingSelections,
}

/// State extracted from an import document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedState {
    /// Category selections (replace the session's)
    pub selections: Selections,
    /// Color overrides (merged into the session's)
    pub overrides: ColorOverrides,
    /// Type scale ID, when the document names one
    pub type_scale: Option<String>,
}

/// Parses an import document.
///
/// # Errors
/// Returns an [`ImportError`] when the text is not JSON, not an object, or has
/// no `selections` object.
///
/// # Examples
///
/// ```
/// use tokensmith::services::parse_import;
///
/// let state = parse_import(r#"{"selections": {"colors": "ocean", "bad": 3}}"#).unwrap();
/// assert_eq!(state.selections.len(), 1);
/// assert!(parse_import("[]").is_err());
/// ```
pub fn parse_import(text: &str) -> Result<ImportedState, ImportError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let root = document.as_object().ok_or(ImportError::NotAnObject)?;
    let selections = root
        .get("selections")
        .and_then(Value::as_object)
        .ok_or(ImportError::MissingSelections)?;

    let mut state = ImportedState {
        selections: string_entries(selections, "selections"),
        ..ImportedState::default()
    };

    if let Some(overrides) = root.get("colorOverrides").and_then(Value::as_object) {
        for scheme in Scheme::ALL {
            if let Some(entries) = overrides.get(scheme.as_str()).and_then(Value::as_object) {
                *state.overrides.for_scheme_mut(scheme) = color_entries(entries, scheme);
            }
        }
    }

    state.type_scale = root
        .get("typeScale")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(state)
}

fn string_entries(object: &Map<String, Value>, section: &str) -> BTreeMap<String, String> {
    object
        .iter()
        .filter_map(|(key, value)| match value.as_str() {
            Some(s) => Some((key.clone(), s.to_string())),
            None => {
                debug!("Skipping non-string {section} entry '{key}'");
                None
            }
        })
        .collect()
}

fn color_entries(object: &Map<String, Value>, scheme: Scheme) -> BTreeMap<String, String> {
    string_entries(object, scheme.as_str())
        .into_iter()
        .filter_map(|(key, value)| {
            let Some(color_key) = ColorKey::from_key(&key) else {
                debug!("Skipping unknown {scheme} override '{key}'");
                return None;
            };
            match RgbColor::from_hex(&value) {
                Ok(rgb) => Some((color_key.as_key(), rgb.to_hex())),
                Err(e) => {
                    debug!("Skipping {scheme} override '{key}': {e}");
                    None
                }
            }
        })
        .collect()
}
