//! The user's editing session: selections, color overrides and type scale.
//!
//! A [`Session`] is an owned value. The web server wraps it in a lock, the CLI
//! builds one per invocation; nothing reads it through globals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::DEFAULT_TYPE_SCALE;
use super::{Catalog, ColorKey, ColorOverrides, DesignConfig, Scheme};
use crate::services::assembler;
use crate::services::import::{parse_import, ImportError, ImportedState};

/// Selected catalog ID per category (`colors`, `typography`, `button`, ...).
pub type Selections = BTreeMap<String, String>;

/// Serializable view of a session, as exposed by `/api/state` and stored in
/// snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Selected catalog ID per category
    #[serde(default)]
    pub selections: Selections,
    /// Per-scheme color overrides
    #[serde(default)]
    pub color_overrides: ColorOverrides,
    /// Active type scale ID
    #[serde(default = "default_type_scale")]
    pub type_scale: String,
}

fn default_type_scale() -> String {
    DEFAULT_TYPE_SCALE.to_string()
}

/// Mutable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Selected catalog ID per category
    pub selections: Selections,
    /// Per-scheme color overrides
    pub overrides: ColorOverrides,
    /// Active type scale ID
    pub type_scale_id: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an empty session on the default type scale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selections: Selections::new(),
            overrides: ColorOverrides::new(),
            type_scale_id: default_type_scale(),
        }
    }

    /// Restores a session from its serialized state.
    #[must_use]
    pub fn from_state(state: SessionState) -> Self {
        Self {
            selections: state.selections,
            overrides: state.color_overrides,
            type_scale_id: state.type_scale,
        }
    }

    /// Returns the serializable view of this session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            selections: self.selections.clone(),
            color_overrides: self.overrides.clone(),
            type_scale: self.type_scale_id.clone(),
        }
    }

    /// Returns the selected ID for a category.
    #[must_use]
    pub fn selection(&self, category: &str) -> Option<&str> {
        self.selections.get(category).map(String::as_str)
    }

    /// Selects a catalog entry for a category, replacing any previous choice.
    pub fn select(&mut self, category: impl Into<String>, id: impl Into<String>) {
        self.selections.insert(category.into(), id.into());
    }

    /// Clears the selection for a category, returning the old ID.
    pub fn deselect(&mut self, category: &str) -> Option<String> {
        self.selections.remove(category)
    }

    /// Sets a color override.
    pub fn set_override(&mut self, scheme: Scheme, key: ColorKey, value: impl Into<String>) {
        self.overrides.set(scheme, key, value);
    }

    /// Clears a color override, returning the old value.
    pub fn clear_override(&mut self, scheme: Scheme, key: ColorKey) -> Option<String> {
        self.overrides.remove(scheme, key)
    }

    /// Switches the active type scale.
    pub fn set_type_scale(&mut self, id: impl Into<String>) {
        self.type_scale_id = id.into();
    }

    /// Applies an exported JSON document to this session.
    ///
    /// Selections are replaced wholesale, overrides are merged per scheme and
    /// the type scale is adopted when the document names one. On error the
    /// session is left untouched.
    ///
    /// # Errors
    /// Returns an [`ImportError`] if the text is not a usable import document.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        self.apply_import(parse_import(text)?);
        Ok(())
    }

    /// Applies already-parsed import state with the same rules as
    /// [`Session::import_json`].
    pub fn apply_import(&mut self, imported: ImportedState) {
        self.selections = imported.selections;
        for scheme in Scheme::ALL {
            self.overrides
                .for_scheme_mut(scheme)
                .extend(imported.overrides.for_scheme(scheme).clone());
        }
        if let Some(type_scale) = imported.type_scale {
            self.type_scale_id = type_scale;
        }
    }

    /// Assembles the design configuration for this session.
    #[must_use]
    pub fn assemble(&self, catalog: &Catalog) -> DesignConfig {
        assembler::assemble(catalog, &self.selections, &self.overrides, &self.type_scale_id)
    }
}
