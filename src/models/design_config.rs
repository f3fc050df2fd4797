//! The exported design configuration.
//!
//! [`DesignConfig`] is the single intermediate representation every format
//! backend consumes. It is assembled from catalog data and user choices, holds
//! resolved colors and generated typography, and keeps component style records
//! unexpanded so each consumer can resolve them against the mode it renders.
//!
//! The config also carries the raw selections and overrides it was built from,
//! which makes the JSON export a valid import document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    ColorOverrides, ComponentCategory, ComponentStyle, ResolvedColors, Selections, TypographyData,
};

/// Schema version written into every config.
pub const CONFIG_VERSION: u32 = 1;

/// Token groups of a [`DesignConfig`].
///
/// A group is present only when the user selected something for it (or, for
/// colors, set an override). Absent groups are omitted from JSON, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignTokens {
    /// Resolved colors for both schemes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ResolvedColors>,
    /// Fonts and generated type scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyData>,
    /// Spacing scale values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<IndexMap<String, String>>,
    /// Radius scale values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<IndexMap<String, String>>,
    /// Shadow scale values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadows: Option<IndexMap<String, String>>,
}

impl DesignTokens {
    /// Returns true when no token group is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.colors.is_none()
            && self.typography.is_none()
            && self.spacing.is_none()
            && self.radius.is_none()
            && self.shadows.is_none()
    }
}

/// The selected style record for one component category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPreference {
    /// Catalog ID of the chosen entry
    pub id: String,
    /// Display name of the chosen entry
    pub name: String,
    /// Unexpanded style record
    pub style: ComponentStyle,
}

/// The assembled design configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignConfig {
    /// Schema version
    pub version: u32,
    /// Type scale ID the typography was generated with
    pub type_scale: String,
    /// Raw category selections
    #[serde(default)]
    pub selections: Selections,
    /// Raw color overrides
    #[serde(default)]
    pub color_overrides: ColorOverrides,
    /// Resolved token groups
    #[serde(default)]
    pub tokens: DesignTokens,
    /// Selected component styles by category
    #[serde(default)]
    pub component_preferences: BTreeMap<ComponentCategory, ComponentPreference>,
}

impl DesignConfig {
    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a config from JSON.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid config document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
