//! Static catalog of selectable design-system entries.
//!
//! The catalog is pure data: palettes, font pairings, type scales, spacing,
//! radius and shadow scales, and component style records. It is loaded once
//! (embedded JSON by default, or a user-supplied file) and never mutated.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use super::{ColorPaletteData, ComponentCategory, ComponentStyle, FontPairing, TypeScale};
use crate::services::placeholder::Effect;

/// Selection key for the color palette.
pub const COLORS_CATEGORY: &str = "colors";
/// Selection key for the font pairing.
pub const TYPOGRAPHY_CATEGORY: &str = "typography";
/// Selection key for the spacing scale.
pub const SPACING_CATEGORY: &str = "spacing";
/// Selection key for the radius scale.
pub const RADIUS_CATEGORY: &str = "radius";
/// Selection key for the shadow scale.
pub const SHADOWS_CATEGORY: &str = "shadows";

/// Token categories, in export order.
pub const TOKEN_CATEGORIES: [&str; 5] = [
    COLORS_CATEGORY,
    TYPOGRAPHY_CATEGORY,
    SPACING_CATEGORY,
    RADIUS_CATEGORY,
    SHADOWS_CATEGORY,
];

/// Type scale used when a session has not chosen one.
pub const DEFAULT_TYPE_SCALE: &str = "major-third";

/// A named flat scale (spacing, radius or shadows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleEntry {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Key to CSS length or shadow string, in authoring order.
    pub values: IndexMap<String, String>,
}

/// A component style catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Catalog identifier, unique within its category.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The style record.
    pub style: ComponentStyle,
}

impl ComponentEntry {
    /// Returns the category of the entry's style record.
    #[must_use]
    pub const fn category(&self) -> ComponentCategory {
        self.style.category()
    }
}

/// ID and display name of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItemSummary {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// The full catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    /// Color palettes.
    pub palettes: Vec<ColorPaletteData>,
    /// Font pairings.
    pub font_pairings: Vec<FontPairing>,
    /// Type scales.
    pub type_scales: Vec<TypeScale>,
    /// Spacing scales.
    pub spacing: Vec<ScaleEntry>,
    /// Radius scales.
    pub radius: Vec<ScaleEntry>,
    /// Shadow scales.
    pub shadows: Vec<ScaleEntry>,
    /// Component style records.
    pub components: Vec<ComponentEntry>,
}

impl Catalog {
    /// Load the catalog from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/catalog.json");
        let catalog: Self =
            serde_json::from_str(json_data).context("Failed to parse embedded catalog")?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise the embedded catalog.
    ///
    /// # Errors
    /// Returns an error if the chosen catalog cannot be loaded.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::load, Self::from_path)
    }

    /// Finds a palette by ID.
    #[must_use]
    pub fn palette(&self, id: &str) -> Option<&ColorPaletteData> {
        self.palettes.iter().find(|p| p.id == id)
    }

    /// Finds a font pairing by ID.
    #[must_use]
    pub fn font_pairing(&self, id: &str) -> Option<&FontPairing> {
        self.font_pairings.iter().find(|p| p.id == id)
    }

    /// Finds a type scale by ID.
    #[must_use]
    pub fn type_scale(&self, id: &str) -> Option<&TypeScale> {
        self.type_scales.iter().find(|s| s.id == id)
    }

    /// Finds a spacing scale by ID.
    #[must_use]
    pub fn spacing(&self, id: &str) -> Option<&ScaleEntry> {
        self.spacing.iter().find(|s| s.id == id)
    }

    /// Finds a radius scale by ID.
    #[must_use]
    pub fn radius(&self, id: &str) -> Option<&ScaleEntry> {
        self.radius.iter().find(|s| s.id == id)
    }

    /// Finds a shadow scale by ID.
    #[must_use]
    pub fn shadows(&self, id: &str) -> Option<&ScaleEntry> {
        self.shadows.iter().find(|s| s.id == id)
    }

    /// Finds a component entry by category and ID.
    #[must_use]
    pub fn component(&self, category: ComponentCategory, id: &str) -> Option<&ComponentEntry> {
        self.components
            .iter()
            .find(|c| c.category() == category && c.id == id)
    }

    /// Returns true if `id` names an entry of the given selection category.
    #[must_use]
    pub fn contains(&self, category: &str, id: &str) -> bool {
        self.items(category).iter().any(|item| item.id == id)
    }

    /// Lists the entries of one selection category (token or component).
    ///
    /// Unknown categories yield an empty list.
    #[must_use]
    pub fn items(&self, category: &str) -> Vec<CatalogItemSummary> {
        fn summary(id: &str, name: &str) -> CatalogItemSummary {
            CatalogItemSummary {
                id: id.to_string(),
                name: name.to_string(),
            }
        }

        match category {
            COLORS_CATEGORY => self.palettes.iter().map(|p| summary(&p.id, &p.name)).collect(),
            TYPOGRAPHY_CATEGORY => self
                .font_pairings
                .iter()
                .map(|p| summary(&p.id, &p.name))
                .collect(),
            SPACING_CATEGORY => self.spacing.iter().map(|s| summary(&s.id, &s.name)).collect(),
            RADIUS_CATEGORY => self.radius.iter().map(|s| summary(&s.id, &s.name)).collect(),
            SHADOWS_CATEGORY => self.shadows.iter().map(|s| summary(&s.id, &s.name)).collect(),
            other => match other.parse::<ComponentCategory>() {
                Ok(component) => self
                    .components
                    .iter()
                    .filter(|c| c.category() == component)
                    .map(|c| summary(&c.id, &c.name))
                    .collect(),
                Err(_) => Vec::new(),
            },
        }
    }

    /// Every selection category: token categories, then component categories.
    #[must_use]
    pub fn categories() -> Vec<&'static str> {
        TOKEN_CATEGORIES
            .into_iter()
            .chain(ComponentCategory::ALL.iter().map(ComponentCategory::as_str))
            .collect()
    }

    /// Checks catalog integrity.
    ///
    /// Reports duplicate IDs within a category, unknown composite-effect
    /// directives, and palettes with an incomplete primary scale. An empty
    /// result means the catalog is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for category in Self::categories() {
            let mut seen = BTreeSet::new();
            for item in self.items(category) {
                if !seen.insert(item.id.clone()) {
                    issues.push(format!("Duplicate {category} id '{}'", item.id));
                }
            }
        }

        if !self.type_scales.iter().any(|s| s.id == DEFAULT_TYPE_SCALE) {
            issues.push(format!("Missing default type scale '{DEFAULT_TYPE_SCALE}'"));
        }

        for scale in &self.type_scales {
            if scale.ratio <= 1.0 {
                issues.push(format!(
                    "Type scale '{}' has ratio {} (must be greater than 1)",
                    scale.id, scale.ratio
                ));
            }
        }

        for palette in &self.palettes {
            let missing = palette.missing_shades();
            if !missing.is_empty() {
                issues.push(format!(
                    "Palette '{}' primary scale is missing steps {:?}",
                    palette.id, missing
                ));
            }
        }

        for entry in &self.components {
            for (part, map) in entry.style.parts() {
                for (state, layer) in map.layers() {
                    for (key, value) in layer {
                        if let Err(err) = Effect::parse(key, value) {
                            issues.push(format!(
                                "{} '{}' {part}.{state}: {err}",
                                entry.category(),
                                entry.id
                            ));
                        }
                    }
                }
            }
        }

        issues
    }
}
