//! Color palette catalog entries.
//!
//! A palette provides a light/dark color set pair plus an 11-step primary
//! shade ramp (50 through 950). Palettes are immutable catalog data selected
//! by ID.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ColorModeLayer, Scheme};

/// Shade steps of a primary scale, lightest first.
pub const SHADE_STEPS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// A palette catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPaletteData {
    /// Catalog identifier (kebab-case).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Light-mode colors.
    #[serde(default)]
    pub light: ColorModeLayer,
    /// Dark-mode colors.
    #[serde(default)]
    pub dark: ColorModeLayer,
    /// Primary shade ramp keyed by step ("50" … "950").
    #[serde(default)]
    pub primary_scale: BTreeMap<String, String>,
}

impl ColorPaletteData {
    /// Returns the color layer for one scheme.
    #[must_use]
    pub const fn mode(&self, scheme: Scheme) -> &ColorModeLayer {
        match scheme {
            Scheme::Light => &self.light,
            Scheme::Dark => &self.dark,
        }
    }

    /// Get a shade by step (e.g. 500).
    #[must_use]
    pub fn shade(&self, step: u16) -> Option<&str> {
        self.primary_scale.get(&step.to_string()).map(String::as_str)
    }

    /// Get the "primary" shade (500 level, or the middle step that exists).
    #[must_use]
    pub fn primary_shade(&self) -> Option<&str> {
        self.shade(500).or_else(|| {
            let present: Vec<&str> = SHADE_STEPS.iter().filter_map(|s| self.shade(*s)).collect();
            present.get(present.len() / 2).copied()
        })
    }

    /// Returns the steps of [`SHADE_STEPS`] missing from the primary scale.
    #[must_use]
    pub fn missing_shades(&self) -> Vec<u16> {
        SHADE_STEPS
            .iter()
            .copied()
            .filter(|step| self.shade(*step).is_none())
            .collect()
    }
}
