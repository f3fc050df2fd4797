//! Color roles, complete and sparse color sets, and per-scheme user overrides.
//!
//! A [`ColorMode`] is always complete: every role and semantic color is present.
//! Sparse data (palette modes, overrides) lives in [`ColorModeLayer`] and
//! [`ColorOverrides`] and only becomes a `ColorMode` through the color resolver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::rgb::RgbColor;

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Light mode
    Light,
    /// Dark mode
    Dark,
}

impl Scheme {
    /// Both schemes, light first.
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    /// Returns the lowercase identifier ("light" / "dark").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown color scheme '{other}'. Expected light or dark")),
        }
    }
}

/// Every addressable color in a [`ColorMode`].
///
/// The first thirteen are the plain roles usable as `__role` tokens; the last
/// four live under the nested `semantic` map and are addressed as
/// `semantic.<name>` in overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorKey {
    /// Page background
    Background,
    /// Raised surface (cards, panels)
    Surface,
    /// Alternate surface (stripes, wells)
    SurfaceAlt,
    /// Borders and dividers
    Border,
    /// Body text
    Text,
    /// Secondary text
    TextSecondary,
    /// Muted text (hints, placeholders)
    TextMuted,
    /// Brand color
    Primary,
    /// Content drawn on top of primary
    PrimaryForeground,
    /// Secondary brand color
    Secondary,
    /// Content drawn on top of secondary
    SecondaryForeground,
    /// Accent color
    Accent,
    /// Content drawn on top of accent
    AccentForeground,
    /// Semantic success
    Success,
    /// Semantic warning
    Warning,
    /// Semantic error
    Error,
    /// Semantic info
    Info,
}

impl ColorKey {
    /// The thirteen plain color roles, in declaration order.
    pub const ROLES: [Self; 13] = [
        Self::Background,
        Self::Surface,
        Self::SurfaceAlt,
        Self::Border,
        Self::Text,
        Self::TextSecondary,
        Self::TextMuted,
        Self::Primary,
        Self::PrimaryForeground,
        Self::Secondary,
        Self::SecondaryForeground,
        Self::Accent,
        Self::AccentForeground,
    ];

    /// The four semantic colors.
    pub const SEMANTIC: [Self; 4] = [Self::Success, Self::Warning, Self::Error, Self::Info];

    /// Every key, roles first then semantic.
    pub const ALL: [Self; 17] = [
        Self::Background,
        Self::Surface,
        Self::SurfaceAlt,
        Self::Border,
        Self::Text,
        Self::TextSecondary,
        Self::TextMuted,
        Self::Primary,
        Self::PrimaryForeground,
        Self::Secondary,
        Self::SecondaryForeground,
        Self::Accent,
        Self::AccentForeground,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Info,
    ];

    /// Returns the field name as it appears in JSON (`primaryForeground`, `success`).
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Surface => "surface",
            Self::SurfaceAlt => "surfaceAlt",
            Self::Border => "border",
            Self::Text => "text",
            Self::TextSecondary => "textSecondary",
            Self::TextMuted => "textMuted",
            Self::Primary => "primary",
            Self::PrimaryForeground => "primaryForeground",
            Self::Secondary => "secondary",
            Self::SecondaryForeground => "secondaryForeground",
            Self::Accent => "accent",
            Self::AccentForeground => "accentForeground",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Returns true for the four semantic colors.
    #[must_use]
    pub const fn is_semantic(&self) -> bool {
        matches!(self, Self::Success | Self::Warning | Self::Error | Self::Info)
    }

    /// Returns the override key: the field name, prefixed with `semantic.` for
    /// semantic colors.
    #[must_use]
    pub fn as_key(&self) -> String {
        if self.is_semantic() {
            format!("semantic.{}", self.field_name())
        } else {
            self.field_name().to_string()
        }
    }

    /// Parses an override key (`primary`, `semantic.error`).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.strip_prefix("semantic.") {
            Some(name) => Self::SEMANTIC.into_iter().find(|k| k.field_name() == name),
            None => Self::ROLES.into_iter().find(|k| k.field_name() == key),
        }
    }

    /// Parses a plain role name as used inside `__role` tokens.
    #[must_use]
    pub fn from_role_name(name: &str) -> Option<Self> {
        Self::ROLES.into_iter().find(|k| k.field_name() == name)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

/// The nested semantic color map of a complete [`ColorMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticColors {
    /// Success color
    pub success: String,
    /// Warning color
    pub warning: String,
    /// Error color
    pub error: String,
    /// Info color
    pub info: String,
}

/// A complete set of resolved colors for one scheme.
///
/// Every key is always present; consumers never see a partial mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMode {
    /// Page background
    pub background: String,
    /// Raised surface
    pub surface: String,
    /// Alternate surface
    pub surface_alt: String,
    /// Borders
    pub border: String,
    /// Body text
    pub text: String,
    /// Secondary text
    pub text_secondary: String,
    /// Muted text
    pub text_muted: String,
    /// Brand color
    pub primary: String,
    /// Content on primary
    pub primary_foreground: String,
    /// Secondary brand color
    pub secondary: String,
    /// Content on secondary
    pub secondary_foreground: String,
    /// Accent color
    pub accent: String,
    /// Content on accent
    pub accent_foreground: String,
    /// Semantic colors
    pub semantic: SemanticColors,
}

impl ColorMode {
    /// Builds a complete mode by asking `value_for` for every key.
    pub fn from_fn(mut value_for: impl FnMut(ColorKey) -> String) -> Self {
        Self {
            background: value_for(ColorKey::Background),
            surface: value_for(ColorKey::Surface),
            surface_alt: value_for(ColorKey::SurfaceAlt),
            border: value_for(ColorKey::Border),
            text: value_for(ColorKey::Text),
            text_secondary: value_for(ColorKey::TextSecondary),
            text_muted: value_for(ColorKey::TextMuted),
            primary: value_for(ColorKey::Primary),
            primary_foreground: value_for(ColorKey::PrimaryForeground),
            secondary: value_for(ColorKey::Secondary),
            secondary_foreground: value_for(ColorKey::SecondaryForeground),
            accent: value_for(ColorKey::Accent),
            accent_foreground: value_for(ColorKey::AccentForeground),
            semantic: SemanticColors {
                success: value_for(ColorKey::Success),
                warning: value_for(ColorKey::Warning),
                error: value_for(ColorKey::Error),
                info: value_for(ColorKey::Info),
            },
        }
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: ColorKey) -> &str {
        match key {
            ColorKey::Background => &self.background,
            ColorKey::Surface => &self.surface,
            ColorKey::SurfaceAlt => &self.surface_alt,
            ColorKey::Border => &self.border,
            ColorKey::Text => &self.text,
            ColorKey::TextSecondary => &self.text_secondary,
            ColorKey::TextMuted => &self.text_muted,
            ColorKey::Primary => &self.primary,
            ColorKey::PrimaryForeground => &self.primary_foreground,
            ColorKey::Secondary => &self.secondary,
            ColorKey::SecondaryForeground => &self.secondary_foreground,
            ColorKey::Accent => &self.accent,
            ColorKey::AccentForeground => &self.accent_foreground,
            ColorKey::Success => &self.semantic.success,
            ColorKey::Warning => &self.semantic.warning,
            ColorKey::Error => &self.semantic.error,
            ColorKey::Info => &self.semantic.info,
        }
    }

    /// Replaces the value stored for `key`.
    pub fn set(&mut self, key: ColorKey, value: impl Into<String>) {
        let slot = match key {
            ColorKey::Background => &mut self.background,
            ColorKey::Surface => &mut self.surface,
            ColorKey::SurfaceAlt => &mut self.surface_alt,
            ColorKey::Border => &mut self.border,
            ColorKey::Text => &mut self.text,
            ColorKey::TextSecondary => &mut self.text_secondary,
            ColorKey::TextMuted => &mut self.text_muted,
            ColorKey::Primary => &mut self.primary,
            ColorKey::PrimaryForeground => &mut self.primary_foreground,
            ColorKey::Secondary => &mut self.secondary,
            ColorKey::SecondaryForeground => &mut self.secondary_foreground,
            ColorKey::Accent => &mut self.accent,
            ColorKey::AccentForeground => &mut self.accent_foreground,
            ColorKey::Success => &mut self.semantic.success,
            ColorKey::Warning => &mut self.semantic.warning,
            ColorKey::Error => &mut self.semantic.error,
            ColorKey::Info => &mut self.semantic.info,
        };
        *slot = value.into();
    }

    /// Iterates every `(key, value)` pair in [`ColorKey::ALL`] order.
    pub fn entries(&self) -> impl Iterator<Item = (ColorKey, &str)> {
        ColorKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Resolved colors for both schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColors {
    /// Light-mode colors
    pub light: ColorMode,
    /// Dark-mode colors
    pub dark: ColorMode,
}

impl ResolvedColors {
    /// Returns the colors for one scheme.
    #[must_use]
    pub const fn mode(&self, scheme: Scheme) -> &ColorMode {
        match scheme {
            Scheme::Light => &self.light,
            Scheme::Dark => &self.dark,
        }
    }
}

/// Sparse semantic colors of a [`ColorModeLayer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticLayer {
    /// Success color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    /// Warning color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Error color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Info color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// A possibly-partial color set, as stored in palette catalog entries.
///
/// Same JSON shape as [`ColorMode`], but any key may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ColorModeLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_muted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_foreground: Option<String>,
    pub semantic: SemanticLayer,
}

impl ColorModeLayer {
    /// Returns the value for `key`, if this layer defines it.
    #[must_use]
    pub fn get(&self, key: ColorKey) -> Option<&str> {
        let value = match key {
            ColorKey::Background => &self.background,
            ColorKey::Surface => &self.surface,
            ColorKey::SurfaceAlt => &self.surface_alt,
            ColorKey::Border => &self.border,
            ColorKey::Text => &self.text,
            ColorKey::TextSecondary => &self.text_secondary,
            ColorKey::TextMuted => &self.text_muted,
            ColorKey::Primary => &self.primary,
            ColorKey::PrimaryForeground => &self.primary_foreground,
            ColorKey::Secondary => &self.secondary,
            ColorKey::SecondaryForeground => &self.secondary_foreground,
            ColorKey::Accent => &self.accent,
            ColorKey::AccentForeground => &self.accent_foreground,
            ColorKey::Success => &self.semantic.success,
            ColorKey::Warning => &self.semantic.warning,
            ColorKey::Error => &self.semantic.error,
            ColorKey::Info => &self.semantic.info,
        };
        value.as_deref()
    }
}

impl From<&ColorMode> for ColorModeLayer {
    fn from(mode: &ColorMode) -> Self {
        let own = |key| Some(mode.get(key).to_string());
        Self {
            background: own(ColorKey::Background),
            surface: own(ColorKey::Surface),
            surface_alt: own(ColorKey::SurfaceAlt),
            border: own(ColorKey::Border),
            text: own(ColorKey::Text),
            text_secondary: own(ColorKey::TextSecondary),
            text_muted: own(ColorKey::TextMuted),
            primary: own(ColorKey::Primary),
            primary_foreground: own(ColorKey::PrimaryForeground),
            secondary: own(ColorKey::Secondary),
            secondary_foreground: own(ColorKey::SecondaryForeground),
            accent: own(ColorKey::Accent),
            accent_foreground: own(ColorKey::AccentForeground),
            semantic: SemanticLayer {
                success: own(ColorKey::Success),
                warning: own(ColorKey::Warning),
                error: own(ColorKey::Error),
                info: own(ColorKey::Info),
            },
        }
    }
}

/// User color overrides, keyed by scheme then by override key
/// (`primary`, `semantic.success`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    /// Light-mode overrides
    pub light: BTreeMap<String, String>,
    /// Dark-mode overrides
    pub dark: BTreeMap<String, String>,
}

impl ColorOverrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the overrides for one scheme.
    #[must_use]
    pub const fn for_scheme(&self, scheme: Scheme) -> &BTreeMap<String, String> {
        match scheme {
            Scheme::Light => &self.light,
            Scheme::Dark => &self.dark,
        }
    }

    /// Returns the overrides for one scheme, mutably.
    pub fn for_scheme_mut(&mut self, scheme: Scheme) -> &mut BTreeMap<String, String> {
        match scheme {
            Scheme::Light => &mut self.light,
            Scheme::Dark => &mut self.dark,
        }
    }

    /// Returns the override for `(scheme, key)`, if any.
    #[must_use]
    pub fn get(&self, scheme: Scheme, key: ColorKey) -> Option<&str> {
        self.for_scheme(scheme).get(&key.as_key()).map(String::as_str)
    }

    /// Sets the override for `(scheme, key)`.
    pub fn set(&mut self, scheme: Scheme, key: ColorKey, value: impl Into<String>) {
        self.for_scheme_mut(scheme).insert(key.as_key(), value.into());
    }

    /// Removes the override for `(scheme, key)`, returning the old value.
    pub fn remove(&mut self, scheme: Scheme, key: ColorKey) -> Option<String> {
        self.for_scheme_mut(scheme).remove(&key.as_key())
    }

    /// Returns true when neither scheme carries an override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }

    /// Returns true when some override would change a resolved color: a known
    /// key holding a hex value.
    #[must_use]
    pub fn has_effective(&self) -> bool {
        self.light
            .iter()
            .chain(&self.dark)
            .any(|(key, value)| ColorKey::from_key(key).is_some() && RgbColor::is_hex(value))
    }
}
