//! Color resolution.
//!
//! Every color key resolves through three layers, first hit wins:
//!
//! 1. the user's override for that scheme, when it is a hex color,
//! 2. the selected palette's value for that scheme,
//! 3. the built-in default for that scheme.
//!
//! The result is always a complete [`ColorMode`], even when the palette only
//! defines a handful of keys.

use std::collections::BTreeMap;

use crate::models::{
    ColorKey, ColorMode, ColorOverrides, ColorPaletteData, ResolvedColors, RgbColor, Scheme,
};

/// Returns the built-in default for one key in one scheme.
///
/// # Examples
///
/// ```
/// use tokensmith::models::{ColorKey, Scheme};
/// use tokensmith::services::default_color;
///
/// assert_eq!(default_color(Scheme::Light, ColorKey::Primary), "#3B82F6");
/// assert_eq!(default_color(Scheme::Dark, ColorKey::Background), "#0F172A");
/// ```
#[must_use]
pub const fn default_color(scheme: Scheme, key: ColorKey) -> &'static str {
    match scheme {
        Scheme::Light => match key {
            ColorKey::Background | ColorKey::PrimaryForeground | ColorKey::SecondaryForeground => {
                "#FFFFFF"
            }
            ColorKey::Surface => "#F8FAFC",
            ColorKey::SurfaceAlt => "#F1F5F9",
            ColorKey::Border => "#E2E8F0",
            ColorKey::Text | ColorKey::AccentForeground => "#0F172A",
            ColorKey::TextSecondary => "#334155",
            ColorKey::TextMuted | ColorKey::Secondary => "#64748B",
            ColorKey::Primary | ColorKey::Info => "#3B82F6",
            ColorKey::Accent | ColorKey::Warning => "#F59E0B",
            ColorKey::Success => "#22C55E",
            ColorKey::Error => "#EF4444",
        },
        Scheme::Dark => match key {
            ColorKey::Background
            | ColorKey::PrimaryForeground
            | ColorKey::SecondaryForeground
            | ColorKey::AccentForeground => "#0F172A",
            ColorKey::Surface => "#1E293B",
            ColorKey::SurfaceAlt | ColorKey::Border => "#334155",
            ColorKey::Text => "#F8FAFC",
            ColorKey::TextSecondary => "#CBD5E1",
            ColorKey::TextMuted | ColorKey::Secondary => "#94A3B8",
            ColorKey::Primary | ColorKey::Info => "#60A5FA",
            ColorKey::Accent | ColorKey::Warning => "#FBBF24",
            ColorKey::Success => "#4ADE80",
            ColorKey::Error => "#F87171",
        },
    }
}

/// Returns the complete built-in color set for a scheme.
#[must_use]
pub fn default_mode(scheme: Scheme) -> ColorMode {
    resolve_mode(scheme, &BTreeMap::new(), None)
}

/// Resolves one scheme.
///
/// `overrides` are the user overrides for this scheme only, keyed by
/// [`ColorKey::as_key`]. Unknown keys and non-hex values are ignored.
#[must_use]
pub fn resolve_mode(
    scheme: Scheme,
    overrides: &BTreeMap<String, String>,
    palette: Option<&ColorPaletteData>,
) -> ColorMode {
    let layer = palette.map(|p| p.mode(scheme));
    let pick = |key: ColorKey| -> String {
        overrides
            .get(&key.as_key())
            .map(String::as_str)
            .filter(|value| RgbColor::is_hex(value))
            .or_else(|| layer.and_then(|l| l.get(key)))
            .unwrap_or_else(|| default_color(scheme, key))
            .to_string()
    };

    ColorMode::from_fn(pick)
}

/// Resolves both schemes.
#[must_use]
pub fn resolve_colors(
    overrides: &ColorOverrides,
    palette: Option<&ColorPaletteData>,
) -> ResolvedColors {
    ResolvedColors {
        light: resolve_mode(Scheme::Light, &overrides.light, palette),
        dark: resolve_mode(Scheme::Dark, &overrides.dark, palette),
    }
}
