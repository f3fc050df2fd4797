//! Typography catalog entries and generated type scales.
//!
//! Type scales are never hand-authored: [`TypographyData::generate`] derives
//! every step from a font pairing's weights and a scale's base size and ratio
//! using a geometric progression.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scale steps and their exponent relative to `base`.
pub const TYPE_STEPS: [(&str, i32); 9] = [
    ("xs", -2),
    ("sm", -1),
    ("base", 0),
    ("lg", 1),
    ("xl", 2),
    ("2xl", 3),
    ("3xl", 4),
    ("4xl", 5),
    ("5xl", 6),
];

/// Ratio used when no type scale can be found.
pub const DEFAULT_RATIO: f64 = 1.25;

/// Base size in px used when no type scale can be found.
pub const DEFAULT_BASE_SIZE: f64 = 16.0;

/// A heading/body font pairing from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPairing {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Font stack for headings.
    pub heading_font: String,
    /// Font stack for body copy.
    pub body_font: String,
    /// Optional monospace font stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mono_font: Option<String>,
    /// Weight used by the larger steps.
    pub heading_weight: u16,
    /// Weight used by the smaller steps.
    pub body_weight: u16,
}

/// A modular scale definition from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    /// Catalog identifier (e.g. "major-third").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ratio between consecutive steps.
    pub ratio: f64,
    /// Size of the `base` step in px.
    #[serde(default = "default_base_size")]
    pub base_size: f64,
}

fn default_base_size() -> f64 {
    DEFAULT_BASE_SIZE
}

/// One step of a generated type scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStep {
    /// Font size as a CSS length (e.g. "20px").
    pub size: String,
    /// Unitless line height.
    pub line_height: f64,
    /// Font weight.
    pub weight: u16,
    /// Optional letter spacing as a CSS length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

/// Resolved typography tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyData {
    /// Font stack for headings.
    pub heading_font: String,
    /// Font stack for body copy.
    pub body_font: String,
    /// Optional monospace font stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mono_font: Option<String>,
    /// Generated steps in ascending size order.
    pub scale: IndexMap<String, TypeStep>,
}

impl TypographyData {
    /// Generates typography tokens from a font pairing and a type scale.
    ///
    /// `scale` of `None` uses [`DEFAULT_RATIO`] and [`DEFAULT_BASE_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tokensmith::models::{FontPairing, TypographyData};
    ///
    /// let pairing = FontPairing {
    ///     id: "inter".into(),
    ///     name: "Inter".into(),
    ///     heading_font: "Inter".into(),
    ///     body_font: "Inter".into(),
    ///     mono_font: None,
    ///     heading_weight: 700,
    ///     body_weight: 400,
    /// };
    /// let typography = TypographyData::generate(&pairing, None);
    /// assert_eq!(typography.scale["base"].size, "16px");
    /// assert_eq!(typography.scale["lg"].size, "20px");
    /// ```
    #[must_use]
    pub fn generate(pairing: &FontPairing, scale: Option<&TypeScale>) -> Self {
        let (ratio, base) = scale.map_or((DEFAULT_RATIO, DEFAULT_BASE_SIZE), |s| {
            (s.ratio, s.base_size)
        });

        let steps = TYPE_STEPS
            .iter()
            .map(|(name, exponent)| {
                let size = base * ratio.powi(*exponent);
                let step = TypeStep {
                    size: format!("{}px", format_number(size)),
                    line_height: line_height_for(*exponent),
                    weight: if *exponent <= 1 {
                        pairing.body_weight
                    } else {
                        pairing.heading_weight
                    },
                    letter_spacing: (*exponent >= 4).then(|| "-0.02em".to_string()),
                };
                ((*name).to_string(), step)
            })
            .collect();

        Self {
            heading_font: pairing.heading_font.clone(),
            body_font: pairing.body_font.clone(),
            mono_font: pairing.mono_font.clone(),
            scale: steps,
        }
    }
}

fn line_height_for(exponent: i32) -> f64 {
    match exponent {
        i32::MIN..=0 => 1.5,
        1..=2 => 1.3,
        _ => 1.2,
    }
}

/// Formats a number with at most two decimals and no trailing zeros.
///
/// # Examples
///
/// ```
/// use tokensmith::models::typography::format_number;
///
/// assert_eq!(format_number(31.25), "31.25");
/// assert_eq!(format_number(39.0625), "39.06");
/// assert_eq!(format_number(20.0), "20");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = format!("{:.2}", (value * 100.0).round() / 100.0);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
