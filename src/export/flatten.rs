//! Token flattening and identifier naming shared by every backend.
//!
//! Nested token groups become a flat list of [`FlatToken`]s whose paths mirror
//! the JSON layout of [`DesignTokens`](crate::models::DesignTokens). Backends
//! and the token browser derive their names from these paths through the
//! helpers below, so a token is spelled the same way in every format.

use indexmap::IndexMap;

use crate::models::{ColorMode, DesignConfig, RgbColor, Scheme, TypographyData};
use crate::models::typography::format_number;

/// One leaf token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatToken {
    /// Path segments, e.g. `["colors", "light", "primaryForeground"]`
    pub path: Vec<String>,
    /// Literal value
    pub value: String,
}

impl FlatToken {
    fn new(path: &[&str], value: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|s| (*s).to_string()).collect(),
            value: value.into(),
        }
    }

    /// Path joined with dots.
    #[must_use]
    pub fn dot_path(&self) -> String {
        self.path.join(".")
    }

    /// Top-level group (`colors`, `typography`, `spacing`, ...).
    #[must_use]
    pub fn group(&self) -> &str {
        self.path.first().map_or("", String::as_str)
    }

    /// Color scheme of a color token.
    #[must_use]
    pub fn scheme(&self) -> Option<Scheme> {
        if self.group() != "colors" {
            return None;
        }
        self.path.get(1)?.parse().ok()
    }

    /// Path without the scheme segment.
    ///
    /// Light and dark values of a color share this path, which is what
    /// scheme-scoped outputs (CSS selectors, Tailwind) are keyed by.
    #[must_use]
    pub fn unscoped_path(&self) -> Vec<&str> {
        let scoped = self.scheme().is_some();
        self.path
            .iter()
            .enumerate()
            .filter(|(i, _)| !(scoped && *i == 1))
            .map(|(_, s)| s.as_str())
            .collect()
    }

    /// Parsed color when the value is a `#` hex color.
    #[must_use]
    pub fn color(&self) -> Option<RgbColor> {
        if !self.value.starts_with('#') {
            return None;
        }
        RgbColor::from_hex(&self.value).ok()
    }
}

/// Flattens every present token group of `config`.
///
/// Order: colors (light, then dark), typography, spacing, radius, shadows.
/// Absent groups contribute nothing.
#[must_use]
pub fn flatten_tokens(config: &DesignConfig) -> Vec<FlatToken> {
    let tokens = &config.tokens;
    let mut flat = Vec::new();

    if let Some(colors) = &tokens.colors {
        for scheme in Scheme::ALL {
            flatten_mode(&mut flat, scheme, colors.mode(scheme));
        }
    }
    if let Some(typography) = &tokens.typography {
        flatten_typography(&mut flat, typography);
    }
    for (group, values) in [
        ("spacing", &tokens.spacing),
        ("radius", &tokens.radius),
        ("shadows", &tokens.shadows),
    ] {
        if let Some(values) = values {
            flatten_scale(&mut flat, group, values);
        }
    }

    flat
}

fn flatten_mode(flat: &mut Vec<FlatToken>, scheme: Scheme, mode: &ColorMode) {
    for (key, value) in mode.entries() {
        let token = if key.is_semantic() {
            FlatToken::new(&["colors", scheme.as_str(), "semantic", key.field_name()], value)
        } else {
            FlatToken::new(&["colors", scheme.as_str(), key.field_name()], value)
        };
        flat.push(token);
    }
}

fn flatten_typography(flat: &mut Vec<FlatToken>, typography: &TypographyData) {
    flat.push(FlatToken::new(&["typography", "headingFont"], &typography.heading_font));
    flat.push(FlatToken::new(&["typography", "bodyFont"], &typography.body_font));
    if let Some(mono) = &typography.mono_font {
        flat.push(FlatToken::new(&["typography", "monoFont"], mono));
    }
    for (step, values) in &typography.scale {
        let mut fields = vec![
            ("size", values.size.clone()),
            ("lineHeight", format_number(values.line_height)),
            ("weight", values.weight.to_string()),
        ];
        if let Some(spacing) = &values.letter_spacing {
            fields.push(("letterSpacing", spacing.clone()));
        }
        for (field, value) in fields {
            flat.push(FlatToken::new(&["typography", "scale", step.as_str(), field], value));
        }
    }
}

fn flatten_scale(flat: &mut Vec<FlatToken>, group: &str, values: &IndexMap<String, String>) {
    for (key, value) in values {
        flat.push(FlatToken::new(&[group, key.as_str()], value));
    }
}

/// Splits one path segment into lowercase words.
///
/// camelCase humps and any non-alphanumeric character are word boundaries:
/// `primaryForeground` gives `primary foreground`, `2xl` stays whole.
fn words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in segment.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn path_words<S: AsRef<str>>(path: &[S]) -> Vec<String> {
    path.iter().flat_map(|s| words(s.as_ref())).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

fn guard_leading_digit(ident: String) -> String {
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else {
        ident
    }
}

/// CSS custom property name: `--` plus kebab-case words.
///
/// ```
/// use tokensmith::export::css_var_name;
///
/// assert_eq!(css_var_name(&["colors", "primaryForeground"]), "--colors-primary-foreground");
/// assert_eq!(css_var_name(&["typography", "scale", "2xl", "size"]), "--typography-scale-2xl-size");
/// ```
#[must_use]
pub fn css_var_name<S: AsRef<str>>(path: &[S]) -> String {
    format!("--{}", path_words(path).join("-"))
}

/// lowerCamelCase identifier (Swift, Dart, TypeScript keys).
#[must_use]
pub fn camel_ident<S: AsRef<str>>(path: &[S]) -> String {
    let ident: String = path_words(path)
        .iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.clone() } else { capitalize(word) })
        .collect();
    guard_leading_digit(ident)
}

/// UpperCamelCase identifier (Kotlin constants).
#[must_use]
pub fn pascal_ident<S: AsRef<str>>(path: &[S]) -> String {
    let ident: String = path_words(path).iter().map(|w| capitalize(w)).collect();
    guard_leading_digit(ident)
}

/// Double-quoted string literal with C-style escapes.
///
/// `escape_dollar` also escapes `$` for languages with string templates.
#[must_use]
pub fn quoted(value: &str, escape_dollar: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if escape_dollar => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Value safe to place in a single-line CSS declaration.
#[must_use]
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | ';' | '{' | '}') { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Custom property declaration for a token, named by its unscoped path.
#[must_use]
pub fn css_declaration(token: &FlatToken) -> String {
    format!(
        "{}: {};",
        css_var_name(&token.unscoped_path()),
        css_value(&token.value)
    )
}

/// `N` for a `Npx` length, `None` for anything else.
#[must_use]
pub fn px_number(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.trim().parse().ok()
}
