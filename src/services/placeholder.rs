//! Placeholder expansion and composite effects.
//!
//! Style values may embed color tokens:
//!
//! - `__role` expands to the resolved value of that role,
//! - `__role-NN` expands to the role's color at `NN`% opacity as `rgba(...)`.
//!
//! Role names overlap (`primary` is a prefix of `primaryForeground`), so the
//! tokenizer alternation lists the known names longest first and the regex
//! engine's leftmost-first semantics always pick the longest role. Unknown
//! tokens pass through untouched.
//!
//! Two meta-keys carry composite effects that expand into a full CSS property
//! rather than a token substitution; see [`Effect`].

use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::style::TOKEN_MARKER;
use crate::models::{ColorKey, ColorMode, RgbColor};

/// Meta-key that tints the background on interaction.
pub const HOVER_BACKGROUND_KEY: &str = "__hoverBg";

/// Meta-key that adds a glow-style box shadow on interaction.
pub const HOVER_SHADOW_KEY: &str = "__hoverShadow";

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = ColorKey::ROLES.iter().map(ColorKey::field_name).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let pattern = format!(r"{TOKEN_MARKER}({})(?:-(\d+))?", names.join("|"));
    Regex::new(&pattern).expect("role names form a valid pattern")
});

/// Returns true if `value` contains at least one known color token.
#[must_use]
pub fn contains_token(value: &str) -> bool {
    value.contains(TOKEN_MARKER) && TOKEN_PATTERN.is_match(value)
}

/// Replaces every color token in `value` with its resolved color.
///
/// Opacity percentages above 100 are clamped. When a role's value is not a
/// hex color the raw value is substituted for both token forms.
///
/// # Examples
///
/// ```
/// use tokensmith::models::Scheme;
/// use tokensmith::services::color_resolver::default_mode;
/// use tokensmith::services::expand;
///
/// let colors = default_mode(Scheme::Light);
/// assert_eq!(expand("__primary", &colors), "#3B82F6");
/// assert_eq!(expand("__primary-20", &colors), "rgba(59, 130, 246, 0.2)");
/// assert_eq!(expand("1px solid __border", &colors), "1px solid #E2E8F0");
/// assert_eq!(expand("__unknownRole", &colors), "__unknownRole");
/// ```
#[must_use]
pub fn expand(value: &str, colors: &ColorMode) -> String {
    if !value.contains(TOKEN_MARKER) {
        return value.to_string();
    }

    TOKEN_PATTERN
        .replace_all(value, |caps: &Captures<'_>| {
            let Some(key) = ColorKey::from_role_name(&caps[1]) else {
                return caps[0].to_string();
            };
            let color = colors.get(key);
            match caps.get(2) {
                None => color.to_string(),
                Some(percent) => tint(color, parse_percent(percent.as_str())),
            }
        })
        .into_owned()
}

fn parse_percent(digits: &str) -> u8 {
    digits
        .parse::<u32>()
        .map_or(100, |p| u8::try_from(p.min(100)).unwrap_or(100))
}

/// Renders `color` at `percent` opacity, or returns it unchanged if it is not hex.
fn tint(color: &str, percent: u8) -> String {
    RgbColor::from_hex(color).map_or_else(|_| color.to_string(), |rgb| rgb.to_rgba_css(percent))
}

/// Error for a composite-effect meta-key with an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    /// `__hoverShadow` names no known shadow.
    #[error("Unknown hover shadow '{0}'. Expected glow, glow-tight, neon, neon-tight or pulse")]
    UnknownShadow(String),
    /// `__hoverBg` is neither `solid` nor `<role>-<percent>`.
    #[error("Invalid hover background '{0}'. Expected solid, <percent> or <role>-<percent>")]
    InvalidBackground(String),
}

/// Background tint applied by `__hoverBg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverBackground {
    /// Opaque primary color.
    Solid,
    /// A role at the given opacity.
    Scaled(ColorKey, u8),
}

impl FromStr for HoverBackground {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix(TOKEN_MARKER).unwrap_or(trimmed);
        let invalid = || EffectError::InvalidBackground(s.to_string());

        if body == "solid" {
            return Ok(Self::Solid);
        }
        if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Self::Scaled(ColorKey::Primary, parse_percent(body)));
        }
        if let Some(key) = ColorKey::from_role_name(body) {
            return Ok(Self::Scaled(key, 100));
        }

        let (role, percent) = body.rsplit_once('-').ok_or_else(invalid)?;
        let key = ColorKey::from_role_name(role).ok_or_else(invalid)?;
        if percent.is_empty() || !percent.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        Ok(Self::Scaled(key, parse_percent(percent)))
    }
}

/// Named glow presets for `__hoverShadow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowEffect {
    /// Soft two-layer glow
    Glow,
    /// Small two-layer glow
    GlowTight,
    /// Solid core with a wide halo
    Neon,
    /// Solid core with a narrow halo
    NeonTight,
    /// Ring plus soft glow
    Pulse,
}

impl ShadowEffect {
    /// Returns the directive value naming this shadow.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Glow => "glow",
            Self::GlowTight => "glow-tight",
            Self::Neon => "neon",
            Self::NeonTight => "neon-tight",
            Self::Pulse => "pulse",
        }
    }

    /// Builds the `box-shadow` value around the mode's primary color.
    #[must_use]
    pub fn shadow(&self, colors: &ColorMode) -> String {
        let hex = colors.primary.as_str();
        let p = |percent: u8| tint(hex, percent);
        match self {
            Self::Glow => format!("0 0 20px {}, 0 0 40px {}", p(50), p(25)),
            Self::GlowTight => format!("0 0 6px {}, 0 0 12px {}", p(60), p(30)),
            Self::Neon => format!(
                "0 0 5px {hex}, 0 0 10px {hex}, 0 0 20px {}, 0 0 40px {}",
                p(80),
                p(40)
            ),
            Self::NeonTight => format!("0 0 2px {hex}, 0 0 6px {}, 0 0 12px {}", p(80), p(40)),
            Self::Pulse => format!("0 0 0 4px {}, 0 0 16px {}", p(25), p(45)),
        }
    }
}

impl fmt::Display for ShadowEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShadowEffect {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "glow" => Ok(Self::Glow),
            "glow-tight" => Ok(Self::GlowTight),
            "neon" => Ok(Self::Neon),
            "neon-tight" => Ok(Self::NeonTight),
            "pulse" => Ok(Self::Pulse),
            _ => Err(EffectError::UnknownShadow(s.to_string())),
        }
    }
}

/// A composite effect declared through a meta-key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `__hoverBg`, writes `backgroundColor`
    HoverBackground(HoverBackground),
    /// `__hoverShadow`, writes `boxShadow`
    HoverShadow(ShadowEffect),
}

impl Effect {
    /// Parses a style property as an effect.
    ///
    /// Returns `Ok(None)` for properties that are not effect meta-keys.
    ///
    /// # Errors
    /// Returns an [`EffectError`] when an effect meta-key has an unusable value.
    pub fn parse(key: &str, value: &str) -> Result<Option<Self>, EffectError> {
        match key {
            HOVER_BACKGROUND_KEY => value.parse().map(|bg| Some(Self::HoverBackground(bg))),
            HOVER_SHADOW_KEY => value.parse().map(|shadow| Some(Self::HoverShadow(shadow))),
            _ => Ok(None),
        }
    }

    /// CSS property (camelCase) this effect writes.
    #[must_use]
    pub const fn target_property(&self) -> &'static str {
        match self {
            Self::HoverBackground(_) => "backgroundColor",
            Self::HoverShadow(_) => "boxShadow",
        }
    }

    /// Renders the value of [`Self::target_property`] against `colors`.
    #[must_use]
    pub fn render(&self, colors: &ColorMode) -> String {
        match self {
            Self::HoverBackground(HoverBackground::Solid) => colors.primary.clone(),
            Self::HoverBackground(HoverBackground::Scaled(key, percent)) => {
                tint(colors.get(*key), *percent)
            }
            Self::HoverShadow(shadow) => shadow.shadow(colors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scheme;
    use crate::services::color_resolver::default_mode;

    fn light() -> ColorMode {
        default_mode(Scheme::Light)
    }

    #[test]
    fn test_longest_role_wins() {
        let colors = light();
        assert_eq!(expand("__primaryForeground", &colors), "#FFFFFF");
        assert_eq!(expand("__textSecondary", &colors), "#334155");
        assert_eq!(expand("__surfaceAlt", &colors), "#F1F5F9");
        assert_eq!(expand("__accentForeground-50", &colors), "rgba(15, 23, 42, 0.5)");
    }

    #[test]
    fn test_multiple_tokens_in_one_value() {
        let colors = light();
        assert_eq!(
            expand("0 0 0 3px __primary-20, inset 0 0 0 1px __border", &colors),
            "0 0 0 3px rgba(59, 130, 246, 0.2), inset 0 0 0 1px #E2E8F0"
        );
    }

    #[test]
    fn test_percent_clamps_to_100() {
        let colors = light();
        assert_eq!(expand("__primary-250", &colors), "rgba(59, 130, 246, 1)");
        assert_eq!(expand("__primary-1000", &colors), "rgba(59, 130, 246, 1)");
        assert_eq!(expand("__primary-99999999999 x", &colors), "rgba(59, 130, 246, 1) x");
        assert_eq!(expand("__primary-0", &colors), "rgba(59, 130, 246, 0)");
    }

    #[test]
    fn test_non_hex_role_passes_raw_value() {
        let mut colors = light();
        colors.primary = "rebeccapurple".to_string();
        assert_eq!(expand("__primary", &colors), "rebeccapurple");
        assert_eq!(expand("__primary-40", &colors), "rebeccapurple");
    }

    #[test]
    fn test_unknown_and_semantic_tokens_pass_through() {
        let colors = light();
        assert_eq!(expand("__success", &colors), "__success");
        assert_eq!(expand("plain value", &colors), "plain value");
        assert!(!contains_token("__nothing"));
        assert!(contains_token("2px solid __primary-40"));
    }

    #[test]
    fn test_expand_is_idempotent() {
        let colors = light();
        for value in ["__primary", "__primary-20", "1px solid __border", "__bogus", "none"] {
            let once = expand(value, &colors);
            assert_eq!(expand(&once, &colors), once);
        }
    }

    #[test]
    fn test_parse_hover_background() {
        assert_eq!(
            Effect::parse(HOVER_BACKGROUND_KEY, "primary-20"),
            Ok(Some(Effect::HoverBackground(HoverBackground::Scaled(ColorKey::Primary, 20))))
        );
        assert_eq!(
            Effect::parse(HOVER_BACKGROUND_KEY, "15"),
            Ok(Some(Effect::HoverBackground(HoverBackground::Scaled(ColorKey::Primary, 15))))
        );
        assert_eq!(
            Effect::parse(HOVER_BACKGROUND_KEY, "accent-10"),
            Ok(Some(Effect::HoverBackground(HoverBackground::Scaled(ColorKey::Accent, 10))))
        );
        assert_eq!(
            Effect::parse(HOVER_BACKGROUND_KEY, "solid"),
            Ok(Some(Effect::HoverBackground(HoverBackground::Solid)))
        );
        assert!(Effect::parse(HOVER_BACKGROUND_KEY, "sideways-20").is_err());
        assert!(Effect::parse(HOVER_BACKGROUND_KEY, "primary-x").is_err());
    }

    #[test]
    fn test_parse_non_effect_keys() {
        assert_eq!(Effect::parse("__thumbSize", "18px"), Ok(None));
        assert_eq!(Effect::parse("color", "__primary"), Ok(None));
    }

    #[test]
    fn test_unknown_shadow_names_value() {
        let err = Effect::parse(HOVER_SHADOW_KEY, "sparkle").unwrap_err();
        assert!(err.to_string().contains("sparkle"));
    }

    #[test]
    fn test_shadow_strings() {
        let colors = light();
        assert_eq!(
            ShadowEffect::Glow.shadow(&colors),
            "0 0 20px rgba(59, 130, 246, 0.5), 0 0 40px rgba(59, 130, 246, 0.25)"
        );
        assert_eq!(
            ShadowEffect::NeonTight.shadow(&colors),
            "0 0 2px #3B82F6, 0 0 6px rgba(59, 130, 246, 0.8), 0 0 12px rgba(59, 130, 246, 0.4)"
        );
        assert_eq!(
            ShadowEffect::Pulse.shadow(&colors),
            "0 0 0 4px rgba(59, 130, 246, 0.25), 0 0 16px rgba(59, 130, 246, 0.45)"
        );
    }

    #[test]
    fn test_effect_render_targets() {
        let colors = light();
        let bg = Effect::HoverBackground(HoverBackground::Scaled(ColorKey::Primary, 20));
        assert_eq!(bg.target_property(), "backgroundColor");
        assert_eq!(bg.render(&colors), "rgba(59, 130, 246, 0.2)");
        assert_eq!(Effect::HoverBackground(HoverBackground::Solid).render(&colors), "#3B82F6");
        assert_eq!(Effect::HoverShadow(ShadowEffect::Glow).target_property(), "boxShadow");
    }
}
