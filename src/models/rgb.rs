//! RGB color handling with hex parsing and target-format encodings.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced when a string is not a usable hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Wrong number of hex digits.
    #[error("Invalid hex color format '{0}'. Expected #RGB or #RRGGBB")]
    InvalidLength(String),
    /// A channel contained non-hex characters.
    #[error("Invalid {channel} channel in hex color '{value}'")]
    InvalidChannel {
        /// Channel name ("red", "green" or "blue").
        channel: &'static str,
        /// The offending input.
        value: String,
    },
}

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Every backend that needs numeric channels (rgba() expansion, Swift floats,
/// Kotlin/Dart ARGB literals) goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB" (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tokensmith::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("#0f8").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 136));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorParseError::InvalidLength(trimmed.to_string())),
        };

        let channel = |range: std::ops::Range<usize>, name: &'static str| {
            expanded
                .get(range)
                .filter(|pair| pair.chars().all(|c| c.is_ascii_hexdigit()))
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorParseError::InvalidChannel {
                    channel: name,
                    value: trimmed.to_string(),
                })
        };

        Ok(Self::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Returns true if `value` parses as a hex color.
    #[must_use]
    pub fn is_hex(value: &str) -> bool {
        Self::from_hex(value).is_ok()
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use tokensmith::models::RgbColor;
    ///
    /// let color = RgbColor::new(0, 128, 255);
    /// assert_eq!(color.to_hex(), "#0080FF");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Renders the color as a CSS `rgba()` value with the given percentage alpha.
    ///
    /// `percent` is clamped to 0-100 and written as `percent / 100`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokensmith::models::RgbColor;
    ///
    /// let color = RgbColor::new(59, 130, 246);
    /// assert_eq!(color.to_rgba_css(20), "rgba(59, 130, 246, 0.2)");
    /// assert_eq!(color.to_rgba_css(100), "rgba(59, 130, 246, 1)");
    /// ```
    #[must_use]
    pub fn to_rgba_css(&self, percent: u8) -> String {
        let alpha = f64::from(percent.min(100)) / 100.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Returns each channel normalized to 0.0-1.0, rounded to three decimals.
    #[must_use]
    pub fn to_unit_floats(&self) -> (f64, f64, f64) {
        let unit = |channel: u8| (f64::from(channel) / 255.0 * 1000.0).round() / 1000.0;
        (unit(self.r), unit(self.g), unit(self.b))
    }

    /// Returns the opaque ARGB literal used by Kotlin and Dart (`0xFFRRGGBB`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tokensmith::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(59, 130, 246).to_argb_literal(), "0xFF3B82F6");
    /// ```
    #[must_use]
    pub fn to_argb_literal(&self) -> String {
        format!("0xFF{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));

        let color = RgbColor::from_hex("  #FFFFFF  ").unwrap();
        assert_eq!(color, RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_from_hex_short_form() {
        assert_eq!(RgbColor::from_hex("#fff").unwrap(), RgbColor::new(255, 255, 255));
        assert_eq!(RgbColor::from_hex("123").unwrap(), RgbColor::new(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        assert!(RgbColor::from_hex("rgb(1,2,3)").is_err());
        assert!(RgbColor::from_hex("#+F+F+F").is_err());
        assert!(RgbColor::from_hex("+FF").is_err());
        assert_eq!(
            RgbColor::from_hex("#FF+F00").unwrap_err(),
            ColorParseError::InvalidChannel {
                channel: "green",
                value: "#FF+F00".to_string()
            }
        );
    }

    #[test]
    fn test_from_hex_error_names_channel() {
        let err = RgbColor::from_hex("#12ZZ56").unwrap_err();
        assert_eq!(
            err,
            ColorParseError::InvalidChannel {
                channel: "green",
                value: "#12ZZ56".to_string()
            }
        );
    }

    #[test]
    fn test_to_hex_roundtrip() {
        let original = RgbColor::new(123, 45, 67);
        let parsed = RgbColor::from_hex(&original.to_hex()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_to_rgba_css() {
        let color = RgbColor::new(17, 34, 51);
        assert_eq!(color.to_rgba_css(5), "rgba(17, 34, 51, 0.05)");
        assert_eq!(color.to_rgba_css(0), "rgba(17, 34, 51, 0)");
        assert_eq!(color.to_rgba_css(150), "rgba(17, 34, 51, 1)");
    }

    #[test]
    fn test_to_unit_floats() {
        let (r, g, b) = RgbColor::new(255, 0, 128).to_unit_floats();
        assert!((r - 1.0).abs() < f64::EPSILON);
        assert!(g.abs() < f64::EPSILON);
        assert!((b - 0.502).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_argb_literal_is_opaque() {
        assert_eq!(RgbColor::new(0, 0, 0).to_argb_literal(), "0xFF000000");
    }
}
