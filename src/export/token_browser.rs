//! Single-token formatting for the token browser.
//!
//! Each line is produced by the same naming helpers and declaration functions
//! the whole-file backends use, so a copied token always matches the exported
//! files.

use std::fmt;
use std::str::FromStr;

use super::flatten::{camel_ident, css_declaration, quoted, FlatToken};
use super::{kotlin, swift};

/// Encodings offered by the token browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    /// `--colors-primary: #3B82F6;`
    Css,
    /// `colorsLightPrimary: "#3B82F6",`
    KeyValue,
    /// `public static let colorsLightPrimary = Color(...)`
    Swift,
    /// `val ColorsLightPrimary = Color(0xFF3B82F6)`
    Kotlin,
}

impl TokenFormat {
    /// Every format, in display order.
    pub const ALL: [Self; 4] = [Self::Css, Self::KeyValue, Self::Swift, Self::Kotlin];

    /// Format name as accepted on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::KeyValue => "key-value",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| format!("Unknown token format '{s}'. Expected css, key-value, swift or kotlin"))
    }
}

/// Formats one token as a single line.
#[must_use]
pub fn format_token(token: &FlatToken, format: TokenFormat) -> String {
    match format {
        TokenFormat::Css => css_declaration(token),
        TokenFormat::KeyValue => {
            format!("{}: {},", camel_ident(&token.path), quoted(&token.value, false))
        }
        TokenFormat::Swift => swift::declaration(token),
        TokenFormat::Kotlin => kotlin::declaration(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::flatten::flatten_tokens;
    use crate::export::{Exporter, KotlinExporter, SwiftExporter};
    use crate::models::{Catalog, ColorOverrides, Selections};
    use crate::services::assemble;

    fn primary() -> FlatToken {
        FlatToken {
            path: vec!["colors".into(), "light".into(), "primary".into()],
            value: "#3B82F6".into(),
        }
    }

    #[test]
    fn test_each_format() {
        let token = primary();
        assert_eq!(format_token(&token, TokenFormat::Css), "--colors-primary: #3B82F6;");
        assert_eq!(
            format_token(&token, TokenFormat::KeyValue),
            "colorsLightPrimary: \"#3B82F6\","
        );
        assert!(format_token(&token, TokenFormat::Swift).starts_with("public static let colorsLightPrimary"));
        assert_eq!(
            format_token(&token, TokenFormat::Kotlin),
            "val ColorsLightPrimary = Color(0xFF3B82F6)"
        );
    }

    #[test]
    fn test_lines_match_exported_files() {
        let mut selections = Selections::new();
        selections.insert("colors".to_string(), "forest".to_string());
        selections.insert("spacing".to_string(), "comfortable".to_string());
        let config = assemble(
            &Catalog::load().unwrap(),
            &selections,
            &ColorOverrides::new(),
            "major-third",
        );

        let swift = SwiftExporter.run(&config);
        let kotlin = KotlinExporter.run(&config);
        for token in flatten_tokens(&config) {
            assert!(swift.contains(&format_token(&token, TokenFormat::Swift)));
            assert!(kotlin.contains(&format_token(&token, TokenFormat::Kotlin)));
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("key-value".parse::<TokenFormat>(), Ok(TokenFormat::KeyValue));
        assert!("yaml".parse::<TokenFormat>().is_err());
    }
}
