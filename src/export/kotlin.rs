//! Jetpack Compose constants.

use std::fmt::Write as _;

use super::flatten::{flatten_tokens, pascal_ident, quoted, FlatToken};
use super::Exporter;
use crate::models::DesignConfig;

/// `DesignTokens.kt`
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinExporter;

/// Kotlin declaration for one token.
///
/// Hex colors become `Color(0xFFRRGGBB)`; other values are `const val`
/// strings with `$` escaped.
#[must_use]
pub fn declaration(token: &FlatToken) -> String {
    let name = pascal_ident(&token.path);
    match token.color() {
        Some(color) => format!("val {name} = Color({})", color.to_argb_literal()),
        None => format!("const val {name} = {}", quoted(&token.value, true)),
    }
}

impl Exporter for KotlinExporter {
    fn id(&self) -> &'static str {
        "kotlin"
    }

    fn label(&self) -> &'static str {
        "Kotlin"
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn file_name(&self) -> &'static str {
        "DesignTokens.kt"
    }

    fn run(&self, config: &DesignConfig) -> String {
        let tokens = flatten_tokens(config);
        let mut output = String::from("// Design tokens generated by Tokensmith\n\n");
        output.push_str("package design.tokens\n\n");
        if tokens.iter().any(|t| t.color().is_some()) {
            output.push_str("import androidx.compose.ui.graphics.Color\n\n");
        }
        output.push_str("object DesignTokens {\n");
        for token in &tokens {
            let _ = writeln!(output, "    {}", declaration(token));
        }
        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, ColorOverrides, Selections};
    use crate::services::assemble;

    #[test]
    fn test_declarations() {
        let color = FlatToken {
            path: vec!["colors".into(), "dark".into(), "semantic".into(), "error".into()],
            value: "#f87171".into(),
        };
        assert_eq!(declaration(&color), "val ColorsDarkSemanticError = Color(0xFFF87171)");

        let text = FlatToken {
            path: vec!["shadows".into(), "md".into()],
            value: "$elevation".into(),
        };
        assert_eq!(declaration(&text), r#"const val ShadowsMd = "\$elevation""#);
    }

    #[test]
    fn test_file_shape() {
        let mut selections = Selections::new();
        selections.insert("colors".to_string(), "forest".to_string());
        selections.insert("typography".to_string(), "modern-sans".to_string());
        let config = assemble(
            &Catalog::load().unwrap(),
            &selections,
            &ColorOverrides::new(),
            "major-third",
        );

        let kotlin = KotlinExporter.run(&config);
        assert!(kotlin.contains("import androidx.compose.ui.graphics.Color"));
        assert!(kotlin.contains("    const val TypographyScale2xlWeight = \"700\""));
        let body = kotlin.split("object DesignTokens {\n").nth(1).unwrap();
        for line in body.lines().filter(|l| *l != "}") {
            let line = line.trim();
            assert!(
                line.starts_with("val ") || line.starts_with("const val "),
                "unexpected line: {line}"
            );
        }
    }

    #[test]
    fn test_no_color_import_without_colors() {
        let mut selections = Selections::new();
        selections.insert("radius".to_string(), "rounded".to_string());
        let config = assemble(
            &Catalog::load().unwrap(),
            &selections,
            &ColorOverrides::new(),
            "major-third",
        );
        let kotlin = KotlinExporter.run(&config);
        assert!(!kotlin.contains("import"));
        assert!(kotlin.contains("const val RadiusMd = \"10px\""));
    }
}
