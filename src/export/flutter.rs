//! Flutter constants and theme builders.
//!
//! Every token becomes a `static const` on `DesignTokens`. When colors are
//! present, `lightTheme()` and `darkTheme()` build a `ThemeData` from them.

use std::fmt::Write as _;

use super::flatten::{camel_ident, flatten_tokens, FlatToken};
use super::Exporter;
use crate::models::{ColorKey, DesignConfig, Scheme};

/// `design_tokens.dart`
#[derive(Debug, Clone, Copy, Default)]
pub struct FlutterExporter;

/// `ColorScheme` constructor arguments and the roles they come from.
const COLOR_SCHEME_FIELDS: [(&str, ColorKey); 11] = [
    ("primary", ColorKey::Primary),
    ("onPrimary", ColorKey::PrimaryForeground),
    ("secondary", ColorKey::Secondary),
    ("onSecondary", ColorKey::SecondaryForeground),
    ("tertiary", ColorKey::Accent),
    ("onTertiary", ColorKey::AccentForeground),
    ("error", ColorKey::Error),
    ("surface", ColorKey::Surface),
    ("onSurface", ColorKey::Text),
    ("surfaceContainerHighest", ColorKey::SurfaceAlt),
    ("outline", ColorKey::Border),
];

/// Dart single-quoted string literal.
fn dart_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('$', "\\$")
        .replace('\n', "\\n");
    format!("'{escaped}'")
}

fn declaration(token: &FlatToken) -> String {
    let name = camel_ident(&token.path);
    match token.color() {
        Some(color) => format!(
            "static const Color {name} = Color({});",
            color.to_argb_literal()
        ),
        None => format!("static const String {name} = {};", dart_string(&token.value)),
    }
}

fn color_ident(scheme: Scheme, key: ColorKey) -> String {
    if key.is_semantic() {
        camel_ident(&["colors", scheme.as_str(), "semantic", key.field_name()])
    } else {
        camel_ident(&["colors", scheme.as_str(), key.field_name()])
    }
}

fn theme_builder(output: &mut String, scheme: Scheme) {
    let (brightness, constructor) = match scheme {
        Scheme::Light => ("Brightness.light", "ColorScheme.light"),
        Scheme::Dark => ("Brightness.dark", "ColorScheme.dark"),
    };

    let _ = writeln!(output, "\n  static ThemeData {scheme}Theme() => ThemeData(");
    let _ = writeln!(output, "        brightness: {brightness},");
    let _ = writeln!(
        output,
        "        scaffoldBackgroundColor: {},",
        color_ident(scheme, ColorKey::Background)
    );
    let _ = writeln!(output, "        colorScheme: {constructor}(");
    for (field, key) in COLOR_SCHEME_FIELDS {
        let _ = writeln!(output, "          {field}: {},", color_ident(scheme, key));
    }
    output.push_str("        ),\n      );\n");
}

impl Exporter for FlutterExporter {
    fn id(&self) -> &'static str {
        "flutter"
    }

    fn label(&self) -> &'static str {
        "Flutter"
    }

    fn file_extension(&self) -> &'static str {
        "dart"
    }

    fn file_name(&self) -> &'static str {
        "design_tokens.dart"
    }

    fn bridge_visible(&self) -> bool {
        false
    }

    fn run(&self, config: &DesignConfig) -> String {
        let mut output = String::from("// Design tokens generated by Tokensmith\n\n");
        output.push_str("import 'package:flutter/material.dart';\n\n");
        output.push_str("class DesignTokens {\n  DesignTokens._();\n\n");

        for token in flatten_tokens(config) {
            let _ = writeln!(output, "  {}", declaration(&token));
        }

        if config.tokens.colors.is_some() {
            for scheme in Scheme::ALL {
                theme_builder(&mut output, scheme);
            }
        }

        output.push_str("}\n");
        output
    }
}
