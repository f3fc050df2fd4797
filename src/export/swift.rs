//! SwiftUI constants.

use std::fmt::Write as _;

use super::flatten::{camel_ident, flatten_tokens, quoted, FlatToken};
use super::Exporter;
use crate::models::DesignConfig;

/// `DesignTokens.swift`
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftExporter;

/// Swift declaration for one token.
///
/// Hex colors become `Color(red:green:blue:)` with channels normalized to
/// 0-1 and rounded to three decimals; everything else is a `String`.
#[must_use]
pub fn declaration(token: &FlatToken) -> String {
    let name = camel_ident(&token.path);
    match token.color() {
        Some(color) => {
            let (r, g, b) = color.to_unit_floats();
            format!("public static let {name} = Color(red: {r:.3}, green: {g:.3}, blue: {b:.3})")
        }
        None => format!("public static let {name} = {}", quoted(&token.value, false)),
    }
}

impl Exporter for SwiftExporter {
    fn id(&self) -> &'static str {
        "swift"
    }

    fn label(&self) -> &'static str {
        "Swift"
    }

    fn file_extension(&self) -> &'static str {
        "swift"
    }

    fn file_name(&self) -> &'static str {
        "DesignTokens.swift"
    }

    fn run(&self, config: &DesignConfig) -> String {
        let mut output = String::from("// Design tokens generated by Tokensmith\n\nimport SwiftUI\n\n");
        output.push_str("public enum DesignTokens {\n");

        let mut section = String::new();
        for token in flatten_tokens(config) {
            let heading = section_heading(&token);
            if heading != section {
                let _ = writeln!(output, "    // MARK: - {heading}");
                section = heading;
            }
            let _ = writeln!(output, "    {}", declaration(&token));
        }

        output.push_str("}\n");
        output
    }
}

fn section_heading(token: &FlatToken) -> String {
    match token.scheme() {
        Some(scheme) => format!("{} ({scheme})", token.group()),
        None => token.group().to_string(),
    }
}
