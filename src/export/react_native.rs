//! React Native token object.
//!
//! Token paths are rebuilt into a nested object. Pixel lengths become plain
//! numbers since React Native style props are unitless; font weights stay
//! strings as `fontWeight` expects.

use serde_json::{Map, Value};
use tracing::warn;

use super::flatten::{flatten_tokens, px_number, FlatToken};
use super::Exporter;
use crate::models::DesignConfig;

/// `tokens.native.ts`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactNativeExporter;

fn native_value(token: &FlatToken) -> Value {
    let field = token.path.last().map_or("", String::as_str);
    if let Some(px) = px_number(&token.value) {
        return Value::from(px);
    }
    if field == "lineHeight" {
        if let Ok(number) = token.value.parse::<f64>() {
            return Value::from(number);
        }
    }
    Value::String(token.value.clone())
}

fn insert_path(root: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut node = root;
    for segment in parents {
        let child = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        let Value::Object(map) = child else {
            return;
        };
        node = map;
    }
    node.insert(last.clone(), value);
}

/// Nested token object as emitted in `tokens.native.ts`.
#[must_use]
pub fn token_object(config: &DesignConfig) -> Value {
    let mut root = Map::new();
    for token in flatten_tokens(config) {
        let value = native_value(&token);
        insert_path(&mut root, &token.path, value);
    }
    Value::Object(root)
}

impl Exporter for ReactNativeExporter {
    fn id(&self) -> &'static str {
        "react-native"
    }

    fn label(&self) -> &'static str {
        "React Native"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn file_name(&self) -> &'static str {
        "tokens.native.ts"
    }

    fn bridge_visible(&self) -> bool {
        false
    }

    fn run(&self, config: &DesignConfig) -> String {
        let body = serde_json::to_string_pretty(&token_object(config)).unwrap_or_else(|err| {
            warn!("Failed to serialize React Native tokens: {err}");
            "{}".to_string()
        });
        format!(
            "// Design tokens generated by Tokensmith\n\n\
             export const tokens = {body} as const;\n\n\
             export type Tokens = typeof tokens;\n\n\
             export default tokens;\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, ColorOverrides, Selections};
    use crate::services::assemble;

    fn config() -> DesignConfig {
        let selections: Selections = [
            ("colors", "forest"),
            ("typography", "modern-sans"),
            ("spacing", "compact"),
            ("shadows", "elevated"),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
        assemble(&Catalog::load().unwrap(), &selections, &ColorOverrides::new(), "major-third")
    }

    #[test]
    fn test_values_are_native() {
        let object = token_object(&config());
        assert_eq!(object["spacing"]["md"], 8.0);
        assert_eq!(object["typography"]["scale"]["lg"]["size"], 20.0);
        assert_eq!(object["typography"]["scale"]["lg"]["lineHeight"], 1.3);
        assert_eq!(object["typography"]["scale"]["lg"]["weight"], "400");
        assert!(object["shadows"]["sm"].is_string());
        assert!(object["colors"]["dark"]["semantic"]["info"].is_string());
    }

    #[test]
    fn test_every_path_is_reachable() {
        let config = config();
        let object = token_object(&config);
        for token in flatten_tokens(&config) {
            let pointer = format!("/{}", token.path.join("/"));
            assert!(object.pointer(&pointer).is_some(), "missing {pointer}");
        }
    }

    #[test]
    fn test_module_shape() {
        let output = ReactNativeExporter.run(&config());
        assert!(output.contains("export const tokens = {"));
        assert!(output.contains("} as const;"));
        assert!(output.trim_end().ends_with("export default tokens;"));
    }
}
