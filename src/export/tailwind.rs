//! Tailwind theme extension.
//!
//! Light colors sit at the top of `theme.extend.colors` with semantic colors
//! alongside the roles; dark colors are nested under `dark`. Spacing, radius
//! and shadows map one-to-one. Component records have no Tailwind counterpart
//! and are not exported.

use serde_json::{json, Map, Value};
use tracing::warn;

use super::flatten::css_var_name;
use super::Exporter;
use crate::models::{ColorMode, DesignConfig, DesignTokens, Scheme};

/// `tailwind.config.ts`
#[derive(Debug, Clone, Copy, Default)]
pub struct TailwindExporter;

impl Exporter for TailwindExporter {
    fn id(&self) -> &'static str {
        "tailwind"
    }

    fn label(&self) -> &'static str {
        "Tailwind Theme"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn file_name(&self) -> &'static str {
        "tailwind.config.ts"
    }

    fn run(&self, config: &DesignConfig) -> String {
        let extend = theme_extension(&config.tokens);
        let theme = json!({
            "darkMode": ["class", "[data-theme=\"dark\"]"],
            "theme": { "extend": extend },
        });

        let body = serde_json::to_string_pretty(&theme).unwrap_or_else(|err| {
            warn!("Failed to serialize Tailwind theme: {err}");
            "{}".to_string()
        });

        format!(
            "// Design tokens generated by Tokensmith\n\
             import type {{ Config }} from \"tailwindcss\";\n\n\
             export default {body} satisfies Partial<Config>;\n"
        )
    }
}

/// Builds `theme.extend` from the token groups that are present.
#[must_use]
pub fn theme_extension(tokens: &DesignTokens) -> Value {
    let mut extend = Map::new();

    if let Some(colors) = &tokens.colors {
        let mut palette = color_map(&colors.light);
        palette.insert(
            Scheme::Dark.as_str().to_string(),
            Value::Object(color_map(&colors.dark)),
        );
        extend.insert("colors".to_string(), Value::Object(palette));
    }

    if let Some(typography) = &tokens.typography {
        let mut families = Map::new();
        families.insert("heading".to_string(), font_stack(&typography.heading_font));
        families.insert("body".to_string(), font_stack(&typography.body_font));
        if let Some(mono) = &typography.mono_font {
            families.insert("mono".to_string(), font_stack(mono));
        }
        extend.insert("fontFamily".to_string(), Value::Object(families));

        let sizes: Map<String, Value> = typography
            .scale
            .iter()
            .map(|(step, values)| {
                let mut options = Map::new();
                options.insert("lineHeight".to_string(), json!(values.line_height.to_string()));
                options.insert("fontWeight".to_string(), json!(values.weight.to_string()));
                if let Some(spacing) = &values.letter_spacing {
                    options.insert("letterSpacing".to_string(), json!(spacing));
                }
                (step.clone(), json!([values.size, options]))
            })
            .collect();
        extend.insert("fontSize".to_string(), Value::Object(sizes));
    }

    for (key, values) in [
        ("spacing", &tokens.spacing),
        ("borderRadius", &tokens.radius),
        ("boxShadow", &tokens.shadows),
    ] {
        if let Some(values) = values {
            extend.insert(key.to_string(), json!(values));
        }
    }

    Value::Object(extend)
}

fn color_map(mode: &ColorMode) -> Map<String, Value> {
    mode.entries()
        .map(|(key, value)| {
            // Tailwind class names are kebab-case: `bg-primary-foreground`
            let name = css_var_name(&[key.field_name()]);
            (name.trim_start_matches('-').to_string(), json!(value))
        })
        .collect()
}

fn font_stack(stack: &str) -> Value {
    stack
        .split(',')
        .map(|font| font.trim().trim_matches('"').to_string())
        .filter(|font| !font.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, ColorOverrides, Selections};
    use crate::services::assemble;

    fn tokens(pairs: &[(&str, &str)]) -> DesignTokens {
        let selections: Selections = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        assemble(&Catalog::load().unwrap(), &selections, &ColorOverrides::new(), "major-third")
            .tokens
    }

    #[test]
    fn test_colors_nest_dark_and_semantic() {
        let extend = theme_extension(&tokens(&[("colors", "ocean")]));
        let colors = &extend["colors"];
        assert_eq!(colors["primary"], "#0284C7");
        assert_eq!(colors["dark"]["primary"], "#38BDF8");
        assert_eq!(colors["error"], "#DC2626");
        assert!(colors["primary-foreground"].is_string());
        assert!(extend.get("fontFamily").is_none());
    }

    #[test]
    fn test_typography_and_scales() {
        let extend = theme_extension(&tokens(&[
            ("typography", "editorial"),
            ("radius", "sharp"),
            ("shadows", "subtle"),
        ]));
        assert_eq!(
            extend["fontFamily"]["heading"],
            json!(["Playfair Display", "Georgia", "serif"])
        );
        assert_eq!(extend["fontSize"]["lg"][0], "20px");
        assert_eq!(extend["fontSize"]["lg"][1]["fontWeight"], "400");
        assert_eq!(extend["borderRadius"]["full"], "9999px");
        assert!(extend["boxShadow"]["md"].is_string());
        assert!(extend.get("colors").is_none());
        assert!(extend.get("spacing").is_none());
    }

    #[test]
    fn test_file_is_a_typescript_module() {
        let config = assemble(
            &Catalog::load().unwrap(),
            &Selections::new(),
            &ColorOverrides::new(),
            "major-third",
        );
        let output = TailwindExporter.run(&config);
        assert!(output.contains("import type { Config } from \"tailwindcss\";"));
        assert!(output.contains("\"extend\": {}"));
        assert!(output.trim_end().ends_with("satisfies Partial<Config>;"));
    }
}
