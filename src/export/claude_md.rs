//! Markdown guide for AI coding agents.
//!
//! Summarizes the resolved tokens and the chosen component styles as a
//! `CLAUDE.md` file an agent can read before writing UI code. The document is
//! for reading only; it is not an import format.

use std::fmt::Write as _;

use super::flatten::css_var_name;
use super::Exporter;
use crate::models::{
    ColorKey, ComponentPreference, CssStateMap, DesignConfig, ResolvedColors, Scheme, StateName,
    TypographyData,
};
use crate::services::color_resolver::default_mode;
use crate::services::overlay;
use crate::services::placeholder::{HOVER_BACKGROUND_KEY, HOVER_SHADOW_KEY};

/// `CLAUDE.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeMdExporter;

impl Exporter for ClaudeMdExporter {
    fn id(&self) -> &'static str {
        "claude-md"
    }

    fn label(&self) -> &'static str {
        "CLAUDE.md"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn file_name(&self) -> &'static str {
        "CLAUDE.md"
    }

    fn run(&self, config: &DesignConfig) -> String {
        let mut output = String::from("# Design System\n\n");
        output.push_str(
            "> Generated by Tokensmith. Follow these rules when writing UI code for this project.\n\n",
        );

        if config.tokens.is_empty() && config.component_preferences.is_empty() {
            output.push_str("_No design choices have been made yet._\n");
            return output;
        }

        write_rules(&mut output, config);

        if let Some(colors) = &config.tokens.colors {
            write_colors(&mut output, colors);
        }
        if let Some(typography) = &config.tokens.typography {
            write_typography(&mut output, typography, &config.type_scale);
        }
        for (title, group, values) in [
            ("Spacing", "spacing", &config.tokens.spacing),
            ("Radius", "radius", &config.tokens.radius),
            ("Shadows", "shadows", &config.tokens.shadows),
        ] {
            if let Some(values) = values {
                let _ = writeln!(output, "## {title}\n");
                output.push_str("| Token | Value | CSS variable |\n|---|---|---|\n");
                for (key, value) in values {
                    let _ = writeln!(
                        output,
                        "| `{key}` | {} | `{}` |",
                        cell(value),
                        css_var_name(&[group, key.as_str()])
                    );
                }
                output.push('\n');
            }
        }

        if !config.component_preferences.is_empty() {
            output.push_str("## Components\n\n");
            let light = config
                .tokens
                .colors
                .as_ref()
                .map_or_else(|| default_mode(Scheme::Light), |c| c.light.clone());
            for preference in config.component_preferences.values() {
                write_component(&mut output, preference, &light);
            }
            write_token_syntax(&mut output);
        }

        output
    }
}

fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

fn write_rules(output: &mut String, config: &DesignConfig) {
    output.push_str("## Rules\n\n");
    if config.tokens.colors.is_some() {
        output.push_str(
            "- Use only the colors listed below. Reference them through CSS variables \
             such as `var(--colors-primary)` instead of hardcoding hex values.\n",
        );
        output.push_str(
            "- Light and dark schemes share variable names; the `data-theme` attribute \
             on the root element selects the scheme.\n",
        );
    }
    if config.tokens.typography.is_some() {
        output.push_str(
            "- Headings use the heading font, all other text uses the body font. Pick \
             sizes from the type scale; do not invent intermediate sizes.\n",
        );
    }
    if config.tokens.spacing.is_some() || config.tokens.radius.is_some() {
        output.push_str("- Margins, paddings, gaps and corner radii come from the scales below.\n");
    }
    if !config.component_preferences.is_empty() {
        output.push_str(
            "- New components follow the style records in the Components section, \
             including every interaction state.\n",
        );
    }
    output.push('\n');
}

fn write_colors(output: &mut String, colors: &ResolvedColors) {
    output.push_str("## Colors\n\n");
    output.push_str("| Role | Light | Dark | CSS variable |\n|---|---|---|---|\n");
    for key in ColorKey::ALL {
        let path: Vec<&str> = if key.is_semantic() {
            vec!["colors", "semantic", key.field_name()]
        } else {
            vec!["colors", key.field_name()]
        };
        let _ = writeln!(
            output,
            "| {key} | `{}` | `{}` | `{}` |",
            colors.light.get(key),
            colors.dark.get(key),
            css_var_name(&path)
        );
    }
    output.push('\n');
}

fn write_typography(output: &mut String, typography: &TypographyData, type_scale: &str) {
    output.push_str("## Typography\n\n");
    let _ = writeln!(output, "- **Heading font:** {}", typography.heading_font);
    let _ = writeln!(output, "- **Body font:** {}", typography.body_font);
    if let Some(mono) = &typography.mono_font {
        let _ = writeln!(output, "- **Monospace font:** {mono}");
    }
    let _ = writeln!(output, "- **Type scale:** `{type_scale}`\n");

    output.push_str("| Step | Size | Line height | Weight | Letter spacing |\n");
    output.push_str("|---|---|---|---|---|\n");
    for (step, values) in &typography.scale {
        let _ = writeln!(
            output,
            "| `{step}` | {} | {} | {} | {} |",
            values.size,
            values.line_height,
            values.weight,
            values.letter_spacing.as_deref().unwrap_or("normal")
        );
    }
    output.push('\n');
}

fn write_component(
    output: &mut String,
    preference: &ComponentPreference,
    light: &crate::models::ColorMode,
) {
    let style = &preference.style;
    let _ = writeln!(
        output,
        "### {}: {} (`{}`)\n",
        style.category().display_name(),
        preference.name,
        preference.id
    );
    let _ = writeln!(output, "- **Variant:** {}", style.variant());
    for (field, value) in style.sub_fields() {
        let _ = writeln!(output, "- **{field}:** {value}");
    }
    output.push('\n');

    let parts = style.parts();
    let multi_part = parts.len() > 1;
    for (name, map) in parts {
        if multi_part {
            let _ = writeln!(output, "#### Part `{name}`\n");
        }
        write_state_table(output, map);

        let resting = overlay::overlay(map, &[StateName::Default], light);
        let resolved: Vec<String> = resting.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        let _ = writeln!(output, "Resolved default (light): `{}`\n", cell(&resolved.join("; ")));
    }
}

fn write_state_table(output: &mut String, map: &CssStateMap) {
    output.push_str("| State | Properties |\n|---|---|\n");
    for (state, layer) in map.layers() {
        let properties: Vec<String> = layer.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        let _ = writeln!(output, "| {state} | `{}` |", cell(&properties.join("; ")));
    }
    output.push('\n');
}

fn write_token_syntax(output: &mut String) {
    output.push_str("### Reading style records\n\n");
    output.push_str("- `__role` is the resolved color of that role (`__primary`, `__textMuted`).\n");
    output.push_str("- `__role-NN` is that color at NN% opacity, as `rgba()`.\n");
    let _ = writeln!(
        output,
        "- `{HOVER_BACKGROUND_KEY}` sets the hover background: `solid` for the primary \
         color, or `role-NN` for a translucent tint."
    );
    let _ = writeln!(
        output,
        "- `{HOVER_SHADOW_KEY}` sets a glow built from the primary color: `glow`, \
         `glow-tight`, `neon`, `neon-tight` or `pulse`."
    );
    output.push_str(
        "- Other `__` properties are rendering hints (icon gap, thumb size), not CSS.\n",
    );
    output.push_str(
        "- States layer on top of `default` in the order hover, active, focus, filled, \
         error. Disabled replaces all interactive states.\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, ColorOverrides, Selections};
    use crate::services::assemble;

    fn export(pairs: &[(&str, &str)]) -> String {
        let selections: Selections = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ClaudeMdExporter.run(&assemble(
            &Catalog::load().unwrap(),
            &selections,
            &ColorOverrides::new(),
            "major-third",
        ))
    }

    #[test]
    fn test_empty_config() {
        let md = export(&[]);
        assert!(md.starts_with("# Design System"));
        assert!(md.contains("No design choices"));
        assert!(!md.contains("## Colors"));
    }

    #[test]
    fn test_sections_follow_selections() {
        let md = export(&[("colors", "ocean"), ("radius", "rounded")]);
        assert!(md.contains("## Colors"));
        assert!(md.contains("| primary | `#0284C7` | `#38BDF8` | `--colors-primary` |"));
        assert!(md.contains("| semantic.error | `#DC2626` |"));
        assert!(md.contains("| `md` | 10px | `--radius-md` |"));
        assert!(!md.contains("## Typography"));
        assert!(!md.contains("## Components"));
    }

    #[test]
    fn test_components_show_raw_and_resolved_styles() {
        let md = export(&[("button", "solid"), ("slider", "classic")]);
        assert!(md.contains("### Button: Solid (`solid`)"));
        assert!(md.contains("- **colorStrategy:** filled"));
        assert!(md.contains("__hoverShadow: glow-tight"));
        assert!(md.contains("backgroundColor: #3B82F6"));
        assert!(md.contains("#### Part `thumb`"));
        assert!(md.contains("### Reading style records"));
    }

    #[test]
    fn test_typography_table() {
        let md = export(&[("typography", "geometric")]);
        assert!(md.contains("- **Heading font:** Poppins, sans-serif"));
        assert!(md.contains("| `5xl` |"));
        assert!(md.contains("-0.02em"));
    }
}
