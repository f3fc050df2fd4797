//! Design configuration assembly.
//!
//! Turns a session's selections, overrides and type scale into a
//! [`DesignConfig`]. Token groups appear only when the user picked something
//! for them; component styles are copied unexpanded.

use std::collections::BTreeMap;

use tracing::debug;

use super::color_resolver::resolve_colors;
use crate::models::catalog::{
    COLORS_CATEGORY, DEFAULT_TYPE_SCALE, RADIUS_CATEGORY, SHADOWS_CATEGORY, SPACING_CATEGORY,
    TYPOGRAPHY_CATEGORY,
};
use crate::models::{
    Catalog, ColorOverrides, ComponentCategory, ComponentPreference, DesignConfig, DesignTokens,
    Selections, TypographyData, CONFIG_VERSION,
};

/// Assembles the design configuration.
///
/// - Colors are present when a palette is selected or any override exists.
/// - Typography is present when a font pairing is selected. An unknown
///   `type_scale_id` falls back to the catalog's default scale, then to the
///   built-in ratio and base size.
/// - Spacing, radius and shadows are present when their scale is selected.
/// - Component categories with a known selection get their style record.
///
/// Selections that name unknown catalog entries are ignored.
#[must_use]
pub fn assemble(
    catalog: &Catalog,
    selections: &Selections,
    overrides: &ColorOverrides,
    type_scale_id: &str,
) -> DesignConfig {
    let selected = |category: &str| selections.get(category).map(String::as_str);

    let palette = selected(COLORS_CATEGORY).and_then(|id| catalog.palette(id));
    let colors = (palette.is_some() || overrides.has_effective())
        .then(|| resolve_colors(overrides, palette));

    let typography = selected(TYPOGRAPHY_CATEGORY)
        .and_then(|id| catalog.font_pairing(id))
        .map(|pairing| {
            let scale = catalog
                .type_scale(type_scale_id)
                .or_else(|| catalog.type_scale(DEFAULT_TYPE_SCALE));
            if scale.is_none() {
                debug!("Type scale '{type_scale_id}' not found, using built-in ratio");
            }
            TypographyData::generate(pairing, scale)
        });

    let tokens = DesignTokens {
        colors,
        typography,
        spacing: selected(SPACING_CATEGORY)
            .and_then(|id| catalog.spacing(id))
            .map(|s| s.values.clone()),
        radius: selected(RADIUS_CATEGORY)
            .and_then(|id| catalog.radius(id))
            .map(|s| s.values.clone()),
        shadows: selected(SHADOWS_CATEGORY)
            .and_then(|id| catalog.shadows(id))
            .map(|s| s.values.clone()),
    };

    let component_preferences: BTreeMap<ComponentCategory, ComponentPreference> =
        ComponentCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let entry = catalog.component(category, selected(category.as_str())?)?;
                Some((
                    category,
                    ComponentPreference {
                        id: entry.id.clone(),
                        name: entry.name.clone(),
                        style: entry.style.clone(),
                    },
                ))
            })
            .collect();

    DesignConfig {
        version: CONFIG_VERSION,
        type_scale: type_scale_id.to_string(),
        selections: selections.clone(),
        color_overrides: overrides.clone(),
        tokens,
        component_preferences,
    }
}
