//! State overlay resolution.
//!
//! A component part's [`CssStateMap`] is flattened by merging the layers of
//! the requested states, in the caller's order, later layers winning per
//! property. Composite effects are materialized in the layer that declares
//! them, so a later layer can still replace the property they write.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use super::interaction::InteractionState;
use super::placeholder::{expand, Effect};
use crate::models::style::is_meta_key;
use crate::models::{
    ColorMode, ComponentCategory, ComponentStyle, CssStateMap, StateName, StyleProperties,
};

/// Flattened, fully-resolved CSS properties.
pub type StyleObject = IndexMap<String, String>;

/// Merges the layers for `states` without expanding anything.
///
/// Meta-keys are kept. States the map has no layer for are skipped.
#[must_use]
pub fn merge_states(map: &CssStateMap, states: &[StateName]) -> StyleProperties {
    let mut merged = StyleProperties::new();
    for layer in states.iter().filter_map(|state| map.layer(*state)) {
        for (property, value) in layer {
            merged.insert(property.clone(), value.clone());
        }
    }
    merged
}

/// Resolves the final style for `states`.
///
/// Every value is expanded against `colors`, composite effects are applied and
/// all meta-keys are stripped from the result.
#[must_use]
pub fn overlay(map: &CssStateMap, states: &[StateName], colors: &ColorMode) -> StyleObject {
    let mut style = StyleObject::new();
    for (state, layer) in states.iter().filter_map(|s| map.layer(*s).map(|l| (s, l))) {
        for (property, value) in layer {
            if !is_meta_key(property) {
                style.insert(property.clone(), expand(value, colors));
                continue;
            }
            match Effect::parse(property, value) {
                Ok(Some(effect)) => {
                    style.insert(effect.target_property().to_string(), effect.render(colors));
                }
                Ok(None) => {}
                Err(err) => warn!("Skipping {property} in {state} layer: {err}"),
            }
        }
    }
    style
}

/// Returns the merged meta-keys for `states`: renderer directives such as
/// `__thumbSize` alongside the raw effect directives.
#[must_use]
pub fn directives(map: &CssStateMap, states: &[StateName]) -> StyleProperties {
    merge_states(map, states)
        .into_iter()
        .filter(|(property, _)| is_meta_key(property))
        .collect()
}

/// One rendered part of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPart {
    /// Resolved CSS properties
    pub style: StyleObject,
    /// Meta-key directives for the renderer
    pub directives: StyleProperties,
}

/// A component resolved for one interaction state and color mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedComponent {
    /// Component category
    pub category: ComponentCategory,
    /// Style variant
    pub variant: String,
    /// States that were merged
    pub states: Vec<StateName>,
    /// Rendered parts by name (`root`, `track`, `thumb`, ...)
    pub parts: IndexMap<String, RenderedPart>,
}

/// Renders every part of a component for the given interaction state.
#[must_use]
pub fn render_component(
    style: &ComponentStyle,
    colors: &ColorMode,
    interaction: &InteractionState,
) -> RenderedComponent {
    let states = interaction.active_states();
    let parts = style
        .parts()
        .into_iter()
        .map(|(name, map)| {
            let part = RenderedPart {
                style: overlay(map, &states, colors),
                directives: directives(map, &states),
            };
            (name.to_string(), part)
        })
        .collect();

    RenderedComponent {
        category: style.category(),
        variant: style.variant().to_string(),
        states,
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Scheme};
    use crate::services::color_resolver::default_mode;
    use crate::services::interaction::InteractionEvent;

    fn props(pairs: &[(&str, &str)]) -> StyleProperties {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn sample_map() -> CssStateMap {
        CssStateMap {
            default: props(&[("color", "__text"), ("backgroundColor", "__surface")]),
            hover: Some(props(&[("__hoverBg", "primary-20"), ("color", "__primary")])),
            active: Some(props(&[("backgroundColor", "__primary")])),
            disabled: Some(props(&[("opacity", "0.5")])),
            ..CssStateMap::default()
        }
    }

    #[test]
    fn test_default_only() {
        let colors = default_mode(Scheme::Light);
        let style = overlay(&sample_map(), &[StateName::Default], &colors);
        assert_eq!(style["color"], "#0F172A");
        assert_eq!(style["backgroundColor"], "#F8FAFC");
        assert_eq!(style.len(), 2);
    }

    #[test]
    fn test_later_layers_win() {
        let colors = default_mode(Scheme::Light);
        let hovered = overlay(&sample_map(), &[StateName::Default, StateName::Hover], &colors);
        assert_eq!(hovered["backgroundColor"], "rgba(59, 130, 246, 0.2)");
        assert_eq!(hovered["color"], "#3B82F6");
        assert!(hovered.keys().all(|k| !k.starts_with("__")));

        let pressed = overlay(
            &sample_map(),
            &[StateName::Default, StateName::Hover, StateName::Active],
            &colors,
        );
        assert_eq!(pressed["backgroundColor"], "#3B82F6");
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let colors = default_mode(Scheme::Dark);
        let style = overlay(&sample_map(), &[StateName::Default, StateName::Focus], &colors);
        assert_eq!(style, overlay(&sample_map(), &[StateName::Default], &colors));
    }

    #[test]
    fn test_merge_keeps_meta_and_directives_filter() {
        let mut map = sample_map();
        map.default.insert("__thumbSize".to_string(), "18px".to_string());

        let merged = merge_states(&map, &[StateName::Default, StateName::Hover]);
        assert_eq!(merged["__hoverBg"], "primary-20");
        assert_eq!(merged["color"], "__primary");

        let meta = directives(&map, &[StateName::Default, StateName::Hover]);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["__thumbSize"], "18px");
    }

    #[test]
    fn test_invalid_effect_is_skipped() {
        let mut map = sample_map();
        map.default.insert("__hoverShadow".to_string(), "sparkle".to_string());
        let style = overlay(&map, &[StateName::Default], &default_mode(Scheme::Light));
        assert!(!style.contains_key("boxShadow"));
        assert!(!style.contains_key("__hoverShadow"));
    }

    #[test]
    fn test_render_catalog_button() {
        let catalog = Catalog::load().unwrap();
        let entry = catalog.component(ComponentCategory::Button, "solid").unwrap();
        let colors = default_mode(Scheme::Light);

        let hovered = InteractionState::new().with_events([InteractionEvent::PointerEnter]);
        let rendered = render_component(&entry.style, &colors, &hovered);
        let root = &rendered.parts["root"];
        assert_eq!(
            root.style["boxShadow"],
            "0 0 6px rgba(59, 130, 246, 0.6), 0 0 12px rgba(59, 130, 246, 0.3)"
        );
        assert_eq!(root.directives["__iconGap"], "8px");

        let pressed = hovered.with_events([InteractionEvent::PointerDown]);
        let rendered = render_component(&entry.style, &colors, &pressed);
        assert_eq!(rendered.parts["root"].style["boxShadow"], "none");
    }

    #[test]
    fn test_render_multi_part_component() {
        let catalog = Catalog::load().unwrap();
        let entry = catalog.component(ComponentCategory::Slider, "classic").unwrap();
        let colors = default_mode(Scheme::Dark);

        let disabled = InteractionState::new().with_events([InteractionEvent::SetDisabled(true)]);
        let rendered = render_component(&entry.style, &colors, &disabled);
        assert_eq!(rendered.states, vec![StateName::Default, StateName::Disabled]);
        assert_eq!(
            rendered.parts.keys().collect::<Vec<_>>(),
            vec!["track", "thumb", "fill"]
        );
        assert_eq!(rendered.parts["fill"].style["backgroundColor"], "#94A3B8");
        assert_eq!(rendered.parts["track"].directives["__showSteps"], "true");
    }
}
