//! Component style records and their interaction-state layers.
//!
//! Every component category carries one or more [`CssStateMap`]s. The maps hold
//! CSS property names mapped to value expressions, which may embed `__role`
//! tokens. Property names starting with [`TOKEN_MARKER`] are meta-keys:
//! directives for the renderer rather than CSS properties.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved marker that starts both value tokens and meta-keys.
pub const TOKEN_MARKER: &str = "__";

/// Flat map of CSS property name to value expression, in authoring order.
pub type StyleProperties = IndexMap<String, String>;

/// Returns true if a property name is a meta-key.
#[must_use]
pub fn is_meta_key(property: &str) -> bool {
    property.starts_with(TOKEN_MARKER)
}

/// Interaction states a [`CssStateMap`] can carry a layer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateName {
    /// Resting state, always present
    Default,
    /// Pointer over the element
    Hover,
    /// Pointer pressed on the element
    Active,
    /// Keyboard or programmatic focus
    Focus,
    /// Holds a value
    Filled,
    /// Failed validation
    Error,
    /// Not interactive
    Disabled,
}

impl StateName {
    /// All states in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::Hover,
        Self::Active,
        Self::Focus,
        Self::Filled,
        Self::Error,
        Self::Disabled,
    ];

    /// Returns the lowercase state name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hover => "hover",
            Self::Active => "active",
            Self::Focus => "focus",
            Self::Filled => "filled",
            Self::Error => "error",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-state style layers for one part of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssStateMap {
    /// Base layer
    pub default: StyleProperties,
    /// Pointer hover layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<StyleProperties>,
    /// Pointer down layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<StyleProperties>,
    /// Focus layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<StyleProperties>,
    /// Filled (has value) layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled: Option<StyleProperties>,
    /// Validation error layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StyleProperties>,
    /// Disabled layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<StyleProperties>,
}

impl CssStateMap {
    /// Returns the layer for `state`, if the map defines one.
    #[must_use]
    pub fn layer(&self, state: StateName) -> Option<&StyleProperties> {
        match state {
            StateName::Default => Some(&self.default),
            StateName::Hover => self.hover.as_ref(),
            StateName::Active => self.active.as_ref(),
            StateName::Focus => self.focus.as_ref(),
            StateName::Filled => self.filled.as_ref(),
            StateName::Error => self.error.as_ref(),
            StateName::Disabled => self.disabled.as_ref(),
        }
    }

    /// Iterates the defined layers in canonical state order.
    pub fn layers(&self) -> impl Iterator<Item = (StateName, &StyleProperties)> {
        StateName::ALL
            .into_iter()
            .filter_map(move |state| self.layer(state).map(|props| (state, props)))
    }
}

/// Component categories that carry style records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    /// Buttons
    Button,
    /// Text inputs
    Input,
    /// Cards
    Card,
    /// Badges
    Badge,
    /// Toggle switches
    Toggle,
    /// Range sliders
    Slider,
    /// Checkboxes
    Checkbox,
}

impl ComponentCategory {
    /// All component categories.
    pub const ALL: [Self; 7] = [
        Self::Button,
        Self::Input,
        Self::Card,
        Self::Badge,
        Self::Toggle,
        Self::Slider,
        Self::Checkbox,
    ];

    /// Returns the selection key of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Card => "card",
            Self::Badge => "badge",
            Self::Toggle => "toggle",
            Self::Slider => "slider",
            Self::Checkbox => "checkbox",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::Input => "Input",
            Self::Card => "Card",
            Self::Badge => "Badge",
            Self::Toggle => "Toggle",
            Self::Slider => "Slider",
            Self::Checkbox => "Checkbox",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown component category '{s}'"))
    }
}

/// Button style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    /// Variant tag (solid, outline, ghost, …)
    pub variant: String,
    /// How the button consumes the palette (filled, tinted, bordered)
    pub color_strategy: String,
    /// Style layers
    pub styles: CssStateMap,
}

/// Text input style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputStyle {
    /// Variant tag
    pub variant: String,
    /// Label placement (above, floating, inline)
    pub label_position: String,
    /// Style layers
    pub styles: CssStateMap,
}

/// Card style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    /// Variant tag
    pub variant: String,
    /// Elevation level name
    pub elevation: String,
    /// Style layers
    pub styles: CssStateMap,
}

/// Badge style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStyle {
    /// Variant tag
    pub variant: String,
    /// Outline shape (pill, square)
    pub shape: String,
    /// Style layers
    pub styles: CssStateMap,
}

/// Toggle switch style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStyle {
    /// Variant tag
    pub variant: String,
    /// Track layers
    pub track: CssStateMap,
    /// Thumb layers
    pub thumb: CssStateMap,
}

/// Range slider style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderStyle {
    /// Variant tag
    pub variant: String,
    /// Track layers
    pub track: CssStateMap,
    /// Thumb layers
    pub thumb: CssStateMap,
    /// Filled portion layers
    pub fill: CssStateMap,
}

/// Checkbox style record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxStyle {
    /// Variant tag
    pub variant: String,
    /// Box layers
    #[serde(rename = "box")]
    pub check_box: CssStateMap,
    /// Check mark layers
    pub check: CssStateMap,
}

/// A style record for one component category.
///
/// The JSON form is internally tagged by `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ComponentStyle {
    /// Button record
    Button(ButtonStyle),
    /// Input record
    Input(InputStyle),
    /// Card record
    Card(CardStyle),
    /// Badge record
    Badge(BadgeStyle),
    /// Toggle record
    Toggle(ToggleStyle),
    /// Slider record
    Slider(SliderStyle),
    /// Checkbox record
    Checkbox(CheckboxStyle),
}

impl ComponentStyle {
    /// Returns the category of this record.
    #[must_use]
    pub const fn category(&self) -> ComponentCategory {
        match self {
            Self::Button(_) => ComponentCategory::Button,
            Self::Input(_) => ComponentCategory::Input,
            Self::Card(_) => ComponentCategory::Card,
            Self::Badge(_) => ComponentCategory::Badge,
            Self::Toggle(_) => ComponentCategory::Toggle,
            Self::Slider(_) => ComponentCategory::Slider,
            Self::Checkbox(_) => ComponentCategory::Checkbox,
        }
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn variant(&self) -> &str {
        match self {
            Self::Button(s) => &s.variant,
            Self::Input(s) => &s.variant,
            Self::Card(s) => &s.variant,
            Self::Badge(s) => &s.variant,
            Self::Toggle(s) => &s.variant,
            Self::Slider(s) => &s.variant,
            Self::Checkbox(s) => &s.variant,
        }
    }

    /// Returns every styled part with its state map.
    ///
    /// Single-part records use the part name `root`.
    #[must_use]
    pub fn parts(&self) -> Vec<(&'static str, &CssStateMap)> {
        match self {
            Self::Button(s) => vec![("root", &s.styles)],
            Self::Input(s) => vec![("root", &s.styles)],
            Self::Card(s) => vec![("root", &s.styles)],
            Self::Badge(s) => vec![("root", &s.styles)],
            Self::Toggle(s) => vec![("track", &s.track), ("thumb", &s.thumb)],
            Self::Slider(s) => vec![("track", &s.track), ("thumb", &s.thumb), ("fill", &s.fill)],
            Self::Checkbox(s) => vec![("box", &s.check_box), ("check", &s.check)],
        }
    }

    /// Returns the category-specific sub-fields (besides `variant`).
    #[must_use]
    pub fn sub_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Button(s) => vec![("colorStrategy", s.color_strategy.as_str())],
            Self::Input(s) => vec![("labelPosition", s.label_position.as_str())],
            Self::Card(s) => vec![("elevation", s.elevation.as_str())],
            Self::Badge(s) => vec![("shape", s.shape.as_str())],
            Self::Toggle(_) | Self::Slider(_) | Self::Checkbox(_) => Vec::new(),
        }
    }
}
