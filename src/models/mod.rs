//! Data models for colors, typography, component styles, and the exported
//! design configuration.
//!
//! Models carry no resolution logic beyond small helpers; the services layer
//! turns catalog data and user choices into resolved values.

pub mod catalog;
pub mod color;
pub mod color_palette;
pub mod design_config;
pub mod rgb;
pub mod session;
pub mod style;
pub mod typography;

// Re-export all model types
pub use catalog::{Catalog, CatalogItemSummary, ComponentEntry, ScaleEntry};
pub use color::{
    ColorKey, ColorMode, ColorModeLayer, ColorOverrides, ResolvedColors, Scheme, SemanticColors,
    SemanticLayer,
};
pub use color_palette::ColorPaletteData;
pub use design_config::{ComponentPreference, DesignConfig, DesignTokens, CONFIG_VERSION};
pub use rgb::{ColorParseError, RgbColor};
pub use session::{Selections, Session, SessionState};
pub use style::{
    BadgeStyle, ButtonStyle, CardStyle, CheckboxStyle, ComponentCategory, ComponentStyle,
    CssStateMap, InputStyle, SliderStyle, StateName, StyleProperties, ToggleStyle,
};
pub use typography::{FontPairing, TypeScale, TypeStep, TypographyData};
