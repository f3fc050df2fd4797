//! Tokensmith Library
//!
//! Resolves design-token choices (color palettes, font pairings, spacing,
//! radius and shadow scales, component style records) into a single design
//! configuration and exports it to CSS, Tailwind, Swift, Kotlin, Flutter,
//! React Native, JSON and an agent-facing Markdown guide.

// Module declarations
pub mod bridge;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
