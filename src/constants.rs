//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and default network settings.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Tokensmith";

/// The binary name of the CLI (used in command examples).
pub const APP_BINARY_NAME: &str = "tokensmith";

/// The binary name of the web server.
pub const WEB_BINARY_NAME: &str = "tokensmith-web";

/// Directory name under the platform config directory.
pub const APP_DATA_DIR: &str = "Tokensmith";

/// Environment variable that replaces the platform config directory.
pub const CONFIG_DIR_ENV: &str = "TOKENSMITH_CONFIG_DIR";

/// Default bind address of the web server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of the web server.
pub const DEFAULT_PORT: u16 = 4319;

/// Message printed by bridge commands when neither the server nor a snapshot
/// is available.
pub const NO_DATA_MESSAGE: &str =
    "No design system data available. Start tokensmith-web or export a snapshot first.";
