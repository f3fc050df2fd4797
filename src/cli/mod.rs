//! CLI command handlers for Tokensmith.
//!
//! The read-only queries in [`query`] form the agent bridge; the remaining
//! commands work offline against files and the catalog.

pub mod bundle;
pub mod catalog;
pub mod common;
pub mod config_file;
pub mod query;

// Re-export types used by main.rs and tests
pub use bundle::BundleArgs;
pub use catalog::CatalogArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config_file::ConfigFileArgs;
pub use query::{BridgeOptions, QueryCommand};
