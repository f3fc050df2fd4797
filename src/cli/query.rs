//! Read-only agent bridge commands.
//!
//! Each command prints one answer on stdout and exits 0, whether the answer
//! came from the running server, the snapshot file, or neither.

use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::bridge::Bridge;
use crate::config::Config;
use crate::export::TokenFormat;
use crate::models::Scheme;

/// Where the bridge looks for data.
#[derive(Debug, Clone, Default)]
pub struct BridgeOptions {
    /// Server URL instead of `bridge.url`
    pub url: Option<String>,
    /// Snapshot file instead of the configured one
    pub snapshot: Option<PathBuf>,
}

impl BridgeOptions {
    /// Builds the bridge. A broken setup yields a bridge with no sources,
    /// which answers every query with the no-data message.
    #[must_use]
    pub fn connect(&self) -> Bridge {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Using default configuration: {e:#}");
            Config::default()
        });

        Bridge::from_config(&config, self.url.as_deref(), self.snapshot.as_deref())
            .unwrap_or_else(|e| {
                debug!("Bridge has no sources: {e:#}");
                Bridge::new(Vec::new())
            })
    }
}

/// Bridge queries.
#[derive(Debug, Clone, Subcommand)]
pub enum QueryCommand {
    /// Print the full design configuration as JSON
    Config,
    /// Print the resolved colors
    Colors(ColorsArgs),
    /// Print the typography tokens
    Typography,
    /// Print raw selections, color overrides and type scale
    Selections,
    /// Print one export format
    Export(ExportArgs),
    /// Print one token by dot path
    Token(TokenArgs),
}

/// Print the resolved colors
#[derive(Debug, Clone, Args)]
pub struct ColorsArgs {
    /// Only this scheme (light or dark)
    #[arg(long, value_name = "SCHEME")]
    pub scheme: Option<Scheme>,
}

/// Print one export format
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Format ID (json, css, tailwind, swift, kotlin, claude-md)
    #[arg(value_name = "FORMAT")]
    pub format: String,
}

/// Print one token by dot path
#[derive(Debug, Clone, Args)]
pub struct TokenArgs {
    /// Token path, e.g. colors.light.primary or spacing.md
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Print as a single declaration (css, key-value, swift, kotlin)
    #[arg(long = "as", value_name = "FORMAT")]
    pub as_format: Option<TokenFormat>,
}

impl QueryCommand {
    /// Answers the query.
    #[must_use]
    pub fn answer(&self, bridge: &Bridge) -> String {
        match self {
            Self::Config => bridge.get_config(),
            Self::Colors(args) => bridge.get_colors(args.scheme),
            Self::Typography => bridge.get_typography(),
            Self::Selections => bridge.get_selections(),
            Self::Export(args) => bridge.get_export(&args.format),
            Self::Token(args) => match args.as_format {
                Some(format) => bridge.get_token_line(&args.path, format),
                None => bridge.get_token(&args.path),
            },
        }
    }

    /// Runs the query and prints the answer.
    pub fn execute(&self, options: &BridgeOptions) {
        let answer = self.answer(&options.connect());
        if answer.ends_with('\n') {
            print!("{answer}");
        } else {
            println!("{answer}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NO_DATA_MESSAGE;

    #[test]
    fn test_empty_bridge_answers_every_query() {
        let bridge = Bridge::new(Vec::new());
        let queries = [
            QueryCommand::Config,
            QueryCommand::Colors(ColorsArgs { scheme: None }),
            QueryCommand::Typography,
            QueryCommand::Selections,
            QueryCommand::Export(ExportArgs {
                format: "css".to_string(),
            }),
            QueryCommand::Token(TokenArgs {
                path: "spacing.md".to_string(),
                as_format: Some(TokenFormat::Swift),
            }),
        ];
        for query in queries {
            assert_eq!(query.answer(&bridge), NO_DATA_MESSAGE);
        }
    }
}
