//! Tokensmith - design-token export and agent bridge
//!
//! Queries the running `tokensmith-web` server (falling back to its last
//! snapshot) and exports design tokens offline. Answers go to stdout, logs to
//! stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokensmith::cli::{
    BridgeOptions, BundleArgs, CatalogArgs, CliResult, ConfigFileArgs, ExitCode, QueryCommand,
};

/// Tokensmith - design-token export and agent bridge
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server URL [default: bridge.url from config]
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Snapshot file to fall back to
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Query(QueryCommand),
    /// Export formats from a saved JSON document
    Bundle(BundleArgs),
    /// List catalog entries
    Catalog(CatalogArgs),
    /// Show or change config.toml
    ConfigFile(ConfigFileArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Query(query) => {
            let options = BridgeOptions {
                url: cli.url,
                snapshot: cli.snapshot,
            };
            query.execute(&options);
            Ok(())
        }
        Commands::Bundle(args) => args.execute(),
        Commands::Catalog(args) => args.execute(),
        Commands::ConfigFile(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}
