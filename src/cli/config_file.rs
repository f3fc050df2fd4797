//! Configuration file commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, CONFIG_KEYS};
use clap::{Args, Subcommand};

/// Show or change config.toml
#[derive(Args, Debug, Clone)]
pub struct ConfigFileArgs {
    #[command(subcommand)]
    command: ConfigFileCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigFileCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print one configuration value
    Get(ConfigGetArgs),
    /// Set one configuration value
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Print one configuration value
#[derive(Args, Debug, Clone)]
pub struct ConfigGetArgs {
    /// Dotted key, e.g. bridge.url
    key: String,
}

/// Set one configuration value
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Dotted key, e.g. server.port
    key: String,
    /// New value (empty clears optional paths)
    value: String,
}

fn load() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

impl ConfigFileArgs {
    /// Execute config-file subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigFileCommand::Show(args) => args.execute(),
            ConfigFileCommand::Get(args) => args.execute(),
            ConfigFileCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load()?;

        if self.json {
            return print_json(&config);
        }

        println!("Tokensmith Configuration");
        println!("========================");
        if let Ok(path) = Config::config_file_path() {
            println!("File: {}", path.display());
        }
        println!();

        let mut section = "";
        for key in CONFIG_KEYS {
            let (prefix, _) = key.split_once('.').unwrap_or((key, ""));
            if prefix != section {
                if !section.is_empty() {
                    println!();
                }
                println!("[{prefix}]");
                section = prefix;
            }
            let value = config.get(key).unwrap_or_default();
            let value = if value.is_empty() { "(not set)".to_string() } else { value };
            println!("  {key} = {value}");
        }
        Ok(())
    }
}

impl ConfigGetArgs {
    /// Execute get command
    pub fn execute(&self) -> CliResult<()> {
        let value = load()?
            .get(&self.key)
            .map_err(|e| CliError::validation(e.to_string()))?;
        println!("{value}");
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = Config::load().unwrap_or_default();

        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
