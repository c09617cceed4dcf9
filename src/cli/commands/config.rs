use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use chunkview::config::Config;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective configuration (default)
    Show,
    /// Print the location of the config file
    Path,
}

pub async fn config_command(args: ConfigCommands, config: &Config) -> Result<()> {
    match args.command.unwrap_or(ConfigSubcommands::Show) {
        ConfigSubcommands::Show => {
            let rendered =
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
            println!("{}", rendered.trim_end());
        }
        ConfigSubcommands::Path => {
            println!("{}", Config::get_config_path()?.display());
        }
    }
    Ok(())
}
