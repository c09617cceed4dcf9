use super::commands::{CompareCommands, ConfigCommands, ViewCommands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chunkview")]
#[command(about = "Browse JSON documents and chunk comparisons as collapsible panels")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a JSON document as nested panels
    View(ViewCommands),
    /// Show a chunk comparison report side by side
    Compare(CompareCommands),
    /// Inspect the configuration
    Config(ConfigCommands),
}
