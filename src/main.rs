use anyhow::Result;
use clap::Parser;
use log::info;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

mod cli;

use chunkview::config::Config;
use cli::{Cli, Commands};
use cli::commands::{compare_command, config_command, view_command};

const LOG_FILE: &str = "chunkview.log";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging();

    let config = Config::load()?;
    info!("Starting chunkview");

    match cli.command {
        Commands::View(args) => view_command(args, &config).await,
        Commands::Compare(args) => compare_command(args, &config).await,
        Commands::Config(args) => config_command(args, &config).await,
    }
}

/// Log to a file (truncated on each run) so output never lands on the TUI.
/// Without a writable config directory, logs go to stderr.
fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    match open_log_file(Config::get_config_dir()) {
        Some(log_file) => builder.target(env_logger::Target::Pipe(Box::new(log_file))),
        None => builder.target(env_logger::Target::Stderr),
    };
    builder.init();
}

fn open_log_file(config_dir: Result<PathBuf>) -> Option<File> {
    let path = config_dir.ok()?.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .ok()
}
