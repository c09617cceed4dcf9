use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

use chunkview::config::{Config, Mode};
use chunkview::panels::{
    CollapsePolicy, ComparisonState, build_comparison, comparison_entries_from_str,
};
use chunkview::render::{plain_options, render_comparison_plain};
use chunkview::tui::apps::{ComparisonApp, comparison_app};
use chunkview::tui::{Runtime, Theme, run_app};

use super::output::{OutputArgs, read_input};

#[derive(Args)]
pub struct CompareCommands {
    /// JSON file holding an array of comparison entries
    pub file: PathBuf,
    /// Start with linked chunks expanded
    #[arg(long, conflicts_with = "collapse_linked")]
    pub expand_linked: bool,
    /// Keep linked chunks collapsed in printed output
    #[arg(long)]
    pub collapse_linked: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn compare_command(args: CompareCommands, config: &Config) -> Result<()> {
    info!("Comparing chunks from {:?}", args.file);

    let text = read_input(&args.file).await?;
    let entries = comparison_entries_from_str(&text)
        .with_context(|| format!("Invalid comparison report: {}", args.file.display()))?;
    info!("Loaded {} comparison entries", entries.len());

    let mut options = args.output.apply(config.render_options(Mode::Compare));
    if args.expand_linked {
        options = options.with_policy(CollapsePolicy::Expanded);
    }

    if args.output.wants_plain() {
        let options = plain_options(options, args.collapse_linked);
        let sections = build_comparison(&entries, &ComparisonState::new(), &options)
            .with_context(|| format!("Failed to render {}", args.file.display()))?;
        if sections.is_empty() {
            println!("No comparison entries.");
        } else {
            print!(
                "{}",
                render_comparison_plain(&sections, &args.output.plain_style())
            );
        }
        return Ok(());
    }

    // Render once up front so depth errors surface before the terminal is taken over
    build_comparison(&entries, &ComparisonState::new(), &options)
        .with_context(|| format!("Failed to render {}", args.file.display()))?;

    let state = comparison_app::State::new(entries, options);
    run_app(Runtime::<ComparisonApp>::new(state, Theme::new(config.theme))).await
}
