use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

use chunkview::config::{Config, Mode};
use chunkview::panels::{CollapsePolicy, CollapseState, Document};
use chunkview::render::{plain_options, render_plain};
use chunkview::tui::apps::{DocumentApp, document_app};
use chunkview::tui::{Runtime, Theme, run_app};

use super::output::{OutputArgs, default_title, read_input};

#[derive(Args)]
pub struct ViewCommands {
    /// JSON file containing an object or array
    pub file: PathBuf,
    /// Title of the top panel (defaults to the file name)
    #[arg(long)]
    pub title: Option<String>,
    /// Start with panels that carry a `link` collapsed
    #[arg(long)]
    pub collapse_linked: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn view_command(args: ViewCommands, config: &Config) -> Result<()> {
    info!("Viewing {:?}", args.file);

    let text = read_input(&args.file).await?;
    let title = args.title.clone().unwrap_or_else(|| default_title(&args.file));
    let document = Document::from_json_str(title, &text)
        .with_context(|| format!("Invalid document: {}", args.file.display()))?;

    let mut options = args.output.apply(config.render_options(Mode::View));
    if args.collapse_linked {
        options = options.with_policy(CollapsePolicy::CollapseLinked);
    }

    if args.output.wants_plain() {
        let options = plain_options(options, args.collapse_linked);
        let panel = document
            .render(&CollapseState::new(), &options)
            .with_context(|| format!("Failed to render {}", args.file.display()))?;
        print!("{}", render_plain(&panel, &args.output.plain_style()));
        return Ok(());
    }

    // Render once up front so depth errors surface before the terminal is taken over
    document
        .render(&CollapseState::new(), &options)
        .with_context(|| format!("Failed to render {}", args.file.display()))?;

    let state = document_app::State::new(document, options);
    run_app(Runtime::<DocumentApp>::new(state, Theme::new(config.theme))).await
}
