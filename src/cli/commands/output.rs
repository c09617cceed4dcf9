use anyhow::{Context, Result};
use clap::Args;
use is_terminal::IsTerminal;
use std::path::Path;

use chunkview::panels::RenderOptions;
use chunkview::render::PlainStyle;

/// Flags shared by the `view` and `compare` commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print the panels as indented text instead of opening the interactive view
    #[arg(long)]
    pub print: bool,
    /// Disable colors in printed output
    #[arg(long)]
    pub no_color: bool,
    /// Prefix prepended to `link` values (overrides config and CHUNKVIEW_LINK_BASE)
    #[arg(long, value_name = "BASE")]
    pub link_base: Option<String>,
    /// Maximum nesting depth before rendering fails
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

impl OutputArgs {
    /// Apply the flag overrides on top of the configured options
    pub fn apply(&self, mut options: RenderOptions) -> RenderOptions {
        if let Some(link_base) = &self.link_base {
            options = options.with_link_base(link_base.clone());
        }
        if let Some(max_depth) = self.max_depth {
            options = options.with_max_depth(max_depth);
        }
        options
    }

    /// Plain output when asked for, or when stdout is not a terminal
    pub fn wants_plain(&self) -> bool {
        self.print || !std::io::stdout().is_terminal()
    }

    pub fn plain_style(&self) -> PlainStyle {
        PlainStyle::colored(!self.no_color && std::io::stdout().is_terminal())
    }
}

pub async fn read_input(path: &Path) -> Result<String> {
    log::debug!("Reading input from {:?}", path);
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// File stem used as the default document title
pub fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
