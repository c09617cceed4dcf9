//! Non-interactive text output for pipes and `--print`.

use colored::{ColoredString, Colorize};

use crate::panels::{
    CollapsePolicy, ComparisonSection, LineKind, PanelNode, RenderOptions, VisibleLine, flatten,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainStyle {
    pub color: bool,
    pub indent: usize,
}

impl Default for PlainStyle {
    fn default() -> Self {
        Self {
            color: false,
            indent: 2,
        }
    }
}

impl PlainStyle {
    pub fn colored(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Options for printed output.
///
/// Printed panels cannot be re-expanded, so everything starts open unless
/// `keep_collapsed` asks for the linked-panel policy.
pub fn plain_options(options: RenderOptions, keep_collapsed: bool) -> RenderOptions {
    if keep_collapsed {
        options.with_policy(CollapsePolicy::CollapseLinked)
    } else {
        options.with_policy(CollapsePolicy::Expanded)
    }
}

/// Render a panel tree as indented text, one line per visible header or row
pub fn render_plain(root: &PanelNode<'_>, style: &PlainStyle) -> String {
    render_lines(&flatten(root), 0, style)
}

/// Render every section title followed by its test and existing trees
pub fn render_comparison_plain(sections: &[ComparisonSection<'_>], style: &PlainStyle) -> String {
    let mut out = String::new();
    for section in sections {
        out.push_str(&style.paint(&section.title(), |s| s.bright_blue().bold()));
        out.push('\n');
        out.push_str(&render_lines(&flatten(&section.test), 1, style));
        out.push_str(&render_lines(&flatten(&section.existing), 1, style));
    }
    out
}

fn render_lines(lines: &[VisibleLine], base_depth: usize, style: &PlainStyle) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&" ".repeat((base_depth + line.depth) * style.indent));
        match &line.kind {
            LineKind::Header {
                label,
                collapsed,
                link,
                child_count,
                ..
            } => {
                if *collapsed {
                    out.push_str(&format!(
                        "▶ {} {}",
                        style.paint(label, |s| s.blue().bold()),
                        style.paint(&format!("({} hidden)", child_count), |s| s.dimmed())
                    ));
                } else {
                    out.push_str(&format!("▼ {}", style.paint(label, |s| s.blue().bold())));
                }
                if let Some(target) = link {
                    out.push_str(&format!(
                        "  {}",
                        style.paint(&format!("[link: {}]", target), |s| s.cyan().underline())
                    ));
                }
            }
            LineKind::Row(row) => {
                out.push_str(&format!(
                    "{}: {}",
                    style.paint(&row.key, |s| s.bright_blue()),
                    row.value_text
                ));
            }
        }
        out.push('\n');
    }
    out
}
