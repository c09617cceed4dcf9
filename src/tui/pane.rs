//! Interaction and drawing for a single panel tree inside a bordered pane.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::panels::{CollapseState, LineKind, PanelNode, PanelPath, VisibleLine, flatten, flatten_all};
use crate::tui::Theme;
use crate::tui::widgets::TreeState;

/// Owned view of a rendered panel tree, detached from the source value
#[derive(Debug, Clone, Default)]
pub struct PaneSnapshot {
    pub lines: Vec<VisibleLine>,
    pub all_lines: Vec<VisibleLine>,
    pub defaults: Vec<(PanelPath, bool)>,
}

impl PaneSnapshot {
    pub fn from_panel(panel: &PanelNode<'_>) -> Self {
        Self {
            lines: flatten(panel),
            all_lines: flatten_all(panel),
            defaults: panel
                .collapse_defaults()
                .into_iter()
                .map(|(path, collapsed)| (path.clone(), collapsed))
                .collect(),
        }
    }

    pub fn line(&self, id: &PanelPath) -> Option<&VisibleLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    fn default_for(&self, id: &PanelPath) -> bool {
        self.defaults
            .iter()
            .find(|(path, _)| path == id)
            .is_some_and(|(_, collapsed)| *collapsed)
    }
}

/// Toggle the selected panel, or the panel owning the selected row
pub fn toggle_selected(snapshot: &PaneSnapshot, collapse: &mut CollapseState, tree: &mut TreeState) {
    let Some(id) = tree.selected().cloned() else {
        return;
    };
    let Some(line) = snapshot.line(&id) else {
        return;
    };

    match &line.kind {
        LineKind::Header {
            initially_collapsed,
            ..
        } => {
            let collapsed = collapse.toggle(&id, *initially_collapsed);
            log::debug!("Toggled {} (collapsed: {})", id, collapsed);
        }
        LineKind::Row(_) => {
            if let Some(parent) = id.parent() {
                collapse.toggle(&parent, snapshot.default_for(&parent));
                tree.select(Some(parent));
            }
        }
    }
}

/// Expand the selected panel if it is collapsed
pub fn expand_selected(snapshot: &PaneSnapshot, collapse: &mut CollapseState, tree: &TreeState) {
    if let Some(id) = tree.selected() {
        if let Some(VisibleLine {
            kind:
                LineKind::Header {
                    collapsed: true,
                    initially_collapsed,
                    ..
                },
            ..
        }) = snapshot.line(id)
        {
            collapse.set(id, false, *initially_collapsed);
        }
    }
}

/// Collapse the selected panel, or jump to the parent when there is nothing to collapse
pub fn collapse_or_parent(snapshot: &PaneSnapshot, collapse: &mut CollapseState, tree: &mut TreeState) {
    let Some(id) = tree.selected().cloned() else {
        return;
    };
    match snapshot.line(&id).map(|line| &line.kind) {
        Some(LineKind::Header {
            collapsed: false,
            initially_collapsed,
            ..
        }) => collapse.set(&id, true, *initially_collapsed),
        _ => tree.navigate_to_parent(),
    }
}

pub fn set_all(snapshot: &PaneSnapshot, collapse: &mut CollapseState, collapsed: bool) {
    collapse.set_all(
        snapshot.defaults.iter().map(|(path, default)| (path, *default)),
        collapsed,
    );
}

/// Expand every ancestor of `id` so it becomes visible
pub fn reveal(snapshot: &PaneSnapshot, collapse: &mut CollapseState, id: &PanelPath) {
    let mut ancestor = id.parent();
    while let Some(path) = ancestor {
        collapse.set(&path, false, snapshot.default_for(&path));
        ancestor = path.parent();
    }
}

/// Link target of the selected panel
pub fn selected_link(snapshot: &PaneSnapshot, tree: &TreeState) -> Option<String> {
    match &snapshot.line(tree.selected()?)?.kind {
        LineKind::Header { link, .. } => link.clone(),
        LineKind::Row(_) => None,
    }
}

/// Draw the visible window of `snapshot` inside a bordered block
pub fn draw_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    snapshot: &PaneSnapshot,
    tree: &mut TreeState,
    theme: &Theme,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title), theme.header_style()))
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner.height as usize;
    tree.update_scroll(visible_height);

    let selected = tree.selected().cloned();
    let lines: Vec<Line> = snapshot
        .lines
        .iter()
        .skip(tree.scroll_offset())
        .take(visible_height)
        .map(|line| {
            let is_selected = focused && selected.as_ref() == Some(&line.id);
            line_to_spans(line, theme, is_selected)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn line_to_spans(line: &VisibleLine, theme: &Theme, is_selected: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ".repeat(line.depth))];

    match &line.kind {
        LineKind::Header {
            label,
            collapsed,
            link,
            child_count,
            ..
        } => {
            let marker = if *collapsed { "▶ " } else { "▼ " };
            spans.push(Span::styled(marker, Style::default().fg(theme.overlay1)));
            spans.push(Span::styled(label.clone(), theme.header_style()));
            if *collapsed {
                spans.push(Span::styled(
                    format!(" ({})", child_count),
                    Style::default().fg(theme.overlay0),
                ));
            }
            if link.is_some() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled("[link]", theme.link_style()));
            }
        }
        LineKind::Row(row) => {
            spans.push(Span::styled(row.key.clone(), theme.key_style()));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(row.value_text.clone(), theme.value_style(row.kind)));
        }
    }

    let line = Line::from(spans);
    if is_selected {
        line.style(theme.selected_style().add_modifier(Modifier::BOLD))
    } else {
        line
    }
}
