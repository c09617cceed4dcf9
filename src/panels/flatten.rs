use super::chunk::{PanelChild, PanelNode};
use super::pair::RowView;
use super::path::PanelPath;

/// One displayable line of a panel tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    /// Panel path for headers, parent path plus key for rows
    pub id: PanelPath,
    pub depth: usize,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Header {
        label: String,
        collapsed: bool,
        initially_collapsed: bool,
        link: Option<String>,
        child_count: usize,
    },
    Row(RowView),
}

impl VisibleLine {
    /// Key or label shown at the start of the line
    pub fn name(&self) -> &str {
        match &self.kind {
            LineKind::Header { label, .. } => label,
            LineKind::Row(row) => &row.key,
        }
    }
}

/// Flatten a panel tree into the lines currently on display.
///
/// Collapsed panels contribute their header only.
pub fn flatten(root: &PanelNode<'_>) -> Vec<VisibleLine> {
    let mut lines = Vec::new();
    flatten_recursive(root, 0, true, &mut lines);
    lines
}

/// Every line of the tree as if all panels were expanded
pub fn flatten_all(root: &PanelNode<'_>) -> Vec<VisibleLine> {
    let mut lines = Vec::new();
    flatten_recursive(root, 0, false, &mut lines);
    lines
}

fn flatten_recursive(
    panel: &PanelNode<'_>,
    depth: usize,
    respect_collapse: bool,
    lines: &mut Vec<VisibleLine>,
) {
    lines.push(VisibleLine {
        id: panel.path.clone(),
        depth,
        kind: LineKind::Header {
            label: panel.label.clone(),
            collapsed: panel.collapsed,
            initially_collapsed: panel.initially_collapsed,
            link: panel.link.clone(),
            child_count: panel.children.len(),
        },
    });

    if respect_collapse && panel.collapsed {
        return;
    }

    for child in &panel.children {
        match child {
            PanelChild::Panel(nested) => {
                flatten_recursive(nested, depth + 1, respect_collapse, lines)
            }
            PanelChild::Row(row) => lines.push(VisibleLine {
                id: panel.path.child(row.key.clone()),
                depth: depth + 1,
                kind: LineKind::Row(row.clone()),
            }),
        }
    }
}
