use serde_json::Value;

use super::collapse::{CollapsePolicy, CollapseState};
use super::error::{PanelError, PanelResult};
use super::link::link_target;
use super::pair::{RowView, render_pair};
use super::path::PanelPath;

pub const DEFAULT_MAX_DEPTH: usize = 128;
pub const DEFAULT_LINK_BASE: &str = "vscode://file/";

/// Knobs that shape how a JSON value is laid out as panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub policy: CollapsePolicy,
    pub link_base: String,
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            policy: CollapsePolicy::Expanded,
            link_base: DEFAULT_LINK_BASE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    pub fn with_policy(mut self, policy: CollapsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_link_base(mut self, link_base: impl Into<String>) -> Self {
        self.link_base = link_base.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// True for values that get their own panel (objects and arrays)
pub fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Keyed entries of a value in iteration order.
///
/// Objects yield their fields in insertion order, arrays yield their
/// elements keyed by index, scalars yield nothing.
pub fn entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// A titled, collapsible panel over a borrowed JSON value.
///
/// Children are always present, whether or not the panel is collapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelNode<'a> {
    pub path: PanelPath,
    pub label: String,
    pub value: &'a Value,
    pub collapsed: bool,
    /// Flag the collapse policy assigned before any toggling
    pub initially_collapsed: bool,
    pub link: Option<String>,
    pub children: Vec<PanelChild<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelChild<'a> {
    Panel(PanelNode<'a>),
    Row(RowView),
}

impl<'a> PanelNode<'a> {
    /// This panel and every nested panel, depth-first
    pub fn panels(&self) -> Vec<&PanelNode<'a>> {
        let mut out = vec![self];
        for child in &self.children {
            if let PanelChild::Panel(panel) = child {
                out.extend(panel.panels());
            }
        }
        out
    }

    pub fn panel_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                PanelChild::Panel(panel) => panel.panel_count(),
                PanelChild::Row(_) => 0,
            })
            .sum::<usize>()
    }

    pub fn row_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                PanelChild::Panel(panel) => panel.row_count(),
                PanelChild::Row(_) => 1,
            })
            .sum()
    }

    /// Direct rows of this panel, in order
    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.children.iter().filter_map(|child| match child {
            PanelChild::Row(row) => Some(row),
            PanelChild::Panel(_) => None,
        })
    }

    pub fn find(&self, path: &PanelPath) -> Option<&PanelNode<'a>> {
        if &self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            PanelChild::Panel(panel) if path.segments().starts_with(panel.path.segments()) => {
                panel.find(path)
            }
            _ => None,
        })
    }

    /// `(path, initial flag)` of every panel, the shape `CollapseState::set_all` takes
    pub fn collapse_defaults(&self) -> Vec<(&PanelPath, bool)> {
        self.panels()
            .into_iter()
            .map(|panel| (&panel.path, panel.initially_collapsed))
            .collect()
    }
}

/// Render `value` as a top-level panel titled `label`.
///
/// Composite entries become nested panels, everything else becomes a
/// row. A scalar `value` produces a panel with no children.
pub fn render_panel<'a>(
    label: impl Into<String>,
    value: &'a Value,
    state: &CollapseState,
    options: &RenderOptions,
) -> PanelResult<PanelNode<'a>> {
    build_panel(label.into(), value, PanelPath::root(), state, options)
}

fn build_panel<'a>(
    label: String,
    value: &'a Value,
    path: PanelPath,
    state: &CollapseState,
    options: &RenderOptions,
) -> PanelResult<PanelNode<'a>> {
    if path.depth() > options.max_depth {
        return Err(PanelError::DepthExceeded {
            path,
            limit: options.max_depth,
        });
    }

    let initially_collapsed = options.policy.initially_collapsed(value);
    let collapsed = state.is_collapsed(&path, initially_collapsed);

    let mut children = Vec::new();
    for (key, child) in entries(value) {
        if is_composite(child) {
            let child_path = path.child(key.clone());
            children.push(PanelChild::Panel(build_panel(
                key, child, child_path, state, options,
            )?));
        } else {
            children.push(PanelChild::Row(render_pair(key, child)));
        }
    }

    Ok(PanelNode {
        link: link_target(value, &options.link_base),
        path,
        label,
        value,
        collapsed,
        initially_collapsed,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_of_each_kind() {
        let object = json!({"b": 1, "a": 2});
        let keys: Vec<_> = entries(&object).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);

        let array = json!(["x", "y"]);
        let keys: Vec<_> = entries(&array).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);

        assert!(entries(&json!(7)).is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let value = json!({"a": {"b": {"c": {}}}});
        let options = RenderOptions::default().with_max_depth(2);
        let err = render_panel("root", &value, &CollapseState::new(), &options).unwrap_err();
        match err {
            PanelError::DepthExceeded { path, limit } => {
                assert_eq!(limit, 2);
                assert_eq!(path, PanelPath::from_segments(["a", "b", "c"]));
            }
            other => panic!("unexpected error: {other}"),
        }

        let options = RenderOptions::default().with_max_depth(3);
        assert!(render_panel("root", &value, &CollapseState::new(), &options).is_ok());
    }

    #[test]
    fn test_find_nested_panel() {
        let value = json!({"a": {"b": [1, {"c": true}]}});
        let panel = render_panel("root", &value, &CollapseState::new(), &RenderOptions::default())
            .unwrap();
        let found = panel
            .find(&PanelPath::from_segments(["a", "b", "1"]))
            .expect("panel should exist");
        assert_eq!(found.label, "1");
        assert_eq!(found.rows().next().map(|r| r.key.as_str()), Some("c"));
        assert!(panel.find(&PanelPath::from_segments(["missing"])).is_none());
    }
}
