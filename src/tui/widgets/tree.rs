use crossterm::event::KeyCode;

use crate::panels::{PanelPath, VisibleLine};

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// Selection and scrolling over the visible lines of one panel tree.
///
/// Expansion is not tracked here; it lives in the tree's `CollapseState`
/// and shows up as a different set of visible lines.
#[derive(Debug, Clone)]
pub struct TreeState {
    selected: Option<PanelPath>,
    scroll_offset: usize,
    scroll_off: usize, // Scrolloff distance (vim-like)
    visible_order: Vec<PanelPath>,
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeState {
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            scroll_off: 3,
            visible_order: vec![],
        }
    }

    /// Set the scroll-off distance (rows from edge before scrolling)
    pub fn with_scroll_off(mut self, scroll_off: usize) -> Self {
        self.scroll_off = scroll_off;
        self
    }

    pub fn selected(&self) -> Option<&PanelPath> {
        self.selected.as_ref()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn select(&mut self, id: Option<PanelPath>) {
        self.selected = id;
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.visible_order.iter().position(|id| id == selected)
    }

    /// Refresh the visible order after the lines changed.
    ///
    /// A selection that disappeared (its panel got collapsed) moves to the
    /// nearest visible ancestor.
    pub fn sync(&mut self, lines: &[VisibleLine]) {
        self.visible_order = lines.iter().map(|line| line.id.clone()).collect();

        let mut candidate = self.selected.clone();
        while let Some(id) = candidate {
            if self.visible_order.contains(&id) {
                self.selected = Some(id);
                return;
            }
            candidate = id.parent();
        }
        self.selected = self.visible_order.first().cloned();
    }

    fn select_index(&mut self, index: usize) {
        if let Some(id) = self.visible_order.get(index) {
            self.selected = Some(id.clone());
        }
    }

    /// Move the selection by `delta` rows, clamped to the visible range
    pub fn move_by(&mut self, delta: isize) {
        if self.visible_order.is_empty() {
            return;
        }
        let last = self.visible_order.len() - 1;
        let target = match self.selected_index() {
            Some(current) => current.saturating_add_signed(delta).min(last),
            None => 0,
        };
        self.select_index(target);
    }

    pub fn navigate_next(&mut self) {
        self.move_by(1);
    }

    pub fn navigate_prev(&mut self) {
        self.move_by(-1);
    }

    pub fn navigate_to_parent(&mut self) {
        if let Some(parent) = self.selected.as_ref().and_then(PanelPath::parent) {
            self.selected = Some(parent);
        }
    }

    /// Handle navigation keys (returns true if handled)
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.navigate_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.navigate_next(),
            KeyCode::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            KeyCode::PageDown => self.move_by(PAGE_SIZE as isize),
            KeyCode::Home => self.select_index(0),
            KeyCode::End => self.select_index(self.visible_order.len().saturating_sub(1)),
            _ => return false,
        }
        true
    }

    /// Update scroll offset based on selection and visible height
    pub fn update_scroll(&mut self, visible_height: usize) {
        let item_count = self.visible_order.len();
        if let Some(sel_idx) = self.selected_index() {
            // Calculate ideal scroll range to keep selection visible with scrolloff
            let min_scroll =
                sel_idx.saturating_sub(visible_height.saturating_sub(self.scroll_off + 1));
            let max_scroll = sel_idx.saturating_sub(self.scroll_off);

            if self.scroll_offset < min_scroll {
                self.scroll_offset = min_scroll;
            } else if self.scroll_offset > max_scroll {
                self.scroll_offset = max_scroll;
            }
        }

        // Clamp to valid range
        let max_offset = item_count.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{CollapseState, RenderOptions, flatten, render_panel};
    use serde_json::json;

    fn lines_for(value: &serde_json::Value, state: &CollapseState) -> Vec<VisibleLine> {
        let panel = render_panel("root", value, state, &RenderOptions::default()).unwrap();
        flatten(&panel)
    }

    #[test]
    fn test_sync_selects_first_line() {
        let value = json!({"a": 1, "b": 2});
        let mut tree = TreeState::new();
        tree.sync(&lines_for(&value, &CollapseState::new()));
        assert_eq!(tree.selected(), Some(&PanelPath::root()));
    }

    #[test]
    fn test_navigation_clamps() {
        let value = json!({"a": 1, "b": 2});
        let mut tree = TreeState::new();
        tree.sync(&lines_for(&value, &CollapseState::new()));

        tree.navigate_prev();
        assert_eq!(tree.selected_index(), Some(0));
        tree.handle_key(KeyCode::End);
        assert_eq!(tree.selected(), Some(&PanelPath::from_segments(["b"])));
        tree.navigate_next();
        assert_eq!(tree.selected_index(), Some(2));
        tree.handle_key(KeyCode::PageUp);
        assert_eq!(tree.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_falls_back_to_visible_ancestor() {
        let value = json!({"outer": {"inner": {"x": 1}}});
        let mut state = CollapseState::new();
        let mut tree = TreeState::new();
        tree.sync(&lines_for(&value, &state));
        tree.select(Some(PanelPath::from_segments(["outer", "inner", "x"])));

        state.toggle(&PanelPath::from_segments(["outer"]), false);
        tree.sync(&lines_for(&value, &state));
        assert_eq!(tree.selected(), Some(&PanelPath::from_segments(["outer"])));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let value = json!((0..50).collect::<Vec<_>>());
        let mut tree = TreeState::new().with_scroll_off(2);
        tree.sync(&lines_for(&value, &CollapseState::new()));

        tree.handle_key(KeyCode::End);
        tree.update_scroll(10);
        assert_eq!(tree.scroll_offset(), 41);

        tree.handle_key(KeyCode::Home);
        tree.update_scroll(10);
        assert_eq!(tree.scroll_offset(), 0);
    }
}
