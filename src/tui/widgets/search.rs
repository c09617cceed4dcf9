use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::panels::{PanelPath, VisibleLine};

/// Fuzzy search over panel labels and row keys
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    /// True while the prompt is taking keystrokes
    editing: bool,
    matches: Vec<PanelPath>,
    current: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// A submitted query with at least one hit
    pub fn is_active(&self) -> bool {
        !self.editing && !self.matches.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// One-based position of the current match
    pub fn position(&self) -> Option<usize> {
        (!self.matches.is_empty()).then_some(self.current + 1)
    }

    pub fn start(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = 0;
        self.editing = true;
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.query.clear();
        self.matches.clear();
    }

    /// Score every line against the query and return the best hit.
    ///
    /// Matches are ordered by score, ties keep document order.
    pub fn submit(&mut self, lines: &[VisibleLine]) -> Option<PanelPath> {
        self.editing = false;
        self.current = 0;
        self.matches.clear();
        if self.query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &PanelPath)> = lines
            .iter()
            .filter_map(|line| {
                matcher
                    .fuzzy_match(line.name(), &self.query)
                    .map(|score| (score, &line.id))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        self.matches = scored.into_iter().map(|(_, id)| id.clone()).collect();
        log::debug!("Search '{}' matched {} lines", self.query, self.matches.len());
        self.matches.first().cloned()
    }

    /// Advance to the next match, wrapping around
    pub fn next_match(&mut self) -> Option<PanelPath> {
        if self.matches.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.matches.len();
        self.matches.get(self.current).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{CollapseState, RenderOptions, flatten_all, render_panel};
    use serde_json::json;

    #[test]
    fn test_submit_finds_hidden_keys() {
        let value = json!({"patient": {"birthDate": "2000"}, "encounter": {"date": "x"}});
        let mut state = CollapseState::new();
        state.toggle(&PanelPath::from_segments(["patient"]), false);
        let panel = render_panel("doc", &value, &state, &RenderOptions::default()).unwrap();

        let mut search = SearchState::new();
        search.start();
        for c in "birth".chars() {
            search.push_char(c);
        }
        let hit = search.submit(&flatten_all(&panel));
        assert_eq!(hit, Some(PanelPath::from_segments(["patient", "birthDate"])));
        assert!(search.is_active());
        assert_eq!(search.position(), Some(1));
    }

    #[test]
    fn test_next_match_wraps() {
        let value = json!({"date": 1, "other": {"date": 2}});
        let panel =
            render_panel("doc", &value, &CollapseState::new(), &RenderOptions::default()).unwrap();

        let mut search = SearchState::new();
        search.start();
        "date".chars().for_each(|c| search.push_char(c));
        let first = search.submit(&flatten_all(&panel)).unwrap();
        assert_eq!(search.match_count(), 2);

        let second = search.next_match().unwrap();
        assert_ne!(first, second);
        assert_eq!(search.next_match(), Some(first));
    }

    #[test]
    fn test_empty_query_and_cancel() {
        let mut search = SearchState::new();
        search.start();
        assert!(search.is_editing());
        assert_eq!(search.submit(&[]), None);
        assert!(!search.is_active());

        search.start();
        search.push_char('x');
        search.pop_char();
        search.push_char('y');
        assert_eq!(search.query(), "y");
        search.cancel();
        assert_eq!(search.query(), "");
        assert!(!search.is_editing());
    }
}
