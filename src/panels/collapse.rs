use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::path::PanelPath;

/// Key whose presence marks an annotated chunk
pub const LINK_KEY: &str = "link";

/// Decides whether a freshly created panel starts collapsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsePolicy {
    /// Every panel starts expanded
    #[default]
    Expanded,
    /// Objects that carry a `link` key start collapsed
    CollapseLinked,
}

impl CollapsePolicy {
    pub fn from_flag(collapse_linked: bool) -> Self {
        if collapse_linked {
            Self::CollapseLinked
        } else {
            Self::Expanded
        }
    }

    /// Initial collapse flag for a panel rooted at `value`
    pub fn initially_collapsed(self, value: &Value) -> bool {
        match self {
            Self::Expanded => false,
            Self::CollapseLinked => value
                .as_object()
                .is_some_and(|map| map.contains_key(LINK_KEY)),
        }
    }
}

/// Per-panel collapse flags, addressed by panel path.
///
/// Only deviations from the policy default are stored, so a panel that is
/// toggled back to its initial state leaves no trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    overrides: HashMap<PanelPath, bool>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective flag for `path`, falling back to `default`
    pub fn is_collapsed(&self, path: &PanelPath, default: bool) -> bool {
        self.overrides.get(path).copied().unwrap_or(default)
    }

    pub fn set(&mut self, path: &PanelPath, collapsed: bool, default: bool) {
        if collapsed == default {
            self.overrides.remove(path);
        } else {
            self.overrides.insert(path.clone(), collapsed);
        }
    }

    /// Flip the flag for `path` and return the new value
    pub fn toggle(&mut self, path: &PanelPath, default: bool) -> bool {
        let next = !self.is_collapsed(path, default);
        self.set(path, next, default);
        next
    }

    /// Apply the same flag to every `(path, default)` pair
    pub fn set_all<'p, I>(&mut self, panels: I, collapsed: bool)
    where
        I: IntoIterator<Item = (&'p PanelPath, bool)>,
    {
        for (path, default) in panels {
            self.set(path, collapsed, default);
        }
    }

    /// Forget every override, returning all panels to their policy default
    pub fn reset(&mut self) {
        self.overrides.clear();
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_defaults() {
        let linked = json!({"link": "a.xml", "text": "x"});
        let plain = json!({"text": "x"});

        assert!(!CollapsePolicy::Expanded.initially_collapsed(&linked));
        assert!(CollapsePolicy::CollapseLinked.initially_collapsed(&linked));
        assert!(!CollapsePolicy::CollapseLinked.initially_collapsed(&plain));
        // Arrays never carry a link key
        assert!(!CollapsePolicy::CollapseLinked.initially_collapsed(&json!(["link"])));
    }

    #[test]
    fn test_null_link_still_counts_as_present() {
        let value = json!({"link": null});
        assert!(CollapsePolicy::CollapseLinked.initially_collapsed(&value));
    }

    #[test]
    fn test_toggle_round_trip_leaves_no_override() {
        let mut state = CollapseState::new();
        let path = PanelPath::root().child("a");

        assert!(state.toggle(&path, false));
        assert!(state.is_collapsed(&path, false));
        assert_eq!(state.override_count(), 1);

        assert!(!state.toggle(&path, false));
        assert_eq!(state, CollapseState::new());
    }

    #[test]
    fn test_toggle_respects_collapsed_default() {
        let mut state = CollapseState::new();
        let path = PanelPath::root();

        assert!(state.is_collapsed(&path, true));
        assert!(!state.toggle(&path, true));
        assert!(!state.is_collapsed(&path, true));
    }

    #[test]
    fn test_set_all_and_reset() {
        let mut state = CollapseState::new();
        let a = PanelPath::from_segments(["a"]);
        let b = PanelPath::from_segments(["b"]);

        state.set_all([(&a, false), (&b, true)], true);
        assert!(state.is_collapsed(&a, false));
        assert!(state.is_collapsed(&b, true));
        assert_eq!(state.override_count(), 1);

        state.reset();
        assert!(!state.is_collapsed(&a, false));
    }
}
