//! Pure panel model: turns JSON values into collapsible panel trees.
//!
//! Nothing here touches the terminal. Collapse flags live in
//! [`CollapseState`], keyed by [`PanelPath`], and are read while the tree
//! is built, so the same value and state always produce the same panels.

pub mod chunk;
pub mod collapse;
pub mod comparison;
pub mod document;
pub mod error;
pub mod flatten;
pub mod link;
pub mod pair;
pub mod path;

pub use chunk::{
    DEFAULT_LINK_BASE, DEFAULT_MAX_DEPTH, PanelChild, PanelNode, RenderOptions, entries,
    is_composite, render_panel,
};
pub use collapse::{CollapsePolicy, CollapseState, LINK_KEY};
pub use comparison::{
    ComparisonEntry, ComparisonSection, ComparisonState, Side, build_comparison, build_section,
    comparison_entries_from_str, format_similarity, parse_comparison_entries,
};
pub use document::Document;
pub use error::{PanelError, PanelResult};
pub use flatten::{LineKind, VisibleLine, flatten, flatten_all};
pub use link::link_target;
pub use pair::{RowView, ScalarKind, render_pair};
pub use path::PanelPath;
