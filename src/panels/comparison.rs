use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::chunk::{PanelNode, RenderOptions, render_panel};
use super::collapse::CollapseState;
use super::error::{PanelError, PanelResult};

/// Two chunks put next to each other with their precomputed similarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub test_chunk: Value,
    pub existing_chunk: Value,
    pub similarity: f64,
}

/// Which half of a comparison section a tree belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Test,
    Existing,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Test => "test chunk",
            Side::Existing => "existing chunk",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::Test => Side::Existing,
            Side::Existing => Side::Test,
        }
    }
}

/// Collapse flags for every tree of a comparison view
#[derive(Debug, Clone, Default)]
pub struct ComparisonState {
    trees: HashMap<(usize, Side), CollapseState>,
}

impl ComparisonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags of one tree, `None` until it has been touched
    pub fn tree(&self, index: usize, side: Side) -> Option<&CollapseState> {
        self.trees.get(&(index, side))
    }

    pub fn tree_mut(&mut self, index: usize, side: Side) -> &mut CollapseState {
        self.trees.entry((index, side)).or_default()
    }
}

/// One rendered comparison entry
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSection<'a> {
    pub index: usize,
    pub similarity: f64,
    pub test: PanelNode<'a>,
    pub existing: PanelNode<'a>,
}

impl<'a> ComparisonSection<'a> {
    /// `chunk N`, numbered from one
    pub fn heading(&self) -> String {
        format!("chunk {}", self.index + 1)
    }

    pub fn similarity_text(&self) -> String {
        format_similarity(self.similarity)
    }

    pub fn title(&self) -> String {
        format!("{} -- {} similarity", self.heading(), self.similarity_text())
    }

    pub fn panel(&self, side: Side) -> &PanelNode<'a> {
        match side {
            Side::Test => &self.test,
            Side::Existing => &self.existing,
        }
    }
}

/// Similarity as a percentage with two decimals, e.g. `0.8765` -> `87.65%`
pub fn format_similarity(similarity: f64) -> String {
    // Ties round away from zero, so 0.28125 reads 28.13%
    format!("{:.2}%", (similarity * 10000.0).round() / 100.0)
}

/// Validate a parsed comparison document and pull out its entries
pub fn parse_comparison_entries(document: &Value) -> PanelResult<Vec<ComparisonEntry>> {
    let items = document
        .as_array()
        .ok_or_else(|| PanelError::invalid_input("comparison input must be a JSON array"))?;

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(PanelError::invalid_input(format!(
                "comparison entry {} is not an object",
                i + 1
            )));
        }

        let entry = ComparisonEntry::deserialize(item).map_err(|e| {
            PanelError::invalid_input(format!("comparison entry {}: {}", i + 1, e))
        })?;

        if !entry.similarity.is_finite() {
            return Err(PanelError::invalid_input(format!(
                "comparison entry {} has a non-finite similarity",
                i + 1
            )));
        }
        if !(0.0..=1.0).contains(&entry.similarity) {
            warn!(
                "comparison entry {} has similarity {} outside [0, 1]",
                i + 1,
                entry.similarity
            );
        }

        entries.push(entry);
    }

    debug!("Parsed {} comparison entries", entries.len());
    Ok(entries)
}

/// Parse comparison entries straight from JSON text
pub fn comparison_entries_from_str(text: &str) -> PanelResult<Vec<ComparisonEntry>> {
    let document: Value = serde_json::from_str(text)?;
    parse_comparison_entries(&document)
}

pub fn build_section<'a>(
    index: usize,
    entry: &'a ComparisonEntry,
    state: &ComparisonState,
    options: &RenderOptions,
) -> PanelResult<ComparisonSection<'a>> {
    let untouched = CollapseState::new();
    Ok(ComparisonSection {
        index,
        similarity: entry.similarity,
        test: render_panel(
            Side::Test.label(),
            &entry.test_chunk,
            state.tree(index, Side::Test).unwrap_or(&untouched),
            options,
        )?,
        existing: render_panel(
            Side::Existing.label(),
            &entry.existing_chunk,
            state.tree(index, Side::Existing).unwrap_or(&untouched),
            options,
        )?,
    })
}

/// Render every entry as a section, keeping input order
pub fn build_comparison<'a>(
    entries: &'a [ComparisonEntry],
    state: &ComparisonState,
    options: &RenderOptions,
) -> PanelResult<Vec<ComparisonSection<'a>>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| build_section(index, entry, state, options))
        .collect()
}
