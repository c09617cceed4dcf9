use log::debug;
use serde_json::Value;

use super::chunk::{PanelNode, RenderOptions, is_composite, render_panel};
use super::collapse::CollapseState;
use super::error::{PanelError, PanelResult};

/// A top-level JSON document to be shown as one panel tree
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: String,
    root: Value,
}

impl Document {
    /// Wrap a parsed value. The root must be an object or an array.
    pub fn new(title: impl Into<String>, root: Value) -> PanelResult<Self> {
        if !is_composite(&root) {
            return Err(PanelError::invalid_input(format!(
                "top-level document must be an object or array, got {}",
                kind_name(&root)
            )));
        }
        Ok(Self {
            title: title.into(),
            root,
        })
    }

    pub fn from_json_str(title: impl Into<String>, text: &str) -> PanelResult<Self> {
        let root: Value = serde_json::from_str(text)?;
        let document = Self::new(title, root)?;
        debug!("Loaded document '{}'", document.title);
        Ok(document)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn render(&self, state: &CollapseState, options: &RenderOptions) -> PanelResult<PanelNode<'_>> {
        render_panel(self.title.clone(), &self.root, state, options)
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
