use std::fmt;

/// Address of a panel or row: the sequence of keys walked from the root.
///
/// Array elements contribute their index as a decimal string, so every
/// segment is a plain key regardless of the container kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelPath(Vec<String>);

impl PanelPath {
    /// The path of the top-level panel
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path of a direct child under this one
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Number of keys below the root
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PanelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_and_parent() {
        let path = PanelPath::root().child("a").child("0");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.last(), Some("0"));
        assert_eq!(path.parent(), Some(PanelPath::from_segments(["a"])));
        assert_eq!(PanelPath::root().parent(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PanelPath::root().to_string(), "$");
        assert_eq!(PanelPath::from_segments(["x", "1"]).to_string(), "$.x.1");
    }
}
