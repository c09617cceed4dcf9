use serde_json::Value;

/// JSON kind of a row value, kept for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Null,
    Bool,
    Number,
    String,
}

impl ScalarKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            // Composite values never reach a row through the panel builder
            _ => Self::String,
        }
    }
}

/// A fixed two-column row: key label and the value as JSON text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: String,
    pub value_text: String,
    pub kind: ScalarKind,
}

/// Render a scalar (or null) entry as a row.
///
/// The value is serialized with plain JSON rules, so strings keep their
/// quotes and null shows up as `null`.
pub fn render_pair(key: impl Into<String>, value: &Value) -> RowView {
    RowView {
        key: key.into(),
        value_text: value.to_string(),
        kind: ScalarKind::of(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_serialization() {
        assert_eq!(render_pair("x", &Value::Null).value_text, "null");
        assert_eq!(render_pair("s", &json!("hi")).value_text, "\"hi\"");
        assert_eq!(render_pair("n", &json!(1.5)).value_text, "1.5");
        assert_eq!(render_pair("i", &json!(42)).value_text, "42");
        assert_eq!(render_pair("b", &json!(false)).value_text, "false");
        assert_eq!(render_pair("x", &Value::Null).kind, ScalarKind::Null);
    }

    #[test]
    fn test_strings_are_escaped_not_truncated() {
        let long = "a\"b".repeat(100);
        let row = render_pair("k", &json!(long));
        assert_eq!(row.key, "k");
        assert!(row.value_text.starts_with("\"a\\\"b"));
        assert_eq!(row.value_text.len(), 2 + 4 * 100);
    }
}
