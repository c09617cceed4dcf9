use serde_json::Value;

use super::collapse::LINK_KEY;

/// Marker that shows up in links produced from missing data upstream
const BROKEN_LINK_MARKER: &str = "undefined";

/// Target of the link affordance for a panel value, if it has one.
///
/// Only objects with a non-empty string `link` that does not contain
/// `"undefined"` qualify. The target is `base` followed by the link text.
pub fn link_target(value: &Value, base: &str) -> Option<String> {
    let link = value.as_object()?.get(LINK_KEY)?.as_str()?;
    if link.is_empty() || link.contains(BROKEN_LINK_MARKER) {
        return None;
    }
    Some(format!("{}{}", base, link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "vscode://file/repo/";

    #[test]
    fn test_link_concatenates_base() {
        let value = json!({"link": "foo/bar.xml"});
        assert_eq!(
            link_target(&value, BASE).as_deref(),
            Some("vscode://file/repo/foo/bar.xml")
        );
    }

    #[test]
    fn test_undefined_links_are_hidden() {
        assert_eq!(link_target(&json!({"link": "undefinedXYZ"}), BASE), None);
        assert_eq!(link_target(&json!({"link": "a/undefined.xml"}), BASE), None);
    }

    #[test]
    fn test_missing_or_non_string_links() {
        assert_eq!(link_target(&json!({}), BASE), None);
        assert_eq!(link_target(&json!({"link": ""}), BASE), None);
        assert_eq!(link_target(&json!({"link": null}), BASE), None);
        assert_eq!(link_target(&json!({"link": 3}), BASE), None);
        assert_eq!(link_target(&json!("link"), BASE), None);
    }
}
