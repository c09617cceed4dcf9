use anyhow::Result;
use chunkview::panels::{
    CollapsePolicy, ComparisonState, PanelError, PanelPath, RenderOptions, Side,
    build_comparison, comparison_entries_from_str,
};

const REPORT: &str = r#"[
    {"test_chunk": {"text": "alpha", "link": "docs/a.xml"},
     "existing_chunk": {"text": "alpha'"},
     "similarity": 0.8765},
    {"test_chunk": {"text": "beta"},
     "existing_chunk": {"text": "beta'", "link": "undefined/b.xml"},
     "similarity": 0.12},
    {"test_chunk": {"text": "gamma"},
     "existing_chunk": {"text": "gamma'"},
     "similarity": 0.99}
]"#;

#[test]
fn test_sections_keep_input_order() -> Result<()> {
    let entries = comparison_entries_from_str(REPORT)?;
    let sections = build_comparison(&entries, &ComparisonState::new(), &RenderOptions::default())?;

    let headings: Vec<String> = sections.iter().map(|s| s.heading()).collect();
    assert_eq!(headings, ["chunk 1", "chunk 2", "chunk 3"]);
    assert_eq!(sections[0].similarity_text(), "87.65%");
    assert_eq!(sections[0].title(), "chunk 1 -- 87.65% similarity");
    assert_eq!(sections[1].similarity_text(), "12.00%");
    Ok(())
}

#[test]
fn test_each_side_renders_its_own_chunk() -> Result<()> {
    let entries = comparison_entries_from_str(REPORT)?;
    let sections = build_comparison(&entries, &ComparisonState::new(), &RenderOptions::default())?;
    let section = &sections[2];

    let test_rows: Vec<String> = section
        .panel(Side::Test)
        .rows()
        .map(|row| row.value_text.clone())
        .collect();
    let existing_rows: Vec<String> = section
        .panel(Side::Existing)
        .rows()
        .map(|row| row.value_text.clone())
        .collect();
    assert_eq!(test_rows, ["\"gamma\""]);
    assert_eq!(existing_rows, ["\"gamma'\""]);
    Ok(())
}

#[test]
fn test_links_and_linked_collapse() -> Result<()> {
    let entries = comparison_entries_from_str(REPORT)?;
    let options = RenderOptions::default().with_policy(CollapsePolicy::CollapseLinked);
    let sections = build_comparison(&entries, &ComparisonState::new(), &options)?;

    let first = sections[0].panel(Side::Test);
    assert!(first.collapsed);
    assert_eq!(first.link.as_deref(), Some("vscode://file/docs/a.xml"));

    // A broken link still counts for collapsing but offers no target
    let broken = sections[1].panel(Side::Existing);
    assert!(broken.collapsed);
    assert_eq!(broken.link, None);
    Ok(())
}

#[test]
fn test_collapse_state_is_per_section_and_side() -> Result<()> {
    let entries = comparison_entries_from_str(REPORT)?;
    let mut state = ComparisonState::new();
    state.tree_mut(1, Side::Test).toggle(&PanelPath::root(), false);

    let sections = build_comparison(&entries, &state, &RenderOptions::default())?;
    assert!(sections[1].panel(Side::Test).collapsed);
    assert!(!sections[1].panel(Side::Existing).collapsed);
    assert!(!sections[0].panel(Side::Test).collapsed);
    Ok(())
}

#[test]
fn test_malformed_entries_are_rejected() {
    let missing = comparison_entries_from_str(r#"[{"test_chunk": {}, "similarity": 0.5}]"#)
        .unwrap_err();
    assert!(matches!(missing, PanelError::InvalidInput { .. }));
    assert!(missing.to_string().contains("comparison entry 1"));

    let not_array = comparison_entries_from_str(r#"{"similarity": 0.5}"#).unwrap_err();
    assert!(matches!(not_array, PanelError::InvalidInput { .. }));

    let wrong_type = comparison_entries_from_str(
        r#"[{"test_chunk": {}, "existing_chunk": {}, "similarity": "high"}]"#,
    )
    .unwrap_err();
    assert!(matches!(wrong_type, PanelError::InvalidInput { .. }));
}

#[test]
fn test_out_of_range_similarity_is_kept() -> Result<()> {
    let entries = comparison_entries_from_str(
        r#"[{"test_chunk": {}, "existing_chunk": {}, "similarity": 1.5}]"#,
    )?;
    assert_eq!(entries[0].similarity, 1.5);

    let sections = build_comparison(&entries, &ComparisonState::new(), &RenderOptions::default())?;
    assert_eq!(sections[0].similarity_text(), "150.00%");
    Ok(())
}

#[test]
fn test_empty_report() -> Result<()> {
    let entries = comparison_entries_from_str("[]")?;
    let sections = build_comparison(&entries, &ComparisonState::new(), &RenderOptions::default())?;
    assert!(sections.is_empty());
    Ok(())
}
