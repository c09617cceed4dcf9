use anyhow::Result;
use chunkview::config::{Config, Mode};
use chunkview::panels::{
    CollapsePolicy, CollapseState, ComparisonState, Document, PanelPath, RenderOptions,
    build_comparison, comparison_entries_from_str,
};
use chunkview::render::{PlainStyle, plain_options, render_comparison_plain, render_plain};

#[test]
fn test_plain_document_output() -> Result<()> {
    let document = Document::from_json_str("doc", r#"{"a": 1, "b": {"c": null}, "d": "x"}"#)?;
    let panel = document.render(&CollapseState::new(), &RenderOptions::default())?;

    let expected = "\
▼ doc
  a: 1
  ▼ b
    c: null
  d: \"x\"
";
    assert_eq!(render_plain(&panel, &PlainStyle::default()), expected);
    Ok(())
}

#[test]
fn test_plain_output_hides_collapsed_children() -> Result<()> {
    let document = Document::from_json_str("doc", r#"{"b": {"c": 1, "e": 2}}"#)?;
    let mut state = CollapseState::new();
    state.toggle(&PanelPath::from_segments(["b"]), false);
    let panel = document.render(&state, &RenderOptions::default())?;

    let expected = "\
▼ doc
  ▶ b (2 hidden)
";
    assert_eq!(render_plain(&panel, &PlainStyle::default()), expected);
    Ok(())
}

#[test]
fn test_plain_comparison_output() -> Result<()> {
    let entries = comparison_entries_from_str(
        r#"[{"test_chunk": {"link": "a.xml"}, "existing_chunk": {"n": 2}, "similarity": 0.5}]"#,
    )?;
    let options = RenderOptions::default()
        .with_policy(CollapsePolicy::CollapseLinked)
        .with_link_base("file:///repo/");
    let sections = build_comparison(&entries, &ComparisonState::new(), &options)?;

    let expected = "\
chunk 1 -- 50.00% similarity
  ▶ test chunk (1 hidden)  [link: file:///repo/a.xml]
  ▼ existing chunk
    n: 2
";
    assert_eq!(
        render_comparison_plain(&sections, &PlainStyle::default()),
        expected
    );
    Ok(())
}

#[test]
fn test_printed_comparison_shows_linked_chunks_by_default() -> Result<()> {
    let entries = comparison_entries_from_str(
        r#"[{"test_chunk": {"link": "a.xml", "text": "patient has fever"},
             "existing_chunk": {"text": "fever noted"},
             "similarity": 0.75}]"#,
    )?;
    let configured = Config::default().render_options(Mode::Compare);
    assert_eq!(configured.policy, CollapsePolicy::CollapseLinked);

    let options = plain_options(configured.clone(), false);
    let sections = build_comparison(&entries, &ComparisonState::new(), &options)?;
    let out = render_comparison_plain(&sections, &PlainStyle::default());
    assert!(out.contains("text: \"patient has fever\""), "{out}");
    assert!(out.contains("[link: vscode://file/a.xml]"), "{out}");
    assert!(!out.contains("hidden"), "{out}");

    // Collapsing on request still works
    let options = plain_options(configured, true);
    let sections = build_comparison(&entries, &ComparisonState::new(), &options)?;
    let out = render_comparison_plain(&sections, &PlainStyle::default());
    assert!(out.contains("▶ test chunk (2 hidden)"), "{out}");
    assert!(!out.contains("patient has fever"), "{out}");
    Ok(())
}
