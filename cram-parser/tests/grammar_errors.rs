//! Grammar violation tests: each malformed source maps to a specific
//! diagnostic code, and the diagnostic carries the right location.

use cram_parser::cram::{compile_sources, SourceFile};
use rstest::rstest;

#[rstest]
#[case::section_outside_card("---Loose\n", "section-outside-card")]
#[case::tag_outside_card("(!: stray)\n", "unexpected-token")]
#[case::close_without_open("/+>\n", "unexpected-token")]
#[case::nested_card_open("<+outer\n<+inner\n/+>\n", "unclosed-card")]
#[case::unclosed_at_eof("<+alpha\n---Def\nx\n", "unclosed-card")]
#[case::tag_after_section("<+a\n---Def\nx\n(!: late)\n/+>\n", "unexpected-token")]
#[case::duplicate_tag_symbol("<+a\n(!: one)\n(!: two)\n/+>\n", "duplicate-tag-symbol")]
#[case::archive_inside_card("<+a\n--<Mid>--\n/+>\n", "unexpected-token")]
#[case::unterminated_annotation("<+a\n---Def\n`open\n/+>\n", "unterminated-annotation")]
#[case::unterminated_fence("<+a\n---Def\n```py\ncode\n", "unterminated-code-fence")]
#[case::unterminated_tag("<+a\n(!: never closed\n/+>\n", "unterminated-tag")]
fn test_malformed_source_yields_code(#[case] source: &str, #[case] expected_code: &str) {
    let output = compile_sources(vec![SourceFile::new("main.cram", source)]);
    assert!(output.has_errors(), "expected an error for {:?}", source);
    assert_eq!(output.diagnostics[0].code, expected_code);
}

#[test]
fn test_nested_open_location_points_at_inner_open() {
    let output = compile_sources(vec![SourceFile::new(
        "main.cram",
        "<+outer\n<+inner\n/+>\n",
    )]);
    let diag = &output.diagnostics[0];
    // 0-indexed line 1 where the inner open sits.
    assert_eq!(diag.position.line, 1);
    assert!(diag.message.contains("'outer'"));
}

#[test]
fn test_duplicate_tag_message_names_first_use() {
    let output = compile_sources(vec![SourceFile::new(
        "main.cram",
        "<+a\n(!: one)\n(!: two)\n/+>\n",
    )]);
    let diag = &output.diagnostics[0];
    assert!(diag.message.contains("'!'"));
    assert!(diag.message.contains("2:1"), "message: {}", diag.message);
    assert!(diag.message.contains("3:1"), "message: {}", diag.message);
}

#[test]
fn test_error_file_survives_alongside_clean_file() {
    let output = compile_sources(vec![
        SourceFile::new("broken.cram", "---Loose\n"),
        SourceFile::new("clean.cram", "<+alpha\n---Def\nx\n/+>\n"),
    ]);
    assert!(output.has_errors());
    assert_eq!(output.forest.documents.len(), 1);
    assert!(output.forest.documents[0].find_card("alpha").is_some());
}
