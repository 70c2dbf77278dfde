//! Diagnostic taxonomy and rendering integration tests (spec.md §4.3, §6,
//! §7): fixed message text, span accuracy, duplicate-emission fidelity,
//! and the `annotate-snippets`-based printer.

use xmltree::{DiagnosticsPrinter, Span};

#[test]
fn well_formed_input_has_no_issues() {
    let doc = xmltree::parse("<a b=\"c\"><d/></a>");
    assert!(doc.issues().is_empty());
}

#[test]
fn missing_attribute_equals_sign_and_missing_value_both_fire_at_end_of_input() {
    let doc = xmltree::parse("<a b");
    let msgs: Vec<_> = doc.issues().iter().map(|d| d.message()).collect();
    assert!(msgs.contains(&"missingAttributeEqualsSign"));
}

#[test]
fn unterminated_quoted_string_is_flagged_with_a_span_at_end_of_input() {
    let doc = xmltree::parse("<a b='c");
    let found = doc
        .issues()
        .iter()
        .find(|d| d.message() == "missingQuotedStringEndQuote")
        .expect("missingQuotedStringEndQuote diagnostic");
    assert_eq!(found.span, Span::empty_at(7));
}

#[test]
fn expected_declaration_version_attribute_spans_the_offending_lex() {
    let doc = xmltree::parse("<?xml?>");
    let issues: Vec<_> = doc.issues().iter().collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message(), "expectedDeclarationVersionAttribute");
    assert_eq!(issues[0].span, Span::new(5, 1));
}

#[test]
fn recursion_limit_guard_degrades_to_a_diagnostic_not_a_stack_overflow() {
    let source = "<a>".repeat(1000);
    let doc = xmltree::parse(&source);
    let msgs: Vec<_> = doc.issues().iter().map(|d| d.message()).collect();
    assert!(msgs.iter().any(|m| *m == "recursionLimitExceeded"));
    assert_eq!(doc.to_string(), source);
}

#[test]
fn mismatched_close_and_missing_outer_close_both_surface_independently() {
    let doc = xmltree::parse("<a><b></a>");
    let msgs: Vec<_> = doc.issues().iter().map(|d| d.message()).collect();
    assert_eq!(
        msgs,
        vec!["expectedElementEndTagWithDifferentName", "missingElementEndTag"]
    );
}

#[test]
fn printer_renders_empty_diagnostics_as_empty_string() {
    let doc = xmltree::parse("<a/>");
    assert_eq!(doc.issues().printer(doc.source()).render(), "");
}

#[test]
fn printer_includes_every_message_exactly_once_per_diagnostic() {
    let doc = xmltree::parse("<?xml?>");
    let rendered = doc.issues().printer(doc.source()).render();
    assert_eq!(
        rendered.matches("expectedDeclarationVersionAttribute").count(),
        2,
        "message text appears in both the title and the annotation label"
    );
}

#[test]
fn printer_path_is_attached_when_requested() {
    let doc = xmltree::parse("<?xml?>");
    let printer: DiagnosticsPrinter = doc.issues().printer(doc.source()).path("input.xml");
    assert!(printer.render().contains("input.xml"));
}
