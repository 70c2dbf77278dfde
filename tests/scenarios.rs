//! The seven worked end-to-end scenarios from spec.md §8.

use xmltree::FormatOptions;

#[test]
fn scenario_1_empty_element_collapses() {
    let doc = xmltree::parse("<a></a>");
    assert!(doc.issues().is_empty());
    let root = doc.root().expect("root element");
    assert_eq!(root.children().len(), 0);
    assert!(root.end_tag().is_some());
    assert_eq!(doc.format_default(), "<a/>");
}

#[test]
fn scenario_2_inline_text_is_trimmed_when_formatted() {
    let doc = xmltree::parse("<a>  test  </a>");
    assert!(doc.issues().is_empty());
    let root = doc.root().expect("root element");
    let children = root.children();
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].non_whitespace_span(),
        Some(xmltree::Span::new(4, 4))
    );
    assert_eq!(doc.format_default(), "<a>test</a>");
}

#[test]
fn scenario_3_full_declaration_has_three_attributes_and_no_issues() {
    let doc = xmltree::parse("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\" ?>");
    assert!(doc.issues().is_empty());
    let decl = doc.declaration().expect("declaration");
    assert_eq!(decl.attributes().len(), 3);
}

#[test]
fn scenario_4_declaration_missing_version_attribute() {
    let doc = xmltree::parse("<?xml?>");
    let issues: Vec<_> = doc.issues().iter().collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message(), "expectedDeclarationVersionAttribute");
    assert_eq!(issues[0].span, xmltree::Span::new(5, 1));
}

#[test]
fn scenario_5_nested_elements_format_with_indentation() {
    let doc = xmltree::parse("<a><b><c/></b></a>");
    assert!(doc.issues().is_empty());
    let mut options = FormatOptions::default();
    options.align_attributes = false;
    assert_eq!(doc.format(&options), "<a>\n  <b>\n    <c/>\n  </b>\n</a>");
}

#[test]
fn scenario_6_comment_and_text_flag_text_at_root_level() {
    let doc = xmltree::parse("<!-- a's -->text");
    let issues: Vec<_> = doc.issues().iter().collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message(), "documentCannotHaveTextAtRootLevel");
    assert_eq!(issues[0].span, xmltree::Span::new(12, 4));
}

#[test]
fn scenario_7_attribute_alignment_uses_continuation_column() {
    let doc = xmltree::parse("<a b=\"c\"\nd=\"e\"/>");
    let mut options = FormatOptions::default();
    options.align_attributes = true;
    assert_eq!(doc.format(&options), "<a b=\"c\"\n   d=\"e\"/>");
}

#[test]
fn boundary_bare_left_angle_bracket_yields_two_diagnostics() {
    let doc = xmltree::parse("<");
    let msgs: Vec<_> = doc.issues().iter().map(|d| d.message()).collect();
    assert_eq!(
        msgs,
        vec![
            "missingNameQuestionMarkExclamationPointOrForwardSlash",
            "missingTagRightAngleBracket",
        ]
    );
}

#[test]
fn boundary_end_tag_at_root_level_needs_no_root_element() {
    let doc = xmltree::parse("</a>");
    assert!(doc.issues().is_empty());
    assert!(doc.root().is_none());
}

#[test]
fn boundary_whitespace_only_input_reports_missing_root_element() {
    let doc = xmltree::parse("   \n  ");
    let msgs: Vec<_> = doc.issues().iter().map(|d| d.message()).collect();
    assert_eq!(msgs, vec!["missingDocumentRootElement"]);
}
