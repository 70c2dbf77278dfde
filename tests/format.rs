//! Pretty-printer integration tests (spec.md §4.6), exercising `Document`'s
//! public `format`/`format_default` surface rather than `format::format`
//! directly.

use xmltree::FormatOptions;

fn fmt(source: &str, options: &FormatOptions) -> String {
    xmltree::parse(source).format(options)
}

#[test]
fn declaration_doctype_and_root_each_land_on_their_own_line() {
    let source = "<?xml version=\"1.0\"?>\n<!DOCTYPE a>\n<a><b/></a>\n";
    let out = fmt(source, &FormatOptions::default());
    assert_eq!(
        out,
        "<?xml version=\"1.0\"?>\n<!DOCTYPE a>\n<a>\n  <b/>\n</a>\n"
    );
}

#[test]
fn custom_single_indent_is_honored() {
    let mut options = FormatOptions::default();
    options.single_indent = "\t".to_string();
    let out = fmt("<a><b/></a>", &options);
    assert_eq!(out, "<a>\n\t<b/>\n</a>");
}

#[test]
fn comment_and_cdata_are_emitted_verbatim_with_no_reflow() {
    let source = "<a>\n  <!--   spaced   comment   -->\n  <![CDATA[  raw  ]]>\n</a>";
    let out = fmt(source, &FormatOptions::default());
    assert_eq!(
        out,
        "<a>\n  <!--   spaced   comment   -->\n  <![CDATA[  raw  ]]>\n</a>"
    );
}

#[test]
fn one_blank_line_between_siblings_survives_reindentation() {
    let source = "<a>\n  <b/>\n\n  <c/>\n</a>";
    let out = fmt(source, &FormatOptions::default());
    assert_eq!(out, "<a>\n  <b/>\n\n  <c/>\n</a>");
}

#[test]
fn mixed_text_and_element_children_force_the_general_multiline_form() {
    let out = fmt("<a>text<b/></a>", &FormatOptions::default());
    assert_eq!(out, "<a>\n  text\n  <b/>\n</a>");
}

#[test]
fn unmatched_start_tag_still_formats_without_panicking() {
    let out = fmt("<a>", &FormatOptions::default());
    assert_eq!(out, "<a>\n");
}

#[test]
fn current_indent_and_column_seed_embedding_into_already_indented_text() {
    let mut options = FormatOptions::default();
    options.current_indent = "    ".to_string();
    options.current_column_index = 4;
    let out = fmt("<a><b/></a>", &options);
    assert_eq!(out, "<a>\n      <b/>\n    </a>");
}

#[test]
fn custom_newline_string_is_used_throughout() {
    let mut options = FormatOptions::default();
    options.newline = "\r\n".to_string();
    let out = fmt("<a><b/></a>", &options);
    assert_eq!(out, "<a>\r\n  <b/>\r\n</a>");
}
