//! Component F: the Pretty Printer (spec.md §4.6). Walks the already-built
//! tree and re-emits it as text with configurable indentation and
//! attribute alignment.
//!
//! Grounded loosely on the shape of `rhaiscript-lsp`'s `rhai-fmt` crate
//! (`examples/rhaiscript-lsp/crates/rhai-fmt/src/options.rs`): a plain
//! `Options` struct with field-level defaults, threaded through a single
//! mutable formatting context that tracks output column as it writes.
//! `rhai-fmt`'s own algorithm walks a rowan CST; since this crate has no
//! rowan tree, the walk here is written directly over `Segment`/`Piece`.

use crate::document::Document;
use crate::lex::LexKind;
use crate::name::matches;
use crate::segment::{Piece, Segment, TagKind};

/// Formatting knobs (spec.md §4.6, §6). `current_indent` and
/// `current_column_index` seed the context's initial state rather than
/// being fixed constants — useful when embedding formatted output inside
/// already-indented text.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub single_indent: String,
    pub tab_length: u32,
    pub newline: String,
    pub current_indent: String,
    pub current_column_index: u32,
    pub align_attributes: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            single_indent: "  ".to_string(),
            tab_length: 2,
            newline: "\n".to_string(),
            current_indent: String::new(),
            current_column_index: 0,
            align_attributes: false,
        }
    }
}

struct FormatContext<'a> {
    source: &'a str,
    single_indent: &'a str,
    tab_length: u32,
    newline: &'a str,
    align_attributes: bool,
    indent_stack: Vec<String>,
    out: String,
    column: u32,
}

impl<'a> FormatContext<'a> {
    fn new(source: &'a str, options: &'a FormatOptions) -> Self {
        Self {
            source,
            single_indent: &options.single_indent,
            tab_length: options.tab_length,
            newline: &options.newline,
            align_attributes: options.align_attributes,
            indent_stack: vec![options.current_indent.clone()],
            out: String::new(),
            column: options.current_column_index,
        }
    }

    fn current_indent(&self) -> &str {
        self.indent_stack.last().map(String::as_str).unwrap_or("")
    }

    fn push_nested_indent(&mut self) {
        let next = format!("{}{}", self.current_indent(), self.single_indent);
        self.indent_stack.push(next);
    }

    /// Pushes an indent whose column width equals `self.column` (spec.md
    /// §4.6, attribute-value alignment).
    fn push_align_indent(&mut self) {
        let indent = if self.single_indent == "\t" {
            let tabs = self.column / self.tab_length.max(1);
            let spaces = self.column % self.tab_length.max(1);
            format!("{}{}", "\t".repeat(tabs as usize), " ".repeat(spaces as usize))
        } else {
            " ".repeat(self.column as usize)
        };
        self.indent_stack.push(indent);
    }

    fn pop_indent(&mut self) {
        self.indent_stack.pop();
    }

    fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => self.column = 0,
                '\t' => self.column += self.tab_length,
                _ => self.column += 1,
            }
        }
        self.out.push_str(text);
    }

    fn write_newline(&mut self) {
        let nl = self.newline.to_string();
        self.write_str(&nl);
    }

    fn write_indent(&mut self) {
        let indent = self.current_indent().to_string();
        self.write_str(&indent);
    }
}

enum TagClose {
    AsWritten,
    ForceEmptyElement,
}

pub fn format(doc: &Document<'_>, options: &FormatOptions) -> String {
    let mut ctx = FormatContext::new(doc.source(), options);
    for seg in doc.segments() {
        if matches!(seg, Segment::Text(_)) && seg.is_whitespace() {
            continue;
        }
        let is_bare_newline = matches!(seg, Segment::Bare(_));
        if !is_bare_newline && !ctx.out.is_empty() && !ctx.out.ends_with(ctx.newline) {
            ctx.write_newline();
        }
        format_segment(&mut ctx, seg);
    }
    ctx.out
}

fn format_segment(ctx: &mut FormatContext<'_>, seg: &Segment) {
    match seg {
        Segment::Bare(l) => {
            let text = l.text(ctx.source).to_string();
            ctx.write_str(&text);
        }
        Segment::Text(_) => {
            let text = seg.to_string_in(ctx.source);
            ctx.write_str(&text);
        }
        Segment::Tag(TagKind::Comment | TagKind::Cdata | TagKind::ProcessingInstruction, _) => {
            // "format as their raw text (no internal reflow)" (spec.md §4.6).
            let text = seg.to_string_in(ctx.source);
            ctx.write_str(&text);
        }
        Segment::Tag(_, _) => format_tag_node(ctx, seg, TagClose::AsWritten),
        Segment::Element(_) => format_element(ctx, seg),
        _ => {
            let text = seg.to_string_in(ctx.source);
            ctx.write_str(&text);
        }
    }
}

/// §4.6 "Tag formatting": walk the pieces of any bracketed tag, collapsing
/// interior whitespace to a single space (never immediately before the
/// closing bracket), preserving embedded `NewLine`s, and re-indenting
/// after each of them.
fn format_tag_node(ctx: &mut FormatContext<'_>, seg: &Segment, close: TagClose) {
    let Segment::Tag(_, node) = seg else {
        let text = seg.to_string_in(ctx.source);
        ctx.write_str(&text);
        return;
    };
    let pieces = node.pieces();
    let mut pushed_align = false;

    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Lex(l) if l.kind == LexKind::NewLine => {
                ctx.write_newline();
                ctx.write_indent();
            }
            Piece::Lex(l) if l.kind == LexKind::Whitespace => {
                // "never before >" (spec.md §4.6): also covers the `?>`
                // and `/>` terminator sequences, not just a bare `>`.
                let only_terminators_follow = pieces[i + 1..].iter().all(|p| {
                    matches!(
                        p,
                        Piece::Lex(n)
                            if matches!(
                                n.kind,
                                LexKind::QuestionMark | LexKind::ForwardSlash | LexKind::RightAngleBracket
                            )
                    )
                });
                if !only_terminators_follow {
                    ctx.write_str(" ");
                }
            }
            Piece::Lex(l) if l.kind == LexKind::RightAngleBracket && i + 1 == pieces.len() => {
                match close {
                    TagClose::ForceEmptyElement => ctx.write_str("/>"),
                    TagClose::AsWritten => ctx.write_str(">"),
                }
            }
            Piece::Lex(l) => {
                let text = l.text(ctx.source).to_string();
                ctx.write_str(&text);
            }
            Piece::Segment(s) => {
                if matches!(s, Segment::Attribute(_)) && ctx.align_attributes && !pushed_align {
                    ctx.push_align_indent();
                    pushed_align = true;
                }
                format_tag_inner_segment(ctx, s);
            }
        }
    }

    if pushed_align {
        ctx.pop_indent();
    }
}

/// Formats a `Name`/`QuotedString`/`Attribute`/`InternalDefinition` child
/// of a tag. Only `Attribute` has internal structure worth walking (its
/// own whitespace around `=`); the rest are opaque leaves.
fn format_tag_inner_segment(ctx: &mut FormatContext<'_>, seg: &Segment) {
    let Segment::Attribute(node) = seg else {
        let text = seg.to_string_in(ctx.source);
        ctx.write_str(&text);
        return;
    };
    let pieces = node.pieces();
    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Lex(l) if l.kind == LexKind::NewLine => {
                ctx.write_newline();
                ctx.write_indent();
            }
            Piece::Lex(l) if l.kind == LexKind::Whitespace => {
                if i + 1 < pieces.len() {
                    ctx.write_str(" ");
                }
            }
            Piece::Lex(l) => {
                let text = l.text(ctx.source).to_string();
                ctx.write_str(&text);
            }
            Piece::Segment(s) => {
                let text = s.to_string_in(ctx.source);
                ctx.write_str(&text);
            }
        }
    }
}

fn count_newlines(seg: &Segment) -> usize {
    match seg {
        Segment::Bare(_) => 1,
        Segment::Text(node) => node
            .pieces()
            .iter()
            .filter(|p| matches!(p, Piece::Lex(l) if l.kind == LexKind::NewLine))
            .count(),
        _ => 0,
    }
}

/// A direct child of an `Element` that carries no content of its own: a
/// lone `Bare` newline or a whitespace-only `Text` run. Re-indentation
/// discards these; only the blank-line *count* they represent survives
/// (spec.md §4.6).
fn is_insignificant_whitespace(seg: &Segment) -> bool {
    matches!(seg, Segment::Bare(_)) || seg.is_whitespace()
}

/// §4.6 "Element formatting".
fn format_element(ctx: &mut FormatContext<'_>, seg: &Segment) {
    let start = seg.start_tag().expect("Element always has a start tag");
    let children = seg.children();
    let end = seg.end_tag();

    let names_match = end
        .map(|e| {
            let start_name = start.name().map(|n| n.to_string_in(ctx.source)).unwrap_or_default();
            let end_name = e.name().map(|n| n.to_string_in(ctx.source)).unwrap_or_default();
            matches(&start_name, &end_name)
        })
        .unwrap_or(false);

    let effectively_empty = children.is_empty()
        || (children.len() == 1 && is_insignificant_whitespace(&children[0]));

    if end.is_some() && names_match && effectively_empty {
        format_tag_node(ctx, start, TagClose::ForceEmptyElement);
        return;
    }

    if children.len() == 1 {
        if let Segment::Text(_) = &children[0] {
            if let Some(span) = children[0].non_whitespace_span() {
                let rendered = ctx.source[span.as_range()].to_string();
                format_tag_node(ctx, start, TagClose::AsWritten);
                ctx.write_str(&rendered);
                if let Some(end) = end {
                    format_tag_node(ctx, end, TagClose::AsWritten);
                }
                return;
            }
        }
    }

    format_tag_node(ctx, start, TagClose::AsWritten);
    ctx.push_nested_indent();
    // Every literal newline in the source is its own `Bare` segment (the
    // tokenizer never bundles runs of them), so a run of N consecutive
    // whitespace-ish children represents N newline characters — N-1 blank
    // lines between the surrounding content, not N-1 per segment.
    let mut i = 0;
    while i < children.len() {
        let child = &children[i];
        if is_insignificant_whitespace(child) {
            let mut newline_count = 0;
            while i < children.len() && is_insignificant_whitespace(&children[i]) {
                newline_count += count_newlines(&children[i]);
                i += 1;
            }
            for _ in 0..newline_count.saturating_sub(1) {
                ctx.write_newline();
            }
            continue;
        }
        ctx.write_newline();
        ctx.write_indent();
        format_segment(ctx, child);
        i += 1;
    }
    ctx.pop_indent();
    ctx.write_newline();
    ctx.write_indent();
    if let Some(end) = end {
        format_tag_node(ctx, end, TagClose::AsWritten);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(source: &str, options: &FormatOptions) -> String {
        let doc = Document::parse(source);
        format(&doc, options)
    }

    #[test]
    fn collapses_empty_element() {
        assert_eq!(fmt("<a></a>", &FormatOptions::default()), "<a/>");
    }

    #[test]
    fn trims_single_text_child_when_inlining() {
        assert_eq!(fmt("<a>  test  </a>", &FormatOptions::default()), "<a>test</a>");
    }

    #[test]
    fn nests_multiple_elements() {
        let out = fmt("<a><b><c/></b></a>", &FormatOptions::default());
        assert_eq!(out, "<a>\n  <b>\n    <c/>\n  </b>\n</a>");
    }

    #[test]
    fn aligns_attributes_to_continuation_column() {
        let mut options = FormatOptions::default();
        options.align_attributes = true;
        let out = fmt("<a b=\"c\"\nd=\"e\"/>", &options);
        assert_eq!(out, "<a b=\"c\"\n   d=\"e\"/>");
    }

    #[test]
    fn declaration_only_round_trips_through_tag_formatting() {
        let out = fmt(
            "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\" ?>",
            &FormatOptions::default(),
        );
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>");
    }
}
