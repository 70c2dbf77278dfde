//! The Segment data model (spec.md §3, §9): a tagged variant sum type, not
//! an inheritance hierarchy. Every node owns its children outright — there
//! are no back-references and no cycles, so a plain recursive `enum` over
//! owned `Vec`s is the natural representation (spec.md §9 explicitly
//! sanctions "direct recursive ownership" over an arena/handle tree).
//!
//! Offsets, not borrowed substrings, are the back-reference to source text
//! (spec.md §9 "choose one; do not mix"): every `Segment`/`Lex` stores only
//! its `Span`, and callers recover text by slicing the source buffer that
//! produced the tree (see `Document::text`).

mod tag;

pub use tag::TagKind;

use crate::lex::{Lex, LexKind};
use crate::name::matches;
use crate::span::Span;

/// One child of a compound segment: either a raw lex or a nested segment.
#[derive(Debug, Clone)]
pub enum Piece {
    Lex(Lex),
    Segment(Segment),
}

impl Piece {
    pub fn span(&self) -> Span {
        match self {
            Piece::Lex(l) => l.span,
            Piece::Segment(s) => s.span(),
        }
    }

    fn write_text(&self, source: &str, out: &mut String) {
        match self {
            Piece::Lex(l) => out.push_str(l.text(source)),
            Piece::Segment(s) => out.push_str(&s.to_string_in(source)),
        }
    }
}

/// The shared representation behind every compound segment kind: an ordered
/// list of child pieces plus the span they cover. Kept separate from
/// [`Segment`] so every variant gets the same storage and the same set of
/// generic piece-scanning helpers (`find_lex`, `find_segment`, ...).
#[derive(Debug, Clone)]
pub struct SegmentNode {
    pieces: Vec<Piece>,
    span: Span,
}

impl SegmentNode {
    pub fn from_pieces(pieces: Vec<Piece>) -> Self {
        let span = pieces
            .first()
            .map(|first| {
                let last = pieces.last().unwrap();
                Span::join(first.span(), last.span())
            })
            .unwrap_or(Span::empty_at(0));
        Self { pieces, span }
    }

    /// Like [`Self::from_pieces`] but for a node that may legitimately have
    /// no children at all yet still needs a real span (e.g. a `Name` can't
    /// be empty, but a malformed `Attribute` value can be absent) — the
    /// fallback span anchors at `at`.
    pub fn from_pieces_anchored(pieces: Vec<Piece>, at: u32) -> Self {
        if pieces.is_empty() {
            Self {
                pieces,
                span: Span::empty_at(at),
            }
        } else {
            Self::from_pieces(pieces)
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn to_string(&self, source: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            piece.write_text(source, &mut out);
        }
        out
    }

    pub fn find_lex(&self, kind: LexKind) -> Option<Lex> {
        self.pieces.iter().find_map(|p| match p {
            Piece::Lex(l) if l.kind == kind => Some(*l),
            _ => None,
        })
    }

    pub fn find_last_lex(&self, kind: LexKind) -> Option<Lex> {
        self.pieces.iter().rev().find_map(|p| match p {
            Piece::Lex(l) if l.kind == kind => Some(*l),
            _ => None,
        })
    }

    pub fn find_segment<F: Fn(&Segment) -> bool>(&self, pred: F) -> Option<&Segment> {
        self.pieces.iter().find_map(|p| match p {
            Piece::Segment(s) if pred(s) => Some(s),
            _ => None,
        })
    }

    pub fn segments_matching<'a, F: Fn(&Segment) -> bool + 'a>(
        &'a self,
        pred: F,
    ) -> impl Iterator<Item = &'a Segment> + 'a {
        self.pieces.iter().filter_map(move |p| match p {
            Piece::Segment(s) if pred(s) => Some(s),
            _ => None,
        })
    }
}

/// A paired `StartTag ... EndTag` (or a standalone `EmptyElement`) with its
/// nested children, built by the Element Builder (spec.md §4.4). `end_tag`
/// is absent when the input ran out before a matching close tag arrived.
#[derive(Debug, Clone)]
pub struct ElementNode {
    start_tag: Box<Segment>,
    children: Vec<Segment>,
    end_tag: Option<Box<Segment>>,
}

impl ElementNode {
    pub fn new(start_tag: Segment, children: Vec<Segment>, end_tag: Option<Segment>) -> Self {
        Self {
            start_tag: Box::new(start_tag),
            children,
            end_tag: end_tag.map(Box::new),
        }
    }

    pub fn span(&self) -> Span {
        match &self.end_tag {
            Some(end) => Span::join(self.start_tag.span(), end.span()),
            None => match self.children.last() {
                Some(last) => Span::join(self.start_tag.span(), last.span()),
                None => self.start_tag.span(),
            },
        }
    }

    pub fn to_string(&self, source: &str) -> String {
        let mut out = self.start_tag.to_string_in(source);
        for child in &self.children {
            out.push_str(&child.to_string_in(source));
        }
        if let Some(end) = &self.end_tag {
            out.push_str(&end.to_string_in(source));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Lex,
    Name,
    QuotedString,
    Attribute,
    InternalDefinition,
    Tag(TagKind),
    Text,
    Element,
}

/// The tagged variant sum type from spec.md §3. `Bare` covers a standalone
/// `NewLine` lex promoted directly to a top-level segment (§4.2 outer
/// dispatch, case 1); every other variant is a compound node.
#[derive(Debug, Clone)]
pub enum Segment {
    Bare(Lex),
    Name(SegmentNode),
    QuotedString(SegmentNode),
    Attribute(SegmentNode),
    InternalDefinition(SegmentNode),
    Tag(TagKind, SegmentNode),
    Text(SegmentNode),
    Element(ElementNode),
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Bare(_) => SegmentKind::Lex,
            Segment::Name(_) => SegmentKind::Name,
            Segment::QuotedString(_) => SegmentKind::QuotedString,
            Segment::Attribute(_) => SegmentKind::Attribute,
            Segment::InternalDefinition(_) => SegmentKind::InternalDefinition,
            Segment::Tag(k, _) => SegmentKind::Tag(*k),
            Segment::Text(_) => SegmentKind::Text,
            Segment::Element(_) => SegmentKind::Element,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Segment::Bare(l) => l.span,
            Segment::Name(n)
            | Segment::QuotedString(n)
            | Segment::Attribute(n)
            | Segment::InternalDefinition(n)
            | Segment::Tag(_, n)
            | Segment::Text(n) => n.span(),
            Segment::Element(e) => e.span(),
        }
    }

    pub fn start_index(&self) -> u32 {
        self.span().start_index
    }

    pub fn length(&self) -> u32 {
        self.span().length
    }

    pub fn after_end_index(&self) -> u32 {
        self.span().after_end_index()
    }

    pub fn to_string_in(&self, source: &str) -> String {
        match self {
            Segment::Bare(l) => l.text(source).to_string(),
            Segment::Name(n)
            | Segment::QuotedString(n)
            | Segment::Attribute(n)
            | Segment::InternalDefinition(n)
            | Segment::Tag(_, n)
            | Segment::Text(n) => n.to_string(source),
            Segment::Element(e) => e.to_string(source),
        }
    }

    /// Per-variant `containsIndex` policy (spec.md §4.2, "containsIndex
    /// policy" paragraph). Tags closed with a `>` are right-exclusive;
    /// unterminated tags are open-ended; `Name`/`Text` are inclusive on
    /// both ends; `Attribute` excludes trailing whitespace; `QuotedString`
    /// excludes a present end quote.
    pub fn contains_index(&self, index: u32) -> bool {
        match self {
            Segment::Bare(l) => l.span.contains_inclusive(index),
            Segment::Name(_) | Segment::Text(_) => self.span().contains_inclusive(index),
            Segment::QuotedString(_) => {
                if self.has_end_quote() {
                    self.span().contains_exclusive(index)
                        || index == self.start_index()
                } else {
                    self.span().contains_open_ended(index) || index == self.start_index()
                }
            }
            Segment::Attribute(n) => {
                let content_end = n
                    .pieces()
                    .iter()
                    .rev()
                    .find(|p| !matches!(p, Piece::Lex(l) if l.kind == LexKind::Whitespace || l.kind == LexKind::NewLine))
                    .map(|p| p.span().after_end_index())
                    .unwrap_or(self.after_end_index());
                index >= self.start_index() && index <= content_end
            }
            Segment::InternalDefinition(_) => self.span().contains_inclusive(index),
            Segment::Tag(_, n) => {
                if n.find_last_lex(LexKind::RightAngleBracket).is_some() {
                    self.span().contains_exclusive(index) || index == self.start_index()
                } else {
                    self.span().contains_open_ended(index) || index == self.start_index()
                }
            }
            Segment::Element(_) => self.span().contains_inclusive(index),
        }
    }

    fn node(&self) -> Option<&SegmentNode> {
        match self {
            Segment::Name(n)
            | Segment::QuotedString(n)
            | Segment::Attribute(n)
            | Segment::InternalDefinition(n)
            | Segment::Tag(_, n)
            | Segment::Text(n) => Some(n),
            Segment::Bare(_) | Segment::Element(_) => None,
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Segment::Name(_))
    }

    /// First `Name` child, for any tag-shaped or attribute segment.
    pub fn name(&self) -> Option<&Segment> {
        self.node()?.find_segment(Segment::is_name)
    }

    /// All `Attribute` children, for a tag-shaped segment.
    pub fn attributes(&self) -> Vec<&Segment> {
        match self.node() {
            Some(n) => n
                .segments_matching(|s| matches!(s, Segment::Attribute(_)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// An attribute child whose name matches `name` case-insensitively.
    pub fn attribute_named<'a>(&'a self, source: &str, name: &str) -> Option<&'a Segment> {
        self.attributes().into_iter().find(|attr| {
            attr.name()
                .map(|n| matches(&n.to_string_in(source), name))
                .unwrap_or(false)
        })
    }

    /// `Equals` lex of an `Attribute` segment.
    pub fn equals(&self) -> Option<Lex> {
        self.node()?.find_lex(LexKind::Equals)
    }

    /// `QuotedString` value of an `Attribute` segment.
    pub fn value(&self) -> Option<&Segment> {
        self.node()?
            .find_segment(|s| matches!(s, Segment::QuotedString(_)))
    }

    /// All `QuotedString` children of a tag-shaped segment, in document
    /// order (used for `DOCTYPE`'s public/system identifiers).
    pub fn quoted_strings(&self) -> Vec<&Segment> {
        match self.node() {
            Some(n) => n
                .segments_matching(|s| matches!(s, Segment::QuotedString(_)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// `InternalDefinition` child of a `DOCTYPE` segment.
    pub fn internal_definition(&self) -> Option<&Segment> {
        self.node()?
            .find_segment(|s| matches!(s, Segment::InternalDefinition(_)))
    }

    /// Opening quote lex of a `QuotedString`.
    pub fn start_quote(&self) -> Option<Lex> {
        let n = self.node()?;
        n.find_lex(LexKind::SingleQuote)
            .or_else(|| n.find_lex(LexKind::DoubleQuote))
            .filter(|l| l.span.start_index == self.start_index())
    }

    pub fn has_end_quote(&self) -> bool {
        let Some(n) = self.node() else { return false };
        let Some(open) = self.start_quote() else {
            return false;
        };
        n.pieces().iter().any(|p| match p {
            Piece::Lex(l) => l.kind == open.kind && l.span.start_index != open.span.start_index,
            _ => false,
        })
    }

    /// Content between the quotes of a `QuotedString`, excluding either
    /// quote (the closing one only if present).
    pub fn unquoted_string(&self, source: &str) -> String {
        let Some(n) = self.node() else {
            return String::new();
        };
        let Some(open) = self.start_quote() else {
            return n.to_string(source);
        };
        let mut out = String::new();
        let mut seen_open = false;
        for piece in n.pieces() {
            if let Piece::Lex(l) = piece {
                if !seen_open && l.kind == open.kind && l.span.start_index == open.span.start_index
                {
                    seen_open = true;
                    continue;
                }
                if seen_open && l.kind == open.kind {
                    break;
                }
            }
            if seen_open {
                piece.write_text(source, &mut out);
            }
        }
        out
    }

    /// Tightest span covering non-whitespace lexes of a `Text` segment, or
    /// `None` if the whole segment is whitespace.
    pub fn non_whitespace_span(&self) -> Option<Span> {
        let n = self.node()?;
        let non_ws: Vec<Span> = n
            .pieces()
            .iter()
            .filter_map(|p| match p {
                Piece::Lex(l) if l.kind != LexKind::Whitespace && l.kind != LexKind::NewLine => {
                    Some(l.span)
                }
                _ => None,
            })
            .collect();
        non_ws
            .first()
            .map(|first| Span::join(*first, *non_ws.last().unwrap()))
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Segment::Text(_)) && self.non_whitespace_span().is_none()
    }

    pub fn start_tag(&self) -> Option<&Segment> {
        match self {
            Segment::Element(e) => Some(&e.start_tag),
            _ => None,
        }
    }

    pub fn end_tag(&self) -> Option<&Segment> {
        match self {
            Segment::Element(e) => e.end_tag.as_deref(),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Segment] {
        match self {
            Segment::Element(e) => &e.children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::lex;

    fn name_segment(source: &str, span: Span) -> Segment {
        let lexes: Vec<Lex> = lex(source)
            .into_iter()
            .filter(|l| span.contains_inclusive(l.span.start_index) && l.span.start_index < span.after_end_index())
            .collect();
        Segment::Name(SegmentNode::from_pieces(
            lexes.into_iter().map(Piece::Lex).collect(),
        ))
    }

    #[test]
    fn attribute_to_string_round_trips_verbatim() {
        let source = "a = 'b'";
        let lexes = lex(source);
        let name = name_segment(source, Span::new(0, 1));
        let quote = Segment::QuotedString(SegmentNode::from_pieces(vec![
            Piece::Lex(lexes[4]),
            Piece::Lex(lexes[5]),
            Piece::Lex(lexes[6]),
        ]));
        let attr = Segment::Attribute(SegmentNode::from_pieces(vec![
            Piece::Segment(name),
            Piece::Lex(lexes[1]),
            Piece::Lex(lexes[2]),
            Piece::Lex(lexes[3]),
            Piece::Segment(quote),
        ]));
        assert_eq!(attr.to_string_in(source), source);
        assert_eq!(attr.value().unwrap().unquoted_string(source), "b");
    }

    #[test]
    fn quoted_string_without_end_quote_has_no_end_quote() {
        let source = "'abc";
        let lexes: Vec<Piece> = lex(source).into_iter().map(Piece::Lex).collect();
        let qs = Segment::QuotedString(SegmentNode::from_pieces(lexes));
        assert!(!qs.has_end_quote());
        assert_eq!(qs.unquoted_string(source), "abc");
    }

    #[test]
    fn text_non_whitespace_span_excludes_padding() {
        let source = "  test  ";
        let pieces: Vec<Piece> = lex(source).into_iter().map(Piece::Lex).collect();
        let text = Segment::Text(SegmentNode::from_pieces(pieces));
        assert_eq!(text.non_whitespace_span(), Some(Span::new(2, 4)));
        assert!(!text.is_whitespace());
    }

    #[test]
    fn all_whitespace_text_has_no_non_whitespace_span() {
        let source = "   ";
        let pieces: Vec<Piece> = lex(source).into_iter().map(Piece::Lex).collect();
        let text = Segment::Text(SegmentNode::from_pieces(pieces));
        assert_eq!(text.non_whitespace_span(), None);
        assert!(text.is_whitespace());
    }
}
