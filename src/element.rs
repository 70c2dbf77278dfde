//! Component D: the Element Builder (spec.md §4.4). Wraps the Segment
//! Tokenizer and pairs `StartTag`/`EndTag` into nested `Element` values by
//! recursively accumulating children until a matching (or simply the next)
//! `EndTag` arrives or the stream ends.
//!
//! Grounded on the block-structured, recursively-accumulate-until-
//! terminator shape of the teacher's `parser/grammar.rs` productions,
//! adapted from bracket-matching to start/end tag pairing. The recursion
//! depth guard is the ambient safety net from SPEC_FULL.md §D: it
//! degrades to a diagnostic and a flattened (non-nested) tree rather than
//! a `Result::Err`, preserving `parse()`'s total-function contract.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::name::matches;
use crate::segment::{ElementNode, Segment, SegmentKind, TagKind};
use crate::tokenizer::Tokenizer;

/// Pathological input (e.g. megabytes of `<a><a><a>...`) would otherwise
/// grow the native call stack linearly with nesting depth.
const MAX_NESTING_DEPTH: u32 = 512;

pub struct ElementBuilder<'t> {
    tokenizer: Tokenizer<'t>,
    depth: u32,
}

impl<'t> ElementBuilder<'t> {
    pub fn new(source: &'t str) -> Self {
        Self {
            tokenizer: Tokenizer::new(source),
            depth: 0,
        }
    }

    pub fn source(&self) -> &'t str {
        self.tokenizer.source()
    }

    pub fn next(&mut self, diags: &mut Diagnostics) -> Option<Segment> {
        let seg = self.tokenizer.next_segment(diags)?;
        Some(self.nest_if_start_tag(seg, diags))
    }

    fn nest_if_start_tag(&mut self, seg: Segment, diags: &mut Diagnostics) -> Segment {
        if matches!(seg.kind(), SegmentKind::Tag(TagKind::StartTag)) {
            self.build_element(seg, diags)
        } else {
            seg
        }
    }

    fn build_element(&mut self, start_tag: Segment, diags: &mut Diagnostics) -> Segment {
        if self.depth >= MAX_NESTING_DEPTH {
            diags.push(DiagnosticKind::RecursionLimitExceeded, start_tag.span());
            // Degrade: don't recurse further. The unmatched start tag is
            // surfaced as a plain segment; every later sibling stays flat
            // too, so the stream is still fully covered and re-emitted.
            return start_tag;
        }

        let start_name = start_tag
            .name()
            .map(|n| n.to_string_in(self.source()))
            .unwrap_or_default();

        self.depth += 1;
        let mut children = Vec::new();
        let element = loop {
            let Some(seg) = self.tokenizer.next_segment(diags) else {
                let anchor = start_tag.name().map(|n| n.span()).unwrap_or_else(|| start_tag.span());
                diags.push(DiagnosticKind::MissingElementEndTag, anchor);
                break Segment::Element(ElementNode::new(start_tag, children, None));
            };

            match seg.kind() {
                SegmentKind::Tag(TagKind::EndTag) => {
                    let end_name = seg
                        .name()
                        .map(|n| n.to_string_in(self.source()))
                        .unwrap_or_default();
                    if !matches(&start_name, &end_name) {
                        let anchor = seg.name().map(|n| n.span()).unwrap_or_else(|| seg.span());
                        diags.push(DiagnosticKind::ExpectedElementEndTagWithDifferentName, anchor);
                    }
                    break Segment::Element(ElementNode::new(start_tag, children, Some(seg)));
                }
                SegmentKind::Tag(TagKind::StartTag) => {
                    children.push(self.build_element(seg, diags));
                }
                _ => children.push(seg),
            }
        };
        self.depth -= 1;
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(source: &str) -> (Vec<Segment>, Diagnostics) {
        let mut b = ElementBuilder::new(source);
        let mut diags = Diagnostics::new();
        let mut out = Vec::new();
        while let Some(s) = b.next(&mut diags) {
            out.push(s);
        }
        (out, diags)
    }

    #[test]
    fn nests_matching_start_and_end_tags() {
        let (segs, diags) = build("<a><b></b></a>");
        assert_eq!(segs.len(), 1);
        let a = &segs[0];
        assert!(matches!(a, Segment::Element(_)));
        assert_eq!(a.children().len(), 1);
        assert!(diags.is_empty());
    }

    #[test]
    fn missing_end_tag_is_flagged_and_tree_still_covers_input() {
        let source = "<a><b>";
        let (segs, diags) = build(source);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].to_string_in(source), source);
        let msgs: Vec<_> = diags.iter().map(|d| d.message()).collect();
        assert_eq!(msgs, vec!["missingElementEndTag", "missingElementEndTag"]);
    }

    #[test]
    fn mismatched_end_tag_name_is_still_accepted_as_the_close() {
        let source = "<a></b>";
        let (segs, diags) = build(source);
        assert_eq!(segs.len(), 1);
        assert!(segs[0].end_tag().is_some());
        assert_eq!(
            diags.iter().map(|d| d.message()).collect::<Vec<_>>(),
            vec!["expectedElementEndTagWithDifferentName"]
        );
    }

    #[test]
    fn empty_element_is_not_nested_by_the_element_builder() {
        let (segs, _) = build("<a/>");
        assert_eq!(segs.len(), 1);
        assert!(matches!(
            segs[0],
            Segment::Tag(crate::segment::TagKind::EmptyElement, _)
        ));
    }
}
