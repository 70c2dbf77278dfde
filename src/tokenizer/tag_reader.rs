//! §4.2.1: start / end / empty-element tag reader.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::{Lex, LexKind};
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

#[derive(Clone, Copy, PartialEq, Eq)]
enum AfterState {
    NameOrAttribute,
    Whitespace,
}

impl<'t> Tokenizer<'t> {
    pub(super) fn consume_trivia(&mut self, pieces: &mut Vec<Piece>) {
        while let Some(l) = self.peek() {
            if Self::is_whitespace_ish(l.kind) {
                pieces.push(Piece::Lex(l));
                self.bump();
            } else {
                break;
            }
        }
    }

    /// `seed` is `[<, Name]`. Reads the remainder of a `StartTag` or
    /// `EmptyElement` (spec.md §4.2.1).
    pub(super) fn read_start_or_empty_tag(
        &mut self,
        seed: Vec<Piece>,
        diags: &mut Diagnostics,
    ) -> Segment {
        let langle_span = seed[0].span();
        let mut pieces = seed;
        let mut after = AfterState::NameOrAttribute;
        let mut empty_pending = false;

        loop {
            match self.peek_kind() {
                Some(LexKind::RightAngleBracket) => {
                    let rangle = self.bump().unwrap();
                    pieces.push(Piece::Lex(rangle));
                    let kind = if empty_pending {
                        TagKind::EmptyElement
                    } else {
                        TagKind::StartTag
                    };
                    return Segment::Tag(kind, SegmentNode::from_pieces(pieces));
                }
                Some(LexKind::ForwardSlash) if !empty_pending => {
                    let slash = self.bump().unwrap();
                    pieces.push(Piece::Lex(slash));
                    empty_pending = true;
                    after = AfterState::NameOrAttribute;
                }
                Some(k) if !empty_pending && Self::is_name_start(k) => {
                    let attr = self.read_attribute(diags);
                    if after == AfterState::NameOrAttribute
                        && matches!(pieces.last(), Some(Piece::Segment(Segment::Attribute(_))))
                    {
                        diags.push(DiagnosticKind::ExpectedWhitespaceBetweenAttributes, attr.span());
                    }
                    pieces.push(Piece::Segment(attr));
                    after = AfterState::NameOrAttribute;
                }
                Some(k) if Self::is_whitespace_ish(k) => {
                    let l = self.bump().unwrap();
                    pieces.push(Piece::Lex(l));
                    after = AfterState::Whitespace;
                }
                Some(_) => {
                    if empty_pending {
                        let l = self.peek().unwrap();
                        diags.push(DiagnosticKind::ExpectedEmptyElementRightAngleBracket, l.span);
                        self.absorb_one(&mut pieces);
                    } else {
                        let kind = match after {
                            AfterState::NameOrAttribute => {
                                DiagnosticKind::ExpectedWhitespaceStartTagRightAngleBracketOrEmptyElementForwardSlash
                            }
                            AfterState::Whitespace => {
                                DiagnosticKind::ExpectedAttributeNameStartTagRightAngleBracketOrEmptyElementForwardSlash
                            }
                        };
                        let at = self.peek().unwrap().span;
                        diags.push(kind, at);
                        self.absorb_one(&mut pieces);
                        after = AfterState::NameOrAttribute;
                    }
                }
                None => {
                    let kind = if empty_pending {
                        DiagnosticKind::MissingEmptyElementRightAngleBracket
                    } else {
                        DiagnosticKind::MissingStartTagRightAngleBracket
                    };
                    diags.push(kind, langle_span);
                    let tag_kind = if empty_pending {
                        TagKind::EmptyElement
                    } else {
                        TagKind::StartTag
                    };
                    return Segment::Tag(tag_kind, SegmentNode::from_pieces(pieces));
                }
            }
        }
    }

    pub(super) fn read_end_tag(
        &mut self,
        langle: Lex,
        slash: Lex,
        diags: &mut Diagnostics,
    ) -> Segment {
        let mut pieces = vec![Piece::Lex(langle), Piece::Lex(slash)];

        match self.peek_kind() {
            Some(k) if Self::is_name_start(k) => {
                pieces.push(Piece::Segment(self.read_name()));
            }
            _ => {
                let kind = if self.at_end() {
                    DiagnosticKind::MissingEndTagName
                } else {
                    DiagnosticKind::ExpectedEndTagName
                };
                diags.push(kind, self.current_span_or_cursor());
            }
        }

        loop {
            match self.peek_kind() {
                Some(LexKind::RightAngleBracket) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    break;
                }
                Some(k) if Self::is_whitespace_ish(k) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                }
                Some(_) => {
                    let at = self.peek().unwrap().span;
                    diags.push(DiagnosticKind::ExpectedEndTagRightAngleBracket, at);
                    self.absorb_one(&mut pieces);
                }
                None => {
                    diags.push(DiagnosticKind::MissingEndTagRightAngleBracket, langle.span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::EndTag, SegmentNode::from_pieces(pieces))
    }

    /// Absorbs exactly one lex, or a whole `QuotedString` if the current
    /// lex opens one — shared by every tag-shaped reader's recovery path.
    pub(super) fn absorb_one(&mut self, pieces: &mut Vec<Piece>) {
        match self.peek_kind() {
            Some(LexKind::SingleQuote) | Some(LexKind::DoubleQuote) => {
                pieces.push(Piece::Segment(self.read_quoted_string()));
            }
            Some(_) => {
                pieces.push(Piece::Lex(self.bump().unwrap()));
            }
            None => {}
        }
    }
}
