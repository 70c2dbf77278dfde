//! §4.2.5: DOCTYPE reader.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::{Lex, LexKind};
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

impl<'t> Tokenizer<'t> {
    pub(super) fn read_doctype(
        &mut self,
        langle: Lex,
        bang: Lex,
        name: Segment,
        diags: &mut Diagnostics,
    ) -> Segment {
        let mut pieces = vec![Piece::Lex(langle), Piece::Lex(bang), Piece::Segment(name)];
        self.consume_trivia(&mut pieces);

        // Root element name.
        if matches!(self.peek_kind(), Some(k) if Self::is_name_start(k)) {
            pieces.push(Piece::Segment(self.read_name()));
        } else {
            let kind = if self.at_end() {
                DiagnosticKind::MissingDoctypeRootElementName
            } else {
                DiagnosticKind::ExpectedDoctypeRootElementName
            };
            diags.push(kind, self.current_span_or_cursor());
        }
        self.consume_trivia(&mut pieces);

        // Optional external id: `PUBLIC "..." "..."` or `SYSTEM "..."`.
        if matches!(self.peek_kind(), Some(k) if Self::is_name_start(k)) {
            let keyword = self.read_name();
            let keyword_text = keyword.to_string_in(self.source);
            if keyword_text == "PUBLIC" {
                pieces.push(Piece::Segment(keyword));
                self.consume_trivia(&mut pieces);
                self.expect_quoted(&mut pieces, diags, DiagnosticKind::MissingDoctypePublicIdentifier, DiagnosticKind::ExpectedDoctypePublicIdentifier);
                self.consume_trivia(&mut pieces);
                self.expect_quoted(&mut pieces, diags, DiagnosticKind::MissingDoctypeSystemIdentifier, DiagnosticKind::ExpectedDoctypeSystemIdentifier);
            } else if keyword_text == "SYSTEM" {
                pieces.push(Piece::Segment(keyword));
                self.consume_trivia(&mut pieces);
                self.expect_quoted(&mut pieces, diags, DiagnosticKind::MissingDoctypeSystemIdentifier, DiagnosticKind::ExpectedDoctypeSystemIdentifier);
            } else {
                diags.push(DiagnosticKind::InvalidDoctypeExternalIdType, keyword.span());
                pieces.push(Piece::Segment(keyword));
            }
            self.consume_trivia(&mut pieces);
        }

        // Optional internal subset `[...]`.
        if self.peek_kind() == Some(LexKind::LeftSquareBracket) {
            pieces.push(Piece::Segment(self.read_internal_definition(diags)));
            self.consume_trivia(&mut pieces);
        }

        // Terminator `>`.
        loop {
            match self.peek_kind() {
                Some(LexKind::RightAngleBracket) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    break;
                }
                Some(_) => {
                    let at = self.peek().unwrap().span;
                    diags.push(DiagnosticKind::ExpectedDoctypeRightAngleBracket, at);
                    self.absorb_one(&mut pieces);
                }
                None => {
                    diags.push(DiagnosticKind::MissingDoctypeRightAngleBracket, langle.span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::Doctype, SegmentNode::from_pieces(pieces))
    }

    fn expect_quoted(
        &mut self,
        pieces: &mut Vec<Piece>,
        diags: &mut Diagnostics,
        missing: DiagnosticKind,
        expected: DiagnosticKind,
    ) {
        match self.peek_kind() {
            Some(LexKind::SingleQuote) | Some(LexKind::DoubleQuote) => {
                pieces.push(Piece::Segment(self.read_quoted_string()));
            }
            _ => {
                let kind = if self.at_end() { missing } else { expected };
                diags.push(kind, self.current_span_or_cursor());
            }
        }
    }

    /// `LeftSquareBracket ... RightSquareBracket?` (spec.md §3): opaque
    /// internal-subset content, terminated at the first top-level `]`.
    fn read_internal_definition(&mut self, diags: &mut Diagnostics) -> Segment {
        let lbracket = self.bump().expect("caller checked LeftSquareBracket");
        let mut pieces = vec![Piece::Lex(lbracket)];
        loop {
            match self.peek_kind() {
                Some(LexKind::RightSquareBracket) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    break;
                }
                Some(_) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                }
                None => {
                    diags.push(DiagnosticKind::MissingInternalDefinitionRightSquareBracket, lbracket.span);
                    break;
                }
            }
        }
        Segment::InternalDefinition(SegmentNode::from_pieces(pieces))
    }
}
