//! §4.2.2: declaration reader — `<?xml version="1.0" [encoding=...]
//! [standalone=...] ?>` with ordered, gracefully-recovering attributes.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::{Lex, LexKind};
use crate::name::matches;
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

impl<'t> Tokenizer<'t> {
    pub(super) fn read_declaration(
        &mut self,
        langle: Lex,
        question: Lex,
        name: Segment,
        diags: &mut Diagnostics,
    ) -> Segment {
        let mut pieces = vec![Piece::Lex(langle), Piece::Lex(question), Piece::Segment(name)];
        self.consume_trivia(&mut pieces);

        // First attribute: must be `version="1.0"`.
        if matches!(self.peek_kind(), Some(k) if Self::is_name_start(k)) {
            let attr = self.read_attribute(diags);
            let attr_name = attr.name().map(|n| n.to_string_in(self.source)).unwrap_or_default();
            if !matches(&attr_name, "version") {
                diags.push(DiagnosticKind::ExpectedDeclarationVersionAttribute, attr.span());
            } else if let Some(value) = attr.value() {
                if value.unquoted_string(self.source) != "1.0" {
                    diags.push(DiagnosticKind::InvalidDeclarationVersionAttributeValue, value.span());
                }
            }
            pieces.push(Piece::Segment(attr));
        } else {
            let kind = if self.at_end() {
                DiagnosticKind::MissingDeclarationVersionAttribute
            } else {
                DiagnosticKind::ExpectedDeclarationVersionAttribute
            };
            diags.push(kind, self.current_span_or_cursor());
        }
        self.consume_trivia(&mut pieces);

        // Optional `encoding`/`standalone` attributes, in order.
        let mut have_encoding = false;
        let mut have_standalone = false;
        while matches!(self.peek_kind(), Some(k) if Self::is_name_start(k)) {
            let attr = self.read_attribute(diags);
            let attr_name = attr.name().map(|n| n.to_string_in(self.source)).unwrap_or_default();
            if !have_encoding && !have_standalone && matches(&attr_name, "encoding") {
                have_encoding = true;
            } else if !have_standalone && matches(&attr_name, "standalone") {
                have_standalone = true;
                if let Some(value) = attr.value() {
                    let v = value.unquoted_string(self.source);
                    if v != "yes" && v != "no" {
                        diags.push(DiagnosticKind::InvalidDeclarationStandaloneAttributeValue, value.span());
                    }
                }
            } else {
                diags.push(
                    DiagnosticKind::ExpectedDeclarationEncodingOrStandaloneAttribute,
                    attr.span(),
                );
            }
            pieces.push(Piece::Segment(attr));
            self.consume_trivia(&mut pieces);
        }

        // Terminator: `?>`.
        let mut pending_question = false;
        loop {
            match self.peek_kind() {
                Some(LexKind::QuestionMark) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    pending_question = true;
                }
                Some(LexKind::RightAngleBracket) => {
                    let rangle = self.bump().unwrap();
                    if !pending_question {
                        diags.push(
                            DiagnosticKind::ExpectedDeclarationEncodingOrStandaloneAttributeOrRightQuestionMark,
                            rangle.span,
                        );
                    }
                    pieces.push(Piece::Lex(rangle));
                    break;
                }
                Some(_) => {
                    let kind = if pending_question {
                        DiagnosticKind::ExpectedDeclarationRightAngleBracket
                    } else {
                        DiagnosticKind::ExpectedDeclarationRightQuestionMark
                    };
                    let at = self.peek().unwrap().span;
                    diags.push(kind, at);
                    self.absorb_one(&mut pieces);
                    pending_question = false;
                }
                None => {
                    let kind = if pending_question {
                        DiagnosticKind::MissingDeclarationRightAngleBracket
                    } else {
                        DiagnosticKind::MissingDeclarationRightQuestionMark
                    };
                    diags.push(kind, langle.span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::Declaration, SegmentNode::from_pieces(pieces))
    }
}
