//! §4.2.8: attribute reader — `name [ws] [= [ws] quoted-string]`.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::LexKind;
use crate::segment::{Piece, Segment, SegmentNode};
use crate::span::Span;

impl<'t> Tokenizer<'t> {
    /// Caller has already checked `peek_kind()` is a name-start lex.
    pub(super) fn read_attribute(&mut self, diags: &mut Diagnostics) -> Segment {
        let mut pieces = vec![Piece::Segment(self.read_name())];
        self.consume_trivia(&mut pieces);

        if self.peek_kind() == Some(LexKind::Equals) {
            pieces.push(Piece::Lex(self.bump().unwrap()));
            self.consume_trivia(&mut pieces);

            match self.peek_kind() {
                Some(LexKind::SingleQuote) | Some(LexKind::DoubleQuote) => {
                    let value = self.read_quoted_string();
                    let has_end_quote = value.has_end_quote();
                    let after = value.after_end_index();
                    pieces.push(Piece::Segment(value));
                    if !has_end_quote {
                        diags.push(DiagnosticKind::MissingQuotedStringEndQuote, Span::empty_at(after));
                    }
                }
                _ => {
                    let kind = if self.at_end() {
                        DiagnosticKind::MissingAttributeValue
                    } else {
                        DiagnosticKind::ExpectedAttributeValue
                    };
                    diags.push(kind, self.current_span_or_cursor());
                }
            }
        } else {
            let kind = if self.at_end() {
                DiagnosticKind::MissingAttributeEqualsSign
            } else {
                DiagnosticKind::ExpectedAttributeEqualsSign
            };
            diags.push(kind, self.current_span_or_cursor());
        }

        Segment::Attribute(SegmentNode::from_pieces(pieces))
    }
}
