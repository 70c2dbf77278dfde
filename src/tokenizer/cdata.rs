//! §4.2.7: CDATA reader — `<![CDATA[` ... `]]>`, using the same
//! consecutive-marker state machine as comments but counting `]` instead
//! of `-`.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::{Lex, LexKind};
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

impl<'t> Tokenizer<'t> {
    pub(super) fn read_cdata(
        &mut self,
        langle: Lex,
        bang: Lex,
        lbracket1: Lex,
        diags: &mut Diagnostics,
    ) -> Segment {
        let seed = vec![Piece::Lex(langle), Piece::Lex(bang), Piece::Lex(lbracket1)];

        if !matches!(self.peek_kind(), Some(k) if Self::is_name_start(k)) {
            let kind = if self.at_end() {
                DiagnosticKind::MissingCdataName
            } else {
                DiagnosticKind::ExpectedCdataName
            };
            diags.push(kind, self.current_span_or_cursor());
            return self.read_unrecognized_tag(seed, diags);
        }

        let name = self.read_name();
        if name.to_string_in(self.source) != "CDATA" {
            diags.push(DiagnosticKind::ExpectedCdataName, name.span());
            let mut seed = seed;
            seed.push(Piece::Segment(name));
            return self.read_unrecognized_tag(seed, diags);
        }

        let mut pieces = seed;
        pieces.push(Piece::Segment(name));

        if self.peek_kind() == Some(LexKind::LeftSquareBracket) {
            pieces.push(Piece::Lex(self.bump().unwrap()));
        } else {
            let kind = if self.at_end() {
                DiagnosticKind::MissingCdataSecondLeftSquareBracket
            } else {
                DiagnosticKind::ExpectedCdataSecondLeftSquareBracket
            };
            diags.push(kind, self.current_span_or_cursor());
        }

        let mut bracket_run = 0u32;
        loop {
            match self.peek_kind() {
                Some(LexKind::RightSquareBracket) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    bracket_run += 1;
                }
                Some(LexKind::RightAngleBracket) => {
                    let rangle = self.bump().unwrap();
                    pieces.push(Piece::Lex(rangle));
                    if bracket_run >= 2 {
                        break;
                    }
                    bracket_run = 0;
                }
                Some(_) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    bracket_run = 0;
                }
                None => {
                    let kind = match bracket_run {
                        0 => DiagnosticKind::MissingCdataClosingRightSquareBrackets,
                        1 => DiagnosticKind::MissingCdataSecondClosingRightSquareBracket,
                        _ => DiagnosticKind::MissingCdataRightAngleBracket,
                    };
                    diags.push(kind, langle.span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::Cdata, SegmentNode::from_pieces(pieces))
    }
}
