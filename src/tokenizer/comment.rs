//! §4.2.6: comment reader — `<!--` ... `-->`, closing only on a `>`
//! preceded by exactly two or more consecutive dashes.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::{Lex, LexKind};
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

impl<'t> Tokenizer<'t> {
    pub(super) fn read_comment(
        &mut self,
        langle: Lex,
        bang: Lex,
        dash1: Lex,
        diags: &mut Diagnostics,
    ) -> Segment {
        if self.peek_kind() != Some(LexKind::Dash) {
            let kind = if self.at_end() {
                DiagnosticKind::MissingCommentSecondStartDash
            } else {
                DiagnosticKind::ExpectedCommentSecondStartDash
            };
            diags.push(kind, self.current_span_or_cursor());
            return self.read_unrecognized_tag(vec![Piece::Lex(langle), Piece::Lex(bang), Piece::Lex(dash1)], diags);
        }
        let dash2 = self.bump().unwrap();
        let mut pieces = vec![
            Piece::Lex(langle),
            Piece::Lex(bang),
            Piece::Lex(dash1),
            Piece::Lex(dash2),
        ];

        let mut dash_run = 0u32;
        loop {
            match self.peek_kind() {
                Some(LexKind::Dash) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    dash_run += 1;
                }
                Some(LexKind::RightAngleBracket) => {
                    let rangle = self.bump().unwrap();
                    pieces.push(Piece::Lex(rangle));
                    if dash_run >= 2 {
                        break;
                    }
                    dash_run = 0;
                }
                Some(_) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    dash_run = 0;
                }
                None => {
                    let kind = match dash_run {
                        0 => DiagnosticKind::MissingCommentClosingDashes,
                        1 => DiagnosticKind::MissingCommentSecondClosingDash,
                        _ => DiagnosticKind::MissingCommentRightAngleBracket,
                    };
                    diags.push(kind, langle.span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::Comment, SegmentNode::from_pieces(pieces))
    }
}
