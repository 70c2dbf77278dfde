//! §4.2.9: unrecognized-tag reader — the fallback for any `<...` shape
//! that doesn't match a known tag grammar.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::LexKind;
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

impl<'t> Tokenizer<'t> {
    pub(super) fn read_unrecognized_tag(
        &mut self,
        seed: Vec<Piece>,
        diags: &mut Diagnostics,
    ) -> Segment {
        let langle_span = seed[0].span();
        let mut pieces = seed;

        loop {
            match self.peek_kind() {
                Some(LexKind::RightAngleBracket) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    break;
                }
                Some(_) => self.absorb_one(&mut pieces),
                None => {
                    diags.push(DiagnosticKind::MissingTagRightAngleBracket, langle_span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::UnrecognizedTag, SegmentNode::from_pieces(pieces))
    }
}
