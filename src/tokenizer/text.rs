//! §4.2.4: text reader.

use super::Tokenizer;
use crate::lex::LexKind;
use crate::segment::{Piece, Segment, SegmentNode};

impl<'t> Tokenizer<'t> {
    /// Caller has already checked the current lex is neither `<` nor a
    /// `NewLine` (those are handled by the outer dispatch directly).
    pub(super) fn read_text(&mut self) -> Segment {
        let mut pieces = Vec::new();
        while let Some(l) = self.peek() {
            if l.kind == LexKind::LeftAngleBracket || l.kind == LexKind::NewLine {
                break;
            }
            pieces.push(Piece::Lex(l));
            self.bump();
        }
        Segment::Text(SegmentNode::from_pieces(pieces))
    }
}
