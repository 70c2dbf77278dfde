//! §4.2.3: processing instruction reader — `<?name ...?>` with opaque
//! content.

use super::Tokenizer;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lex::{Lex, LexKind};
use crate::segment::{Piece, Segment, SegmentNode, TagKind};

impl<'t> Tokenizer<'t> {
    pub(super) fn read_processing_instruction(
        &mut self,
        langle: Lex,
        question: Lex,
        name: Option<Segment>,
        diags: &mut Diagnostics,
    ) -> Segment {
        let mut pieces = vec![Piece::Lex(langle), Piece::Lex(question)];
        if let Some(n) = name {
            pieces.push(Piece::Segment(n));
        }

        let mut pending_question = false;

        loop {
            match self.peek_kind() {
                Some(LexKind::RightAngleBracket) => {
                    let rangle = self.bump().unwrap();
                    if !pending_question {
                        diags.push(
                            DiagnosticKind::ExpectedProcessingInstructionRightQuestionMark,
                            rangle.span,
                        );
                    }
                    pieces.push(Piece::Lex(rangle));
                    break;
                }
                Some(LexKind::QuestionMark) => {
                    pieces.push(Piece::Lex(self.bump().unwrap()));
                    pending_question = true;
                }
                Some(_) => {
                    self.absorb_one(&mut pieces);
                    pending_question = false;
                }
                None => {
                    let kind = if pending_question {
                        DiagnosticKind::MissingProcessingInstructionRightAngleBracket
                    } else {
                        DiagnosticKind::MissingProcessingInstructionRightQuestionMark
                    };
                    diags.push(kind, langle.span);
                    break;
                }
            }
        }

        Segment::Tag(TagKind::ProcessingInstruction, SegmentNode::from_pieces(pieces))
    }
}
