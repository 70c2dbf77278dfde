//! Components A+B: reshape raw source bytes into XML-specific lexemes.
//!
//! spec.md treats the primitive character-class iterator (Component A) as an
//! external collaborator and the XML Lexer (Component B) as the thin layer
//! that coalesces whitespace runs and promotes punctuation. `logos` already
//! gives byte-accurate, longest-match tokenization for the punctuation and
//! run-producing kinds (`Letters`, `Digits`), so only whitespace coalescing
//! needs an explicit merge pass: `\r` and `\t` merge with adjacent spaces,
//! but `\r\n`/`\n` are newlines and terminate a whitespace run rather than
//! joining it.

use logos::Logos;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    LeftAngleBracket,
    RightAngleBracket,
    LeftSquareBracket,
    RightSquareBracket,
    QuestionMark,
    ExclamationPoint,
    Dash,
    SingleQuote,
    DoubleQuote,
    Equals,
    Underscore,
    Period,
    Colon,
    Semicolon,
    Ampersand,
    ForwardSlash,
    Whitespace,
    NewLine,
    Letters,
    Digits,
    Unrecognized,
}

/// A single lexical unit: offsets into the source plus its classified kind.
/// Text is recovered on demand via [`Lex::text`] rather than stored inline,
/// so a `Lex` is `Copy` and the source buffer is the single owner of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lex {
    pub kind: LexKind,
    pub span: Span,
}

impl Lex {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.as_range()]
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[token("<")]
    LeftAngleBracket,
    #[token(">")]
    RightAngleBracket,
    #[token("[")]
    LeftSquareBracket,
    #[token("]")]
    RightSquareBracket,
    #[token("?")]
    QuestionMark,
    #[token("!")]
    ExclamationPoint,
    #[token("-")]
    Dash,
    #[token("'")]
    SingleQuote,
    #[token("\"")]
    DoubleQuote,
    #[token("=")]
    Equals,
    #[token("_")]
    Underscore,
    #[token(".")]
    Period,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("&")]
    Ampersand,
    #[token("/")]
    ForwardSlash,
    #[regex(r"\r\n|\n")]
    NewLine,
    #[token(" ")]
    Space,
    #[token("\t")]
    Tab,
    #[token("\r")]
    CarriageReturn,
    #[regex(r"[A-Za-z]+")]
    Letters,
    #[regex(r"[0-9]+")]
    Digits,
}

fn is_whitespace_run_member(raw: Raw) -> bool {
    matches!(raw, Raw::Space | Raw::Tab | Raw::CarriageReturn)
}

fn raw_to_kind(raw: Raw) -> LexKind {
    match raw {
        Raw::LeftAngleBracket => LexKind::LeftAngleBracket,
        Raw::RightAngleBracket => LexKind::RightAngleBracket,
        Raw::LeftSquareBracket => LexKind::LeftSquareBracket,
        Raw::RightSquareBracket => LexKind::RightSquareBracket,
        Raw::QuestionMark => LexKind::QuestionMark,
        Raw::ExclamationPoint => LexKind::ExclamationPoint,
        Raw::Dash => LexKind::Dash,
        Raw::SingleQuote => LexKind::SingleQuote,
        Raw::DoubleQuote => LexKind::DoubleQuote,
        Raw::Equals => LexKind::Equals,
        Raw::Underscore => LexKind::Underscore,
        Raw::Period => LexKind::Period,
        Raw::Colon => LexKind::Colon,
        Raw::Semicolon => LexKind::Semicolon,
        Raw::Ampersand => LexKind::Ampersand,
        Raw::ForwardSlash => LexKind::ForwardSlash,
        Raw::NewLine => LexKind::NewLine,
        Raw::Letters => LexKind::Letters,
        Raw::Digits => LexKind::Digits,
        Raw::Space | Raw::Tab | Raw::CarriageReturn => {
            unreachable!("whitespace run members are merged, not mapped directly")
        }
    }
}

/// Runs components A and B: produces the full `Lex` stream for `source`
/// with strictly increasing, contiguous, gap-free spans.
pub fn lex(source: &str) -> Vec<Lex> {
    let mut lexer = Raw::lexer(source);
    let mut lexes = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut run_end = 0usize;

    let flush_run = |lexes: &mut Vec<Lex>, run_start: &mut Option<usize>, run_end: usize| {
        if let Some(start) = run_start.take() {
            lexes.push(Lex {
                kind: LexKind::Whitespace,
                span: Span::new(start as u32, (run_end - start) as u32),
            });
        }
    };

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(raw) if is_whitespace_run_member(raw) => {
                if run_start.is_none() {
                    run_start = Some(span.start);
                }
                run_end = span.end;
            }
            Ok(raw) => {
                flush_run(&mut lexes, &mut run_start, run_end);
                lexes.push(Lex {
                    kind: raw_to_kind(raw),
                    span: Span::new(span.start as u32, (span.end - span.start) as u32),
                });
            }
            Err(()) => {
                flush_run(&mut lexes, &mut run_start, run_end);
                lexes.push(Lex {
                    kind: LexKind::Unrecognized,
                    span: Span::new(span.start as u32, (span.end - span.start) as u32),
                });
            }
        }
    }
    flush_run(&mut lexes, &mut run_start, run_end);

    lexes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LexKind> {
        lex(source).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn punctuation_maps_one_to_one() {
        assert_eq!(
            kinds("<>[]?!-'\"=_.:;&/"),
            vec![
                LexKind::LeftAngleBracket,
                LexKind::RightAngleBracket,
                LexKind::LeftSquareBracket,
                LexKind::RightSquareBracket,
                LexKind::QuestionMark,
                LexKind::ExclamationPoint,
                LexKind::Dash,
                LexKind::SingleQuote,
                LexKind::DoubleQuote,
                LexKind::Equals,
                LexKind::Underscore,
                LexKind::Period,
                LexKind::Colon,
                LexKind::Semicolon,
                LexKind::Ampersand,
                LexKind::ForwardSlash,
            ]
        );
    }

    #[test]
    fn space_tab_and_cr_coalesce_into_one_whitespace_lex() {
        let lexes = lex("a \t\r b");
        assert_eq!(
            lexes.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![
                LexKind::Letters,
                LexKind::Whitespace,
                LexKind::Letters,
            ]
        );
        assert_eq!(lexes[1].text("a \t\r b"), " \t\r ");
    }

    #[test]
    fn newline_terminates_a_whitespace_run_and_is_not_absorbed() {
        let lexes = lex("a \n b");
        assert_eq!(
            lexes.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![
                LexKind::Letters,
                LexKind::Whitespace,
                LexKind::NewLine,
                LexKind::Whitespace,
                LexKind::Letters,
            ]
        );
    }

    #[test]
    fn crlf_is_a_single_newline_lex() {
        let lexes = lex("a\r\nb");
        assert_eq!(
            lexes.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![LexKind::Letters, LexKind::NewLine, LexKind::Letters]
        );
        assert_eq!(lexes[1].span.length, 2);
    }

    #[test]
    fn letters_and_digits_coalesce_via_regex() {
        let lexes = lex("abc123");
        assert_eq!(
            lexes.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![LexKind::Letters, LexKind::Digits]
        );
    }

    #[test]
    fn unrecognized_characters_are_not_coalesced() {
        let lexes = lex("@@");
        assert_eq!(lexes.len(), 2);
        assert!(lexes.iter().all(|l| l.kind == LexKind::Unrecognized));
    }

    #[test]
    fn spans_are_contiguous_and_cover_the_input() {
        let source = "<a b='c'>\n text &amp; </a>";
        let lexes = lex(source);
        let mut cursor = 0u32;
        for l in &lexes {
            assert_eq!(l.span.start_index, cursor);
            cursor = l.span.after_end_index();
        }
        assert_eq!(cursor as usize, source.len());
    }
}
