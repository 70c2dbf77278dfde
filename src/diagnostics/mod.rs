//! Diagnostics infrastructure: spec.md's single error class, a closed
//! taxonomy, and a caller-supplied append-only sink (§4.3, §7).
//!
//! Grounded on the teacher's `diagnostics/{message,collection}.rs`, with
//! `Severity::Warning` dropped — spec.md §6 defines exactly one severity —
//! and, deliberately, with no analogue of the teacher's `last_diagnostic_pos`
//! dedup guard: spec.md §9's "possible bug" open question instructs
//! implementations to reproduce duplicate emissions at the same position,
//! not suppress them.

mod printer;

pub use printer::DiagnosticsPrinter;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The closed taxonomy of every diagnostic this crate can emit: the union
/// of all `Issues.*` messages from spec.md §4 and the document-level
/// messages from §4.5, plus one ambient entry (`RecursionLimitExceeded`,
/// see SPEC_FULL.md §D) that has no counterpart in spec.md because it
/// guards against pathological input rather than describing a grammar
/// defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    // §4.2 outer tag dispatch
    MissingDeclarationOrProcessingInstructionName,
    ExpectedDeclarationOrProcessingInstructionName,
    ExpectedDoctypeNameCommentDashesOrCdataLeftSquareBracket,
    ExpectedNameQuestionMarkExclamationPointOrForwardSlash,
    MissingNameQuestionMarkExclamationPointOrForwardSlash,

    // §4.2.1 start/end/empty-element tag
    ExpectedEmptyElementRightAngleBracket,
    ExpectedWhitespaceBetweenAttributes,
    ExpectedWhitespaceStartTagRightAngleBracketOrEmptyElementForwardSlash,
    ExpectedAttributeNameStartTagRightAngleBracketOrEmptyElementForwardSlash,
    MissingStartTagRightAngleBracket,
    MissingEmptyElementRightAngleBracket,
    MissingEndTagName,
    ExpectedEndTagName,
    ExpectedEndTagRightAngleBracket,
    MissingEndTagRightAngleBracket,

    // §4.2.2 declaration
    ExpectedDeclarationVersionAttribute,
    MissingDeclarationVersionAttribute,
    InvalidDeclarationVersionAttributeValue,
    ExpectedDeclarationEncodingOrStandaloneAttribute,
    ExpectedDeclarationEncodingOrStandaloneAttributeOrRightQuestionMark,
    InvalidDeclarationStandaloneAttributeValue,
    ExpectedDeclarationRightQuestionMark,
    MissingDeclarationRightQuestionMark,
    ExpectedDeclarationRightAngleBracket,
    MissingDeclarationRightAngleBracket,

    // §4.2.3 processing instruction
    MissingProcessingInstructionRightQuestionMark,
    MissingProcessingInstructionRightAngleBracket,
    ExpectedProcessingInstructionRightQuestionMark,

    // §4.2.5 DOCTYPE
    MissingDoctypeRootElementName,
    ExpectedDoctypeRootElementName,
    InvalidDoctypeExternalIdType,
    MissingDoctypePublicIdentifier,
    ExpectedDoctypePublicIdentifier,
    MissingDoctypeSystemIdentifier,
    ExpectedDoctypeSystemIdentifier,
    MissingInternalDefinitionRightSquareBracket,
    ExpectedDoctypeRightAngleBracket,
    MissingDoctypeRightAngleBracket,

    // §4.2.6 comment
    ExpectedCommentSecondStartDash,
    MissingCommentSecondStartDash,
    MissingCommentClosingDashes,
    MissingCommentSecondClosingDash,
    MissingCommentRightAngleBracket,

    // §4.2.7 CDATA
    MissingCdataName,
    ExpectedCdataName,
    MissingCdataSecondLeftSquareBracket,
    ExpectedCdataSecondLeftSquareBracket,
    MissingCdataClosingRightSquareBrackets,
    MissingCdataSecondClosingRightSquareBracket,
    MissingCdataRightAngleBracket,

    // §4.2.8 attribute
    MissingAttributeEqualsSign,
    ExpectedAttributeEqualsSign,
    MissingAttributeValue,
    ExpectedAttributeValue,
    MissingQuotedStringEndQuote,

    // §4.2.9 unrecognized tag
    MissingTagRightAngleBracket,

    // §4.4 element builder
    MissingElementEndTag,
    ExpectedElementEndTagWithDifferentName,

    // §4.5 document builder
    MissingDocumentRootElement,
    DocumentDeclarationMustBeFirstSegment,
    DocumentCanHaveOneDeclaration,
    DocumentDoctypeMustBeAfterDeclaration,
    DocumentCanHaveOneDoctype,
    DocumentCanHaveOneRootElement,
    DocumentCannotHaveTextAtRootLevel,
    DocumentCannotHaveCdataAtRootLevel,

    // ambient safety net, see SPEC_FULL.md §D
    RecursionLimitExceeded,
}

impl DiagnosticKind {
    /// Fixed message text. spec.md §6: "Message text is fixed and
    /// testable" — this returns the spec's own camelCase identifier
    /// verbatim rather than a prose rewrite, so tests can assert against
    /// the taxonomy directly.
    pub fn message(self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            MissingDeclarationOrProcessingInstructionName => {
                "missingDeclarationOrProcessingInstructionName"
            }
            ExpectedDeclarationOrProcessingInstructionName => {
                "expectedDeclarationOrProcessingInstructionName"
            }
            ExpectedDoctypeNameCommentDashesOrCdataLeftSquareBracket => {
                "expectedDOCTYPENameCommentDashesOrCDATALeftSquareBracket"
            }
            ExpectedNameQuestionMarkExclamationPointOrForwardSlash => {
                "expectedNameQuestionMarkExclamationPointOrForwardSlash"
            }
            MissingNameQuestionMarkExclamationPointOrForwardSlash => {
                "missingNameQuestionMarkExclamationPointOrForwardSlash"
            }
            ExpectedEmptyElementRightAngleBracket => "expectedEmptyElementRightAngleBracket",
            ExpectedWhitespaceBetweenAttributes => "expectedWhitespaceBetweenAttributes",
            ExpectedWhitespaceStartTagRightAngleBracketOrEmptyElementForwardSlash => {
                "expectedWhitespaceStartTagRightAngleBracketOrEmptyElementForwardSlash"
            }
            ExpectedAttributeNameStartTagRightAngleBracketOrEmptyElementForwardSlash => {
                "expectedAttributeNameStartTagRightAngleBracketOrEmptyElementForwardSlash"
            }
            MissingStartTagRightAngleBracket => "missingStartTagRightAngleBracket",
            MissingEmptyElementRightAngleBracket => "missingEmptyElementRightAngleBracket",
            MissingEndTagName => "missingEndTagName",
            ExpectedEndTagName => "expectedEndTagName",
            ExpectedEndTagRightAngleBracket => "expectedEndTagRightAngleBracket",
            MissingEndTagRightAngleBracket => "missingEndTagRightAngleBracket",
            ExpectedDeclarationVersionAttribute => "expectedDeclarationVersionAttribute",
            MissingDeclarationVersionAttribute => "missingDeclarationVersionAttribute",
            InvalidDeclarationVersionAttributeValue => "invalidDeclarationVersionAttributeValue",
            ExpectedDeclarationEncodingOrStandaloneAttribute => {
                "expectedDeclarationEncodingOrStandaloneAttribute"
            }
            ExpectedDeclarationEncodingOrStandaloneAttributeOrRightQuestionMark => {
                "expectedDeclarationEncodingOrStandaloneAttributeOrRightQuestionMark"
            }
            InvalidDeclarationStandaloneAttributeValue => {
                "invalidDeclarationStandaloneAttributeValue"
            }
            ExpectedDeclarationRightQuestionMark => "expectedDeclarationRightQuestionMark",
            MissingDeclarationRightQuestionMark => "missingDeclarationRightQuestionMark",
            ExpectedDeclarationRightAngleBracket => "expectedDeclarationRightAngleBracket",
            MissingDeclarationRightAngleBracket => "missingDeclarationRightAngleBracket",
            MissingProcessingInstructionRightQuestionMark => {
                "missingProcessingInstructionRightQuestionMark"
            }
            MissingProcessingInstructionRightAngleBracket => {
                "missingProcessingInstructionRightAngleBracket"
            }
            ExpectedProcessingInstructionRightQuestionMark => {
                "expectedProcessingInstructionRightQuestionMark"
            }
            MissingDoctypeRootElementName => "missingDOCTYPERootElementName",
            ExpectedDoctypeRootElementName => "expectedDOCTYPERootElementName",
            InvalidDoctypeExternalIdType => "invalidDOCTYPEExternalIdType",
            MissingDoctypePublicIdentifier => "missingDOCTYPEPublicIdentifier",
            ExpectedDoctypePublicIdentifier => "expectedDOCTYPEPublicIdentifier",
            MissingDoctypeSystemIdentifier => "missingDOCTYPESystemIdentifier",
            ExpectedDoctypeSystemIdentifier => "expectedDOCTYPESystemIdentifier",
            MissingInternalDefinitionRightSquareBracket => {
                "missingInternalDefinitionRightSquareBracket"
            }
            ExpectedDoctypeRightAngleBracket => "expectedDOCTYPERightAngleBracket",
            MissingDoctypeRightAngleBracket => "missingDOCTYPERightAngleBracket",
            ExpectedCommentSecondStartDash => "expectedCommentSecondStartDash",
            MissingCommentSecondStartDash => "missingCommentSecondStartDash",
            MissingCommentClosingDashes => "missingCommentClosingDashes",
            MissingCommentSecondClosingDash => "missingCommentSecondClosingDash",
            MissingCommentRightAngleBracket => "missingCommentRightAngleBracket",
            MissingCdataName => "missingCDATAName",
            ExpectedCdataName => "expectedCDATAName",
            MissingCdataSecondLeftSquareBracket => "missingCDATASecondLeftSquareBracket",
            ExpectedCdataSecondLeftSquareBracket => "expectedCDATASecondLeftSquareBracket",
            MissingCdataClosingRightSquareBrackets => "missingCDATAClosingRightSquareBrackets",
            MissingCdataSecondClosingRightSquareBracket => {
                "missingCDATASecondClosingRightSquareBracket"
            }
            MissingCdataRightAngleBracket => "missingCDATARightAngleBracket",
            MissingAttributeEqualsSign => "missingAttributeEqualsSign",
            ExpectedAttributeEqualsSign => "expectedAttributeEqualsSign",
            MissingAttributeValue => "missingAttributeValue",
            ExpectedAttributeValue => "expectedAttributeValue",
            MissingQuotedStringEndQuote => "missingQuotedStringEndQuote",
            MissingTagRightAngleBracket => "missingTagRightAngleBracket",
            MissingElementEndTag => "missingElementEndTag",
            ExpectedElementEndTagWithDifferentName => "expectedElementEndTagWithDifferentName",
            MissingDocumentRootElement => "missingDocumentRootElement",
            DocumentDeclarationMustBeFirstSegment => "documentDeclarationMustBeFirstSegment",
            DocumentCanHaveOneDeclaration => "documentCanHaveOneDeclaration",
            DocumentDoctypeMustBeAfterDeclaration => "documentDOCTYPEMustBeAfterDeclaration",
            DocumentCanHaveOneDoctype => "documentCanHaveOneDOCTYPE",
            DocumentCanHaveOneRootElement => "documentCanHaveOneRootElement",
            DocumentCannotHaveTextAtRootLevel => "documentCannotHaveTextAtRootLevel",
            DocumentCannotHaveCdataAtRootLevel => "documentCannotHaveCDATAAtRootLevel",
            RecursionLimitExceeded => "recursionLimitExceeded",
        }
    }
}

/// `{severity, message, span}` (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            span,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            self.span.start_index,
            self.span.after_end_index(),
            self.message()
        )
    }
}

/// The append-only sink threaded through the tokenizer, element builder,
/// and document builder (spec.md §5, §7). Never deduplicated — see the
/// module doc comment.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, kind: DiagnosticKind, span: Span) {
        self.0.push(Diagnostic::new(kind, span));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn printer<'a>(&'a self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self, source)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_emissions_at_the_same_span_are_not_deduplicated() {
        let mut diags = Diagnostics::new();
        let span = Span::new(3, 1);
        diags.push(DiagnosticKind::MissingAttributeEqualsSign, span);
        diags.push(DiagnosticKind::ExpectedAttributeValue, span);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn message_text_matches_the_spec_identifier() {
        assert_eq!(
            DiagnosticKind::MissingDocumentRootElement.message(),
            "missingDocumentRootElement"
        );
    }
}
