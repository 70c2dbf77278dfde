//! Human-readable diagnostic rendering, adapted from the teacher's
//! `diagnostics/printer.rs`: same `annotate-snippets` usage, same
//! zero-width-range-widening trick for point diagnostics, same plain-text
//! fallback when no source is available. Adapted from `rowan::TextRange` to
//! this crate's own `Span`, and with the fix/related-info machinery
//! dropped — spec.md's diagnostics carry only `{severity, message, span}`
//! (§6), no structured fix suggestions or related locations.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;

pub struct DiagnosticsPrinter<'a> {
    diagnostics: &'a Diagnostics,
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: &'a Diagnostics, source: &'a str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let range = adjust_range(diag.span, self.source.len());

            let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                AnnotationKind::Primary.span(range).label(diag.message()),
            );

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let title_group = Level::ERROR.primary_title(diag.message()).element(snippet);
            let report: Vec<Group> = vec![title_group];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn adjust_range(span: crate::span::Span, limit: usize) -> std::ops::Range<usize> {
    let start = span.start_index as usize;
    let end = span.after_end_index() as usize;

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::span::Span;

    #[test]
    fn empty_diagnostics_render_to_empty_string() {
        let diags = Diagnostics::new();
        assert_eq!(diags.printer("<a>").render(), "");
    }

    #[test]
    fn a_point_diagnostic_widens_to_one_char_for_rendering() {
        let mut diags = Diagnostics::new();
        diags.push(DiagnosticKind::MissingDocumentRootElement, Span::empty_at(0));
        let rendered = diags.printer("").render();
        assert!(rendered.contains("missingDocumentRootElement"));
    }
}
