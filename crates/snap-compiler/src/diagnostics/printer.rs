//! Diagnostic rendering.
//!
//! Three shapes, picked from what the caller knows:
//! - no source: `severity: message at start..end`
//! - source, compact: `path:line:col: severity: message`, one per line
//! - source: annotated snippets with related spans and fix suggestions

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
    compact: bool,
    summary: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
            compact: false,
            summary: false,
        }
    }

    /// Source text the spans point into.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One line per diagnostic with a `line:col` location.
    pub fn compact(mut self, value: bool) -> Self {
        self.compact = value;
        self
    }

    /// Append an `N errors, M warnings` line.
    pub fn summary(mut self, value: bool) -> Self {
        self.summary = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        match self.source {
            None => self.format_plain(w)?,
            Some(source) if self.compact => self.format_compact(w, source)?,
            Some(source) => self.format_snippets(w, source)?,
        }

        if self.summary && !self.diagnostics.is_empty() {
            write!(w, "\n{}", summary_line(self.diagnostics))?;
        }
        Ok(())
    }

    /// Run `line` for every diagnostic, newline-separated.
    fn each_line<W: Write>(
        &self,
        w: &mut W,
        mut line: impl FnMut(&mut W, &DiagnosticMessage) -> std::fmt::Result,
    ) -> std::fmt::Result {
        let mut first = true;
        for diag in self.diagnostics {
            if !std::mem::take(&mut first) {
                writeln!(w)?;
            }
            line(w, diag)?;
        }
        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        self.each_line(w, |w, diag| write!(w, "{diag}"))
    }

    fn format_compact(&self, w: &mut impl Write, source: &str) -> std::fmt::Result {
        let at = |range: TextRange| line_col(source, range.start().into());
        self.each_line(w, |w, diag| {
            let (line, col) = at(diag.range);
            if let Some(path) = self.path {
                write!(w, "{path}:")?;
            }
            write!(w, "{line}:{col}: {}: {}", diag.severity(), diag.message)?;
            for note in &diag.related {
                let (line, col) = at(note.range);
                write!(w, "\n  note: {} ({line}:{col})", note.message)?;
            }
            match &diag.fix {
                Some(fix) => write!(w, "\n  help: {}", fix.description),
                None => Ok(()),
            }
        })
    }

    fn format_snippets(&self, w: &mut impl Write, source: &str) -> std::fmt::Result {
        let renderer = match self.colored {
            true => Renderer::styled(),
            false => Renderer::plain(),
        };
        self.each_line(w, |w, diag| {
            write!(w, "{}", renderer.render(&self.report(diag, source)))
        })
    }

    /// Title with primary and related spans, then an optional fix group.
    fn report<'a>(&self, diag: &'a DiagnosticMessage, source: &'a str) -> Vec<Group<'a>>
    where
        's: 'a,
    {
        let primary = span_of(diag.range, source.len());

        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(primary.clone())
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(span_of(related.range, source.len()))
                    .label(&related.message),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let mut report = vec![level.primary_title(&diag.message).element(snippet)];

        if let Some(fix) = &diag.fix {
            report.push(
                Level::HELP.secondary_title(&fix.description).element(
                    Snippet::source(source)
                        .line_start(1)
                        .patch(Patch::new(primary, &fix.replacement)),
                ),
            );
        }
        report
    }
}

/// `N errors, M warnings`, omitting a zero half.
fn summary_line(diagnostics: &Diagnostics) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("1 {word}")
        } else {
            format!("{n} {word}s")
        }
    };

    let errors = diagnostics.error_count();
    let warnings = diagnostics.warning_count();
    match (errors, warnings) {
        (0, w) => plural(w, "warning"),
        (e, 0) => plural(e, "error"),
        (e, w) => format!("{}, {}", plural(e, "error"), plural(w, "warning")),
    }
}

/// 1-based line and column (in chars) of a byte offset.
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |at| at + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Byte range for an annotation; empty spans widen to one byte when the
/// source allows it.
fn span_of(range: TextRange, limit: usize) -> Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
