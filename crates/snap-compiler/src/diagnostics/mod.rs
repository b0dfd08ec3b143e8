//! Non-fatal compile diagnostics: collected, never thrown.

mod message;
mod printer;


use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Fix, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;

/// Diagnostics in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<DiagnosticMessage>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a diagnostic of `kind` at `range`; nothing is recorded until
    /// [`DiagnosticBuilder::emit`].
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: self,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.items.iter()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity() == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity() == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.items.iter().any(|d| d.severity() == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// One diagnostic per start offset, sorted by offset. Where several
    /// share an offset the highest-priority kind is kept.
    pub fn filtered(&self) -> Diagnostics {
        let mut kept: Vec<DiagnosticMessage> = Vec::with_capacity(self.items.len());
        for diag in &self.items {
            let start = diag.range.start();
            match kept.iter_mut().find(|k| k.range.start() == start) {
                Some(slot) if diag.kind.suppresses(&slot.kind) => *slot = diag.clone(),
                Some(_) => {}
                None => kept.push(diag.clone()),
            }
        }
        kept.sort_by_key(|d| d.range.start());
        Diagnostics { items: kept }
    }

    /// Append `other` after the diagnostics already held.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Diagnostics,
    pending: DiagnosticMessage,
}

impl DiagnosticBuilder<'_> {
    /// Replace the default text with the kind's detailed form.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.pending.message = self.pending.kind.with_detail(detail.as_ref());
        self
    }

    pub fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.pending.related.push(RelatedInfo {
            range,
            message: message.into(),
        });
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.pending.fix = Some(Fix {
            description: description.into(),
            replacement: replacement.into(),
        });
        self
    }

    pub fn emit(self) {
        let diag = self.pending;
        tracing::warn!(
            kind = ?diag.kind,
            start = u32::from(diag.range.start()),
            "{}",
            diag.message
        );
        self.sink.items.push(diag);
    }
}
