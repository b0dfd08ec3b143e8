use std::fmt;

use rowan::TextRange;

/// What went wrong. Declaration order is priority: when two diagnostics
/// start at the same offset, the earlier kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Truncated markup: everything after is swallowed
    UnterminatedComment,
    UnterminatedTag,

    // Tree shape repaired by the parser
    UnclosedElement,
    StrayCloseTag,
    MalformedAttribute,

    // Content the compiler substitutes or drops
    EmptyTagName,
    UnsupportedNodeKind,
    VoidElementChildren,
    UnmatchedBrace,
}

impl DiagnosticKind {
    /// Only truncated markup is an error; everything else was repaired.
    pub fn severity(self) -> Severity {
        match self {
            Self::UnterminatedComment | Self::UnterminatedTag => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Message used when the reporter supplies no detail.
    pub fn summary(self) -> &'static str {
        match self {
            Self::UnterminatedComment => "unterminated comment",
            Self::UnterminatedTag => "unterminated tag",
            Self::UnclosedElement => "element is not closed",
            Self::StrayCloseTag => "close tag has no matching open tag",
            Self::MalformedAttribute => "malformed attribute ignored",
            Self::EmptyTagName => "empty tag name",
            Self::UnsupportedNodeKind => "node kind is not supported in templates",
            Self::VoidElementChildren => "void element cannot have children",
            Self::UnmatchedBrace => "unmatched brace is treated as literal text",
        }
    }

    /// Message with a reporter-supplied detail, usually a tag or node name.
    pub fn with_detail(self, detail: &str) -> String {
        match self {
            Self::UnclosedElement => format!("`<{detail}>` is not closed"),
            Self::StrayCloseTag => format!("`</{detail}>` has no matching open tag"),
            Self::VoidElementChildren => {
                format!("`<{detail}>` is a void element; children dropped")
            }
            Self::EmptyTagName => format!("empty tag name; using `<{detail}>`"),
            Self::MalformedAttribute => format!("malformed attribute `{detail}` ignored"),
            _ => format!("{}: {detail}", self.summary()),
        }
    }

    pub fn message(self, detail: Option<&str>) -> String {
        detail.map_or_else(|| self.summary().to_owned(), |d| self.with_detail(d))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested source edit over the primary span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) description: String,
    pub(crate) replacement: String,
}

/// A second span that explains the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) fix: Option<Fix>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.summary().to_owned(),
            related: Vec::new(),
            fix: None,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = u32::from(self.range.start());
        let end = u32::from(self.range.end());
        write!(f, "{}: {} at {start}..{end}", self.severity(), self.message)
    }
}
