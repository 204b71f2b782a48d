//! Recoverable problems found while emitting code.
//!
//! Nothing in the Emit phase logs or aborts on its own. Every problem with a
//! single schema or operation is pushed into a [`Diagnostics`] collector that
//! travels with the emitters and ends up in the run report, where the caller
//! decides how to surface it.

use std::fmt;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Output was produced with a fallback.
    Warning,
    /// Part of the output is missing.
    Error,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Schema component that is neither an object nor an enum.
    UnsupportedSchema,
    /// Property shape the type mapper does not know.
    UnsupportedProperty,
    /// Request body content type other than JSON or multipart.
    UnsupportedRequestBody,
    /// Success response with content but no JSON media type.
    UnsupportedResponseContent,
    /// Query parameters on an operation that also has a request body.
    QueryWithBody,
    /// Two names normalized to the same identifier in one scope.
    NameCollision,
    /// Operation without any tag.
    UntaggedOperation,
    /// Operation under a verb the client cannot call (`patch`, `head`, ...).
    UnsupportedMethod,
    /// `{placeholder}` in a path without a declared path parameter.
    UndeclaredPathParameter,
    /// `$ref` pointing outside `components.schemas`.
    UnresolvedReference,
    /// A generated file could not be written.
    WriteFailed,
}

impl DiagnosticKind {
    /// Stable kebab-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedSchema => "unsupported-schema",
            DiagnosticKind::UnsupportedProperty => "unsupported-property",
            DiagnosticKind::UnsupportedRequestBody => "unsupported-request-body",
            DiagnosticKind::UnsupportedResponseContent => "unsupported-response-content",
            DiagnosticKind::QueryWithBody => "query-with-body",
            DiagnosticKind::NameCollision => "name-collision",
            DiagnosticKind::UntaggedOperation => "untagged-operation",
            DiagnosticKind::UnsupportedMethod => "unsupported-method",
            DiagnosticKind::UndeclaredPathParameter => "undeclared-path-parameter",
            DiagnosticKind::UnresolvedReference => "unresolved-reference",
            DiagnosticKind::WriteFailed => "write-failed",
        }
    }
}

/// One recoverable problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Problem class.
    pub kind: DiagnosticKind,
    /// Severity.
    pub severity: Severity,
    /// What the problem is about, e.g. `schema Item` or `GET /items`.
    pub subject: String,
    /// Human readable detail.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.as_str(), self.subject, self.message)
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(kind, Severity::Warning, subject, message);
    }

    /// Record an error.
    pub fn error(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(kind, Severity::Error, subject, message);
    }

    fn push(
        &mut self,
        kind: DiagnosticKind,
        severity: Severity,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.items.push(Diagnostic {
            kind,
            severity,
            subject: subject.into(),
            message: message.into(),
        });
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether at least one error was recorded.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
