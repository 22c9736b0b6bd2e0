//! sable_diagnostics: Structured error reporting.
//!
//! The parser's error channel is the typed [`SyntaxError`] value: a rule
//! name, the set of token kinds that would have been accepted, and the
//! offending token. A rule either fully succeeds or returns one of these;
//! it never returns a silent `None`.
//!
//! The tokenizer accumulates its lexical problems in a
//! [`DiagnosticCollection`] instead, since lexing keeps going after an
//! error to hand the parser a well-formed stream shape.

use sable_ast::SyntaxKind;
use sable_core::text::TextRange;
use std::fmt;

/// Classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// The current token matched no alternative's first set at a mandatory
    /// decision point.
    UnexpectedToken,
    /// Every trial parse for a set of competing alternatives failed.
    AmbiguityResolutionFailure,
    /// An opening delimiter was never matched before end of input.
    UnterminatedConstruct,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyntaxErrorKind::UnexpectedToken => "unexpected token",
            SyntaxErrorKind::AmbiguityResolutionFailure => "ambiguity resolution failure",
            SyntaxErrorKind::UnterminatedConstruct => "unterminated construct",
        };
        f.write_str(text)
    }
}

/// A parse failure with enough structure for any recovery policy: the rule
/// that failed, what it would have accepted, and what it found where.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} in rule '{rule}': found {found} at {span}{}", expected_list(.expected))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Grammar rule that raised the failure.
    pub rule: &'static str,
    /// Token kinds that would have been accepted, in declaration order.
    pub expected: Vec<SyntaxKind>,
    /// Kind of the offending token.
    pub found: SyntaxKind,
    /// Raw text of the offending token (empty for fixed-text tokens).
    pub found_text: String,
    pub span: TextRange,
}

fn expected_list(expected: &[SyntaxKind]) -> String {
    if expected.is_empty() {
        return String::new();
    }
    let kinds: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
    format!(", expected {}", kinds.join(" or "))
}

impl SyntaxError {
    pub fn unexpected(
        rule: &'static str,
        expected: Vec<SyntaxKind>,
        found: SyntaxKind,
        found_text: &str,
        span: TextRange,
    ) -> Self {
        Self {
            kind: SyntaxErrorKind::UnexpectedToken,
            rule,
            expected,
            found,
            found_text: found_text.to_string(),
            span,
        }
    }

    pub fn ambiguity(
        rule: &'static str,
        expected: Vec<SyntaxKind>,
        found: SyntaxKind,
        found_text: &str,
        span: TextRange,
    ) -> Self {
        Self {
            kind: SyntaxErrorKind::AmbiguityResolutionFailure,
            rule,
            expected,
            found,
            found_text: found_text.to_string(),
            span,
        }
    }

    /// An opening delimiter of kind `open` was never matched before EOF.
    pub fn unterminated(rule: &'static str, open: SyntaxKind, span: TextRange) -> Self {
        Self {
            kind: SyntaxErrorKind::UnterminatedConstruct,
            rule,
            expected: vec![closing_kind(open)],
            found: SyntaxKind::EndOfFileToken,
            found_text: String::new(),
            span,
        }
    }
}

fn closing_kind(open: SyntaxKind) -> SyntaxKind {
    match open {
        SyntaxKind::OpenBraceToken => SyntaxKind::CloseBraceToken,
        SyntaxKind::OpenParenToken => SyntaxKind::CloseParenToken,
        SyntaxKind::OpenBracketToken => SyntaxKind::CloseBracketToken,
        other => other,
    }
}

/// Severity of a tokenizer diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => f.write_str("error"),
            DiagnosticCategory::Warning => f.write_str("warning"),
        }
    }
}

/// A lexical diagnostic with a source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub message: String,
    pub span: TextRange,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: TextRange) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message: message.into(),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.category, self.span, self.message)
    }
}

/// Diagnostics accumulated during tokenization.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError::unexpected(
            "statement",
            vec![SyntaxKind::SemicolonToken, SyntaxKind::CloseBraceToken],
            SyntaxKind::CommaToken,
            "",
            TextRange::new(4, 5),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("statement"), "{rendered}");
        assert!(rendered.contains("';'"), "{rendered}");
        assert!(rendered.contains("'}'"), "{rendered}");
    }

    #[test]
    fn unterminated_expects_matching_closer() {
        let err = SyntaxError::unterminated("block", SyntaxKind::OpenBraceToken, TextRange::new(0, 1));
        assert_eq!(err.kind, SyntaxErrorKind::UnterminatedConstruct);
        assert_eq!(err.expected, vec![SyntaxKind::CloseBraceToken]);
    }
}
