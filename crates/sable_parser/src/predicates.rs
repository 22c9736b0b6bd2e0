//! Semantic predicates.
//!
//! Pure functions over already-computed token metadata (the
//! preceding-line-break flag and token text), consulted at grammar decision
//! points. They never call back into the tokenizer.

use sable_ast::SyntaxKind;
use sable_scanner::TokenStream;

/// No line terminator occurred before the current token. Gates postfix
/// `++`/`--`, `=>`, and the operands of `return`/`throw`/`break`/`continue`.
#[inline]
pub fn not_line_terminator(stream: &TokenStream) -> bool {
    !stream.current().has_preceding_line_break()
}

/// A line terminator occurred before the current token; the ASI alternative
/// of the statement terminator rule.
#[inline]
pub fn line_terminator_ahead(stream: &TokenStream) -> bool {
    stream.current().has_preceding_line_break()
}

/// The current token closes the enclosing block, which also terminates a
/// statement without an explicit semicolon.
#[inline]
pub fn close_brace_ahead(stream: &TokenStream) -> bool {
    stream.kind() == SyntaxKind::CloseBraceToken
}

/// An expression statement may not begin with `{` (that prefix is a block)
/// or `function` (that prefix is a declaration).
#[inline]
pub fn not_open_brace_and_not_function(stream: &TokenStream) -> bool {
    !matches!(
        stream.kind(),
        SyntaxKind::OpenBraceToken | SyntaxKind::FunctionKeyword
    )
}

/// The current token acts as the contextual keyword `text` at this grammar
/// position: either the tokenizer classified it as that keyword kind, or an
/// external producer supplied it as a plain identifier with matching text.
pub fn at_contextual_keyword(stream: &TokenStream, text: &str) -> bool {
    let token = stream.current();
    if token.kind == SyntaxKind::Identifier {
        return token.text == text;
    }
    token.kind.is_contextual_keyword() && token.kind.keyword_text() == Some(text)
}
