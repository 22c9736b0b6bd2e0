//! sable_parser: Recursive descent parser with precedence climbing.
//!
//! Consumes a [`sable_scanner::TokenStream`] and builds an arena-allocated
//! concrete syntax tree. Grammar ambiguities (generic arguments vs.
//! relational operators, arrow parameter lists vs. parenthesized
//! expressions, the `for`-loop family, automatic semicolon insertion) are
//! resolved with bounded lookahead and trial parsing over the stream's
//! `mark`/`reset` cursor.

mod expressions;
mod parser;
mod precedence;
mod predicates;
mod types;
mod utilities;

pub use parser::{ParseResult, Parser};

use bumpalo::Bump;
use sable_ast::Program;
use sable_core::intern::StringInterner;
use sable_diagnostics::DiagnosticCollection;
use sable_scanner::TokenStream;

/// Convenience entry point: tokenize and parse `source` in one call.
///
/// Lexical diagnostics are returned alongside the parse result; interned
/// names resolve through the `interner` handed in by the caller.
pub fn parse_source<'a>(
    arena: &'a Bump,
    source: &str,
    interner: &StringInterner,
) -> (ParseResult<Program<'a>>, DiagnosticCollection) {
    let (tokens, diagnostics) = sable_scanner::tokenize(source);
    let mut parser = Parser::new(arena, TokenStream::new(tokens), interner);
    (parser.parse_program(), diagnostics)
}
