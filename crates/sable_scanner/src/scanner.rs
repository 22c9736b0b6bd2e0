//! The tokenizer.
//!
//! Materializes the whole token sequence for a source text in one pass.
//! Template literals are resolved into head/middle/tail fragments here, by
//! tracking brace depth across interpolations, so the parser never has to
//! reach back into the lexer.

use crate::token::Token;
use sable_ast::{SyntaxKind, TokenFlags};
use sable_core::text::TextRange;
use sable_diagnostics::{Diagnostic, DiagnosticCollection};
use unicode_xid::UnicodeXID;

/// Tokenize `source`, returning the token sequence (always terminated by an
/// end-of-file token) and any lexical diagnostics.
pub fn tokenize(source: &str) -> (Vec<Token>, DiagnosticCollection) {
    Scanner::new(source).run()
}

pub struct Scanner<'s> {
    src: &'s str,
    pos: usize,
    token_start: usize,
    flags: TokenFlags,
    tokens: Vec<Token>,
    diagnostics: DiagnosticCollection,
    /// Current `{`-nesting depth, used to find interpolation terminators.
    brace_depth: u32,
    /// Brace depth at each open template interpolation.
    template_stack: Vec<u32>,
}

impl<'s> Scanner<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            pos: 0,
            token_start: 0,
            flags: TokenFlags::NONE,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
            brace_depth: 0,
            template_stack: Vec::new(),
        }
    }

    pub fn run(mut self) -> (Vec<Token>, DiagnosticCollection) {
        self.skip_shebang();
        loop {
            self.scan_token();
            if self
                .tokens
                .last()
                .is_some_and(|t| t.kind == SyntaxKind::EndOfFileToken)
            {
                break;
            }
        }
        (self.tokens, self.diagnostics)
    }

    // ------------------------------------------------------------------
    // Character primitives
    // ------------------------------------------------------------------

    #[inline]
    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    #[inline]
    fn ch(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    fn ch_at(&self, offset: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(offset)
    }

    #[inline]
    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    #[inline]
    fn eat(&mut self, expected: char) -> bool {
        if self.ch() == Some(expected) {
            self.bump(expected);
            true
        } else {
            false
        }
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn range(&self) -> TextRange {
        TextRange::new(self.token_start as u32, self.pos as u32)
    }

    fn error(&mut self, message: impl Into<String>) {
        let span = self.range();
        self.diagnostics.add(Diagnostic::error(message, span));
    }

    // ------------------------------------------------------------------
    // Token emission
    // ------------------------------------------------------------------

    fn push(&mut self, kind: SyntaxKind) {
        let token = Token::new(kind, self.range()).with_flags(self.flags);
        self.tokens.push(token);
    }

    fn push_with_text(&mut self, kind: SyntaxKind, text: impl Into<String>) {
        let token = Token::new(kind, self.range())
            .with_text(text)
            .with_flags(self.flags);
        self.tokens.push(token);
    }

    // ------------------------------------------------------------------
    // Trivia
    // ------------------------------------------------------------------

    fn skip_shebang(&mut self) {
        if self.src.starts_with("#!") {
            while let Some(ch) = self.ch() {
                if is_line_break(ch) {
                    break;
                }
                self.bump(ch);
            }
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.ch() {
            match ch {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.bump(ch);
                }
                c if c.is_whitespace() => self.bump(c),
                '/' if self.rest().starts_with("//") => {
                    while let Some(c) = self.ch() {
                        if is_line_break(c) {
                            break;
                        }
                        self.bump(c);
                    }
                }
                '/' if self.rest().starts_with("/*") => {
                    self.token_start = self.pos;
                    self.pos += 2;
                    let mut closed = false;
                    while let Some(c) = self.ch() {
                        if self.rest().starts_with("*/") {
                            self.pos += 2;
                            closed = true;
                            break;
                        }
                        if is_line_break(c) {
                            self.flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        }
                        self.bump(c);
                    }
                    if !closed {
                        self.error("unterminated block comment");
                    }
                }
                _ => break,
            }
        }
    }

    // ------------------------------------------------------------------
    // Main dispatch
    // ------------------------------------------------------------------

    fn scan_token(&mut self) {
        self.flags = TokenFlags::NONE;
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.ch() else {
            self.push(SyntaxKind::EndOfFileToken);
            return;
        };

        match ch {
            '{' => {
                self.bump(ch);
                self.brace_depth += 1;
                self.push(SyntaxKind::OpenBraceToken);
            }
            '}' => {
                if self.template_stack.last() == Some(&self.brace_depth) {
                    self.template_stack.pop();
                    self.scan_template_continuation();
                } else {
                    self.bump(ch);
                    self.brace_depth = self.brace_depth.saturating_sub(1);
                    self.push(SyntaxKind::CloseBraceToken);
                }
            }
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            ':' => self.single(SyntaxKind::ColonToken),
            '@' => self.single(SyntaxKind::AtToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '`' => self.scan_template_start(),
            '"' | '\'' => self.scan_string(ch),
            '.' => {
                if self.ch_at(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number();
                } else {
                    self.bump(ch);
                    if self.rest().starts_with("..") {
                        self.pos += 2;
                        self.push(SyntaxKind::DotDotDotToken);
                    } else {
                        self.push(SyntaxKind::DotToken);
                    }
                }
            }
            '<' => {
                self.bump(ch);
                if self.eat('<') {
                    if self.eat('=') {
                        self.push(SyntaxKind::LessThanLessThanEqualsToken);
                    } else {
                        self.push(SyntaxKind::LessThanLessThanToken);
                    }
                } else if self.eat('=') {
                    self.push(SyntaxKind::LessThanEqualsToken);
                } else {
                    self.push(SyntaxKind::LessThanToken);
                }
            }
            '>' => {
                self.bump(ch);
                if self.eat('>') {
                    if self.eat('>') {
                        if self.eat('=') {
                            self.push(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken);
                        } else {
                            self.push(SyntaxKind::GreaterThanGreaterThanGreaterThanToken);
                        }
                    } else if self.eat('=') {
                        self.push(SyntaxKind::GreaterThanGreaterThanEqualsToken);
                    } else {
                        self.push(SyntaxKind::GreaterThanGreaterThanToken);
                    }
                } else if self.eat('=') {
                    self.push(SyntaxKind::GreaterThanEqualsToken);
                } else {
                    self.push(SyntaxKind::GreaterThanToken);
                }
            }
            '=' => {
                self.bump(ch);
                if self.eat('=') {
                    if self.eat('=') {
                        self.push(SyntaxKind::EqualsEqualsEqualsToken);
                    } else {
                        self.push(SyntaxKind::EqualsEqualsToken);
                    }
                } else if self.eat('>') {
                    self.push(SyntaxKind::EqualsGreaterThanToken);
                } else {
                    self.push(SyntaxKind::EqualsToken);
                }
            }
            '!' => {
                self.bump(ch);
                if self.eat('=') {
                    if self.eat('=') {
                        self.push(SyntaxKind::ExclamationEqualsEqualsToken);
                    } else {
                        self.push(SyntaxKind::ExclamationEqualsToken);
                    }
                } else {
                    self.push(SyntaxKind::ExclamationToken);
                }
            }
            '+' => {
                self.bump(ch);
                if self.eat('+') {
                    self.push(SyntaxKind::PlusPlusToken);
                } else if self.eat('=') {
                    self.push(SyntaxKind::PlusEqualsToken);
                } else {
                    self.push(SyntaxKind::PlusToken);
                }
            }
            '-' => {
                self.bump(ch);
                if self.eat('-') {
                    self.push(SyntaxKind::MinusMinusToken);
                } else if self.eat('=') {
                    self.push(SyntaxKind::MinusEqualsToken);
                } else {
                    self.push(SyntaxKind::MinusToken);
                }
            }
            '*' => {
                self.bump(ch);
                if self.eat('*') {
                    if self.eat('=') {
                        self.push(SyntaxKind::AsteriskAsteriskEqualsToken);
                    } else {
                        self.push(SyntaxKind::AsteriskAsteriskToken);
                    }
                } else if self.eat('=') {
                    self.push(SyntaxKind::AsteriskEqualsToken);
                } else {
                    self.push(SyntaxKind::AsteriskToken);
                }
            }
            '/' => {
                self.bump(ch);
                if self.eat('=') {
                    self.push(SyntaxKind::SlashEqualsToken);
                } else {
                    self.push(SyntaxKind::SlashToken);
                }
            }
            '%' => {
                self.bump(ch);
                if self.eat('=') {
                    self.push(SyntaxKind::PercentEqualsToken);
                } else {
                    self.push(SyntaxKind::PercentToken);
                }
            }
            '&' => {
                self.bump(ch);
                if self.eat('&') {
                    if self.eat('=') {
                        self.push(SyntaxKind::AmpersandAmpersandEqualsToken);
                    } else {
                        self.push(SyntaxKind::AmpersandAmpersandToken);
                    }
                } else if self.eat('=') {
                    self.push(SyntaxKind::AmpersandEqualsToken);
                } else {
                    self.push(SyntaxKind::AmpersandToken);
                }
            }
            '|' => {
                self.bump(ch);
                if self.eat('|') {
                    if self.eat('=') {
                        self.push(SyntaxKind::BarBarEqualsToken);
                    } else {
                        self.push(SyntaxKind::BarBarToken);
                    }
                } else if self.eat('=') {
                    self.push(SyntaxKind::BarEqualsToken);
                } else {
                    self.push(SyntaxKind::BarToken);
                }
            }
            '^' => {
                self.bump(ch);
                if self.eat('=') {
                    self.push(SyntaxKind::CaretEqualsToken);
                } else {
                    self.push(SyntaxKind::CaretToken);
                }
            }
            '?' => {
                self.bump(ch);
                if self.ch() == Some('.') && !self.ch_at(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.eat('.');
                    self.push(SyntaxKind::QuestionDotToken);
                } else if self.eat('?') {
                    if self.eat('=') {
                        self.push(SyntaxKind::QuestionQuestionEqualsToken);
                    } else {
                        self.push(SyntaxKind::QuestionQuestionToken);
                    }
                } else {
                    self.push(SyntaxKind::QuestionToken);
                }
            }
            '#' => {
                self.bump(ch);
                if self.ch().is_some_and(is_identifier_start) {
                    let name_start = self.pos;
                    self.scan_identifier_tail();
                    let text = self.src[name_start..self.pos].to_string();
                    self.push_with_text(SyntaxKind::PrivateIdentifier, text);
                } else {
                    self.push(SyntaxKind::HashToken);
                }
            }
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier_or_keyword(),
            c => {
                self.bump(c);
                self.error(format!("invalid character '{}'", c));
                self.push(SyntaxKind::Unknown);
            }
        }
    }

    fn single(&mut self, kind: SyntaxKind) {
        let ch = self.ch().unwrap();
        self.bump(ch);
        self.push(kind);
    }

    // ------------------------------------------------------------------
    // Identifiers and keywords
    // ------------------------------------------------------------------

    fn scan_identifier_tail(&mut self) {
        while let Some(c) = self.ch() {
            if is_identifier_part(c) {
                self.bump(c);
            } else {
                break;
            }
        }
    }

    fn scan_identifier_or_keyword(&mut self) {
        self.scan_identifier_tail();
        let text = &self.src[self.token_start..self.pos];
        let kind = SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier);
        let owned = text.to_string();
        self.push_with_text(kind, owned);
    }

    // ------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------

    fn scan_number(&mut self) {
        if self.rest().starts_with("0x") || self.rest().starts_with("0X") {
            self.pos += 2;
            self.flags |= TokenFlags::HEX_SPECIFIER;
            self.scan_digit_run(16);
        } else if self.rest().starts_with("0b") || self.rest().starts_with("0B") {
            self.pos += 2;
            self.flags |= TokenFlags::BINARY_SPECIFIER;
            self.scan_digit_run(2);
        } else if self.rest().starts_with("0o") || self.rest().starts_with("0O") {
            self.pos += 2;
            self.flags |= TokenFlags::OCTAL_SPECIFIER;
            self.scan_digit_run(8);
        } else {
            self.scan_digit_run(10);
            if self.ch() == Some('.') {
                self.bump('.');
                self.scan_digit_run(10);
            }
            if matches!(self.ch(), Some('e' | 'E')) {
                self.flags |= TokenFlags::SCIENTIFIC;
                self.pos += 1;
                if matches!(self.ch(), Some('+' | '-')) {
                    self.pos += 1;
                }
                if !self.ch().is_some_and(|c| c.is_ascii_digit()) {
                    self.error("digit expected in exponent");
                }
                self.scan_digit_run(10);
            }
        }

        if self.ch() == Some('n') {
            self.bump('n');
            let text = self.src[self.token_start..self.pos].to_string();
            self.push_with_text(SyntaxKind::BigIntLiteral, text);
            return;
        }

        let text = self.src[self.token_start..self.pos].to_string();
        self.push_with_text(SyntaxKind::NumericLiteral, text);
    }

    fn scan_digit_run(&mut self, radix: u32) {
        while let Some(c) = self.ch() {
            if c == '_' {
                self.flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.bump(c);
            } else if c.is_digit(radix) {
                self.bump(c);
            } else {
                break;
            }
        }
    }

    // ------------------------------------------------------------------
    // Strings and templates
    // ------------------------------------------------------------------

    fn scan_string(&mut self, quote: char) {
        self.bump(quote);
        let mut value = String::new();
        loop {
            let Some(c) = self.ch() else {
                self.flags |= TokenFlags::UNTERMINATED;
                self.error("unterminated string literal");
                break;
            };
            if c == quote {
                self.bump(c);
                break;
            }
            if is_line_break(c) {
                self.flags |= TokenFlags::UNTERMINATED;
                self.error("unterminated string literal");
                break;
            }
            if c == '\\' {
                self.bump(c);
                self.scan_escape(&mut value);
            } else {
                value.push(c);
                self.bump(c);
            }
        }
        self.push_with_text(SyntaxKind::StringLiteral, value);
    }

    fn scan_escape(&mut self, value: &mut String) {
        let Some(c) = self.ch() else {
            return;
        };
        self.bump(c);
        match c {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            '0' if !self.ch().is_some_and(|c| c.is_ascii_digit()) => value.push('\0'),
            'x' => {
                let code = self.scan_hex_digits(2);
                if let Some(ch) = code.and_then(char::from_u32) {
                    value.push(ch);
                } else {
                    self.error("hexadecimal digit expected");
                }
            }
            'u' => {
                let code = if self.eat('{') {
                    let mut digits = 0;
                    let mut code: u32 = 0;
                    while let Some(d) = self.ch().and_then(|c| c.to_digit(16)) {
                        code = code.wrapping_mul(16).wrapping_add(d);
                        digits += 1;
                        let c = self.ch().unwrap();
                        self.bump(c);
                    }
                    if !self.eat('}') || digits == 0 {
                        self.error("unterminated unicode escape sequence");
                        None
                    } else {
                        Some(code)
                    }
                } else {
                    self.scan_hex_digits(4)
                };
                if let Some(ch) = code.and_then(char::from_u32) {
                    value.push(ch);
                }
            }
            // Escaped line break is a line continuation.
            c if is_line_break(c) => {
                if c == '\r' && self.ch() == Some('\n') {
                    self.pos += 1;
                }
            }
            c => value.push(c),
        }
    }

    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut code: u32 = 0;
        for _ in 0..count {
            let d = self.ch().and_then(|c| c.to_digit(16))?;
            code = code * 16 + d;
            let c = self.ch().unwrap();
            self.bump(c);
        }
        Some(code)
    }

    /// At a backtick: scan the opening fragment of a template literal.
    fn scan_template_start(&mut self) {
        self.bump('`');
        self.scan_template_fragment(true);
    }

    /// At the `}` closing an interpolation: scan the next fragment.
    fn scan_template_continuation(&mut self) {
        self.bump('}');
        self.scan_template_fragment(false);
    }

    /// Scan template text up to `` ` `` (closing) or `${` (interpolation).
    fn scan_template_fragment(&mut self, opening: bool) {
        let mut value = String::new();
        loop {
            let Some(c) = self.ch() else {
                self.flags |= TokenFlags::UNTERMINATED;
                self.error("unterminated template literal");
                let kind = if opening {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
                self.push_with_text(kind, value);
                return;
            };
            if c == '`' {
                self.bump(c);
                let kind = if opening {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
                self.push_with_text(kind, value);
                return;
            }
            if c == '$' && self.ch_at(1) == Some('{') {
                self.pos += 2;
                let kind = if opening {
                    SyntaxKind::TemplateHead
                } else {
                    SyntaxKind::TemplateMiddle
                };
                self.push_with_text(kind, value);
                self.template_stack.push(self.brace_depth);
                return;
            }
            if c == '\\' {
                self.bump(c);
                self.scan_escape(&mut value);
            } else {
                value.push(c);
                self.bump(c);
            }
        }
    }
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_xid_start())
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphanumeric() || (!ch.is_ascii() && ch.is_xid_continue())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let (tokens, diagnostics) = tokenize(source);
        assert!(
            !diagnostics.has_errors(),
            "unexpected lex errors: {:?}",
            diagnostics.diagnostics()
        );
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_keywords_and_identifiers() {
        assert_eq!(
            kinds("let x of"),
            vec![
                SyntaxKind::LetKeyword,
                SyntaxKind::Identifier,
                SyntaxKind::OfKeyword,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn longest_match_punctuation() {
        assert_eq!(
            kinds(">>> >>>= ?. ??="),
            vec![
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
                SyntaxKind::QuestionDotToken,
                SyntaxKind::QuestionQuestionEqualsToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn nested_generics_close_with_one_token() {
        // The tokenizer must NOT split `>>`; that is the parser's decision.
        assert_eq!(
            kinds("Map<string, Array<number>>"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::LessThanToken,
                SyntaxKind::StringKeyword,
                SyntaxKind::CommaToken,
                SyntaxKind::Identifier,
                SyntaxKind::LessThanToken,
                SyntaxKind::NumberKeyword,
                SyntaxKind::GreaterThanGreaterThanToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn line_break_flag_is_set() {
        let (tokens, _) = tokenize("a\nb c");
        assert!(!tokens[0].has_preceding_line_break());
        assert!(tokens[1].has_preceding_line_break());
        assert!(!tokens[2].has_preceding_line_break());
    }

    #[test]
    fn comments_preserve_line_break_flag() {
        let (tokens, _) = tokenize("a // trailing\nb");
        assert!(tokens[1].has_preceding_line_break());
        let (tokens, _) = tokenize("a /* multi\nline */ b");
        assert!(tokens[1].has_preceding_line_break());
    }

    #[test]
    fn template_with_interpolation() {
        assert_eq!(
            kinds("`a${x}b${y}c`"),
            vec![
                SyntaxKind::TemplateHead,
                SyntaxKind::Identifier,
                SyntaxKind::TemplateMiddle,
                SyntaxKind::Identifier,
                SyntaxKind::TemplateTail,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn template_interpolation_with_nested_braces() {
        assert_eq!(
            kinds("`${ {a: 1} }`"),
            vec![
                SyntaxKind::TemplateHead,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::Identifier,
                SyntaxKind::ColonToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::TemplateTail,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        let (tokens, _) = tokenize(r#"'a\nbA'"#);
        assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
        assert_eq!(tokens[0].text, "a\nbA");
    }

    #[test]
    fn numeric_shapes() {
        let (tokens, _) = tokenize("0x1f 0b10 1_000 1.5e-3 42n");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::NumericLiteral,
                SyntaxKind::NumericLiteral,
                SyntaxKind::NumericLiteral,
                SyntaxKind::NumericLiteral,
                SyntaxKind::BigIntLiteral,
                SyntaxKind::EndOfFileToken,
            ]
        );
        assert!(tokens[0].flags.contains(TokenFlags::HEX_SPECIFIER));
        assert!(tokens[2].flags.contains(TokenFlags::CONTAINS_SEPARATOR));
        assert!(tokens[3].flags.contains(TokenFlags::SCIENTIFIC));
    }

    #[test]
    fn private_identifier() {
        let (tokens, _) = tokenize("this.#count");
        assert_eq!(tokens[2].kind, SyntaxKind::PrivateIdentifier);
        assert_eq!(tokens[2].text, "count");
    }

    #[test]
    fn unterminated_string_reports() {
        let (tokens, diagnostics) = tokenize("'abc");
        assert!(diagnostics.has_errors());
        assert!(tokens[0].flags.contains(TokenFlags::UNTERMINATED));
    }
}
