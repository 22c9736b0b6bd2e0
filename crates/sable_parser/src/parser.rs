//! Parser state, token management, and the statement/declaration rules.
//!
//! One parsing function per grammar rule. Every rule returns
//! `Result<Node, SyntaxError>`; a failing rule never partially commits —
//! callers that offered the rule as one of several alternatives restore the
//! cursor through [`Parser::try_parse`] before trying the next one.

use bumpalo::Bump;
use sable_ast::*;
use sable_core::intern::{InternedString, StringInterner};
use sable_core::text::TextRange;
use sable_diagnostics::SyntaxError;
use sable_scanner::{Token, TokenStream};

use crate::predicates;
use crate::utilities;

/// Every rule either produces a node or a structured syntax error.
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Bound on rule nesting; deeply nested input fails cleanly instead of
/// overflowing the stack.
const MAX_RECURSION_DEPTH: u32 = 200;

/// The parsing engine. Owns the token cursor and an interner handle; all
/// nodes are allocated into the caller's arena.
pub struct Parser<'a> {
    arena: &'a Bump,
    pub(crate) stream: TokenStream,
    interner: StringInterner,
    /// End offset of the most recently consumed token; node spans close here.
    prev_end: u32,
    next_node_id: u32,
    depth: u32,
    /// `in` is not a binary operator while parsing a `for`-statement head.
    pub(crate) no_in: bool,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, stream: TokenStream, interner: &StringInterner) -> Self {
        Self {
            arena,
            stream,
            interner: interner.clone(),
            prev_end: 0,
            next_node_id: 0,
            depth: 0,
            no_in: false,
        }
    }

    /// Entry rule: the whole token sequence as a [`Program`].
    pub fn parse_program(&mut self) -> ParseResult<Program<'a>> {
        let mut statements = Vec::new();
        while !self.stream.is_eof() {
            if !utilities::is_start_of_statement(self.kind()) {
                return Err(self.unexpected("program", &[]));
            }
            statements.push(self.parse_statement()?);
        }
        let end_of_file = self.stream.current().range;
        let mut data = NodeData::new(SyntaxKind::Program, TextRange::new(0, end_of_file.end));
        data.id = self.next_id();
        Ok(Program {
            data,
            statements: self.alloc_slice(statements),
            end_of_file,
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn kind(&self) -> SyntaxKind {
        self.stream.kind()
    }

    #[inline]
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub(crate) fn peek_kind(&self, k: usize) -> SyntaxKind {
        self.stream.peek(k).kind
    }

    #[inline]
    pub(crate) fn token_range(&self) -> TextRange {
        self.stream.current().range
    }

    /// Start offset of the current token: the `pos` for a node beginning here.
    #[inline]
    pub(crate) fn start(&self) -> u32 {
        self.token_range().pos
    }

    /// Consume the current token.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.stream.advance();
        self.prev_end = token.range.end;
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Option<TextRange> {
        if self.at(kind) {
            Some(self.bump().range)
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail with the rule's name.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, rule: &'static str) -> ParseResult<TextRange> {
        if self.at(kind) {
            Ok(self.bump().range)
        } else {
            Err(self.unexpected(rule, &[kind]))
        }
    }

    /// Consume the token closing a delimiter opened at `open`. End of input
    /// here means the construct was never terminated.
    pub(crate) fn expect_closing(
        &mut self,
        open_kind: SyntaxKind,
        rule: &'static str,
        open: TextRange,
    ) -> ParseResult<TextRange> {
        let close = match open_kind {
            SyntaxKind::OpenBraceToken => SyntaxKind::CloseBraceToken,
            SyntaxKind::OpenParenToken => SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken => SyntaxKind::CloseBracketToken,
            other => other,
        };
        if self.at(close) {
            Ok(self.bump().range)
        } else if self.stream.is_eof() {
            Err(self.unterminated(rule, open_kind, open))
        } else {
            Err(self.unexpected(rule, &[close]))
        }
    }

    /// Consume one logical `>`. Splits compound `>>`-family tokens so nested
    /// generic argument lists can close one bracket at a time.
    pub(crate) fn expect_close_angle(&mut self, rule: &'static str) -> ParseResult<TextRange> {
        if self.at(SyntaxKind::GreaterThanToken) {
            return Ok(self.bump().range);
        }
        if self.kind().starts_with_greater_than() {
            let range = self.stream.split_angle();
            self.prev_end = range.end;
            return Ok(range);
        }
        Err(self.unexpected(rule, &[SyntaxKind::GreaterThanToken]))
    }

    /// Statement terminator, with automatic semicolon insertion. Accepts, in
    /// order: an explicit `;`, end of input, a closing `}` ahead, or a line
    /// terminator before the next token.
    pub(crate) fn parse_semicolon(&mut self, rule: &'static str) -> ParseResult<()> {
        if self.eat(SyntaxKind::SemicolonToken).is_some() {
            return Ok(());
        }
        if self.stream.is_eof() || predicates::close_brace_ahead(&self.stream) {
            return Ok(());
        }
        if predicates::line_terminator_ahead(&self.stream) {
            return Ok(());
        }
        Err(self.unexpected(rule, &[SyntaxKind::SemicolonToken]))
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    #[inline]
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Close a span opened at `pos`: it ends at the last consumed token.
    #[inline]
    pub(crate) fn finish(&self, pos: u32) -> TextRange {
        TextRange::new(pos, self.prev_end.max(pos))
    }

    /// Node data for a span from `pos` through the last consumed token.
    pub(crate) fn node_data(&mut self, kind: SyntaxKind, pos: u32) -> NodeData {
        let mut data = NodeData::new(kind, self.finish(pos));
        data.id = self.next_id();
        data
    }

    /// Node data covering exactly `range` (single-token nodes).
    pub(crate) fn node_data_at(&mut self, kind: SyntaxKind, range: TextRange) -> NodeData {
        let mut data = NodeData::new(kind, range);
        data.id = self.next_id();
        data
    }

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub(crate) fn alloc_slice<T>(&self, values: Vec<T>) -> &'a [T] {
        if values.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(values)
    }

    pub(crate) fn intern(&self, text: &str) -> InternedString {
        self.interner.intern(text)
    }

    pub(crate) fn parse_statement_ref(&mut self) -> ParseResult<&'a Statement<'a>> {
        let statement = self.parse_statement()?;
        Ok(self.alloc(statement))
    }

    pub(crate) fn parse_expression_ref(&mut self) -> ParseResult<&'a Expression<'a>> {
        let expression = self.parse_expression()?;
        Ok(self.alloc(expression))
    }

    pub(crate) fn parse_assignment_expression_ref(&mut self) -> ParseResult<&'a Expression<'a>> {
        let expression = self.parse_assignment_expression()?;
        Ok(self.alloc(expression))
    }

    fn intern_token(&self, token: &Token) -> InternedString {
        if token.text.is_empty() {
            self.interner.intern(token.kind.token_text().unwrap_or(""))
        } else {
            self.interner.intern(&token.text)
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    pub(crate) fn unexpected(&self, rule: &'static str, expected: &[SyntaxKind]) -> SyntaxError {
        let token = self.stream.current();
        SyntaxError::unexpected(rule, expected.to_vec(), token.kind, &token.text, token.range)
    }

    pub(crate) fn ambiguity_failure(
        &self,
        rule: &'static str,
        expected: &[SyntaxKind],
    ) -> SyntaxError {
        let token = self.stream.current();
        SyntaxError::ambiguity(rule, expected.to_vec(), token.kind, &token.text, token.range)
    }

    pub(crate) fn unterminated(&self, rule: &'static str, open: SyntaxKind, at: TextRange) -> SyntaxError {
        SyntaxError::unterminated(rule, open, at)
    }

    // ========================================================================
    // Ambiguity resolution
    // ========================================================================

    /// Run `f` speculatively and restore the cursor afterwards regardless of
    /// outcome. Nested lookaheads are legal; each owns its saved position.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let position = self.stream.mark();
        let prev_end = self.prev_end;
        let next_node_id = self.next_node_id;
        let result = f(self);
        self.stream.reset(position);
        self.prev_end = prev_end;
        self.next_node_id = next_node_id;
        result
    }

    /// Trial-parse one alternative: keep the cursor on success, restore it on
    /// failure so the next alternative observes the identical stream.
    pub(crate) fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let position = self.stream.mark();
        let prev_end = self.prev_end;
        let next_node_id = self.next_node_id;
        let depth = self.depth;
        match f(self) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.stream.reset(position);
                self.prev_end = prev_end;
                self.next_node_id = next_node_id;
                self.depth = depth;
                Err(error)
            }
        }
    }

    /// Recursion guard shared by the mutually recursive rule strata.
    pub(crate) fn with_depth<T>(
        &mut self,
        rule: &'static str,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(self.unexpected(rule, &[]));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Whether `kind` can serve as an identifier: `Identifier` itself plus
    /// every non-reserved keyword.
    pub(crate) fn is_identifier_kind(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::Identifier || (kind.is_keyword() && !kind.is_reserved_word())
    }

    pub(crate) fn make_identifier(&mut self, token: &Token) -> Identifier {
        let kind = if token.kind == SyntaxKind::PrivateIdentifier {
            SyntaxKind::PrivateIdentifier
        } else {
            SyntaxKind::Identifier
        };
        Identifier {
            data: self.node_data_at(kind, token.range),
            text: self.intern_token(token),
        }
    }

    /// An identifier in a binding position; contextual keywords qualify.
    pub(crate) fn parse_identifier(&mut self, rule: &'static str) -> ParseResult<Identifier> {
        if Self::is_identifier_kind(self.kind()) {
            let token = self.bump();
            Ok(self.make_identifier(&token))
        } else {
            Err(self.unexpected(rule, &[SyntaxKind::Identifier]))
        }
    }

    /// An identifier after `.` or in a property position; any keyword is fine.
    pub(crate) fn parse_identifier_name(&mut self, rule: &'static str) -> ParseResult<Identifier> {
        if self.at(SyntaxKind::Identifier) || self.kind().is_keyword() {
            let token = self.bump();
            Ok(self.make_identifier(&token))
        } else {
            Err(self.unexpected(rule, &[SyntaxKind::Identifier]))
        }
    }

    pub(crate) fn parse_string_literal(&mut self, rule: &'static str) -> ParseResult<StringLiteral> {
        if !self.at(SyntaxKind::StringLiteral) {
            return Err(self.unexpected(rule, &[SyntaxKind::StringLiteral]));
        }
        let token = self.bump();
        Ok(StringLiteral {
            data: self.node_data_at(SyntaxKind::StringLiteral, token.range),
            text: self.intern_token(&token),
        })
    }

    /// `a.b.c` as an entity name.
    pub(crate) fn parse_entity_name(&mut self, rule: &'static str) -> ParseResult<EntityName<'a>> {
        let mut name = EntityName::Identifier(self.parse_identifier(rule)?);
        while self.at(SyntaxKind::DotToken) && Self::is_identifier_kind(self.peek_kind(1)) {
            self.bump();
            let pos = name.range().pos;
            let right = self.parse_identifier_name(rule)?;
            let qualified = QualifiedName {
                data: self.node_data(SyntaxKind::QualifiedName, pos),
                left: name,
                right,
            };
            name = EntityName::QualifiedName(self.alloc(qualified));
        }
        Ok(name)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.with_depth("statement", |p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Statement<'a>> {
        match self.kind() {
            SyntaxKind::SemicolonToken => {
                let token = self.bump();
                Ok(Statement::Empty(
                    self.node_data_at(SyntaxKind::EmptyStatement, token.range),
                ))
            }
            SyntaxKind::OpenBraceToken => Ok(Statement::Block(self.parse_block("block")?)),
            SyntaxKind::ConstKeyword if self.peek_kind(1) == SyntaxKind::EnumKeyword => {
                let pos = self.start();
                self.bump();
                self.parse_enum_declaration(pos, ModifierFlags::NONE, true)
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                let pos = self.start();
                self.parse_variable_statement(pos, ModifierFlags::NONE)
            }
            SyntaxKind::FunctionKeyword => {
                let pos = self.start();
                self.parse_function_declaration(pos, ModifierFlags::NONE)
            }
            SyntaxKind::ClassKeyword => {
                let pos = self.start();
                self.parse_class_declaration(pos, ModifierFlags::NONE, &[])
            }
            SyntaxKind::AtToken => self.parse_decorated_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_continue_statement(),
            SyntaxKind::BreakKeyword => self.parse_break_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                let pos = self.start();
                self.bump();
                self.parse_semicolon("debugger statement")?;
                Ok(Statement::Debugger(
                    self.node_data(SyntaxKind::DebuggerStatement, pos),
                ))
            }
            SyntaxKind::InterfaceKeyword => {
                let pos = self.start();
                self.parse_interface_declaration(pos, ModifierFlags::NONE)
            }
            SyntaxKind::TypeKeyword if self.is_type_alias_ahead() => {
                let pos = self.start();
                self.parse_type_alias_declaration(pos, ModifierFlags::NONE)
            }
            SyntaxKind::EnumKeyword => {
                let pos = self.start();
                self.parse_enum_declaration(pos, ModifierFlags::NONE, false)
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
                if Self::is_identifier_kind(self.peek_kind(1))
                    || self.peek_kind(1) == SyntaxKind::StringLiteral =>
            {
                let pos = self.start();
                self.parse_module_declaration(pos, ModifierFlags::NONE)
            }
            SyntaxKind::ImportKeyword
                if !matches!(
                    self.peek_kind(1),
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                ) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::DeclareKeyword | SyntaxKind::AbstractKeyword
                if self.is_modified_declaration_ahead() =>
            {
                let pos = self.start();
                self.parse_declaration(pos, ModifierFlags::NONE)
            }
            SyntaxKind::AsyncKeyword
                if self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.stream.peek(1).has_preceding_line_break() =>
            {
                let pos = self.start();
                self.parse_declaration(pos, ModifierFlags::NONE)
            }
            kind if Self::is_identifier_kind(kind)
                && self.peek_kind(1) == SyntaxKind::ColonToken =>
            {
                self.parse_labeled_statement()
            }
            kind if predicates::not_open_brace_and_not_function(&self.stream)
                && utilities::is_start_of_expression(kind) =>
            {
                self.parse_expression_statement()
            }
            _ => Err(self.unexpected("statement", &[SyntaxKind::SemicolonToken])),
        }
    }

    /// After a `declare`/`abstract` keyword: does a declaration follow?
    fn is_modified_declaration_ahead(&self) -> bool {
        matches!(
            self.peek_kind(1),
            SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ModuleKeyword
                | SyntaxKind::GlobalKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
        )
    }

    fn is_type_alias_ahead(&self) -> bool {
        Self::is_identifier_kind(self.peek_kind(1))
            && matches!(
                self.peek_kind(2),
                SyntaxKind::EqualsToken | SyntaxKind::LessThanToken
            )
    }

    /// A declaration with leading modifiers (`export declare async …`).
    fn parse_declaration(
        &mut self,
        pos: u32,
        mut modifiers: ModifierFlags,
    ) -> ParseResult<Statement<'a>> {
        loop {
            match self.kind() {
                SyntaxKind::DeclareKeyword if self.is_modified_declaration_ahead() => {
                    modifiers |= ModifierFlags::DECLARE;
                    self.bump();
                }
                SyntaxKind::AbstractKeyword if self.peek_kind(1) == SyntaxKind::ClassKeyword => {
                    modifiers |= ModifierFlags::ABSTRACT;
                    self.bump();
                }
                SyntaxKind::AsyncKeyword if self.peek_kind(1) == SyntaxKind::FunctionKeyword => {
                    modifiers |= ModifierFlags::ASYNC;
                    self.bump();
                }
                SyntaxKind::DefaultKeyword => {
                    modifiers |= ModifierFlags::DEFAULT;
                    self.bump();
                }
                _ => break,
            }
        }
        match self.kind() {
            SyntaxKind::ConstKeyword if self.peek_kind(1) == SyntaxKind::EnumKeyword => {
                self.bump();
                self.parse_enum_declaration(pos, modifiers, true)
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, modifiers),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, modifiers, &[]),
            SyntaxKind::AtToken => self.parse_decorated_declaration(),
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, modifiers, false),
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::GlobalKeyword => {
                self.parse_module_declaration(pos, modifiers)
            }
            _ => Err(self.unexpected(
                "declaration",
                &[
                    SyntaxKind::VarKeyword,
                    SyntaxKind::FunctionKeyword,
                    SyntaxKind::ClassKeyword,
                ],
            )),
        }
    }

    /// `@decorator`+ followed by a (possibly modified) class declaration.
    fn parse_decorated_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        let decorators = self.parse_decorators()?;
        let mut modifiers = ModifierFlags::NONE;
        while matches!(
            self.kind(),
            SyntaxKind::ExportKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::AbstractKeyword
        ) {
            match self.kind() {
                SyntaxKind::ExportKeyword => modifiers |= ModifierFlags::EXPORT,
                SyntaxKind::DefaultKeyword => modifiers |= ModifierFlags::DEFAULT,
                _ => modifiers |= ModifierFlags::ABSTRACT,
            }
            self.bump();
        }
        if !self.at(SyntaxKind::ClassKeyword) {
            return Err(self.unexpected("decorated declaration", &[SyntaxKind::ClassKeyword]));
        }
        let decorators = self.alloc_slice(decorators);
        self.parse_class_declaration(pos, modifiers, decorators)
    }

    pub(crate) fn parse_decorators(&mut self) -> ParseResult<Vec<Decorator<'a>>> {
        let mut decorators = Vec::new();
        while self.at(SyntaxKind::AtToken) {
            let pos = self.start();
            self.bump();
            let expression = self.parse_left_hand_side_expression()?;
            decorators.push(Decorator {
                data: self.node_data(SyntaxKind::Decorator, pos),
                expression: self.alloc(expression),
            });
        }
        Ok(decorators)
    }

    pub(crate) fn parse_block(&mut self, rule: &'static str) -> ParseResult<Block<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, rule)?;
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated(rule, SyntaxKind::OpenBraceToken, open));
            }
            statements.push(self.parse_statement()?);
        }
        self.bump();
        Ok(Block {
            data: self.node_data(SyntaxKind::Block, pos),
            statements: self.alloc_slice(statements),
        })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        let expression = self.parse_expression()?;
        self.parse_semicolon("expression statement")?;
        Ok(Statement::Expression(ExpressionStatement {
            data: self.node_data(SyntaxKind::ExpressionStatement, pos),
            expression: self.alloc(expression),
        }))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        self.expect(SyntaxKind::OpenParenToken, "if statement")?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken, "if statement")?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.eat(SyntaxKind::ElseKeyword).is_some() {
            Some(self.parse_statement_ref()?)
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            data: self.node_data(SyntaxKind::IfStatement, pos),
            expression: self.alloc(expression),
            then_statement: self.alloc(then_statement),
            else_statement,
        }))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        let statement = self.parse_statement()?;
        self.expect(SyntaxKind::WhileKeyword, "do statement")?;
        self.expect(SyntaxKind::OpenParenToken, "do statement")?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken, "do statement")?;
        // The trailing semicolon of do-while is always optional.
        self.eat(SyntaxKind::SemicolonToken);
        Ok(Statement::Do(DoStatement {
            data: self.node_data(SyntaxKind::DoStatement, pos),
            statement: self.alloc(statement),
            expression: self.alloc(expression),
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        self.expect(SyntaxKind::OpenParenToken, "while statement")?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken, "while statement")?;
        let statement = self.parse_statement()?;
        Ok(Statement::While(WhileStatement {
            data: self.node_data(SyntaxKind::WhileStatement, pos),
            expression: self.alloc(expression),
            statement: self.alloc(statement),
        }))
    }

    /// The five-shape `for` family. The head is parsed with `in` suppressed
    /// as a binary operator; the shape commits on the token that follows the
    /// initializer (`;`, `in`, or the contextual `of`).
    fn parse_for_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        let await_modifier = self.eat(SyntaxKind::AwaitKeyword);
        self.expect(SyntaxKind::OpenParenToken, "for statement")?;

        let initializer = if self.at(SyntaxKind::SemicolonToken) {
            None
        } else if matches!(
            self.kind(),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword
        ) {
            Some(ForInitializer::VariableDeclarationList(
                self.parse_variable_declaration_list(true)?,
            ))
        } else {
            let saved_no_in = self.no_in;
            self.no_in = true;
            let expression = self.parse_expression();
            self.no_in = saved_no_in;
            Some(ForInitializer::Expression(self.alloc(expression?)))
        };

        if self.at(SyntaxKind::InKeyword) {
            let initializer = initializer
                .ok_or_else(|| self.unexpected("for-in statement", &[SyntaxKind::Identifier]))?;
            self.bump();
            let expression = self.parse_expression()?;
            self.expect(SyntaxKind::CloseParenToken, "for-in statement")?;
            let statement = self.parse_statement()?;
            return Ok(Statement::ForIn(ForInStatement {
                data: self.node_data(SyntaxKind::ForInStatement, pos),
                initializer,
                expression: self.alloc(expression),
                statement: self.alloc(statement),
            }));
        }

        if predicates::at_contextual_keyword(&self.stream, "of") {
            let initializer = initializer
                .ok_or_else(|| self.unexpected("for-of statement", &[SyntaxKind::Identifier]))?;
            self.bump();
            let expression = self.parse_assignment_expression()?;
            self.expect(SyntaxKind::CloseParenToken, "for-of statement")?;
            let statement = self.parse_statement()?;
            return Ok(Statement::ForOf(ForOfStatement {
                data: self.node_data(SyntaxKind::ForOfStatement, pos),
                await_modifier,
                initializer,
                expression: self.alloc(expression),
                statement: self.alloc(statement),
            }));
        }

        self.expect(SyntaxKind::SemicolonToken, "for statement")?;
        let condition = if self.at(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression_ref()?)
        };
        self.expect(SyntaxKind::SemicolonToken, "for statement")?;
        let incrementor = if self.at(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression_ref()?)
        };
        self.expect(SyntaxKind::CloseParenToken, "for statement")?;
        let statement = self.parse_statement()?;
        Ok(Statement::For(ForStatement {
            data: self.node_data(SyntaxKind::ForStatement, pos),
            initializer,
            condition,
            incrementor,
            statement: self.alloc(statement),
        }))
    }

    fn parse_continue_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        let label = if Self::is_identifier_kind(self.kind())
            && predicates::not_line_terminator(&self.stream)
        {
            Some(self.parse_identifier("continue statement")?)
        } else {
            None
        };
        self.parse_semicolon("continue statement")?;
        Ok(Statement::Continue(ContinueStatement {
            data: self.node_data(SyntaxKind::ContinueStatement, pos),
            label,
        }))
    }

    fn parse_break_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        let label = if Self::is_identifier_kind(self.kind())
            && predicates::not_line_terminator(&self.stream)
        {
            Some(self.parse_identifier("break statement")?)
        } else {
            None
        };
        self.parse_semicolon("break statement")?;
        Ok(Statement::Break(BreakStatement {
            data: self.node_data(SyntaxKind::BreakStatement, pos),
            label,
        }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        let expression = if predicates::not_line_terminator(&self.stream)
            && !self.at(SyntaxKind::SemicolonToken)
            && !predicates::close_brace_ahead(&self.stream)
            && !self.stream.is_eof()
        {
            Some(self.parse_expression_ref()?)
        } else {
            None
        };
        self.parse_semicolon("return statement")?;
        Ok(Statement::Return(ReturnStatement {
            data: self.node_data(SyntaxKind::ReturnStatement, pos),
            expression,
        }))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        self.expect(SyntaxKind::OpenParenToken, "with statement")?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken, "with statement")?;
        let statement = self.parse_statement()?;
        Ok(Statement::With(WithStatement {
            data: self.node_data(SyntaxKind::WithStatement, pos),
            expression: self.alloc(expression),
            statement: self.alloc(statement),
        }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        self.expect(SyntaxKind::OpenParenToken, "switch statement")?;
        let expression = self.parse_expression()?;
        self.expect(SyntaxKind::CloseParenToken, "switch statement")?;

        let case_pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, "switch statement")?;
        let mut clauses = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("switch statement", SyntaxKind::OpenBraceToken, open));
            }
            clauses.push(self.parse_case_or_default_clause()?);
        }
        self.bump();
        let case_block = CaseBlock {
            data: self.node_data(SyntaxKind::CaseBlock, case_pos),
            clauses: self.alloc_slice(clauses),
        };
        Ok(Statement::Switch(SwitchStatement {
            data: self.node_data(SyntaxKind::SwitchStatement, pos),
            expression: self.alloc(expression),
            case_block,
        }))
    }

    fn parse_case_or_default_clause(&mut self) -> ParseResult<CaseOrDefaultClause<'a>> {
        let pos = self.start();
        match self.kind() {
            SyntaxKind::CaseKeyword => {
                self.bump();
                let expression = self.parse_expression()?;
                self.expect(SyntaxKind::ColonToken, "case clause")?;
                let statements = self.parse_clause_statements()?;
                Ok(CaseOrDefaultClause::Case(CaseClause {
                    data: self.node_data(SyntaxKind::CaseClause, pos),
                    expression: self.alloc(expression),
                    statements,
                }))
            }
            SyntaxKind::DefaultKeyword => {
                self.bump();
                self.expect(SyntaxKind::ColonToken, "default clause")?;
                let statements = self.parse_clause_statements()?;
                Ok(CaseOrDefaultClause::Default(DefaultClause {
                    data: self.node_data(SyntaxKind::DefaultClause, pos),
                    statements,
                }))
            }
            _ => Err(self.unexpected(
                "case block",
                &[SyntaxKind::CaseKeyword, SyntaxKind::DefaultKeyword],
            )),
        }
    }

    fn parse_clause_statements(&mut self) -> ParseResult<NodeList<'a, Statement<'a>>> {
        let mut statements = Vec::new();
        while !matches!(
            self.kind(),
            SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            statements.push(self.parse_statement()?);
        }
        Ok(self.alloc_slice(statements))
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        let label = self.parse_identifier("labeled statement")?;
        self.expect(SyntaxKind::ColonToken, "labeled statement")?;
        let statement = self.parse_statement()?;
        Ok(Statement::Labeled(LabeledStatement {
            data: self.node_data(SyntaxKind::LabeledStatement, pos),
            label,
            statement: self.alloc(statement),
        }))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        // Restricted production: `throw` and its operand must share a line.
        if predicates::line_terminator_ahead(&self.stream) {
            return Err(self.unexpected("throw statement", &[SyntaxKind::Identifier]));
        }
        let expression = self.parse_expression()?;
        self.parse_semicolon("throw statement")?;
        Ok(Statement::Throw(ThrowStatement {
            data: self.node_data(SyntaxKind::ThrowStatement, pos),
            expression: self.alloc(expression),
        }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.bump();
        let try_block = self.parse_block("try statement")?;
        let catch_clause = if self.at(SyntaxKind::CatchKeyword) {
            let catch_pos = self.start();
            self.bump();
            let variable = if self.eat(SyntaxKind::OpenParenToken).is_some() {
                let decl_pos = self.start();
                let name = self.parse_binding_name("catch clause")?;
                let type_annotation = if self.eat(SyntaxKind::ColonToken).is_some() {
                    Some(self.parse_type_and_alloc()?)
                } else {
                    None
                };
                self.expect(SyntaxKind::CloseParenToken, "catch clause")?;
                Some(VariableDeclaration {
                    data: self.node_data(SyntaxKind::VariableDeclaration, decl_pos),
                    name,
                    type_annotation,
                    initializer: None,
                })
            } else {
                None
            };
            let block = self.parse_block("catch clause")?;
            Some(CatchClause {
                data: self.node_data(SyntaxKind::CatchClause, catch_pos),
                variable,
                block,
            })
        } else {
            None
        };
        let finally_block = if self.eat(SyntaxKind::FinallyKeyword).is_some() {
            Some(self.parse_block("finally clause")?)
        } else {
            None
        };
        if catch_clause.is_none() && finally_block.is_none() {
            return Err(self.unexpected(
                "try statement",
                &[SyntaxKind::CatchKeyword, SyntaxKind::FinallyKeyword],
            ));
        }
        Ok(Statement::Try(TryStatement {
            data: self.node_data(SyntaxKind::TryStatement, pos),
            try_block,
            catch_clause,
            finally_block,
        }))
    }

    // ========================================================================
    // Variable declarations and binding patterns
    // ========================================================================

    fn parse_variable_statement(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<Statement<'a>> {
        let declaration_list = self.parse_variable_declaration_list(false)?;
        self.parse_semicolon("variable statement")?;
        let mut data = self.node_data(SyntaxKind::VariableStatement, pos);
        data.modifiers = modifiers;
        data.flags = declaration_list.data.flags;
        Ok(Statement::Variable(VariableStatement {
            data,
            declaration_list,
        }))
    }

    fn parse_variable_declaration_list(
        &mut self,
        in_for_head: bool,
    ) -> ParseResult<VariableDeclarationList<'a>> {
        let pos = self.start();
        let flags = match self.kind() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.bump();

        let saved_no_in = self.no_in;
        if in_for_head {
            self.no_in = true;
        }
        let mut declarations = Vec::new();
        let result = loop {
            match self.parse_variable_declaration() {
                Ok(declaration) => declarations.push(declaration),
                Err(error) => break Err(error),
            }
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break Ok(());
            }
        };
        self.no_in = saved_no_in;
        result?;

        let mut data = self.node_data(SyntaxKind::VariableDeclarationList, pos);
        data.flags = flags;
        Ok(VariableDeclarationList {
            data,
            declarations: self.alloc_slice(declarations),
        })
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration<'a>> {
        let pos = self.start();
        let name = self.parse_binding_name("variable declaration")?;
        let type_annotation = if self.eat(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc()?)
        } else {
            None
        };
        let initializer = if self.eat(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_ref()?)
        } else {
            None
        };
        Ok(VariableDeclaration {
            data: self.node_data(SyntaxKind::VariableDeclaration, pos),
            name,
            type_annotation,
            initializer,
        })
    }

    pub(crate) fn parse_binding_name(&mut self, rule: &'static str) -> ParseResult<BindingName<'a>> {
        match self.kind() {
            SyntaxKind::OpenBraceToken => {
                let pattern = self.parse_object_binding_pattern()?;
                Ok(BindingName::ObjectPattern(self.alloc(pattern)))
            }
            SyntaxKind::OpenBracketToken => {
                let pattern = self.parse_array_binding_pattern()?;
                Ok(BindingName::ArrayPattern(self.alloc(pattern)))
            }
            _ => Ok(BindingName::Identifier(self.parse_identifier(rule)?)),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<ObjectBindingPattern<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, "object binding pattern")?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated(
                    "object binding pattern",
                    SyntaxKind::OpenBraceToken,
                    open,
                ));
            }
            elements.push(self.parse_binding_element(true)?);
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBraceToken, "object binding pattern", open)?;
        Ok(ObjectBindingPattern {
            data: self.node_data(SyntaxKind::ObjectBindingPattern, pos),
            elements: self.alloc_slice(elements),
        })
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<ArrayBindingPattern<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBracketToken, "array binding pattern")?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBracketToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated(
                    "array binding pattern",
                    SyntaxKind::OpenBracketToken,
                    open,
                ));
            }
            if self.at(SyntaxKind::CommaToken) {
                let range = self.token_range();
                elements.push(ArrayBindingElement::Omitted(
                    self.node_data_at(SyntaxKind::OmittedExpression, TextRange::empty(range.pos)),
                ));
            } else {
                elements.push(ArrayBindingElement::Element(self.parse_binding_element(false)?));
            }
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBracketToken, "array binding pattern", open)?;
        Ok(ArrayBindingPattern {
            data: self.node_data(SyntaxKind::ArrayBindingPattern, pos),
            elements: self.alloc_slice(elements),
        })
    }

    /// One element of a binding pattern. In object position, a leading `[`
    /// is a computed key and literal keys rename (`{ "a": x }`); in array
    /// position it is a nested pattern.
    fn parse_binding_element(&mut self, in_object: bool) -> ParseResult<BindingElement<'a>> {
        let pos = self.start();
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken);

        let (property_name, name) = if in_object {
            if Self::is_identifier_kind(self.kind()) && self.peek_kind(1) != SyntaxKind::ColonToken
            {
                // Shorthand: `{ x }`, `{ x = init }`, `{ ...rest }`.
                (
                    None,
                    BindingName::Identifier(self.parse_identifier("binding element")?),
                )
            } else {
                let property = self.parse_property_name()?;
                if self.eat(SyntaxKind::ColonToken).is_some() {
                    (Some(property), self.parse_binding_name("binding element")?)
                } else if let PropertyName::Identifier(id) = property {
                    (None, BindingName::Identifier(id))
                } else {
                    return Err(self.unexpected("binding element", &[SyntaxKind::ColonToken]));
                }
            }
        } else {
            (None, self.parse_binding_name("binding element")?)
        };

        let initializer = if self.eat(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_ref()?)
        } else {
            None
        };
        Ok(BindingElement {
            data: self.node_data(SyntaxKind::BindingElement, pos),
            dot_dot_dot,
            property_name,
            name,
            initializer,
        })
    }

    // ========================================================================
    // Property names
    // ========================================================================

    pub(crate) fn parse_property_name(&mut self) -> ParseResult<PropertyName<'a>> {
        match self.kind() {
            SyntaxKind::StringLiteral => {
                Ok(PropertyName::StringLiteral(self.parse_string_literal("property name")?))
            }
            SyntaxKind::NumericLiteral => {
                let token = self.bump();
                Ok(PropertyName::NumericLiteral(NumericLiteral {
                    data: self.node_data_at(SyntaxKind::NumericLiteral, token.range),
                    text: self.intern_token(&token),
                    literal_flags: token.flags & TokenFlags::NUMERIC_LITERAL_FLAGS,
                }))
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.start();
                self.bump();
                let expression = self.parse_assignment_expression()?;
                self.expect(SyntaxKind::CloseBracketToken, "computed property name")?;
                let expression = self.alloc(expression);
                let name = ComputedPropertyName {
                    data: self.node_data(SyntaxKind::ComputedPropertyName, pos),
                    expression,
                };
                Ok(PropertyName::Computed(self.alloc(name)))
            }
            SyntaxKind::PrivateIdentifier => {
                let token = self.bump();
                Ok(PropertyName::PrivateIdentifier(self.make_identifier(&token)))
            }
            _ => Ok(PropertyName::Identifier(
                self.parse_identifier_name("property name")?,
            )),
        }
    }

    pub(crate) fn is_property_name_start(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::Identifier
            || kind.is_keyword()
            || matches!(
                kind,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
    }

    // ========================================================================
    // Functions, parameters, signatures
    // ========================================================================

    fn parse_function_declaration(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<Statement<'a>> {
        self.expect(SyntaxKind::FunctionKeyword, "function declaration")?;
        let asterisk = self.eat(SyntaxKind::AsteriskToken);
        let name = if Self::is_identifier_kind(self.kind()) {
            Some(self.parse_identifier("function declaration")?)
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_return_type_annotation()?;
        let body = if self.at(SyntaxKind::OpenBraceToken) {
            Some(self.parse_block("function body")?)
        } else {
            // Overload signature or ambient declaration.
            self.parse_semicolon("function declaration")?;
            None
        };
        let mut data = self.node_data(SyntaxKind::FunctionDeclaration, pos);
        data.modifiers = modifiers;
        Ok(Statement::Function(FunctionDeclaration {
            data,
            name,
            asterisk,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    pub(crate) fn parse_parameter_list(
        &mut self,
    ) -> ParseResult<NodeList<'a, ParameterDeclaration<'a>>> {
        let open = self.expect(SyntaxKind::OpenParenToken, "parameter list")?;
        let mut parameters = Vec::new();
        while !self.at(SyntaxKind::CloseParenToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("parameter list", SyntaxKind::OpenParenToken, open));
            }
            parameters.push(self.parse_parameter()?);
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenParenToken, "parameter list", open)?;
        Ok(self.alloc_slice(parameters))
    }

    pub(crate) fn parse_parameter(&mut self) -> ParseResult<ParameterDeclaration<'a>> {
        let pos = self.start();
        // Constructor parameter properties: `constructor(private x: T)`.
        let mut modifiers = ModifierFlags::NONE;
        loop {
            let flag = match self.kind() {
                SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
                SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
                SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
                SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
                SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
                _ => break,
            };
            if !utilities::is_start_of_binding_name(self.peek_kind(1)) {
                break;
            }
            modifiers |= flag;
            self.bump();
        }
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name("parameter")?;
        let question = self.eat(SyntaxKind::QuestionToken);
        let type_annotation = if self.eat(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc()?)
        } else {
            None
        };
        let initializer = if self.eat(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_ref()?)
        } else {
            None
        };
        let mut data = self.node_data(SyntaxKind::Parameter, pos);
        data.modifiers = modifiers;
        Ok(ParameterDeclaration {
            data,
            dot_dot_dot,
            name,
            question,
            type_annotation,
            initializer,
        })
    }

    /// `: T` after a signature, where `T` may be a type predicate.
    pub(crate) fn parse_return_type_annotation(
        &mut self,
    ) -> ParseResult<Option<&'a TypeNode<'a>>> {
        if self.eat(SyntaxKind::ColonToken).is_none() {
            return Ok(None);
        }
        Ok(Some(self.parse_type_or_predicate_and_alloc()?))
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class_declaration(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
        decorators: NodeList<'a, Decorator<'a>>,
    ) -> ParseResult<Statement<'a>> {
        self.expect(SyntaxKind::ClassKeyword, "class declaration")?;
        let name = if Self::is_identifier_kind(self.kind()) {
            Some(self.parse_identifier("class declaration")?)
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters()?;
        let heritage_clauses = self.parse_heritage_clauses()?;
        let members = self.parse_class_members()?;
        let mut data = self.node_data(SyntaxKind::ClassDeclaration, pos);
        data.modifiers = modifiers;
        Ok(Statement::Class(ClassDeclaration {
            data,
            decorators,
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    pub(crate) fn parse_heritage_clauses(
        &mut self,
    ) -> ParseResult<Option<NodeList<'a, HeritageClause<'a>>>> {
        if !matches!(
            self.kind(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            return Ok(None);
        }
        let mut clauses = Vec::new();
        while matches!(
            self.kind(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let pos = self.start();
            let token = self.bump().kind;
            let mut types = Vec::new();
            loop {
                let type_pos = self.start();
                let expression = self.parse_left_hand_side_expression()?;
                let type_arguments = if self.at(SyntaxKind::LessThanToken) {
                    Some(self.parse_type_arguments("heritage clause")?)
                } else {
                    None
                };
                types.push(ExpressionWithTypeArgumentsNode {
                    data: self.node_data(SyntaxKind::ExpressionWithTypeArguments, type_pos),
                    expression: self.alloc(expression),
                    type_arguments,
                });
                if self.eat(SyntaxKind::CommaToken).is_none() {
                    break;
                }
            }
            clauses.push(HeritageClause {
                data: self.node_data(SyntaxKind::HeritageClause, pos),
                token,
                types: self.alloc_slice(types),
            });
        }
        Ok(Some(self.alloc_slice(clauses)))
    }

    pub(crate) fn parse_class_members(&mut self) -> ParseResult<NodeList<'a, ClassElement<'a>>> {
        let open = self.expect(SyntaxKind::OpenBraceToken, "class body")?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("class body", SyntaxKind::OpenBraceToken, open));
            }
            members.push(self.parse_class_member()?);
        }
        self.bump();
        Ok(self.alloc_slice(members))
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassElement<'a>> {
        if self.at(SyntaxKind::SemicolonToken) {
            let token = self.bump();
            return Ok(ClassElement::Semicolon(
                self.node_data_at(SyntaxKind::SemicolonClassElement, token.range),
            ));
        }

        let pos = self.start();
        let decorators = self.parse_decorators()?;
        let decorators = self.alloc_slice(decorators);
        let modifiers = self.parse_member_modifiers();

        // `static { … }` initialization block.
        if modifiers.contains(ModifierFlags::STATIC) && self.at(SyntaxKind::OpenBraceToken) {
            let body = self.parse_block("static block")?;
            let mut data = self.node_data(SyntaxKind::ClassStaticBlock, pos);
            data.modifiers = modifiers;
            return Ok(ClassElement::StaticBlock(ClassStaticBlockDeclaration {
                data,
                body,
            }));
        }

        // Constructor.
        if self.at(SyntaxKind::ConstructorKeyword)
            && matches!(
                self.peek_kind(1),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.bump();
            let parameters = self.parse_parameter_list()?;
            let body = if self.at(SyntaxKind::OpenBraceToken) {
                Some(self.parse_block("constructor body")?)
            } else {
                self.parse_semicolon("constructor")?;
                None
            };
            let mut data = self.node_data(SyntaxKind::Constructor, pos);
            data.modifiers = modifiers;
            return Ok(ClassElement::Constructor(ConstructorDeclaration {
                data,
                parameters,
                body,
            }));
        }

        // Index member: `[key: string]: T`.
        if self.at(SyntaxKind::OpenBracketToken) && self.is_index_signature_ahead() {
            let signature = self.parse_index_signature(pos, modifiers)?;
            self.parse_semicolon("index signature")?;
            return Ok(ClassElement::IndexSignature(signature));
        }

        // Accessors.
        if self.at(SyntaxKind::GetKeyword) && self.is_property_name_start(self.peek_kind(1)) {
            self.bump();
            let name = self.parse_property_name()?;
            let parameters = self.parse_parameter_list()?;
            let return_type = self.parse_return_type_annotation()?;
            let body = self.parse_optional_member_body()?;
            let mut data = self.node_data(SyntaxKind::GetAccessor, pos);
            data.modifiers = modifiers;
            return Ok(ClassElement::GetAccessor(GetAccessorDeclaration {
                data,
                decorators,
                name,
                parameters,
                return_type,
                body,
            }));
        }
        if self.at(SyntaxKind::SetKeyword) && self.is_property_name_start(self.peek_kind(1)) {
            self.bump();
            let name = self.parse_property_name()?;
            let parameters = self.parse_parameter_list()?;
            let body = self.parse_optional_member_body()?;
            let mut data = self.node_data(SyntaxKind::SetAccessor, pos);
            data.modifiers = modifiers;
            return Ok(ClassElement::SetAccessor(SetAccessorDeclaration {
                data,
                decorators,
                name,
                parameters,
                body,
            }));
        }

        let asterisk = self.eat(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name()?;
        let question = self.eat(SyntaxKind::QuestionToken);

        if matches!(
            self.kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let type_parameters = self.parse_optional_type_parameters()?;
            let parameters = self.parse_parameter_list()?;
            let return_type = self.parse_return_type_annotation()?;
            let body = self.parse_optional_member_body()?;
            let mut data = self.node_data(SyntaxKind::MethodDeclaration, pos);
            data.modifiers = modifiers;
            return Ok(ClassElement::Method(MethodDeclaration {
                data,
                decorators,
                name,
                question,
                asterisk,
                type_parameters,
                parameters,
                return_type,
                body,
            }));
        }

        let type_annotation = if self.eat(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc()?)
        } else {
            None
        };
        let initializer = if self.eat(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_assignment_expression_ref()?)
        } else {
            None
        };
        self.parse_semicolon("property declaration")?;
        let mut data = self.node_data(SyntaxKind::PropertyDeclaration, pos);
        data.modifiers = modifiers;
        Ok(ClassElement::Property(PropertyDeclarationNode {
            data,
            decorators,
            name,
            question,
            type_annotation,
            initializer,
        }))
    }

    /// Consume member modifiers. A modifier keyword immediately followed by
    /// a token that can only continue a member (`(`, `=`, `:`, `;`, `?`,
    /// `<`, `}`) is actually the member's name and is left in place.
    fn parse_member_modifiers(&mut self) -> ModifierFlags {
        let mut modifiers = ModifierFlags::NONE;
        loop {
            if !utilities::is_modifier_kind(self.kind()) {
                break;
            }
            if matches!(
                self.peek_kind(1),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::CloseBraceToken
            ) {
                break;
            }
            let flag = match self.kind() {
                SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
                SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
                SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
                SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
                SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
                SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
                SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
                SyntaxKind::DeclareKeyword => ModifierFlags::DECLARE,
                SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
                _ => break,
            };
            modifiers |= flag;
            self.bump();
        }
        modifiers
    }

    fn parse_optional_member_body(&mut self) -> ParseResult<Option<Block<'a>>> {
        if self.at(SyntaxKind::OpenBraceToken) {
            Ok(Some(self.parse_block("method body")?))
        } else {
            self.parse_semicolon("class member")?;
            Ok(None)
        }
    }

    pub(crate) fn is_index_signature_ahead(&mut self) -> bool {
        self.look_ahead(|p| {
            p.bump();
            if !Self::is_identifier_kind(p.kind()) {
                return false;
            }
            p.bump();
            p.at(SyntaxKind::ColonToken)
        })
    }

    // ========================================================================
    // Interfaces, type aliases, enums, namespaces
    // ========================================================================

    fn parse_interface_declaration(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<Statement<'a>> {
        self.expect(SyntaxKind::InterfaceKeyword, "interface declaration")?;
        let name = self.parse_identifier("interface declaration")?;
        let type_parameters = self.parse_optional_type_parameters()?;
        let heritage_clauses = self.parse_heritage_clauses()?;
        let members = self.parse_type_member_block("interface body")?;
        let mut data = self.node_data(SyntaxKind::InterfaceDeclaration, pos);
        data.modifiers = modifiers;
        Ok(Statement::Interface(InterfaceDeclaration {
            data,
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    fn parse_type_alias_declaration(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<Statement<'a>> {
        self.expect(SyntaxKind::TypeKeyword, "type alias")?;
        let name = self.parse_identifier("type alias")?;
        let type_parameters = self.parse_optional_type_parameters()?;
        self.expect(SyntaxKind::EqualsToken, "type alias")?;
        let type_node = self.parse_type_and_alloc()?;
        self.parse_semicolon("type alias")?;
        let mut data = self.node_data(SyntaxKind::TypeAliasDeclaration, pos);
        data.modifiers = modifiers;
        Ok(Statement::TypeAlias(TypeAliasDeclaration {
            data,
            name,
            type_parameters,
            type_node,
        }))
    }

    fn parse_enum_declaration(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
        is_const: bool,
    ) -> ParseResult<Statement<'a>> {
        self.expect(SyntaxKind::EnumKeyword, "enum declaration")?;
        let name = self.parse_identifier("enum declaration")?;
        let open = self.expect(SyntaxKind::OpenBraceToken, "enum declaration")?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("enum declaration", SyntaxKind::OpenBraceToken, open));
            }
            let member_pos = self.start();
            let member_name = self.parse_property_name()?;
            let initializer = if self.eat(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_assignment_expression_ref()?)
            } else {
                None
            };
            members.push(EnumMemberNode {
                data: self.node_data(SyntaxKind::EnumMember, member_pos),
                name: member_name,
                initializer,
            });
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBraceToken, "enum declaration", open)?;
        let mut data = self.node_data(SyntaxKind::EnumDeclaration, pos);
        data.modifiers = modifiers;
        Ok(Statement::Enum(EnumDeclaration {
            data,
            is_const,
            name,
            members: self.alloc_slice(members),
        }))
    }

    fn parse_module_declaration(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<Statement<'a>> {
        // `declare global { … }` has no keyword before its name; `global`
        // itself names the augmentation.
        if !self.at(SyntaxKind::GlobalKeyword) {
            self.bump(); // namespace / module
        }
        let declaration = self.parse_module_name_and_body(pos, modifiers)?;
        Ok(Statement::Module(declaration))
    }

    fn parse_module_name_and_body(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<ModuleDeclaration<'a>> {
        if self.at(SyntaxKind::StringLiteral) {
            // Ambient external module: `declare module "fs" { … }`.
            let name = ModuleName::StringLiteral(self.parse_string_literal("module declaration")?);
            let body = if self.at(SyntaxKind::OpenBraceToken) {
                Some(ModuleBody::Block(self.parse_module_block()?))
            } else {
                self.parse_semicolon("module declaration")?;
                None
            };
            let mut data = self.node_data(SyntaxKind::ModuleDeclaration, pos);
            data.modifiers = modifiers;
            return Ok(ModuleDeclaration { data, name, body });
        }

        let name = ModuleName::Identifier(self.parse_identifier("module declaration")?);
        let body = if self.eat(SyntaxKind::DotToken).is_some() {
            // `namespace a.b.c { … }` nests right-to-left.
            let inner_pos = self.start();
            let inner = self.parse_module_name_and_body(inner_pos, ModifierFlags::NONE)?;
            Some(ModuleBody::Nested(self.alloc(inner)))
        } else if self.at(SyntaxKind::OpenBraceToken) {
            Some(ModuleBody::Block(self.parse_module_block()?))
        } else {
            self.parse_semicolon("module declaration")?;
            None
        };
        let mut data = self.node_data(SyntaxKind::ModuleDeclaration, pos);
        data.modifiers = modifiers;
        Ok(ModuleDeclaration { data, name, body })
    }

    fn parse_module_block(&mut self) -> ParseResult<ModuleBlock<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, "module block")?;
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("module block", SyntaxKind::OpenBraceToken, open));
            }
            statements.push(self.parse_statement()?);
        }
        self.bump();
        Ok(ModuleBlock {
            data: self.node_data(SyntaxKind::ModuleBlock, pos),
            statements: self.alloc_slice(statements),
        })
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn parse_import_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.expect(SyntaxKind::ImportKeyword, "import declaration")?;

        // Side-effect import: `import "module";`
        if self.at(SyntaxKind::StringLiteral) {
            let module_specifier = self.parse_string_literal("import declaration")?;
            self.parse_semicolon("import declaration")?;
            return Ok(Statement::Import(ImportDeclaration {
                data: self.node_data(SyntaxKind::ImportDeclaration, pos),
                import_clause: None,
                module_specifier,
            }));
        }

        // `import name = require("m")` / `import name = a.b.c`
        if Self::is_identifier_kind(self.kind()) && self.peek_kind(1) == SyntaxKind::EqualsToken {
            let name = self.parse_identifier("import declaration")?;
            self.bump(); // =
            let module_reference = if self.at(SyntaxKind::RequireKeyword)
                && self.peek_kind(1) == SyntaxKind::OpenParenToken
            {
                let ref_pos = self.start();
                self.bump();
                self.expect(SyntaxKind::OpenParenToken, "import declaration")?;
                let expression = self.parse_string_literal("import declaration")?;
                self.expect(SyntaxKind::CloseParenToken, "import declaration")?;
                ModuleReference::External(ExternalModuleReference {
                    data: self.node_data(SyntaxKind::ExternalModuleReference, ref_pos),
                    expression,
                })
            } else {
                ModuleReference::EntityName(self.parse_entity_name("import declaration")?)
            };
            self.parse_semicolon("import declaration")?;
            return Ok(Statement::ImportEquals(ImportEqualsDeclaration {
                data: self.node_data(SyntaxKind::ImportEqualsDeclaration, pos),
                name,
                module_reference,
            }));
        }

        // `import type …` — but `import type from "m"` binds `type` itself.
        let is_type_only = self.at(SyntaxKind::TypeKeyword)
            && (matches!(
                self.peek_kind(1),
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
            ) || (Self::is_identifier_kind(self.peek_kind(1))
                && self.peek_kind(1) != SyntaxKind::FromKeyword));
        if is_type_only {
            self.bump();
        }

        let clause_pos = self.start();
        let (name, named_bindings) = self.parse_import_clause_bindings()?;
        let import_clause = ImportClause {
            data: self.node_data(SyntaxKind::ImportClause, clause_pos),
            is_type_only,
            name,
            named_bindings,
        };

        self.expect(SyntaxKind::FromKeyword, "import declaration")?;
        let module_specifier = self.parse_string_literal("import declaration")?;
        self.parse_semicolon("import declaration")?;
        Ok(Statement::Import(ImportDeclaration {
            data: self.node_data(SyntaxKind::ImportDeclaration, pos),
            import_clause: Some(import_clause),
            module_specifier,
        }))
    }

    fn parse_import_clause_bindings(
        &mut self,
    ) -> ParseResult<(Option<Identifier>, Option<NamedImportBindings<'a>>)> {
        if self.at(SyntaxKind::AsteriskToken) {
            return Ok((None, Some(self.parse_namespace_import()?)));
        }
        if self.at(SyntaxKind::OpenBraceToken) {
            return Ok((None, Some(NamedImportBindings::Named(self.parse_named_imports()?))));
        }
        let default_name = self.parse_identifier("import clause")?;
        if self.eat(SyntaxKind::CommaToken).is_none() {
            return Ok((Some(default_name), None));
        }
        if self.at(SyntaxKind::AsteriskToken) {
            Ok((Some(default_name), Some(self.parse_namespace_import()?)))
        } else {
            Ok((
                Some(default_name),
                Some(NamedImportBindings::Named(self.parse_named_imports()?)),
            ))
        }
    }

    fn parse_namespace_import(&mut self) -> ParseResult<NamedImportBindings<'a>> {
        let pos = self.start();
        self.expect(SyntaxKind::AsteriskToken, "namespace import")?;
        self.expect(SyntaxKind::AsKeyword, "namespace import")?;
        let name = self.parse_identifier("namespace import")?;
        Ok(NamedImportBindings::Namespace(NamespaceImport {
            data: self.node_data(SyntaxKind::NamespaceImport, pos),
            name,
        }))
    }

    fn parse_named_imports(&mut self) -> ParseResult<NamedImports<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, "named imports")?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("named imports", SyntaxKind::OpenBraceToken, open));
            }
            let spec_pos = self.start();
            // Per-specifier type-only: `import { type Foo }`.
            let is_type_only = self.at(SyntaxKind::TypeKeyword)
                && Self::is_identifier_kind(self.peek_kind(1))
                && !matches!(
                    self.peek_kind(1),
                    SyntaxKind::AsKeyword | SyntaxKind::FromKeyword
                );
            if is_type_only {
                self.bump();
            }
            let first = self.parse_identifier_name("import specifier")?;
            let (property_name, name) = if self.eat(SyntaxKind::AsKeyword).is_some() {
                (Some(first), self.parse_identifier("import specifier")?)
            } else {
                (None, first)
            };
            elements.push(ImportSpecifier {
                data: self.node_data(SyntaxKind::ImportSpecifier, spec_pos),
                is_type_only,
                property_name,
                name,
            });
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBraceToken, "named imports", open)?;
        Ok(NamedImports {
            data: self.node_data(SyntaxKind::NamedImports, pos),
            elements: self.alloc_slice(elements),
        })
    }

    // ========================================================================
    // Exports
    // ========================================================================

    fn parse_export_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let pos = self.start();
        self.expect(SyntaxKind::ExportKeyword, "export declaration")?;

        // `export default …`
        if self.at(SyntaxKind::DefaultKeyword) {
            self.bump();
            let modifiers = ModifierFlags::EXPORT | ModifierFlags::DEFAULT;
            match self.kind() {
                SyntaxKind::FunctionKeyword => {
                    return self.parse_function_declaration(pos, modifiers)
                }
                SyntaxKind::AsyncKeyword if self.peek_kind(1) == SyntaxKind::FunctionKeyword => {
                    self.bump();
                    return self.parse_function_declaration(pos, modifiers | ModifierFlags::ASYNC);
                }
                SyntaxKind::ClassKeyword => {
                    return self.parse_class_declaration(pos, modifiers, &[])
                }
                SyntaxKind::AbstractKeyword if self.peek_kind(1) == SyntaxKind::ClassKeyword => {
                    self.bump();
                    return self.parse_class_declaration(
                        pos,
                        modifiers | ModifierFlags::ABSTRACT,
                        &[],
                    );
                }
                _ => {
                    let expression = self.parse_assignment_expression()?;
                    self.parse_semicolon("export assignment")?;
                    let mut data = self.node_data(SyntaxKind::ExportAssignment, pos);
                    data.modifiers = modifiers;
                    return Ok(Statement::ExportAssignment(ExportAssignment {
                        data,
                        is_export_equals: false,
                        expression: self.alloc(expression),
                    }));
                }
            }
        }

        // `export = expr;`
        if self.eat(SyntaxKind::EqualsToken).is_some() {
            let expression = self.parse_assignment_expression()?;
            self.parse_semicolon("export assignment")?;
            return Ok(Statement::ExportAssignment(ExportAssignment {
                data: self.node_data(SyntaxKind::ExportAssignment, pos),
                is_export_equals: true,
                expression: self.alloc(expression),
            }));
        }

        // `export type { … }` / `export type * …`
        let is_type_only = self.at(SyntaxKind::TypeKeyword)
            && matches!(
                self.peek_kind(1),
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
            );
        if is_type_only {
            self.bump();
        }

        // `export * [as ns] from "m";`
        if self.at(SyntaxKind::AsteriskToken) {
            self.bump();
            let export_clause = if self.eat(SyntaxKind::AsKeyword).is_some() {
                let ns_pos = self.start();
                let name = self.parse_identifier("export declaration")?;
                Some(NamedExportBindings::Namespace(NamespaceExport {
                    data: self.node_data(SyntaxKind::NamespaceExport, ns_pos),
                    name,
                }))
            } else {
                None
            };
            self.expect(SyntaxKind::FromKeyword, "export declaration")?;
            let module_specifier = self.parse_string_literal("export declaration")?;
            self.parse_semicolon("export declaration")?;
            return Ok(Statement::Export(ExportDeclaration {
                data: self.node_data(SyntaxKind::ExportDeclaration, pos),
                is_type_only,
                export_clause,
                module_specifier: Some(module_specifier),
            }));
        }

        // `export { … } [from "m"];`
        if self.at(SyntaxKind::OpenBraceToken) {
            let named = self.parse_named_exports()?;
            let module_specifier = if self.eat(SyntaxKind::FromKeyword).is_some() {
                Some(self.parse_string_literal("export declaration")?)
            } else {
                None
            };
            self.parse_semicolon("export declaration")?;
            return Ok(Statement::Export(ExportDeclaration {
                data: self.node_data(SyntaxKind::ExportDeclaration, pos),
                is_type_only,
                export_clause: Some(NamedExportBindings::Named(named)),
                module_specifier,
            }));
        }

        // `export <declaration>`
        self.parse_declaration(pos, ModifierFlags::EXPORT)
    }

    fn parse_named_exports(&mut self) -> ParseResult<NamedExports<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, "named exports")?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("named exports", SyntaxKind::OpenBraceToken, open));
            }
            let spec_pos = self.start();
            let is_type_only = self.at(SyntaxKind::TypeKeyword)
                && Self::is_identifier_kind(self.peek_kind(1))
                && self.peek_kind(1) != SyntaxKind::AsKeyword;
            if is_type_only {
                self.bump();
            }
            let first = self.parse_identifier_name("export specifier")?;
            let (property_name, name) = if self.eat(SyntaxKind::AsKeyword).is_some() {
                (Some(first), self.parse_identifier_name("export specifier")?)
            } else {
                (None, first)
            };
            elements.push(ExportSpecifier {
                data: self.node_data(SyntaxKind::ExportSpecifier, spec_pos),
                is_type_only,
                property_name,
                name,
            });
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBraceToken, "named exports", open)?;
        Ok(NamedExports {
            data: self.node_data(SyntaxKind::NamedExports, pos),
            elements: self.alloc_slice(elements),
        })
    }
}
