//! The expression rule: precedence climbing plus the primary alternatives.
//!
//! One climbing loop covers every binary and postfix level; `as`-casts fold
//! in at relational strength. Arrow functions and generic call arguments
//! share token prefixes with parenthesized expressions and relational
//! chains; both are resolved by trial parsing with first-match-wins
//! ordering (the arrow/type-argument reading is declared first).

use sable_ast::*;
use sable_core::text::TextRange;

use crate::parser::{ParseResult, Parser};
use crate::precedence::{binary_precedence, is_right_associative, OperatorPrecedence};
use crate::predicates;
use crate::utilities;

impl<'a> Parser<'a> {
    /// Comma-sequence expression: `a, b, c` folds left into binary nodes.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.with_depth("expression", |p| {
            let mut expression = p.parse_assignment_expression()?;
            while p.at(SyntaxKind::CommaToken) {
                let operator_span = p.bump().range;
                let right = p.parse_assignment_expression()?;
                expression = p.make_binary(expression, SyntaxKind::CommaToken, operator_span, right);
            }
            Ok(expression)
        })
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.with_depth("assignment expression", |p| {
            p.parse_assignment_expression_inner()
        })
    }

    fn parse_assignment_expression_inner(&mut self) -> ParseResult<Expression<'a>> {
        if self.at(SyntaxKind::YieldKeyword) {
            return self.parse_yield_expression();
        }

        // Arrow-function alternatives are declared before the parenthesized /
        // relational readings and win whenever their trial parse succeeds.
        if let Some(arrow) = self.try_parse_arrow_function()? {
            return Ok(arrow);
        }

        let expression = self.parse_binary_expression(OperatorPrecedence::Lowest.level())?;

        if self.at(SyntaxKind::QuestionToken) {
            let pos = expression.range().pos;
            self.bump();
            let when_true = self.parse_assignment_expression()?;
            self.expect(SyntaxKind::ColonToken, "conditional expression")?;
            let when_false = self.parse_assignment_expression()?;
            let condition = self.alloc(expression);
            let when_true = self.alloc(when_true);
            let when_false = self.alloc(when_false);
            return Ok(Expression::Conditional(ConditionalExpression {
                data: self.node_data(SyntaxKind::ConditionalExpression, pos),
                condition,
                when_true,
                when_false,
            }));
        }

        if self.kind().is_assignment_operator() {
            let operator = self.kind();
            let operator_span = self.bump().range;
            let right = self.parse_assignment_expression()?;
            return Ok(self.make_binary(expression, operator, operator_span, right));
        }

        Ok(expression)
    }

    fn make_binary(
        &mut self,
        left: Expression<'a>,
        operator: SyntaxKind,
        operator_span: TextRange,
        right: Expression<'a>,
    ) -> Expression<'a> {
        let pos = left.range().pos;
        let left = self.alloc(left);
        let right = self.alloc(right);
        Expression::Binary(BinaryExpression {
            data: self.node_data(SyntaxKind::BinaryExpression, pos),
            left,
            operator,
            operator_span,
            right,
        })
    }

    /// The climbing loop. Folds the next operator while its binding level
    /// exceeds `min_level`; right-associative operators recurse at their own
    /// level so equal-strength operators nest to the right.
    fn parse_binary_expression(&mut self, min_level: u8) -> ParseResult<Expression<'a>> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let kind = self.kind();

            // `expr as T` takes a type operand and binds at relational level.
            if kind == SyntaxKind::AsKeyword && predicates::not_line_terminator(&self.stream) {
                if OperatorPrecedence::Relational.level() <= min_level {
                    break;
                }
                let pos = left.range().pos;
                self.bump();
                let type_node = self.parse_type_and_alloc()?;
                let expression = self.alloc(left);
                left = Expression::As(AsExpression {
                    data: self.node_data(SyntaxKind::AsExpression, pos),
                    expression,
                    type_node,
                });
                continue;
            }

            // Inside a `for`-head, `in` terminates the initializer instead.
            if kind == SyntaxKind::InKeyword && self.no_in {
                break;
            }

            let Some(precedence) = binary_precedence(kind) else {
                break;
            };
            let level = precedence.level();
            if level <= min_level {
                break;
            }
            let operator_span = self.bump().range;
            let next_min = if is_right_associative(kind) { level - 1 } else { level };
            let right = self.parse_binary_expression(next_min)?;
            left = self.make_binary(left, kind, operator_span, right);
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        match self.kind() {
            SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken => {
                let operator = self.bump().kind;
                let operand = self.parse_unary_expression()?;
                let operand = self.alloc(operand);
                Ok(Expression::PrefixUnary(PrefixUnaryExpression {
                    data: self.node_data(SyntaxKind::PrefixUnaryExpression, pos),
                    operator,
                    operand,
                }))
            }
            SyntaxKind::TypeOfKeyword => {
                self.bump();
                let expression = self.parse_unary_expression()?;
                let expression = self.alloc(expression);
                Ok(Expression::TypeOf(TypeOfExpression {
                    data: self.node_data(SyntaxKind::TypeOfExpression, pos),
                    expression,
                }))
            }
            SyntaxKind::DeleteKeyword => {
                self.bump();
                let expression = self.parse_unary_expression()?;
                let expression = self.alloc(expression);
                Ok(Expression::Delete(DeleteExpression {
                    data: self.node_data(SyntaxKind::DeleteExpression, pos),
                    expression,
                }))
            }
            SyntaxKind::VoidKeyword => {
                self.bump();
                let expression = self.parse_unary_expression()?;
                let expression = self.alloc(expression);
                Ok(Expression::Void(VoidExpression {
                    data: self.node_data(SyntaxKind::VoidExpression, pos),
                    expression,
                }))
            }
            SyntaxKind::AwaitKeyword => {
                self.bump();
                let expression = self.parse_unary_expression()?;
                let expression = self.alloc(expression);
                Ok(Expression::Await(AwaitExpression {
                    data: self.node_data(SyntaxKind::AwaitExpression, pos),
                    expression,
                }))
            }
            // `<T>expr` cast. Generic arrows were claimed by the arrow trial
            // before unary parsing ever sees the `<`.
            SyntaxKind::LessThanToken => {
                self.bump();
                let type_node = self.parse_type_and_alloc()?;
                self.expect_close_angle("type assertion")?;
                let expression = self.parse_unary_expression()?;
                let expression = self.alloc(expression);
                Ok(Expression::TypeAssertion(TypeAssertionExpression {
                    data: self.node_data(SyntaxKind::TypeAssertionExpression, pos),
                    type_node,
                    expression,
                }))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// Postfix `++`/`--` bind only when no line terminator precedes them; a
    /// break there belongs to the next statement under ASI.
    fn parse_postfix_expression(&mut self) -> ParseResult<Expression<'a>> {
        let expression = self.parse_left_hand_side_expression()?;
        if matches!(
            self.kind(),
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        ) && predicates::not_line_terminator(&self.stream)
        {
            let pos = expression.range().pos;
            let operator = self.bump().kind;
            let operand = self.alloc(expression);
            return Ok(Expression::PostfixUnary(PostfixUnaryExpression {
                data: self.node_data(SyntaxKind::PostfixUnaryExpression, pos),
                operand,
                operator,
            }));
        }
        Ok(expression)
    }

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> ParseResult<Expression<'a>> {
        let expression = match self.kind() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::ImportKeyword => self.parse_import_call_or_meta()?,
            _ => self.parse_primary_expression()?,
        };
        self.parse_call_chain(expression, true)
    }

    /// Member/call chain: `.`, `?.`, `[]`, calls, non-null `!`, tagged
    /// templates, and speculative `<…>(…)` type arguments.
    fn parse_call_chain(
        &mut self,
        mut expression: Expression<'a>,
        allow_call: bool,
    ) -> ParseResult<Expression<'a>> {
        loop {
            let pos = expression.range().pos;
            match self.kind() {
                SyntaxKind::DotToken => {
                    self.bump();
                    let name = self.parse_member_name()?;
                    let target = self.alloc(expression);
                    expression = Expression::PropertyAccess(PropertyAccessExpression {
                        data: self.node_data(SyntaxKind::PropertyAccessExpression, pos),
                        expression: target,
                        question_dot: None,
                        name,
                    });
                }
                SyntaxKind::QuestionDotToken => {
                    let question_dot = Some(self.bump().range);
                    match self.kind() {
                        SyntaxKind::OpenBracketToken => {
                            self.bump();
                            let argument = self.parse_expression()?;
                            self.expect(SyntaxKind::CloseBracketToken, "element access")?;
                            let target = self.alloc(expression);
                            let argument = self.alloc(argument);
                            expression = Expression::ElementAccess(ElementAccessExpression {
                                data: self.node_data(SyntaxKind::ElementAccessExpression, pos),
                                expression: target,
                                question_dot,
                                argument_expression: argument,
                            });
                        }
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_argument_list()?;
                            let target = self.alloc(expression);
                            expression = Expression::Call(CallExpression {
                                data: self.node_data(SyntaxKind::CallExpression, pos),
                                expression: target,
                                question_dot,
                                type_arguments: None,
                                arguments,
                            });
                        }
                        _ => {
                            let name = self.parse_member_name()?;
                            let target = self.alloc(expression);
                            expression = Expression::PropertyAccess(PropertyAccessExpression {
                                data: self.node_data(SyntaxKind::PropertyAccessExpression, pos),
                                expression: target,
                                question_dot,
                                name,
                            });
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.bump();
                    let argument = self.parse_expression()?;
                    self.expect(SyntaxKind::CloseBracketToken, "element access")?;
                    let target = self.alloc(expression);
                    let argument = self.alloc(argument);
                    expression = Expression::ElementAccess(ElementAccessExpression {
                        data: self.node_data(SyntaxKind::ElementAccessExpression, pos),
                        expression: target,
                        question_dot: None,
                        argument_expression: argument,
                    });
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_argument_list()?;
                    let target = self.alloc(expression);
                    expression = Expression::Call(CallExpression {
                        data: self.node_data(SyntaxKind::CallExpression, pos),
                        expression: target,
                        question_dot: None,
                        type_arguments: None,
                        arguments,
                    });
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
                    if allow_call =>
                {
                    let template = self.parse_template_expression()?;
                    let tag = self.alloc(expression);
                    let template = self.alloc(template);
                    expression = Expression::TaggedTemplate(TaggedTemplateExpression {
                        data: self.node_data(SyntaxKind::TaggedTemplateExpression, pos),
                        tag,
                        type_arguments: None,
                        template,
                    });
                }
                SyntaxKind::ExclamationToken if predicates::not_line_terminator(&self.stream) => {
                    self.bump();
                    let target = self.alloc(expression);
                    expression = Expression::NonNull(NonNullExpression {
                        data: self.node_data(SyntaxKind::NonNullExpression, pos),
                        expression: target,
                    });
                }
                // `f<T>(x)` — commit to type arguments only when the list
                // parses and a call or template follows; otherwise the `<`
                // stays a relational operator for the climbing loop.
                SyntaxKind::LessThanToken if allow_call => {
                    let Some(type_arguments) = self.try_parse_type_arguments_in_expression()
                    else {
                        break;
                    };
                    if self.at(SyntaxKind::OpenParenToken) {
                        let arguments = self.parse_argument_list()?;
                        let target = self.alloc(expression);
                        expression = Expression::Call(CallExpression {
                            data: self.node_data(SyntaxKind::CallExpression, pos),
                            expression: target,
                            question_dot: None,
                            type_arguments: Some(type_arguments),
                            arguments,
                        });
                    } else {
                        let template = self.parse_template_expression()?;
                        let tag = self.alloc(expression);
                        let template = self.alloc(template);
                        expression = Expression::TaggedTemplate(TaggedTemplateExpression {
                            data: self.node_data(SyntaxKind::TaggedTemplateExpression, pos),
                            tag,
                            type_arguments: Some(type_arguments),
                            template,
                        });
                    }
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    fn parse_member_name(&mut self) -> ParseResult<MemberName> {
        if self.at(SyntaxKind::PrivateIdentifier) {
            let token = self.bump();
            Ok(MemberName::PrivateIdentifier(self.make_identifier(&token)))
        } else {
            Ok(MemberName::Identifier(
                self.parse_identifier_name("property access")?,
            ))
        }
    }

    /// Speculative `<T, …>` in call position; `None` leaves the cursor
    /// untouched on the `<`.
    fn try_parse_type_arguments_in_expression(
        &mut self,
    ) -> Option<NodeList<'a, TypeNode<'a>>> {
        self.try_parse(|p| {
            p.expect(SyntaxKind::LessThanToken, "type arguments")?;
            let mut arguments = Vec::new();
            loop {
                arguments.push(p.parse_type()?);
                if p.eat(SyntaxKind::CommaToken).is_none() {
                    break;
                }
            }
            p.expect_close_angle("type arguments")?;
            if matches!(
                p.kind(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::TemplateHead
            ) {
                Ok(p.alloc_slice(arguments))
            } else {
                Err(p.ambiguity_failure("type arguments", &[SyntaxKind::OpenParenToken]))
            }
        })
        .ok()
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        self.bump(); // new
        if self.eat(SyntaxKind::DotToken).is_some() {
            let name = self.parse_identifier_name("meta property")?;
            return Ok(Expression::MetaProperty(MetaPropertyExpression {
                data: self.node_data(SyntaxKind::MetaProperty, pos),
                keyword: SyntaxKind::NewKeyword,
                name,
            }));
        }
        let callee = if self.at(SyntaxKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        // Member accesses bind to the constructor name; calls do not.
        let callee = self.parse_call_chain(callee, false)?;
        let type_arguments = if self.at(SyntaxKind::LessThanToken) {
            self.try_parse_type_arguments_in_expression()
        } else {
            None
        };
        let arguments = if self.at(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list()?)
        } else {
            None
        };
        let callee = self.alloc(callee);
        Ok(Expression::New(NewExpression {
            data: self.node_data(SyntaxKind::NewExpression, pos),
            expression: callee,
            type_arguments,
            arguments,
        }))
    }

    fn parse_import_call_or_meta(&mut self) -> ParseResult<Expression<'a>> {
        let token = self.bump(); // import
        if self.eat(SyntaxKind::DotToken).is_some() {
            let pos = token.range.pos;
            let name = self.parse_identifier_name("meta property")?;
            return Ok(Expression::MetaProperty(MetaPropertyExpression {
                data: self.node_data(SyntaxKind::MetaProperty, pos),
                keyword: SyntaxKind::ImportKeyword,
                name,
            }));
        }
        // Dynamic `import(…)`: the call chain picks up the argument list.
        let text = self.intern("import");
        Ok(Expression::Identifier(Identifier {
            data: self.node_data_at(SyntaxKind::Identifier, token.range),
            text,
        }))
    }

    fn parse_argument_list(&mut self) -> ParseResult<NodeList<'a, Expression<'a>>> {
        let open = self.expect(SyntaxKind::OpenParenToken, "argument list")?;
        let mut arguments = Vec::new();
        while !self.at(SyntaxKind::CloseParenToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("argument list", SyntaxKind::OpenParenToken, open));
            }
            if self.at(SyntaxKind::DotDotDotToken) {
                let pos = self.start();
                self.bump();
                let inner = self.parse_assignment_expression()?;
                let inner = self.alloc(inner);
                arguments.push(Expression::Spread(SpreadElement {
                    data: self.node_data(SyntaxKind::SpreadElement, pos),
                    expression: inner,
                }));
            } else {
                arguments.push(self.parse_assignment_expression()?);
            }
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenParenToken, "argument list", open)?;
        Ok(self.alloc_slice(arguments))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<Expression<'a>> {
        match self.kind() {
            SyntaxKind::NumericLiteral => {
                let token = self.bump();
                let text = self.intern_token_text(&token);
                Ok(Expression::NumericLiteral(NumericLiteral {
                    data: self.node_data_at(SyntaxKind::NumericLiteral, token.range),
                    text,
                    literal_flags: token.flags & TokenFlags::NUMERIC_LITERAL_FLAGS,
                }))
            }
            SyntaxKind::BigIntLiteral => {
                let token = self.bump();
                let text = self.intern_token_text(&token);
                Ok(Expression::BigIntLiteral(BigIntLiteral {
                    data: self.node_data_at(SyntaxKind::BigIntLiteral, token.range),
                    text,
                }))
            }
            SyntaxKind::StringLiteral => Ok(Expression::StringLiteral(
                self.parse_string_literal("expression")?,
            )),
            SyntaxKind::RegularExpressionLiteral => {
                let token = self.bump();
                let text = self.intern_token_text(&token);
                Ok(Expression::RegularExpressionLiteral(
                    RegularExpressionLiteral {
                        data: self
                            .node_data_at(SyntaxKind::RegularExpressionLiteral, token.range),
                        text,
                    },
                ))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_expression()
            }
            SyntaxKind::TrueKeyword => {
                let token = self.bump();
                Ok(Expression::True(
                    self.node_data_at(SyntaxKind::TrueKeyword, token.range),
                ))
            }
            SyntaxKind::FalseKeyword => {
                let token = self.bump();
                Ok(Expression::False(
                    self.node_data_at(SyntaxKind::FalseKeyword, token.range),
                ))
            }
            SyntaxKind::NullKeyword => {
                let token = self.bump();
                Ok(Expression::Null(
                    self.node_data_at(SyntaxKind::NullKeyword, token.range),
                ))
            }
            SyntaxKind::ThisKeyword => {
                let token = self.bump();
                Ok(Expression::This(
                    self.node_data_at(SyntaxKind::ThisKeyword, token.range),
                ))
            }
            SyntaxKind::SuperKeyword => {
                let token = self.bump();
                Ok(Expression::Super(
                    self.node_data_at(SyntaxKind::SuperKeyword, token.range),
                ))
            }
            SyntaxKind::OpenParenToken => {
                let pos = self.start();
                self.bump();
                let inner = self.parse_expression()?;
                self.expect(SyntaxKind::CloseParenToken, "parenthesized expression")?;
                let inner = self.alloc(inner);
                Ok(Expression::Parenthesized(ParenthesizedExpression {
                    data: self.node_data(SyntaxKind::ParenthesizedExpression, pos),
                    expression: inner,
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                let pos = self.start();
                self.parse_function_expression(pos, ModifierFlags::NONE)
            }
            SyntaxKind::ClassKeyword => self.parse_class_expression(),
            SyntaxKind::AsyncKeyword
                if self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.stream.peek(1).has_preceding_line_break() =>
            {
                let pos = self.start();
                self.bump();
                self.parse_function_expression(pos, ModifierFlags::ASYNC)
            }
            kind if Self::is_identifier_kind(kind) => {
                Ok(Expression::Identifier(self.parse_identifier("expression")?))
            }
            _ => Err(self.unexpected(
                "expression",
                &[
                    SyntaxKind::Identifier,
                    SyntaxKind::NumericLiteral,
                    SyntaxKind::StringLiteral,
                    SyntaxKind::OpenParenToken,
                ],
            )),
        }
    }

    fn intern_token_text(&mut self, token: &sable_scanner::Token) -> sable_core::InternedString {
        self.intern(&token.text)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBracketToken, "array literal")?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBracketToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("array literal", SyntaxKind::OpenBracketToken, open));
            }
            if self.at(SyntaxKind::CommaToken) {
                let hole = TextRange::empty(self.start());
                elements.push(Expression::Omitted(
                    self.node_data_at(SyntaxKind::OmittedExpression, hole),
                ));
            } else if self.at(SyntaxKind::DotDotDotToken) {
                let spread_pos = self.start();
                self.bump();
                let inner = self.parse_assignment_expression()?;
                let inner = self.alloc(inner);
                elements.push(Expression::Spread(SpreadElement {
                    data: self.node_data(SyntaxKind::SpreadElement, spread_pos),
                    expression: inner,
                }));
            } else {
                elements.push(self.parse_assignment_expression()?);
            }
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBracketToken, "array literal", open)?;
        Ok(Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.node_data(SyntaxKind::ArrayLiteralExpression, pos),
            elements: self.alloc_slice(elements),
        }))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBraceToken, "object literal")?;
        let mut properties = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("object literal", SyntaxKind::OpenBraceToken, open));
            }
            properties.push(self.parse_object_literal_element()?);
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBraceToken, "object literal", open)?;
        Ok(Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self.node_data(SyntaxKind::ObjectLiteralExpression, pos),
            properties: self.alloc_slice(properties),
        }))
    }

    fn parse_object_literal_element(&mut self) -> ParseResult<ObjectLiteralElement<'a>> {
        let pos = self.start();

        if self.at(SyntaxKind::DotDotDotToken) {
            self.bump();
            let inner = self.parse_assignment_expression()?;
            let inner = self.alloc(inner);
            return Ok(ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
                data: self.node_data(SyntaxKind::SpreadAssignment, pos),
                expression: inner,
            }));
        }

        if self.at(SyntaxKind::GetKeyword) && self.is_property_name_start(self.peek_kind(1)) {
            self.bump();
            let name = self.parse_property_name()?;
            let parameters = self.parse_parameter_list()?;
            let return_type = self.parse_return_type_annotation()?;
            let body = Some(self.parse_block("get accessor")?);
            return Ok(ObjectLiteralElement::GetAccessor(GetAccessorDeclaration {
                data: self.node_data(SyntaxKind::GetAccessor, pos),
                decorators: &[],
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
            let body = Some(self.parse_block("set accessor")?);
            return Ok(ObjectLiteralElement::SetAccessor(SetAccessorDeclaration {
                data: self.node_data(SyntaxKind::SetAccessor, pos),
                decorators: &[],
                name,
                parameters,
                body,
            }));
        }

        let asterisk = self.eat(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name()?;

        if matches!(
            self.kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let type_parameters = self.parse_optional_type_parameters()?;
            let parameters = self.parse_parameter_list()?;
            let return_type = self.parse_return_type_annotation()?;
            let body = Some(self.parse_block("method body")?);
            return Ok(ObjectLiteralElement::Method(MethodDeclaration {
                data: self.node_data(SyntaxKind::MethodDeclaration, pos),
                decorators: &[],
                name,
                question: None,
                asterisk,
                type_parameters,
                parameters,
                return_type,
                body,
            }));
        }

        if self.eat(SyntaxKind::ColonToken).is_some() {
            let initializer = self.parse_assignment_expression()?;
            let initializer = self.alloc(initializer);
            return Ok(ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                data: self.node_data(SyntaxKind::PropertyAssignment, pos),
                name,
                initializer,
            }));
        }

        // Shorthand `{ x }` or cover-grammar `{ x = init }`.
        if let PropertyName::Identifier(name) = name {
            let initializer = if self.eat(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_assignment_expression_ref()?)
            } else {
                None
            };
            return Ok(ObjectLiteralElement::ShorthandPropertyAssignment(
                ShorthandPropertyAssignment {
                    data: self.node_data(SyntaxKind::ShorthandPropertyAssignment, pos),
                    name,
                    initializer,
                },
            ));
        }

        Err(self.unexpected("object literal", &[SyntaxKind::ColonToken]))
    }

    fn parse_template_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        if self.at(SyntaxKind::NoSubstitutionTemplateLiteral) {
            let token = self.bump();
            let text = self.intern_token_text(&token);
            return Ok(Expression::NoSubstitutionTemplateLiteral(
                NoSubstitutionTemplateLiteral {
                    data: self
                        .node_data_at(SyntaxKind::NoSubstitutionTemplateLiteral, token.range),
                    text,
                },
            ));
        }

        let head_token = self.bump();
        debug_assert_eq!(head_token.kind, SyntaxKind::TemplateHead);
        let text = self.intern_token_text(&head_token);
        let head = TemplatePiece {
            data: self.node_data_at(SyntaxKind::TemplateHead, head_token.range),
            text,
        };

        let mut spans = Vec::new();
        loop {
            let span_pos = self.start();
            let expression = self.parse_expression()?;
            if !matches!(
                self.kind(),
                SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail
            ) {
                return Err(self.unexpected(
                    "template expression",
                    &[SyntaxKind::TemplateMiddle, SyntaxKind::TemplateTail],
                ));
            }
            let literal_token = self.bump();
            let is_tail = literal_token.kind == SyntaxKind::TemplateTail;
            let text = self.intern_token_text(&literal_token);
            let literal = TemplatePiece {
                data: self.node_data_at(literal_token.kind, literal_token.range),
                text,
            };
            let expression = self.alloc(expression);
            spans.push(TemplateSpan {
                data: self.node_data(SyntaxKind::TemplateSpan, span_pos),
                expression,
                literal,
            });
            if is_tail {
                break;
            }
        }
        Ok(Expression::Template(TemplateExpression {
            data: self.node_data(SyntaxKind::TemplateExpression, pos),
            head,
            spans: self.alloc_slice(spans),
        }))
    }

    fn parse_function_expression(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<Expression<'a>> {
        self.expect(SyntaxKind::FunctionKeyword, "function expression")?;
        let asterisk = self.eat(SyntaxKind::AsteriskToken);
        let name = if Self::is_identifier_kind(self.kind()) {
            Some(self.parse_identifier("function expression")?)
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_return_type_annotation()?;
        let body = self.parse_block("function body")?;
        let body = self.alloc(body);
        let mut data = self.node_data(SyntaxKind::FunctionExpression, pos);
        data.modifiers = modifiers;
        Ok(Expression::Function(FunctionExpression {
            data,
            name,
            asterisk,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    fn parse_class_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        self.expect(SyntaxKind::ClassKeyword, "class expression")?;
        let name = if Self::is_identifier_kind(self.kind()) {
            Some(self.parse_identifier("class expression")?)
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters()?;
        let heritage_clauses = self.parse_heritage_clauses()?;
        let members = self.parse_class_members()?;
        Ok(Expression::Class(ClassExpression {
            data: self.node_data(SyntaxKind::ClassExpression, pos),
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    fn parse_yield_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.start();
        self.bump();
        let asterisk = if predicates::not_line_terminator(&self.stream) {
            self.eat(SyntaxKind::AsteriskToken)
        } else {
            None
        };
        let expression = if predicates::not_line_terminator(&self.stream)
            && utilities::is_start_of_expression(self.kind())
        {
            Some(self.parse_assignment_expression_ref()?)
        } else {
            None
        };
        Ok(Expression::Yield(YieldExpression {
            data: self.node_data(SyntaxKind::YieldExpression, pos),
            asterisk,
            expression,
        }))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Arrow-function dispatch at assignment level. Returns `Ok(None)` when
    /// no arrow alternative matches, leaving the cursor untouched.
    fn try_parse_arrow_function(&mut self) -> ParseResult<Option<Expression<'a>>> {
        let pos = self.start();
        match self.kind() {
            // `x => …`
            kind if Self::is_identifier_kind(kind)
                && self.peek_kind(1) == SyntaxKind::EqualsGreaterThanToken
                && !self.stream.peek(1).has_preceding_line_break() =>
            {
                let parameter = self.parse_identifier("arrow function")?;
                Ok(Some(self.parse_simple_arrow_function(pos, parameter, false)?))
            }
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                if self.is_arrow_function_ahead(false) =>
            {
                Ok(Some(self.parse_arrow_function(pos, false)?))
            }
            SyntaxKind::AsyncKeyword if !self.stream.peek(1).has_preceding_line_break() => {
                let after = self.peek_kind(1);
                if Self::is_identifier_kind(after)
                    && self.peek_kind(2) == SyntaxKind::EqualsGreaterThanToken
                {
                    self.bump(); // async
                    let parameter = self.parse_identifier("arrow function")?;
                    return Ok(Some(self.parse_simple_arrow_function(pos, parameter, true)?));
                }
                if matches!(
                    after,
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                ) && self.is_arrow_function_ahead(true)
                {
                    self.bump(); // async
                    return Ok(Some(self.parse_arrow_function(pos, true)?));
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Trial parse of a full arrow head (`<T>`? `(…)` `: T`? then `=>`),
    /// restoring the cursor regardless of outcome.
    fn is_arrow_function_ahead(&mut self, skip_async: bool) -> bool {
        self.look_ahead(|p| {
            if skip_async {
                p.bump();
            }
            p.parse_arrow_head().is_ok()
        })
    }

    /// Parse through an arrow function's head and stop on its `=>`.
    #[allow(clippy::type_complexity)]
    fn parse_arrow_head(
        &mut self,
    ) -> ParseResult<(
        Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
        NodeList<'a, ParameterDeclaration<'a>>,
        Option<&'a TypeNode<'a>>,
    )> {
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_return_type_annotation()?;
        if !self.at(SyntaxKind::EqualsGreaterThanToken)
            || !predicates::not_line_terminator(&self.stream)
        {
            return Err(self.unexpected("arrow function", &[SyntaxKind::EqualsGreaterThanToken]));
        }
        Ok((type_parameters, parameters, return_type))
    }

    fn parse_arrow_function(&mut self, pos: u32, is_async: bool) -> ParseResult<Expression<'a>> {
        let (type_parameters, parameters, return_type) = self.parse_arrow_head()?;
        self.parse_arrow_tail(pos, type_parameters, parameters, return_type, is_async)
    }

    fn parse_simple_arrow_function(
        &mut self,
        pos: u32,
        parameter: Identifier,
        is_async: bool,
    ) -> ParseResult<Expression<'a>> {
        let range = parameter.range();
        let parameter = ParameterDeclaration {
            data: self.node_data_at(SyntaxKind::Parameter, range),
            dot_dot_dot: None,
            name: BindingName::Identifier(parameter),
            question: None,
            type_annotation: None,
            initializer: None,
        };
        let parameters = self.alloc_slice(vec![parameter]);
        self.parse_arrow_tail(pos, None, parameters, None, is_async)
    }

    fn parse_arrow_tail(
        &mut self,
        pos: u32,
        type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
        parameters: NodeList<'a, ParameterDeclaration<'a>>,
        return_type: Option<&'a TypeNode<'a>>,
        is_async: bool,
    ) -> ParseResult<Expression<'a>> {
        let arrow = self.expect(SyntaxKind::EqualsGreaterThanToken, "arrow function")?;
        let body = if self.at(SyntaxKind::OpenBraceToken) {
            let block = self.parse_block("arrow function body")?;
            ArrowFunctionBody::Block(self.alloc(block))
        } else {
            ArrowFunctionBody::Expression(self.parse_assignment_expression_ref()?)
        };
        let mut data = self.node_data(SyntaxKind::ArrowFunction, pos);
        if is_async {
            data.modifiers |= ModifierFlags::ASYNC;
        }
        Ok(Expression::Arrow(ArrowFunction {
            data,
            type_parameters,
            parameters,
            return_type,
            arrow,
            body,
        }))
    }
}
