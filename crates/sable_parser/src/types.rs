//! The type grammar: unions/intersections over primary types, generics, and
//! signature members.
//!
//! Generic argument lists close through [`Parser::expect_close_angle`], which
//! peels single `>` closers out of compound `>>`-family tokens — the token
//! `>>` closes two pending lists in `Map<string, Array<number>>` and stays a
//! shift operator in `a >> b`.

use sable_ast::*;

use crate::parser::{ParseResult, Parser};
use crate::predicates;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeNode<'a>> {
        self.with_depth("type", |p| {
            if p.at(SyntaxKind::NewKeyword) {
                return p.parse_constructor_type();
            }
            if p.is_start_of_function_type() {
                return p.parse_function_type();
            }
            p.parse_union_type()
        })
    }

    pub(crate) fn parse_type_and_alloc(&mut self) -> ParseResult<&'a TypeNode<'a>> {
        let type_node = self.parse_type()?;
        Ok(self.alloc(type_node))
    }

    /// A return-type position: a plain type or the predicate form `x is T`.
    pub(crate) fn parse_type_or_predicate_and_alloc(&mut self) -> ParseResult<&'a TypeNode<'a>> {
        let is_predicate = (Self::is_identifier_kind(self.kind())
            || self.at(SyntaxKind::ThisKeyword))
            && self.peek_kind(1) == SyntaxKind::IsKeyword;
        if !is_predicate {
            return self.parse_type_and_alloc();
        }
        let pos = self.start();
        let parameter_name = if self.at(SyntaxKind::ThisKeyword) {
            let token = self.bump();
            TypePredicateParameterName::This(ThisTypeNode {
                data: self.node_data_at(SyntaxKind::ThisType, token.range),
            })
        } else {
            TypePredicateParameterName::Identifier(self.parse_identifier("type predicate")?)
        };
        self.bump(); // is
        let type_node = self.parse_type_and_alloc()?;
        let predicate = TypeNode::Predicate(TypePredicateNode {
            data: self.node_data(SyntaxKind::TypePredicate, pos),
            parameter_name,
            type_node,
        });
        Ok(self.alloc(predicate))
    }

    /// Whether the tokens ahead form `(params) =>` rather than a
    /// parenthesized type. Scans to the matching `)` over token kinds alone;
    /// the lookahead is bounded by the parameter list's extent.
    fn is_start_of_function_type(&mut self) -> bool {
        if self.at(SyntaxKind::LessThanToken) {
            return true;
        }
        if !self.at(SyntaxKind::OpenParenToken) {
            return false;
        }
        self.look_ahead(|p| {
            p.bump(); // (
            if matches!(
                p.kind(),
                SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken
            ) {
                // `() =>` and `(...rest) =>` can only be function types.
                return true;
            }
            let mut depth = 1u32;
            while !p.stream.is_eof() {
                match p.kind() {
                    SyntaxKind::OpenParenToken => depth += 1,
                    SyntaxKind::CloseParenToken => {
                        depth -= 1;
                        if depth == 0 {
                            p.bump();
                            return p.at(SyntaxKind::EqualsGreaterThanToken);
                        }
                    }
                    _ => {}
                }
                p.bump();
            }
            false
        })
    }

    fn parse_function_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let pos = self.start();
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        self.expect(SyntaxKind::EqualsGreaterThanToken, "function type")?;
        let return_type = self.parse_type_and_alloc()?;
        Ok(TypeNode::Function(FunctionTypeNode {
            data: self.node_data(SyntaxKind::FunctionType, pos),
            type_parameters,
            parameters,
            return_type,
        }))
    }

    /// `new (args) => T`
    fn parse_constructor_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let pos = self.start();
        self.expect(SyntaxKind::NewKeyword, "constructor type")?;
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        self.expect(SyntaxKind::EqualsGreaterThanToken, "constructor type")?;
        let return_type = self.parse_type_and_alloc()?;
        Ok(TypeNode::Constructor(ConstructorTypeNode {
            data: self.node_data(SyntaxKind::ConstructorType, pos),
            type_parameters,
            parameters,
            return_type,
        }))
    }

    fn parse_union_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let pos = self.start();
        self.eat(SyntaxKind::BarToken); // leading separator
        let first = self.parse_intersection_type()?;
        if !self.at(SyntaxKind::BarToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(SyntaxKind::BarToken).is_some() {
            types.push(self.parse_intersection_type()?);
        }
        Ok(TypeNode::Union(UnionTypeNode {
            data: self.node_data(SyntaxKind::UnionType, pos),
            types: self.alloc_slice(types),
        }))
    }

    fn parse_intersection_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let pos = self.start();
        self.eat(SyntaxKind::AmpersandToken); // leading separator
        let first = self.parse_postfix_type()?;
        if !self.at(SyntaxKind::AmpersandToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(SyntaxKind::AmpersandToken).is_some() {
            types.push(self.parse_postfix_type()?);
        }
        Ok(TypeNode::Intersection(IntersectionTypeNode {
            data: self.node_data(SyntaxKind::IntersectionType, pos),
            types: self.alloc_slice(types),
        }))
    }

    /// Postfix `T[]` and `T[K]` chains.
    fn parse_postfix_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let mut type_node = self.parse_primary_type()?;
        while self.at(SyntaxKind::OpenBracketToken)
            && predicates::not_line_terminator(&self.stream)
        {
            let pos = type_node.range().pos;
            self.bump();
            if self.eat(SyntaxKind::CloseBracketToken).is_some() {
                let element_type = self.alloc(type_node);
                type_node = TypeNode::Array(ArrayTypeNode {
                    data: self.node_data(SyntaxKind::ArrayType, pos),
                    element_type,
                });
            } else {
                let index_type = self.parse_type_and_alloc()?;
                self.expect(SyntaxKind::CloseBracketToken, "indexed access type")?;
                let object_type = self.alloc(type_node);
                type_node = TypeNode::IndexedAccess(IndexedAccessTypeNode {
                    data: self.node_data(SyntaxKind::IndexedAccessType, pos),
                    object_type,
                    index_type,
                });
            }
        }
        Ok(type_node)
    }

    fn parse_primary_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let pos = self.start();
        match self.kind() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword => {
                let token = self.bump();
                Ok(TypeNode::Keyword(KeywordTypeNode {
                    data: self.node_data_at(token.kind, token.range),
                }))
            }
            SyntaxKind::ThisKeyword => {
                let token = self.bump();
                Ok(TypeNode::This(ThisTypeNode {
                    data: self.node_data_at(SyntaxKind::ThisType, token.range),
                }))
            }
            SyntaxKind::TypeOfKeyword => {
                self.bump();
                let expr_name = self.parse_entity_name("type query")?;
                Ok(TypeNode::Query(TypeQueryNode {
                    data: self.node_data(SyntaxKind::TypeQuery, pos),
                    expr_name,
                }))
            }
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword
                if type_operand_ahead(self.peek_kind(1)) =>
            {
                let operator = self.bump().kind;
                let operand = self.parse_postfix_type()?;
                let type_node = self.alloc(operand);
                Ok(TypeNode::Operator(TypeOperatorNode {
                    data: self.node_data(SyntaxKind::TypeOperator, pos),
                    operator,
                    type_node,
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(SyntaxKind::CloseParenToken, "parenthesized type")?;
                let type_node = self.alloc(inner);
                Ok(TypeNode::Parenthesized(ParenthesizedTypeNode {
                    data: self.node_data(SyntaxKind::ParenthesizedType, pos),
                    type_node,
                }))
            }
            SyntaxKind::OpenBraceToken => {
                let members = self.parse_type_member_block("type literal")?;
                Ok(TypeNode::Literal(TypeLiteralNode {
                    data: self.node_data(SyntaxKind::TypeLiteral, pos),
                    members,
                }))
            }
            SyntaxKind::StringLiteral => {
                let literal = Expression::StringLiteral(self.parse_string_literal("type")?);
                let literal = self.alloc(literal);
                Ok(TypeNode::LiteralType(LiteralTypeNode {
                    data: self.node_data(SyntaxKind::LiteralType, pos),
                    literal,
                }))
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let token = self.bump();
                let text = self.intern(&token.text);
                let literal = if token.kind == SyntaxKind::NumericLiteral {
                    Expression::NumericLiteral(NumericLiteral {
                        data: self.node_data_at(SyntaxKind::NumericLiteral, token.range),
                        text,
                        literal_flags: token.flags & TokenFlags::NUMERIC_LITERAL_FLAGS,
                    })
                } else {
                    Expression::BigIntLiteral(BigIntLiteral {
                        data: self.node_data_at(SyntaxKind::BigIntLiteral, token.range),
                        text,
                    })
                };
                let literal = self.alloc(literal);
                Ok(TypeNode::LiteralType(LiteralTypeNode {
                    data: self.node_data(SyntaxKind::LiteralType, pos),
                    literal,
                }))
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let token = self.bump();
                let literal = if token.kind == SyntaxKind::TrueKeyword {
                    Expression::True(self.node_data_at(SyntaxKind::TrueKeyword, token.range))
                } else {
                    Expression::False(self.node_data_at(SyntaxKind::FalseKeyword, token.range))
                };
                let literal = self.alloc(literal);
                Ok(TypeNode::LiteralType(LiteralTypeNode {
                    data: self.node_data(SyntaxKind::LiteralType, pos),
                    literal,
                }))
            }
            // Negative numeric literal type: `-1`.
            SyntaxKind::MinusToken if self.peek_kind(1) == SyntaxKind::NumericLiteral => {
                self.bump();
                let token = self.bump();
                let text = self.intern(&token.text);
                let operand = Expression::NumericLiteral(NumericLiteral {
                    data: self.node_data_at(SyntaxKind::NumericLiteral, token.range),
                    text,
                    literal_flags: token.flags & TokenFlags::NUMERIC_LITERAL_FLAGS,
                });
                let operand = self.alloc(operand);
                let literal = Expression::PrefixUnary(PrefixUnaryExpression {
                    data: self.node_data(SyntaxKind::PrefixUnaryExpression, pos),
                    operator: SyntaxKind::MinusToken,
                    operand,
                });
                let literal = self.alloc(literal);
                Ok(TypeNode::LiteralType(LiteralTypeNode {
                    data: self.node_data(SyntaxKind::LiteralType, pos),
                    literal,
                }))
            }
            kind if Self::is_identifier_kind(kind) => {
                let type_name = self.parse_entity_name("type reference")?;
                let type_arguments = if self.at(SyntaxKind::LessThanToken) {
                    Some(self.parse_type_arguments("type reference")?)
                } else {
                    None
                };
                Ok(TypeNode::Reference(TypeReferenceNode {
                    data: self.node_data(SyntaxKind::TypeReference, pos),
                    type_name,
                    type_arguments,
                }))
            }
            _ => Err(self.unexpected(
                "type",
                &[
                    SyntaxKind::Identifier,
                    SyntaxKind::OpenBraceToken,
                    SyntaxKind::OpenBracketToken,
                    SyntaxKind::OpenParenToken,
                ],
            )),
        }
    }

    fn parse_tuple_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let pos = self.start();
        let open = self.expect(SyntaxKind::OpenBracketToken, "tuple type")?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBracketToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated("tuple type", SyntaxKind::OpenBracketToken, open));
            }
            if self.at(SyntaxKind::DotDotDotToken) {
                let rest_pos = self.start();
                self.bump();
                let type_node = self.parse_type_and_alloc()?;
                elements.push(TypeNode::Rest(RestTypeNode {
                    data: self.node_data(SyntaxKind::RestType, rest_pos),
                    type_node,
                }));
            } else {
                elements.push(self.parse_type()?);
            }
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_closing(SyntaxKind::OpenBracketToken, "tuple type", open)?;
        Ok(TypeNode::Tuple(TupleTypeNode {
            data: self.node_data(SyntaxKind::TupleType, pos),
            elements: self.alloc_slice(elements),
        }))
    }

    // ========================================================================
    // Generics
    // ========================================================================

    pub(crate) fn parse_optional_type_parameters(
        &mut self,
    ) -> ParseResult<Option<NodeList<'a, TypeParameterDeclaration<'a>>>> {
        if !self.at(SyntaxKind::LessThanToken) {
            return Ok(None);
        }
        self.bump();
        let mut parameters = Vec::new();
        loop {
            let pos = self.start();
            let name = self.parse_identifier("type parameter")?;
            let constraint = if self.eat(SyntaxKind::ExtendsKeyword).is_some() {
                Some(self.parse_type_and_alloc()?)
            } else {
                None
            };
            let default = if self.eat(SyntaxKind::EqualsToken).is_some() {
                Some(self.parse_type_and_alloc()?)
            } else {
                None
            };
            parameters.push(TypeParameterDeclaration {
                data: self.node_data(SyntaxKind::TypeParameter, pos),
                name,
                constraint,
                default,
            });
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_close_angle("type parameters")?;
        Ok(Some(self.alloc_slice(parameters)))
    }

    /// `<T, …>` where the grammar position guarantees type arguments (type
    /// references, heritage clauses). Call positions go through the trial
    /// variant in the expression rule instead.
    pub(crate) fn parse_type_arguments(
        &mut self,
        rule: &'static str,
    ) -> ParseResult<NodeList<'a, TypeNode<'a>>> {
        self.expect(SyntaxKind::LessThanToken, rule)?;
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type()?);
            if self.eat(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        self.expect_close_angle(rule)?;
        Ok(self.alloc_slice(arguments))
    }

    // ========================================================================
    // Type members
    // ========================================================================

    /// `{ member; … }` shared by interface bodies and object type literals.
    pub(crate) fn parse_type_member_block(
        &mut self,
        rule: &'static str,
    ) -> ParseResult<NodeList<'a, TypeElement<'a>>> {
        let open = self.expect(SyntaxKind::OpenBraceToken, rule)?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.stream.is_eof() {
                return Err(self.unterminated(rule, SyntaxKind::OpenBraceToken, open));
            }
            members.push(self.parse_type_member()?);
            // Members separate with `;`, `,`, or just a line break.
            if self.eat(SyntaxKind::SemicolonToken).is_none() {
                self.eat(SyntaxKind::CommaToken);
            }
        }
        self.bump();
        Ok(self.alloc_slice(members))
    }

    fn parse_type_member(&mut self) -> ParseResult<TypeElement<'a>> {
        let pos = self.start();

        if matches!(
            self.kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let (type_parameters, parameters, return_type) = self.parse_signature_members()?;
            return Ok(TypeElement::CallSignature(CallSignatureNode {
                data: self.node_data(SyntaxKind::CallSignature, pos),
                type_parameters,
                parameters,
                return_type,
            }));
        }

        if self.at(SyntaxKind::NewKeyword)
            && matches!(
                self.peek_kind(1),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.bump();
            let (type_parameters, parameters, return_type) = self.parse_signature_members()?;
            return Ok(TypeElement::ConstructSignature(ConstructSignatureNode {
                data: self.node_data(SyntaxKind::ConstructSignature, pos),
                type_parameters,
                parameters,
                return_type,
            }));
        }

        // `readonly x: T` — but `readonly: T` is a property named readonly.
        let mut modifiers = ModifierFlags::NONE;
        if self.at(SyntaxKind::ReadonlyKeyword) && self.is_property_name_start(self.peek_kind(1)) {
            modifiers |= ModifierFlags::READONLY;
            self.bump();
        }

        if self.at(SyntaxKind::OpenBracketToken) && self.is_index_signature_ahead() {
            let signature = self.parse_index_signature(pos, modifiers)?;
            return Ok(TypeElement::IndexSignature(signature));
        }

        let name = self.parse_property_name()?;
        let question = self.eat(SyntaxKind::QuestionToken);

        if matches!(
            self.kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            let (type_parameters, parameters, return_type) = self.parse_signature_members()?;
            let mut data = self.node_data(SyntaxKind::MethodSignature, pos);
            data.modifiers = modifiers;
            return Ok(TypeElement::MethodSignature(MethodSignatureNode {
                data,
                name,
                question,
                type_parameters,
                parameters,
                return_type,
            }));
        }

        let type_annotation = if self.eat(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc()?)
        } else {
            None
        };
        let mut data = self.node_data(SyntaxKind::PropertySignature, pos);
        data.modifiers = modifiers;
        Ok(TypeElement::PropertySignature(PropertySignatureNode {
            data,
            name,
            question,
            type_annotation,
        }))
    }

    #[allow(clippy::type_complexity)]
    fn parse_signature_members(
        &mut self,
    ) -> ParseResult<(
        Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
        NodeList<'a, ParameterDeclaration<'a>>,
        Option<&'a TypeNode<'a>>,
    )> {
        let type_parameters = self.parse_optional_type_parameters()?;
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_return_type_annotation()?;
        Ok((type_parameters, parameters, return_type))
    }

    /// `[key: string]: T` in class bodies, interfaces, and type literals.
    pub(crate) fn parse_index_signature(
        &mut self,
        pos: u32,
        modifiers: ModifierFlags,
    ) -> ParseResult<IndexSignatureNode<'a>> {
        self.expect(SyntaxKind::OpenBracketToken, "index signature")?;
        let parameter_pos = self.start();
        let name = self.parse_identifier("index signature")?;
        self.expect(SyntaxKind::ColonToken, "index signature")?;
        let parameter_type = self.parse_type_and_alloc()?;
        let parameter = ParameterDeclaration {
            data: self.node_data(SyntaxKind::Parameter, parameter_pos),
            dot_dot_dot: None,
            name: BindingName::Identifier(name),
            question: None,
            type_annotation: Some(parameter_type),
            initializer: None,
        };
        self.expect(SyntaxKind::CloseBracketToken, "index signature")?;
        let type_annotation = if self.eat(SyntaxKind::ColonToken).is_some() {
            Some(self.parse_type_and_alloc()?)
        } else {
            None
        };
        let mut data = self.node_data(SyntaxKind::IndexSignature, pos);
        data.modifiers = modifiers;
        let parameter = self.alloc(parameter);
        Ok(IndexSignatureNode {
            data,
            parameter,
            type_annotation,
        })
    }
}

/// A `keyof`/`unique`/`readonly` prefix only operates on a following type;
/// otherwise the keyword is an ordinary type reference name.
fn type_operand_ahead(kind: SyntaxKind) -> bool {
    crate::utilities::is_start_of_type(kind)
}
