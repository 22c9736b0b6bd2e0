//! First-set classification helpers.
//!
//! Token-kind checks used to prune alternatives before any trial parsing
//! happens. Each function answers "can this token begin that production?".

use sable_ast::SyntaxKind;

/// Tokens that can begin a statement or declaration.
pub fn is_start_of_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::AtToken
    ) || is_start_of_expression(kind)
}

/// Tokens that can begin an expression.
pub fn is_start_of_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::AwaitKeyword
            | SyntaxKind::YieldKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::DotDotDotToken
    ) || kind.is_contextual_keyword()
}

/// Tokens that can begin a type.
pub fn is_start_of_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::AnyKeyword
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
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::KeyOfKeyword
            | SyntaxKind::UniqueKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::MinusToken
            | SyntaxKind::DotDotDotToken
    ) || kind.is_contextual_keyword()
}

/// Keywords that may prefix a class member as a modifier.
pub fn is_modifier_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AsyncKeyword
    )
}

/// Tokens that may legally begin a binding name (parameter, variable, or
/// destructuring element).
pub fn is_start_of_binding_name(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier
        || kind == SyntaxKind::OpenBraceToken
        || kind == SyntaxKind::OpenBracketToken
        || kind.is_contextual_keyword()
        || matches!(
            kind,
            SyntaxKind::LetKeyword | SyntaxKind::StaticKeyword | SyntaxKind::YieldKeyword
        )
}
