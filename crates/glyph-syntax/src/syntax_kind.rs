//! `SyntaxKind`: every leaf and composite-node kind in the glyph CST.
//!
//! Grounded on `snow-parser::syntax_kind::SyntaxKind` — leaves are a 1:1
//! mapping of [`glyph_lexer::token::TokenKind`], composite kinds are the
//! declaration/statement/expression/type node shapes the grammar defines.

use glyph_lexer::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──
    TOMBSTONE = 0,
    ERROR_NODE = 1,

    // ── Leaves (mirrors TokenKind) ──
    IDENTIFIER,
    VARIABLE,
    INTEGER,
    DOUBLE,
    SYMBOL,
    STRING,
    BOOLEAN_TRUE,
    BOOLEAN_FALSE,
    OPERATOR,
    BLOCK_BEGIN,
    BLOCK_END,
    GROUP_BEGIN,
    GROUP_END,
    END_ARGUMENT_LIST,
    END_INTERROGATIVE_ARGUMENT_LIST,
    IF_KW,
    ELSE_IF_KW,
    ELSE_KW,
    RETURN_KW,
    REPEAT_WHILE_KW,
    FOR_IN_KW,
    ERROR_HANDLER_KW,
    NEW_KW,
    THIS_KW,
    SUPER_KW,
    UNSAFE_KW,
    MUTABLE_KW,
    CLASS_KW,
    VALUE_TYPE_KW,
    PROTOCOL_KW,
    ENUMERATION_KW,
    GENERIC_KW,
    SELECTION_OPERATOR,
    LINE_BREAK,
    BLANK_LINE,
    SINGLELINE_COMMENT,
    MULTILINE_COMMENT,
    DOCUMENTATION_COMMENT,
    PACKAGE_DOCUMENTATION_COMMENT,
    BEGIN_INTERPOLATION,
    MIDDLE_INTERPOLATION,
    END_INTERPOLATION,
    DECORATOR,
    NO_VALUE_KW,
    LEFT_PRODUCTION_OPERATOR,
    RIGHT_PRODUCTION_OPERATOR,
    CALL_OP,
    ERROR_KW,
    PACKAGE_KW,
    EXTENSION_KW,
    INCLUDE_KW,
    START_FLAG_KW,
    VERSION_KW,
    REQUIRE_BINARY_KW,
    ALIAS_KW,
    EOF,

    // ── Types (§3.2, §4.2) ──
    NOMINAL_TYPE,
    GENERIC_ARG_LIST,
    MULTI_PROTOCOL_TYPE,
    CALLABLE_TYPE,
    OPTIONAL_TYPE,
    ERROR_TYPE,
    META_TYPE,
    PARAM_TYPE_LIST,

    // ── Declarations (§4.2) ──
    DOCUMENT,
    IMPORT_DECL,
    INCLUDE_DECL,
    START_FLAG_DECL,
    VERSION_DECL,
    REQUIRE_BINARY_DECL,
    ALIAS_DECL,
    CLASS_DEF,
    VALUE_TYPE_DEF,
    ENUM_DEF,
    PROTOCOL_DEF,
    EXTENSION_DEF,
    GENERIC_PARAM_LIST,
    SUPERTYPE_CLAUSE,
    BODY,
    INSTANCE_VARIABLE,
    METHOD_DEF,
    TYPE_METHOD_DEF,
    INITIALIZER_DEF,
    PROTOCOL_CONFORMANCE,
    ENUM_VALUE_DEF,
    PARAM_LIST,
    PARAM,
    RETURN_TYPE_CLAUSE,
    ERROR_TYPE_CLAUSE,

    // ── Statements (§3.6) ──
    BLOCK,
    EXPR_STATEMENT,
    RETURN_STMT,
    RAISE_STMT,
    SUPERINITIALIZER_STMT,
    IF_STMT,
    ELSE_IF_CLAUSE,
    ELSE_CLAUSE,
    REPEAT_WHILE_STMT,
    FOR_IN_STMT,
    ERROR_HANDLER_STMT,
    VARIABLE_DECLARATION_STMT,
    VARIABLE_ASSIGNMENT_STMT,
    INSTANCE_VARIABLE_ASSIGNMENT_STMT,
    FROZEN_DECLARATION_STMT,

    // ── Expressions (§3.6) ──
    INTEGER_LITERAL,
    DOUBLE_LITERAL,
    SYMBOL_LITERAL,
    STRING_LITERAL,
    INTERPOLATED_STRING,
    CONCATENATE_EXPR,
    LIST_LITERAL,
    DICTIONARY_LITERAL,
    DICTIONARY_ENTRY,
    TRUE_LITERAL,
    FALSE_LITERAL,
    NOTHINGNESS_LITERAL,
    THIS_EXPR,
    GET_VARIABLE_EXPR,
    META_TYPE_INSTANTIATION_EXPR,
    CAST_EXPR,
    CONDITIONAL_ASSIGNMENT_EXPR,
    TYPE_METHOD_EXPR,
    SUPER_METHOD_EXPR,
    CALLABLE_CALL_EXPR,
    CAPTURE_METHOD_EXPR,
    CAPTURE_TYPE_METHOD_EXPR,
    METHOD_EXPR,
    BINARY_OPERATOR_EXPR,
    INITIALIZATION_EXPR,
    CLOSURE_EXPR,
    IS_NOTHINGNESS_EXPR,
    IS_ERROR_EXPR,
    UNWRAP_EXPR,
    META_TYPE_FROM_INSTANCE_EXPR,
    ARG_LIST,
    GROUP_EXPR,
    NAME,
    NAME_REF,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::LINE_BREAK
                | SyntaxKind::BLANK_LINE
                | SyntaxKind::SINGLELINE_COMMENT
                | SyntaxKind::MULTILINE_COMMENT
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Identifier => SyntaxKind::IDENTIFIER,
            TokenKind::Variable => SyntaxKind::VARIABLE,
            TokenKind::Integer => SyntaxKind::INTEGER,
            TokenKind::Double => SyntaxKind::DOUBLE,
            TokenKind::Symbol => SyntaxKind::SYMBOL,
            TokenKind::String => SyntaxKind::STRING,
            TokenKind::BooleanTrue => SyntaxKind::BOOLEAN_TRUE,
            TokenKind::BooleanFalse => SyntaxKind::BOOLEAN_FALSE,
            TokenKind::Operator => SyntaxKind::OPERATOR,
            TokenKind::BlockBegin => SyntaxKind::BLOCK_BEGIN,
            TokenKind::BlockEnd => SyntaxKind::BLOCK_END,
            TokenKind::GroupBegin => SyntaxKind::GROUP_BEGIN,
            TokenKind::GroupEnd => SyntaxKind::GROUP_END,
            TokenKind::EndArgumentList => SyntaxKind::END_ARGUMENT_LIST,
            TokenKind::EndInterrogativeArgumentList => SyntaxKind::END_INTERROGATIVE_ARGUMENT_LIST,
            TokenKind::If => SyntaxKind::IF_KW,
            TokenKind::ElseIf => SyntaxKind::ELSE_IF_KW,
            TokenKind::Else => SyntaxKind::ELSE_KW,
            TokenKind::Return => SyntaxKind::RETURN_KW,
            TokenKind::RepeatWhile => SyntaxKind::REPEAT_WHILE_KW,
            TokenKind::ForIn => SyntaxKind::FOR_IN_KW,
            TokenKind::ErrorHandler => SyntaxKind::ERROR_HANDLER_KW,
            TokenKind::New => SyntaxKind::NEW_KW,
            TokenKind::This => SyntaxKind::THIS_KW,
            TokenKind::Super => SyntaxKind::SUPER_KW,
            TokenKind::Unsafe => SyntaxKind::UNSAFE_KW,
            TokenKind::Mutable => SyntaxKind::MUTABLE_KW,
            TokenKind::Class => SyntaxKind::CLASS_KW,
            TokenKind::ValueType => SyntaxKind::VALUE_TYPE_KW,
            TokenKind::Protocol => SyntaxKind::PROTOCOL_KW,
            TokenKind::Enumeration => SyntaxKind::ENUMERATION_KW,
            TokenKind::Generic => SyntaxKind::GENERIC_KW,
            TokenKind::SelectionOperator => SyntaxKind::SELECTION_OPERATOR,
            TokenKind::LineBreak => SyntaxKind::LINE_BREAK,
            TokenKind::BlankLine => SyntaxKind::BLANK_LINE,
            TokenKind::SinglelineComment => SyntaxKind::SINGLELINE_COMMENT,
            TokenKind::MultilineComment => SyntaxKind::MULTILINE_COMMENT,
            TokenKind::DocumentationComment => SyntaxKind::DOCUMENTATION_COMMENT,
            TokenKind::PackageDocumentationComment => SyntaxKind::PACKAGE_DOCUMENTATION_COMMENT,
            TokenKind::BeginInterpolation => SyntaxKind::BEGIN_INTERPOLATION,
            TokenKind::MiddleInterpolation => SyntaxKind::MIDDLE_INTERPOLATION,
            TokenKind::EndInterpolation => SyntaxKind::END_INTERPOLATION,
            TokenKind::Decorator => SyntaxKind::DECORATOR,
            TokenKind::NoValue => SyntaxKind::NO_VALUE_KW,
            TokenKind::LeftProductionOperator => SyntaxKind::LEFT_PRODUCTION_OPERATOR,
            TokenKind::RightProductionOperator => SyntaxKind::RIGHT_PRODUCTION_OPERATOR,
            TokenKind::Call => SyntaxKind::CALL_OP,
            TokenKind::Error => SyntaxKind::ERROR_KW,
            TokenKind::Package => SyntaxKind::PACKAGE_KW,
            TokenKind::Extension => SyntaxKind::EXTENSION_KW,
            TokenKind::Include => SyntaxKind::INCLUDE_KW,
            TokenKind::StartFlag => SyntaxKind::START_FLAG_KW,
            TokenKind::Version => SyntaxKind::VERSION_KW,
            TokenKind::RequireBinary => SyntaxKind::REQUIRE_BINARY_KW,
            TokenKind::Alias => SyntaxKind::ALIAS_KW,
            TokenKind::EndOfFile => SyntaxKind::EOF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_first() {
        assert_eq!(SyntaxKind::TOMBSTONE as u16, 0);
        assert_eq!(SyntaxKind::ERROR_NODE as u16, 1);
    }

    #[test]
    fn trivia_kinds_identified() {
        assert!(SyntaxKind::LINE_BREAK.is_trivia());
        assert!(SyntaxKind::BLANK_LINE.is_trivia());
        assert!(!SyntaxKind::IDENTIFIER.is_trivia());
        assert!(!SyntaxKind::CLASS_DEF.is_trivia());
    }

    #[test]
    fn token_kind_converts_without_panic() {
        let _: SyntaxKind = TokenKind::Class.into();
        let _: SyntaxKind = TokenKind::EndOfFile.into();
    }
}
