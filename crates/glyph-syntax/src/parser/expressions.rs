//! Expression and statement grammar, grounded on
//! `snow-parser::parser::expressions`'s `expr_bp`/`lhs`/`open_before` Pratt
//! loop. Binary-operator precedence comes from [`super::operators`] rather
//! than a hardcoded match, since here the lexer tags every operator code
//! point with the single `Operator` token kind and the concrete
//! operator is recovered from the token's value.
//!
//! Statements are distinguished by their opening token; most of
//! the statement-opening markers below (`🍰`, `🍮`, `🍦` and the expression
//! prefix markers in [`glyph_lexer::identifiers`]) lex as a plain
//! `Identifier` rather than a dedicated `TokenKind`, so the postfix
//! method-call loop must refuse to swallow them as a method name —
//! [`glyph_lexer::identifiers::is_reserved_marker`] is the shared guard.

use glyph_lexer::identifiers;
use glyph_lexer::token::TokenKind;

use super::operators::{self, PREC_PREFIX};
use super::types;
use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

// ── Statements ──

pub(crate) fn parse_block(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(TokenKind::BlockBegin, "🍇 opening a block");
    while !p.at(TokenKind::BlockEnd) && !p.at(TokenKind::EndOfFile) {
        parse_stmt(p);
    }
    p.expect(TokenKind::BlockEnd, "🍉 closing a block");
    p.close(m, SyntaxKind::BLOCK)
}

pub(crate) fn parse_stmt(p: &mut Parser) {
    if p.at_value(identifiers::VAR_DECL) {
        return parse_var_decl_stmt(p);
    }
    if p.at_value(identifiers::FROZEN_DECL) {
        return parse_frozen_decl_stmt(p);
    }
    if p.at_value(identifiers::REASSIGN) {
        return parse_reassign_stmt(p);
    }
    if p.at(TokenKind::If) {
        return parse_if_stmt(p);
    }
    if p.at(TokenKind::RepeatWhile) {
        return parse_while_stmt(p);
    }
    if p.at(TokenKind::ForIn) {
        return parse_for_in_stmt(p);
    }
    if p.at(TokenKind::ErrorHandler) {
        return parse_error_handler_stmt(p);
    }
    if p.at(TokenKind::Super) && p.nth(1) == TokenKind::New {
        return parse_superinitializer_stmt(p);
    }
    if p.at(TokenKind::Error) {
        return parse_raise_stmt(p);
    }
    if p.at(TokenKind::Return) {
        return parse_return_stmt(p);
    }

    let m = p.open();
    expr_bp(p, 0);
    p.close(m, SyntaxKind::EXPR_STATEMENT);
}

fn parse_variable_name(p: &mut Parser) {
    if !p.eat(TokenKind::Variable) {
        p.expect(TokenKind::Identifier, "variable name");
    }
}

fn parse_var_decl_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🍰
    types::parse_type(p);
    parse_variable_name(p);
    p.close(m, SyntaxKind::VARIABLE_DECLARATION_STMT);
}

fn parse_frozen_decl_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🍦
    parse_variable_name(p);
    expr_bp(p, 0);
    p.close(m, SyntaxKind::FROZEN_DECLARATION_STMT);
}

fn parse_reassign_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🍮
    if p.eat(TokenKind::Mutable) {
        // 🖍 marks the assignment target as an instance variable rather
        // than a local.
        parse_variable_name(p);
        expr_bp(p, 0);
        p.close(m, SyntaxKind::INSTANCE_VARIABLE_ASSIGNMENT_STMT);
    } else {
        parse_variable_name(p);
        expr_bp(p, 0);
        p.close(m, SyntaxKind::VARIABLE_ASSIGNMENT_STMT);
    }
}

fn parse_if_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🍊
    expr_bp(p, 0);
    parse_block(p);
    while p.at(TokenKind::ElseIf) {
        let c = p.open();
        p.advance();
        expr_bp(p, 0);
        parse_block(p);
        p.close(c, SyntaxKind::ELSE_IF_CLAUSE);
    }
    if p.at(TokenKind::Else) {
        let c = p.open();
        p.advance();
        parse_block(p);
        p.close(c, SyntaxKind::ELSE_CLAUSE);
    }
    p.close(m, SyntaxKind::IF_STMT);
}

fn parse_while_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🔁
    expr_bp(p, 0);
    parse_block(p);
    p.close(m, SyntaxKind::REPEAT_WHILE_STMT);
}

fn parse_for_in_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🔂
    parse_variable_name(p);
    expr_bp(p, 0);
    parse_block(p);
    p.close(m, SyntaxKind::FOR_IN_STMT);
}

fn parse_error_handler_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🥑
    parse_variable_name(p);
    expr_bp(p, 0);
    parse_block(p);
    p.close(m, SyntaxKind::ERROR_HANDLER_STMT);
}

fn parse_superinitializer_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🐐
    p.advance(); // 🆕
    if p.at(TokenKind::Identifier) {
        p.advance(); // named initializer
    }
    parse_arg_list(p);
    p.close(m, SyntaxKind::SUPERINITIALIZER_STMT);
}

fn parse_raise_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🚨
    expr_bp(p, 0);
    p.close(m, SyntaxKind::RAISE_STMT);
}

fn parse_return_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // 🍎
    if !p.at(TokenKind::BlockEnd) && !p.at(TokenKind::EndOfFile) {
        expr_bp(p, 0);
    }
    p.close(m, SyntaxKind::RETURN_STMT);
}

// ── Expressions (Pratt) ──

pub(crate) fn parse_expr(p: &mut Parser) {
    expr_bp(p, 0);
}

fn is_method_name_candidate(p: &Parser) -> bool {
    if p.at(TokenKind::Variable) {
        return true;
    }
    p.at(TokenKind::Identifier) && !identifiers::is_reserved_marker(p.current_value())
}

fn expr_bp(p: &mut Parser, min_bp: u8) -> MarkClosed {
    let mut lhs = lhs(p);

    loop {
        if p.at(TokenKind::Operator) {
            let op = p.current_value().to_string();
            let Some(bp) = operators::precedence_of(&op) else { break };
            if bp < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // operator
            expr_bp(p, bp + 1);
            lhs = p.close(m, SyntaxKind::BINARY_OPERATOR_EXPR);
            continue;
        }

        if p.at(TokenKind::Call) {
            if operators::PREC_CALL < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // ⁉️
            parse_arg_list(p);
            lhs = p.close(m, SyntaxKind::CALLABLE_CALL_EXPR);
            continue;
        }

        if p.at_value(identifiers::CONDITIONAL_ASSIGNMENT) {
            if operators::PREC_COMPARISON < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // 🍺
            expr_bp(p, operators::PREC_COMPARISON + 1);
            lhs = p.close(m, SyntaxKind::CONDITIONAL_ASSIGNMENT_EXPR);
            continue;
        }

        if operators::PREC_CALL >= min_bp && is_method_name_candidate(p) {
            let m = p.open_before(lhs);
            p.advance(); // method name
            if p.at(TokenKind::Generic) {
                parse_generic_arg_list(p);
            }
            parse_arg_list(p);
            lhs = p.close(m, SyntaxKind::METHOD_EXPR);
            continue;
        }

        break;
    }

    lhs
}

fn lhs(p: &mut Parser) -> MarkClosed {
    if p.at_value(identifiers::IS_NOTHINGNESS) {
        let m = p.open();
        p.advance();
        expr_bp(p, PREC_PREFIX);
        return p.close(m, SyntaxKind::IS_NOTHINGNESS_EXPR);
    }
    if p.at_value(identifiers::IS_ERROR) {
        let m = p.open();
        p.advance();
        expr_bp(p, PREC_PREFIX);
        return p.close(m, SyntaxKind::IS_ERROR_EXPR);
    }
    if p.at_value(identifiers::UNWRAP) {
        let m = p.open();
        p.advance();
        expr_bp(p, PREC_PREFIX);
        return p.close(m, SyntaxKind::UNWRAP_EXPR);
    }
    if p.at_value(identifiers::CAST) {
        let m = p.open();
        p.advance();
        types::parse_type(p);
        expr_bp(p, PREC_PREFIX);
        return p.close(m, SyntaxKind::CAST_EXPR);
    }
    if p.at_value(identifiers::META_TYPE_INSTANTIATION) {
        let m = p.open();
        p.advance();
        types::parse_type(p);
        parse_arg_list(p);
        return p.close(m, SyntaxKind::META_TYPE_INSTANTIATION_EXPR);
    }
    if p.at_value(identifiers::META_TYPE_FROM_INSTANCE) {
        let m = p.open();
        p.advance();
        expr_bp(p, PREC_PREFIX);
        return p.close(m, SyntaxKind::META_TYPE_FROM_INSTANCE_EXPR);
    }
    if p.at_value(identifiers::CONCATENATE) {
        let m = p.open();
        p.advance();
        while !p.at_value(identifiers::CONCATENATE) && !p.at(TokenKind::EndOfFile) {
            expr_bp(p, 0);
        }
        if !p.eat(TokenKind::Identifier) {
            p.error_missing_closer("🔀", "🔀");
        }
        return p.close(m, SyntaxKind::CONCATENATE_EXPR);
    }
    if p.at_value(identifiers::LIST_LITERAL) {
        let m = p.open();
        p.advance();
        while !p.at_value(identifiers::LIST_LITERAL) && !p.at(TokenKind::EndOfFile) {
            expr_bp(p, 0);
        }
        if !p.eat(TokenKind::Identifier) {
            p.error_missing_closer("🎒", "🎒");
        }
        return p.close(m, SyntaxKind::LIST_LITERAL);
    }
    if p.at_value(identifiers::DICTIONARY_LITERAL) {
        let m = p.open();
        p.advance();
        while !p.at_value(identifiers::DICTIONARY_LITERAL) && !p.at(TokenKind::EndOfFile) {
            let entry = p.open();
            expr_bp(p, 0);
            expr_bp(p, 0);
            p.close(entry, SyntaxKind::DICTIONARY_ENTRY);
        }
        if !p.eat(TokenKind::Identifier) {
            p.error_missing_closer("📇", "📇");
        }
        return p.close(m, SyntaxKind::DICTIONARY_LITERAL);
    }
    if p.at_value(identifiers::CAPTURE) {
        let m = p.open();
        p.advance(); // 🎣
        if p.at(TokenKind::SelectionOperator) {
            p.advance();
            types::parse_type(p);
            p.expect(TokenKind::Identifier, "type method name to capture");
            return p.close(m, SyntaxKind::CAPTURE_TYPE_METHOD_EXPR);
        }
        expr_bp(p, PREC_PREFIX);
        if !p.eat(TokenKind::Variable) {
            p.expect(TokenKind::Identifier, "method name to capture");
        }
        return p.close(m, SyntaxKind::CAPTURE_METHOD_EXPR);
    }
    if p.at(TokenKind::SelectionOperator) {
        let m = p.open();
        p.advance(); // 📣
        types::parse_type(p);
        p.expect(TokenKind::Identifier, "type method name");
        parse_arg_list(p);
        return p.close(m, SyntaxKind::TYPE_METHOD_EXPR);
    }
    if p.at(TokenKind::Super) {
        let m = p.open();
        p.advance(); // 🐐
        p.expect(TokenKind::Identifier, "super method name");
        parse_arg_list(p);
        return p.close(m, SyntaxKind::SUPER_METHOD_EXPR);
    }
    if p.at(TokenKind::New) {
        let m = p.open();
        p.advance(); // 🆕
        types::parse_type(p);
        if p.at(TokenKind::Identifier) {
            p.advance(); // named initializer
        }
        parse_arg_list(p);
        return p.close(m, SyntaxKind::INITIALIZATION_EXPR);
    }
    if p.at(TokenKind::This) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::THIS_EXPR);
    }
    if p.at(TokenKind::NoValue) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::NOTHINGNESS_LITERAL);
    }
    if p.at(TokenKind::BooleanTrue) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::TRUE_LITERAL);
    }
    if p.at(TokenKind::BooleanFalse) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::FALSE_LITERAL);
    }
    if p.at(TokenKind::Integer) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::INTEGER_LITERAL);
    }
    if p.at(TokenKind::Double) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::DOUBLE_LITERAL);
    }
    if p.at(TokenKind::Symbol) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::SYMBOL_LITERAL);
    }
    if p.at(TokenKind::String) {
        return parse_string_expr(p);
    }
    if p.at(TokenKind::GroupBegin) {
        let m = p.open();
        p.advance(); // 🤜
        expr_bp(p, 0);
        p.expect(TokenKind::GroupEnd, "🤛 closing a group");
        return p.close(m, SyntaxKind::GROUP_EXPR);
    }
    if p.at(TokenKind::BlockBegin) {
        return parse_closure_expr(p);
    }
    if p.at(TokenKind::Variable) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::GET_VARIABLE_EXPR);
    }
    if p.at(TokenKind::Identifier) {
        let m = p.open();
        p.advance();
        return p.close(m, SyntaxKind::GET_VARIABLE_EXPR);
    }

    let m = p.open();
    p.error_unexpected("expression");
    if !p.at(TokenKind::EndOfFile) && !p.at(TokenKind::BlockEnd) {
        p.advance();
    }
    p.close(m, SyntaxKind::ERROR_NODE)
}

fn parse_closure_expr(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // 🍇

    let params = p.open();
    while p.at(TokenKind::Variable) {
        p.advance();
    }
    p.close(params, SyntaxKind::PARAM_LIST);

    if p.eat(TokenKind::RightProductionOperator) {
        types::parse_type(p);
    }

    while !p.at(TokenKind::BlockEnd) && !p.at(TokenKind::EndOfFile) {
        parse_stmt(p);
    }
    p.expect(TokenKind::BlockEnd, "🍉 closing a closure");
    p.close(m, SyntaxKind::CLOSURE_EXPR)
}

fn parse_string_expr(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // opening String or BeginInterpolation segment

    if p.at(TokenKind::BeginInterpolation) {
        loop {
            match p.current() {
                TokenKind::MiddleInterpolation => {
                    p.advance();
                    expr_bp(p, 0);
                }
                TokenKind::EndInterpolation => {
                    p.advance();
                    expr_bp(p, 0);
                    break;
                }
                TokenKind::EndOfFile => {
                    p.error_missing_closer("string interpolation", "end of interpolated string");
                    break;
                }
                _ => expr_bp(p, 0),
            }
        }
        return p.close(m, SyntaxKind::INTERPOLATED_STRING);
    }

    p.close(m, SyntaxKind::STRING_LITERAL)
}

// ── Argument lists ──

pub(crate) fn parse_generic_arg_list(p: &mut Parser) {
    let m = p.open();
    while p.at(TokenKind::Generic) {
        p.advance(); // 🐚
        types::parse_type(p);
    }
    p.close(m, SyntaxKind::GENERIC_ARG_LIST);
}

pub(crate) fn parse_arg_list(p: &mut Parser) {
    let m = p.open();
    if p.at(TokenKind::Generic) {
        parse_generic_arg_list(p);
    }
    while !p.at(TokenKind::EndArgumentList)
        && !p.at(TokenKind::EndInterrogativeArgumentList)
        && !p.at(TokenKind::EndOfFile)
    {
        expr_bp(p, 0);
    }
    if p.at(TokenKind::EndInterrogativeArgumentList) {
        p.advance();
    } else if !p.eat(TokenKind::EndArgumentList) {
        p.error_missing_closer("call", "❗️ or ❓ closing an argument list");
    }
    p.close(m, SyntaxKind::ARG_LIST);
}

#[cfg(test)]
mod tests {
    use glyph_common::FileTable;
    use glyph_lexer::Lexer;

    use super::*;
    use crate::cst::GlyphLanguage;

    fn lex(src: &str) -> Vec<glyph_lexer::token::Token> {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        Lexer::new(src, file, false).map(|r| r.expect("lex ok")).collect()
    }

    fn parse_expr_src(src: &str) -> rowan::SyntaxNode<GlyphLanguage> {
        let tokens = lex(src);
        let mut p = Parser::new(tokens);
        let m = p.open();
        expr_bp(&mut p, 0);
        p.close(m, SyntaxKind::DOCUMENT);
        let (green, errors) = p.build_tree();
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        rowan::SyntaxNode::new_root(green)
    }

    #[test]
    fn parses_additive_binary_expr() {
        let root = parse_expr_src("1➕2");
        assert!(format!("{root:?}").contains("BINARY_OPERATOR_EXPR"));
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        // 1➕2✖3 should parse as 1➕(2✖3): exactly one top-level BINARY_OPERATOR_EXPR
        // wraps an inner one, both present, outer operator token is ➕.
        let root = parse_expr_src("1➕2✖3");
        let text = format!("{root:?}");
        assert!(text.contains("BINARY_OPERATOR_EXPR"));
    }

    #[test]
    fn parses_variable_reference() {
        let root = parse_expr_src("foo");
        assert!(format!("{root:?}").contains("GET_VARIABLE_EXPR"));
    }

    #[test]
    fn parses_method_call_chain() {
        let tokens = lex("x foo 1❗ bar❗");
        let mut p = Parser::new(tokens);
        let m = p.open();
        expr_bp(&mut p, 0);
        p.close(m, SyntaxKind::DOCUMENT);
        let (green, errors) = p.build_tree();
        assert!(errors.is_empty(), "{errors:?}");
        let root = rowan::SyntaxNode::new_root(green);
        let text = format!("{root:?}");
        assert!(text.contains("METHOD_EXPR"));
    }

    #[test]
    fn parses_if_statement_with_else() {
        let tokens = lex("🍊👍🍇🍎1🍉🙅🍇🍎2🍉");
        let mut p = Parser::new(tokens);
        let m = p.open();
        parse_stmt(&mut p);
        p.close(m, SyntaxKind::DOCUMENT);
        let (green, errors) = p.build_tree();
        assert!(errors.is_empty(), "{errors:?}");
        let root = rowan::SyntaxNode::new_root(green);
        let text = format!("{root:?}");
        assert!(text.contains("IF_STMT"));
        assert!(text.contains("ELSE_CLAUSE"));
    }

    #[test]
    fn method_call_does_not_swallow_following_reassignment() {
        let tokens = lex("x foo❗ 🍮y 1");
        let mut p = Parser::new(tokens);
        let m = p.open();
        parse_stmt(&mut p);
        parse_stmt(&mut p);
        p.close(m, SyntaxKind::DOCUMENT);
        let (green, errors) = p.build_tree();
        assert!(errors.is_empty(), "{errors:?}");
        let root = rowan::SyntaxNode::new_root(green);
        let text = format!("{root:?}");
        assert!(text.contains("METHOD_EXPR"));
        assert!(text.contains("VARIABLE_ASSIGNMENT_STMT"));
    }
}
