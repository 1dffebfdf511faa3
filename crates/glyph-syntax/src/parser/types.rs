//! Type-expression grammar.
//!
//! Grounded directly on `AbstractParser::parseType`
//! (`EmojicodeCompiler/Parsing/AbstractParser.cpp`): meta-type marker first,
//! then an optional optional-marker, then dispatch on multi-protocol/error/
//! callable/nominal. Generic arguments are a greedy `🐚 Type` sequence (the
//! original bounds this by the type definition's declared parameter count;
//! at the pure-syntax layer we have no such definition yet, so we parse
//! every `🐚 Type` pair present and let the semantic layer validate arity).

use glyph_lexer::identifiers;
use glyph_lexer::token::TokenKind;

use super::Parser;
use crate::syntax_kind::SyntaxKind;

pub(crate) fn parse_type(p: &mut Parser) {
    if p.at_value(identifiers::META_TYPE_MARKER) {
        let m = p.open();
        p.advance(); // 🔲
        parse_type(p);
        p.close(m, SyntaxKind::META_TYPE);
        return;
    }

    if p.at_value(identifiers::OPTIONAL_MARKER) {
        let m = p.open();
        p.advance(); // 🍬
        parse_type_body(p);
        p.close(m, SyntaxKind::OPTIONAL_TYPE);
        return;
    }

    parse_type_body(p);
}

fn parse_type_body(p: &mut Parser) {
    let m = p.open();

    if p.at_value(identifiers::MULTI_PROTOCOL_DELIM) {
        p.advance(); // 🍱
        while !p.at_value(identifiers::MULTI_PROTOCOL_DELIM) && !p.at(TokenKind::EndOfFile) {
            parse_type(p);
        }
        p.expect(TokenKind::Identifier, "closing 🍱");
        p.close(m, SyntaxKind::MULTI_PROTOCOL_TYPE);
        return;
    }

    if p.at(TokenKind::Error) {
        p.advance(); // 🚨
        parse_type(p); // error-enum type
        parse_type(p); // success type
        p.close(m, SyntaxKind::ERROR_TYPE);
        return;
    }

    if p.at(TokenKind::BlockBegin) {
        p.advance(); // 🍇
        let params = p.open();
        while !p.at(TokenKind::BlockEnd) && !p.at(TokenKind::RightProductionOperator) && !p.at(TokenKind::EndOfFile) {
            parse_type(p);
        }
        p.close(params, SyntaxKind::PARAM_TYPE_LIST);
        if p.eat(TokenKind::RightProductionOperator) {
            parse_type(p);
        }
        if !p.expect(TokenKind::BlockEnd, "🍉 closing a callable type") {
            p.error_missing_closer("🍇", "🍉");
        }
        p.close(m, SyntaxKind::CALLABLE_TYPE);
        return;
    }

    // Nominal type: an Identifier or Variable type name plus a greedy
    // generic-argument list.
    if p.at(TokenKind::Variable) {
        p.advance();
    } else {
        p.expect(TokenKind::Identifier, "type name");
    }

    if p.at(TokenKind::Generic) {
        let args = p.open();
        while p.at(TokenKind::Generic) {
            p.advance(); // 🐚
            parse_type(p);
        }
        p.close(args, SyntaxKind::GENERIC_ARG_LIST);
    }

    p.close(m, SyntaxKind::NOMINAL_TYPE);
}
