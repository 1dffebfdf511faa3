//! Document and type-definition grammar: `document := { import |
//! typedef | extension | include | start-flag | version | require-binary |
//! alias }`, `class := "🐇" TypeName [generic-params] [supertype] body`,
//! `body := "🍇" { member } "🍉"`, `member := instance-var | method |
//! type-method | initializer | protocol-conformance | enum-value`.
//!
//! §3.1's token list has no dedicated `Method`/`Initializer`/`TypeMethod`
//! keyword kind, so this grammar reuses two tokens that already carry a
//! fitting meaning at the expression layer: `New` (`🆕`) opens an
//! initializer definition exactly as it opens an initialization expression
//! ([`super::expressions`]), and `SelectionOperator` (`📣`) opens a
//! type-method definition exactly as it opens a type-method invocation. A
//! plain instance method has no leading marker at all — just its name.
//! `Protocol` (`🐊`) as a *member* opener (rather than a top-level typedef
//! keyword) starts a protocol-conformance block. Which alternative a bare
//! member belongs to is otherwise unambiguous once the enclosing
//! definition's [`MemberKind`] is known (enum bodies only ever hold
//! enum-values; protocol bodies only ever hold method signatures without a
//! block).

use glyph_lexer::identifiers;
use glyph_lexer::token::TokenKind;

use super::expressions::parse_block;
use super::types;
use super::{MarkClosed, MarkOpened, Parser};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    Class,
    Protocol,
    Enum,
}

pub fn parse_document(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    while !p.at(TokenKind::EndOfFile) {
        parse_top_level_item(p);
    }
    p.close(m, SyntaxKind::DOCUMENT)
}

fn eat_leading_docs(p: &mut Parser) {
    while p.at(TokenKind::DocumentationComment) || p.at(TokenKind::PackageDocumentationComment) {
        p.advance();
    }
}

/// Decorators: zero or more of `☣` (unsafe), `🖍` (mutating) and `🏷`
/// (a general decorator token, optionally followed by an `Identifier`
/// naming which one — `public`/`private`/`override`/`required`/
/// `deprecated`/`final`). The semantic layer, not the parser, resolves the
/// decorator identifier's meaning.
fn parse_decorators(p: &mut Parser) {
    loop {
        if p.eat(TokenKind::Unsafe) {
            continue;
        }
        if p.eat(TokenKind::Mutable) {
            continue;
        }
        if p.at(TokenKind::Decorator) {
            p.advance();
            p.eat(TokenKind::Identifier);
            continue;
        }
        break;
    }
}

fn parse_name_token(p: &mut Parser) {
    if !p.eat(TokenKind::Variable) {
        p.expect(TokenKind::Identifier, "name");
    }
}

/// A method name is an `Identifier`/`Variable`, or an `Operator` token.
fn parse_method_name(p: &mut Parser) {
    if p.eat(TokenKind::Variable) || p.eat(TokenKind::Operator) {
        return;
    }
    p.expect(TokenKind::Identifier, "method name");
}

fn parse_top_level_item(p: &mut Parser) {
    eat_leading_docs(p);
    let m = p.open();
    parse_decorators(p);

    match p.current() {
        TokenKind::Package => parse_import_decl(p, m),
        TokenKind::Include => parse_include_decl(p, m),
        TokenKind::StartFlag => parse_start_flag_decl(p, m),
        TokenKind::Version => parse_version_decl(p, m),
        TokenKind::RequireBinary => parse_require_binary_decl(p, m),
        TokenKind::Alias => parse_alias_decl(p, m),
        TokenKind::Class => parse_class_def(p, m),
        TokenKind::ValueType => parse_value_type_def(p, m),
        TokenKind::Protocol => parse_protocol_def(p, m),
        TokenKind::Enumeration => parse_enum_def(p, m),
        TokenKind::Extension => parse_extension_def(p, m),
        _ => {
            p.error_unexpected("a top-level declaration");
            if !p.at(TokenKind::EndOfFile) {
                p.advance();
            }
            p.close(m, SyntaxKind::ERROR_NODE);
        }
    }
}

fn parse_import_decl(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 📦
    p.expect(TokenKind::Variable, "package name");
    p.expect(TokenKind::Identifier, "imported symbol");
    p.close(m, SyntaxKind::IMPORT_DECL);
}

fn parse_include_decl(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 📜
    p.expect(TokenKind::String, "include path");
    p.close(m, SyntaxKind::INCLUDE_DECL);
}

fn parse_start_flag_decl(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🏁
    parse_block(p);
    p.close(m, SyntaxKind::START_FLAG_DECL);
}

fn parse_version_decl(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🔖
    p.expect(TokenKind::Integer, "major version");
    p.expect(TokenKind::Integer, "minor version");
    p.close(m, SyntaxKind::VERSION_DECL);
}

fn parse_require_binary_decl(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🔌
    p.expect(TokenKind::String, "required binary name");
    p.close(m, SyntaxKind::REQUIRE_BINARY_DECL);
}

fn parse_alias_decl(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🔗
    parse_name_token(p); // alias name
    parse_name_token(p); // aliased name
    p.close(m, SyntaxKind::ALIAS_DECL);
}

// ── Generic parameters and supertype ──

fn parse_generic_params(p: &mut Parser) {
    if !p.at(TokenKind::Generic) {
        return;
    }
    let m = p.open();
    while p.at(TokenKind::Generic) {
        p.advance(); // 🐚
        parse_name_token(p); // parameter name
        if p.eat(TokenKind::RightProductionOperator) {
            types::parse_type(p); // constraint
        }
        // `☣` immediately after a parameter marks it as rejecting boxing
        //.
        p.eat(TokenKind::Unsafe);
    }
    p.close(m, SyntaxKind::GENERIC_PARAM_LIST);
}

fn parse_supertype_clause(p: &mut Parser) {
    if !p.at(TokenKind::RightProductionOperator) {
        return;
    }
    let m = p.open();
    p.advance(); // ➡
    types::parse_type(p);
    p.close(m, SyntaxKind::SUPERTYPE_CLAUSE);
}

// ── Type definitions ──

fn parse_class_def(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🐇
    parse_name_token(p);
    parse_generic_params(p);
    parse_supertype_clause(p);
    parse_body(p, MemberKind::Class);
    p.close(m, SyntaxKind::CLASS_DEF);
}

fn parse_value_type_def(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🕊
    parse_name_token(p);
    parse_generic_params(p);
    parse_body(p, MemberKind::Class);
    p.close(m, SyntaxKind::VALUE_TYPE_DEF);
}

fn parse_protocol_def(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🐊
    parse_name_token(p);
    parse_generic_params(p);
    parse_body(p, MemberKind::Protocol);
    p.close(m, SyntaxKind::PROTOCOL_DEF);
}

fn parse_enum_def(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🔘
    parse_name_token(p);
    parse_body(p, MemberKind::Enum);
    p.close(m, SyntaxKind::ENUM_DEF);
}

fn parse_extension_def(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🔧
    types::parse_type(p); // extended type, possibly with generic args
    parse_body(p, MemberKind::Class);
    p.close(m, SyntaxKind::EXTENSION_DEF);
}

fn parse_body(p: &mut Parser, ctx: MemberKind) -> MarkClosed {
    let m = p.open();
    p.expect(TokenKind::BlockBegin, "🍇 opening a body");
    while !p.at(TokenKind::BlockEnd) && !p.at(TokenKind::EndOfFile) {
        parse_member(p, ctx);
    }
    p.expect(TokenKind::BlockEnd, "🍉 closing a body");
    p.close(m, SyntaxKind::BODY)
}

// ── Members ──

fn parse_member(p: &mut Parser, ctx: MemberKind) {
    eat_leading_docs(p);
    let m = p.open();
    parse_decorators(p);

    if ctx == MemberKind::Enum {
        parse_enum_value(p, m);
        return;
    }

    if p.at_value(identifiers::VAR_DECL) {
        p.advance(); // 🍰
        types::parse_type(p);
        parse_name_token(p);
        p.close(m, SyntaxKind::INSTANCE_VARIABLE);
        return;
    }

    if p.at(TokenKind::New) {
        parse_initializer_def(p, m, ctx);
        return;
    }

    if p.at(TokenKind::SelectionOperator) {
        parse_type_method_def(p, m, ctx);
        return;
    }

    if ctx == MemberKind::Class && p.at(TokenKind::Protocol) {
        parse_protocol_conformance(p, m);
        return;
    }

    parse_method_def(p, m, ctx);
}

fn parse_enum_value(p: &mut Parser, m: MarkOpened) {
    parse_name_token(p);
    p.eat(TokenKind::Integer); // explicit backing value, optional
    p.close(m, SyntaxKind::ENUM_VALUE_DEF);
}

fn parse_param_list(p: &mut Parser) {
    let m = p.open();
    while !p.at(TokenKind::RightProductionOperator)
        && !p.at(TokenKind::Error)
        && !p.at(TokenKind::BlockBegin)
        && !p.at(TokenKind::EndOfFile)
    {
        let param = p.open();
        // The "baby bottle" prefix: auto-assigns this
        // initializer argument to the instance variable of the same name.
        p.eat(TokenKind::Mutable);
        parse_name_token(p);
        types::parse_type(p);
        p.close(param, SyntaxKind::PARAM);
    }
    p.close(m, SyntaxKind::PARAM_LIST);
}

fn parse_return_clause(p: &mut Parser) {
    if p.at(TokenKind::Error) {
        let c = p.open();
        p.advance(); // 🚨
        types::parse_type(p);
        p.close(c, SyntaxKind::ERROR_TYPE_CLAUSE);
    }
    if p.eat(TokenKind::RightProductionOperator) {
        let c = p.open();
        types::parse_type(p);
        p.close(c, SyntaxKind::RETURN_TYPE_CLAUSE);
    }
}

fn parse_initializer_def(p: &mut Parser, m: MarkOpened, ctx: MemberKind) {
    p.advance(); // 🆕
    p.eat(TokenKind::Identifier); // named initializer, optional
    parse_generic_params(p);
    parse_param_list(p);
    parse_return_clause(p);
    if ctx != MemberKind::Protocol {
        parse_block(p);
    }
    p.close(m, SyntaxKind::INITIALIZER_DEF);
}

fn parse_type_method_def(p: &mut Parser, m: MarkOpened, ctx: MemberKind) {
    p.advance(); // 📣
    parse_method_name(p);
    parse_generic_params(p);
    parse_param_list(p);
    parse_return_clause(p);
    if ctx != MemberKind::Protocol {
        parse_block(p);
    }
    p.close(m, SyntaxKind::TYPE_METHOD_DEF);
}

fn parse_method_def(p: &mut Parser, m: MarkOpened, ctx: MemberKind) {
    parse_method_name(p);
    parse_generic_params(p);
    parse_param_list(p);
    parse_return_clause(p);
    if ctx != MemberKind::Protocol {
        parse_block(p);
    }
    p.close(m, SyntaxKind::METHOD_DEF);
}

fn parse_protocol_conformance(p: &mut Parser, m: MarkOpened) {
    p.advance(); // 🐊
    types::parse_type(p); // conformed-to protocol, possibly generic
    let body = p.open();
    p.expect(TokenKind::BlockBegin, "🍇 opening a conformance body");
    while !p.at(TokenKind::BlockEnd) && !p.at(TokenKind::EndOfFile) {
        parse_member(p, MemberKind::Class);
    }
    p.expect(TokenKind::BlockEnd, "🍉 closing a conformance body");
    p.close(body, SyntaxKind::BODY);
    p.close(m, SyntaxKind::PROTOCOL_CONFORMANCE);
}

#[cfg(test)]
mod tests {
    use glyph_common::FileTable;
    use glyph_lexer::Lexer;

    use super::*;

    fn lex(src: &str) -> Vec<glyph_lexer::token::Token> {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        Lexer::new(src, file, false).map(|r| r.expect("lex ok")).collect()
    }

    fn parse(src: &str) -> (rowan::SyntaxNode<crate::cst::GlyphLanguage>, Vec<crate::error::ParseError>) {
        let tokens = lex(src);
        let mut p = Parser::new(tokens);
        parse_document(&mut p);
        let (green, errors) = p.build_tree();
        (rowan::SyntaxNode::new_root(green), errors)
    }

    #[test]
    fn parses_empty_class() {
        let (root, errors) = parse("🐇Animal🍇🍉");
        assert!(errors.is_empty(), "{errors:?}");
        let text = format!("{root:?}");
        assert!(text.contains("CLASS_DEF"));
        assert!(text.contains("BODY"));
    }

    #[test]
    fn parses_instance_variable() {
        let (root, errors) = parse("🐇Animal🍇🍰Integer age🍉");
        assert!(errors.is_empty(), "{errors:?}");
        assert!(format!("{root:?}").contains("INSTANCE_VARIABLE"));
    }

    #[test]
    fn parses_method_with_return_type() {
        let (root, errors) = parse("🐇Animal🍇legs➡Integer🍇🍎0🍉🍉");
        assert!(errors.is_empty(), "{errors:?}");
        let text = format!("{root:?}");
        assert!(text.contains("METHOD_DEF"));
        assert!(text.contains("RETURN_TYPE_CLAUSE"));
    }

    #[test]
    fn parses_initializer() {
        let (root, errors) = parse("🐇Animal🍇🆕🖍Integer age🍇🍉🍉");
        assert!(errors.is_empty(), "{errors:?}");
        assert!(format!("{root:?}").contains("INITIALIZER_DEF"));
    }

    #[test]
    fn parses_protocol_with_signature_only() {
        let (root, errors) = parse("🐊Flyer🍇fly➡Integer🍉");
        assert!(errors.is_empty(), "{errors:?}");
        let text = format!("{root:?}");
        assert!(text.contains("PROTOCOL_DEF"));
        assert!(text.contains("METHOD_DEF"));
        assert!(!text.contains("BLOCK"));
    }

    #[test]
    fn parses_enum_values() {
        let (root, errors) = parse("🔘Color🍇red green blue🍉");
        assert!(errors.is_empty(), "{errors:?}");
        let text = format!("{root:?}");
        assert!(text.contains("ENUM_DEF"));
        assert!(text.contains("ENUM_VALUE_DEF"));
    }

    #[test]
    fn parses_import_and_version() {
        let (root, errors) = parse("📦foo 🧩🔖1 0");
        assert!(errors.is_empty(), "{errors:?}");
        let text = format!("{root:?}");
        assert!(text.contains("IMPORT_DECL"));
        assert!(text.contains("VERSION_DECL"));
    }
}
