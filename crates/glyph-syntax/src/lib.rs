//! Lossless concrete syntax tree and parser for the glyph language (spec
//! §4.2), grounded on `snow-parser::lib`'s rowan-first design: the parser
//! never throws source text away, so the green tree round-trips to the
//! original text even in the presence of parse errors.

pub mod ast;
pub mod cst;
pub mod error;
pub mod parser;
pub mod syntax_kind;

use glyph_common::FileId;

pub use cst::{GlyphLanguage, SyntaxElement, SyntaxNode, SyntaxToken};
pub use error::{ParseError, ParseErrorKind};
pub use syntax_kind::SyntaxKind;

/// The result of parsing one source file: a lossless green tree plus
/// whatever errors were recovered from along the way. A non-empty `errors`
/// does not mean `green` is unusable — error nodes stand in for the
/// unparseable spans so the rest of the tree is still complete.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    pub errors: Vec<ParseError>,
}

impl Parse {
    pub fn syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn document(&self) -> ast::Document {
        ast::Document::cast(self.syntax_node()).expect("parse always produces a DOCUMENT root")
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Lexes and parses one source file. `file` is
/// the interned identity used to stamp every token/diagnostic's
/// [`glyph_common::SourcePosition`].
#[tracing::instrument(skip(source), fields(file = ?file))]
pub fn parse(source: &str, file: FileId) -> Parse {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in glyph_lexer::Lexer::new(source, file, false) {
        match result {
            Ok(token) => tokens.push(token),
            Err(lex_error) => errors.push(ParseError::from(lex_error)),
        }
    }

    let mut p = parser::Parser::new(tokens);
    parser::declarations::parse_document(&mut p);
    let (green, mut parse_errors) = p.build_tree();
    errors.append(&mut parse_errors);

    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "parse completed with errors");
    }

    Parse { green, errors }
}

impl From<glyph_lexer::error::LexError> for ParseError {
    fn from(e: glyph_lexer::error::LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(e.kind), e.position)
    }
}

#[cfg(test)]
mod tests {
    use glyph_common::FileTable;

    use super::*;

    #[test]
    fn parses_minimal_document() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let parsed = parse("🐇Animal🍇🍉", file);
        assert!(parsed.ok(), "{:?}", parsed.errors);
        let doc = parsed.document();
        assert_eq!(doc.classes().count(), 1);
    }

    #[test]
    fn reports_lex_errors_without_panicking() {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        let parsed = parse("📦", file);
        // An import missing its operands is a parse error, not a panic.
        assert!(!parsed.ok());
    }
}
