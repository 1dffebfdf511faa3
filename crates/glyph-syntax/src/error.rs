//! `ParseError` taxonomy: unexpected token, missing closer,
//! misplaced documentation comment. Hand-written `Display`/`Error`, same
//! idiom as [`glyph_lexer::error::LexError`] — no `thiserror`.

use std::fmt;

use glyph_common::SourcePosition;
use glyph_lexer::error::LexErrorKind;
use glyph_lexer::stream::StreamError;
use glyph_lexer::token::TokenKind;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: &'static str, found: TokenKind },
    MissingCloser { opener: &'static str, expected: &'static str },
    MisplacedDocumentationComment,
    UnexpectedEnd { expected: &'static str },
    Lex(LexErrorKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: SourcePosition,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: SourcePosition) -> Self {
        ParseError { kind, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::MissingCloser { opener, expected } => {
                write!(f, "unclosed {opener}: expected {expected}")
            }
            ParseErrorKind::MisplacedDocumentationComment => {
                write!(f, "documentation comment does not precede a declaration")
            }
            ParseErrorKind::UnexpectedEnd { expected } => {
                write!(f, "expected {expected}, found end of input")
            }
            ParseErrorKind::Lex(kind) => match kind {
                LexErrorKind::UnexpectedEndOfFile => write!(f, "unexpected end of file"),
                LexErrorKind::UnrecognizedEscape { sequence } => {
                    write!(f, "unrecognized escape sequence \\{sequence}")
                }
                LexErrorKind::InvalidEmojiCluster { reason } => write!(f, "invalid emoji cluster: {reason}"),
                LexErrorKind::MalformedNumber { reason } => write!(f, "malformed number literal: {reason}"),
            },
        }
    }
}

impl std::error::Error for ParseError {}

impl From<StreamError> for ParseError {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::UnexpectedToken { expected, found, position } => {
                ParseError::new(ParseErrorKind::UnexpectedToken { expected, found }, position)
            }
            StreamError::UnexpectedEnd { expected, position } => {
                ParseError::new(ParseErrorKind::UnexpectedEnd { expected }, position)
            }
            StreamError::Lex(lex_err) => {
                ParseError::new(ParseErrorKind::Lex(lex_err.kind.clone()), lex_err.position)
            }
        }
    }
}
