//! One-token-lookahead wrapper around [`crate::Lexer`]. Transparently drops `LineBreak`, `BlankLine`,
//! `SinglelineComment` and `MultilineComment`; documentation comments pass
//! through so the parser can attach them to the following declaration.
//!
//! Grounded on `mesh-parser`'s lexer-wrapping lookahead buffer, generalised
//! to carry the "skipped a blank line" flag the parser needs for statement-
//! termination heuristics.

use std::fmt;

use glyph_common::SourcePosition;

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::Lexer;

#[derive(Clone, Debug, PartialEq)]
pub enum StreamError {
    UnexpectedToken { expected: &'static str, found: TokenKind, position: SourcePosition },
    UnexpectedEnd { expected: &'static str, position: SourcePosition },
    Lex(LexError),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::UnexpectedToken { expected, found, position } => {
                write!(f, "{position}: expected {expected}, found {found}")
            }
            StreamError::UnexpectedEnd { expected, position } => {
                write!(f, "{position}: expected {expected}, found end of input")
            }
            StreamError::Lex(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<LexError> for StreamError {
    fn from(e: LexError) -> Self {
        StreamError::Lex(e)
    }
}

fn is_dropped_trivia(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LineBreak | TokenKind::BlankLine | TokenKind::SinglelineComment | TokenKind::MultilineComment
    )
}

pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    lookahead: Option<Token>,
    last_position: SourcePosition,
    skipped_blank_line: bool,
    eof_position: Option<SourcePosition>,
}

impl<'src> TokenStream<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Result<Self, LexError> {
        let last_position = lexer.position();
        let mut stream = TokenStream {
            lexer,
            lookahead: None,
            last_position,
            skipped_blank_line: false,
            eof_position: None,
        };
        stream.fill()?;
        Ok(stream)
    }

    fn fill(&mut self) -> Result<(), LexError> {
        loop {
            match self.lexer.next() {
                Some(Ok(token)) => {
                    if is_dropped_trivia(token.kind) {
                        continue;
                    }
                    self.lookahead = Some(token);
                    return Ok(());
                }
                Some(Err(e)) => return Err(e),
                None => {
                    self.eof_position = Some(self.lexer.position());
                    self.lookahead = None;
                    return Ok(());
                }
            }
        }
    }

    /// Peeks the next significant token without consuming it. Returns
    /// `None` at end of input.
    pub fn peek(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.lookahead.as_ref().map(|t| t.kind).unwrap_or(TokenKind::EndOfFile)
    }

    /// Consumes and returns the next significant token, refilling
    /// lookahead. Resets and reports whether a blank line was skipped
    /// immediately before the token just returned.
    pub fn advance(&mut self) -> Result<Option<Token>, LexError> {
        self.skipped_blank_line = self.lexer_skipped_blank_line();
        let current = self.lookahead.take();
        if let Some(t) = &current {
            self.last_position = t.position;
        }
        self.fill()?;
        Ok(current)
    }

    fn lexer_skipped_blank_line(&mut self) -> bool {
        std::mem::take(&mut self.lexer.skipped_blank_line)
    }

    /// Whether a blank line preceded the token most recently returned by
    /// [`Self::advance`].
    pub fn skipped_blank_line(&self) -> bool {
        self.skipped_blank_line
    }

    fn current_position(&self) -> SourcePosition {
        self.lookahead.as_ref().map(|t| t.position).unwrap_or_else(|| {
            self.eof_position.unwrap_or(self.last_position)
        })
    }

    /// Consumes the next token only if it has `kind`, else errors without
    /// advancing.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, StreamError> {
        match &self.lookahead {
            Some(t) if t.kind == kind => Ok(self.advance()?.expect("just checked Some")),
            Some(t) => Err(StreamError::UnexpectedToken { expected, found: t.kind, position: t.position }),
            None => Err(StreamError::UnexpectedEnd { expected, position: self.current_position() }),
        }
    }

    /// Consumes the next token unconditionally, erroring only at end of
    /// input.
    pub fn bump(&mut self, expected: &'static str) -> Result<Token, StreamError> {
        if self.lookahead.is_none() {
            return Err(StreamError::UnexpectedEnd { expected, position: self.current_position() });
        }
        Ok(self.advance()?.expect("checked Some above"))
    }

    pub fn is_at_end(&self) -> bool {
        self.lookahead.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_common::FileTable;

    fn stream(source: &'static str) -> TokenStream<'static> {
        let table = FileTable::new();
        let file = table.intern("test.glyph");
        TokenStream::new(Lexer::new(source, file, false)).expect("lex error")
    }

    #[test]
    fn drops_comments_and_blank_lines() {
        let mut s = stream("💬 hi\n\n🐇");
        assert_eq!(s.peek_kind(), TokenKind::Class);
        let t = s.advance().unwrap().unwrap();
        assert_eq!(t.kind, TokenKind::Class);
        assert!(s.skipped_blank_line());
    }

    #[test]
    fn expect_reports_mismatch_without_consuming() {
        let mut s = stream("🐇");
        let err = s.expect(TokenKind::BlockBegin, "block begin").unwrap_err();
        assert!(matches!(err, StreamError::UnexpectedToken { expected: "block begin", .. }));
        assert_eq!(s.peek_kind(), TokenKind::Class);
    }

    #[test]
    fn unexpected_end_at_eof() {
        let mut s = stream("");
        let err = s.expect(TokenKind::Class, "class").unwrap_err();
        assert!(matches!(err, StreamError::UnexpectedEnd { .. }));
    }
}
